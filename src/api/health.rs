use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::services::CredentialService;

/// Liveness report. `status` is `degraded` when the credentials file
/// cannot be read.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    /// Records currently stored, absent when the file is unreadable
    pub users: Option<usize>,
    pub timestamp: i64,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Credentials file unreadable", body = HealthResponse)
    )
)]
pub async fn health_check(credentials: web::Data<CredentialService>) -> HttpResponse {
    let users = match credentials.store().load().await {
        Ok(records) => Some(records.len()),
        Err(e) => {
            log::error!("❌ Health check could not read credentials: {}", e);
            None
        }
    };

    let report = HealthResponse {
        status: if users.is_some() { "healthy" } else { "degraded" }.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        users,
        timestamp: chrono::Utc::now().timestamp(),
    };

    if report.users.is_some() {
        HttpResponse::Ok().json(report)
    } else {
        HttpResponse::ServiceUnavailable().json(report)
    }
}
