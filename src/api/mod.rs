pub mod auth;
pub mod health;
pub mod metrics;
pub mod swagger;

use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Mounts every route. Callers provide `web::Data<CredentialService>` and
/// `web::Data<ViewRenderer>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let form_config = web::FormConfig::default().error_handler(|err, req| {
        log::warn!("⚠️  Rejected form on {} {}: {}", req.method(), req.path(), err);
        err.into()
    });

    cfg.app_data(form_config)
        .service(
            SwaggerUi::new("/swagger-ui/{_:.*}")
                .url("/api-docs/openapi.json", swagger::ApiDoc::openapi()),
        )
        // Health check
        .route("/health", web::get().to(health::health_check))
        // Metrics
        .route("/metrics", web::get().to(metrics::get_metrics))
        // Pages
        .route("/", web::get().to(auth::get_signup))
        .route("/signup", web::post().to(auth::signup))
        .route("/login", web::get().to(auth::get_login))
        .route("/login", web::post().to(auth::login));
}
