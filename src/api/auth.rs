use actix_web::{http::header, web, HttpResponse};
use serde::{Deserialize, Deserializer};

use crate::api::metrics;
use crate::services::{CredentialService, RegisterOutcome};
use crate::utils::AppError;
use crate::views::{View, ViewRenderer};

pub const USER_EXISTS: &str = "User already exists!";
pub const SIGNUP_DONE: &str = "Sign up successful! Please login.";
pub const INVALID_CREDENTIALS: &str = "Invalid name or password!";

// An empty value counts as a missing field, so the extractor answers 400.
fn required<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if value.is_empty() {
        return Err(serde::de::Error::custom("field must not be empty"));
    }
    Ok(value)
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SignupForm {
    #[serde(deserialize_with = "required")]
    pub name: String,
    #[serde(deserialize_with = "required")]
    pub password: String,
    #[serde(deserialize_with = "required")]
    pub studies: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginForm {
    #[serde(deserialize_with = "required")]
    pub name: String,
    #[serde(deserialize_with = "required")]
    pub password: String,
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn logged(context: &'static str) -> impl Fn(AppError) -> AppError {
    move |e| {
        log::error!("❌ Error {}: {}", context, e);
        e
    }
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Pages",
    responses(
        (status = 200, description = "Signup page", body = String, content_type = "text/html"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn get_signup(views: web::Data<ViewRenderer>) -> Result<HttpResponse, AppError> {
    log::info!("📝 GET /");

    let page = views
        .render(&View::Signup { error: None })
        .map_err(logged("rendering signup page"))?;
    Ok(html(page))
}

#[utoipa::path(
    post,
    path = "/signup",
    tag = "Pages",
    request_body(content = SignupForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Account created, redirect to /login"),
        (status = 200, description = "Signup page with an error message", body = String, content_type = "text/html"),
        (status = 400, description = "Missing or empty form field"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn signup(
    credentials: web::Data<CredentialService>,
    views: web::Data<ViewRenderer>,
    form: web::Form<SignupForm>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /signup - name: {}", form.name);

    let outcome = credentials
        .register(&form.name, &form.password, &form.studies)
        .await
        .map_err(logged("during signup"))?;

    match outcome {
        RegisterOutcome::AlreadyExists => {
            log::warn!("❌ Signup rejected, name taken: {}", form.name);
            let page = views
                .render(&View::Signup { error: Some(USER_EXISTS) })
                .map_err(logged("during signup"))?;
            Ok(html(page))
        }
        RegisterOutcome::Registered => {
            log::info!("✅ Signup successful: {}", form.name);
            metrics::increment_signup_count();
            Ok(HttpResponse::SeeOther()
                .insert_header((header::LOCATION, "/login"))
                .finish())
        }
    }
}

#[utoipa::path(
    get,
    path = "/login",
    tag = "Pages",
    responses(
        (status = 200, description = "Login page with the signup banner", body = String, content_type = "text/html"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn get_login(views: web::Data<ViewRenderer>) -> Result<HttpResponse, AppError> {
    log::info!("🔐 GET /login");

    let page = views
        .render(&View::Login { success: Some(SIGNUP_DONE), error: None })
        .map_err(logged("rendering login page"))?;
    Ok(html(page))
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Pages",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Success page, or login page with an error message", body = String, content_type = "text/html"),
        (status = 400, description = "Missing or empty form field"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn login(
    credentials: web::Data<CredentialService>,
    views: web::Data<ViewRenderer>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔐 POST /login - name: {}", form.name);

    let user = credentials
        .verify(&form.name, &form.password)
        .await
        .map_err(logged("during login"))?;

    let page = match &user {
        Some(user) => {
            log::info!("✅ Login successful: {}", user.name);
            metrics::increment_login_count();
            views.render(&View::Success { name: &user.name, studies: &user.studies })
        }
        None => {
            log::warn!("❌ Login failed: {}", form.name);
            metrics::increment_login_failure_count();
            views.render(&View::Login { success: None, error: Some(INVALID_CREDENTIALS) })
        }
    }
    .map_err(logged("during login"))?;

    Ok(html(page))
}
