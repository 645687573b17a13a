use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Studies Portal",
        version = "0.1.0",
        description = "Signup and login pages backed by a JSON credentials file.\n\nThe page routes take `application/x-www-form-urlencoded` bodies and answer with HTML. Business-rule failures (duplicate name, wrong password) are reported inside a 200 page, not as error statuses."
    ),
    paths(
        // Pages
        crate::api::auth::get_signup,
        crate::api::auth::signup,
        crate::api::auth::get_login,
        crate::api::auth::login,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            crate::api::auth::SignupForm,
            crate::api::auth::LoginForm,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Pages", description = "HTML signup and login flow."),
        (name = "Health", description = "Health check and counters for monitoring."),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_page_routes() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();

        for path in ["/", "/signup", "/login", "/health", "/metrics"] {
            assert!(doc["paths"].get(path).is_some(), "missing {}", path);
        }
        assert!(doc["paths"]["/login"].get("get").is_some());
        assert!(doc["paths"]["/login"].get("post").is_some());
    }
}
