use actix_web::HttpResponse;
use std::sync::atomic::{AtomicU64, Ordering};

static REQUEST_COUNT: AtomicU64 = AtomicU64::new(0);
static ERROR_COUNT: AtomicU64 = AtomicU64::new(0);
static SIGNUP_COUNT: AtomicU64 = AtomicU64::new(0);
static LOGIN_COUNT: AtomicU64 = AtomicU64::new(0);
static LOGIN_FAILURE_COUNT: AtomicU64 = AtomicU64::new(0);

pub fn increment_request_count() {
    REQUEST_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_error_count() {
    ERROR_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_signup_count() {
    SIGNUP_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_login_count() {
    LOGIN_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_login_failure_count() {
    LOGIN_FAILURE_COUNT.fetch_add(1, Ordering::Relaxed);
}

fn counter(out: &mut String, name: &str, help: &str, value: u64) {
    out.push_str(&format!(
        "# HELP {name} {help}\n# TYPE {name} counter\n{name} {value}\n\n"
    ));
}

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "Prometheus counters", body = String, content_type = "text/plain")
    )
)]
pub async fn get_metrics() -> HttpResponse {
    let mut metrics = String::new();
    counter(&mut metrics, "http_requests_total", "Total number of HTTP requests", REQUEST_COUNT.load(Ordering::Relaxed));
    counter(&mut metrics, "http_errors_total", "Total number of HTTP 5xx responses", ERROR_COUNT.load(Ordering::Relaxed));
    counter(&mut metrics, "signups_total", "Accounts created", SIGNUP_COUNT.load(Ordering::Relaxed));
    counter(&mut metrics, "logins_total", "Successful logins", LOGIN_COUNT.load(Ordering::Relaxed));
    counter(&mut metrics, "login_failures_total", "Rejected logins", LOGIN_FAILURE_COUNT.load(Ordering::Relaxed));

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App};

    #[actix_web::test]
    async fn test_metrics_exposes_all_counters() {
        increment_signup_count();
        let app = test::init_service(App::new().route("/metrics", web::get().to(get_metrics))).await;

        let body = test::call_and_read_body(&app, test::TestRequest::get().uri("/metrics").to_request()).await;
        let text = std::str::from_utf8(&body).unwrap();

        for name in ["http_requests_total", "http_errors_total", "signups_total", "logins_total", "login_failures_total"] {
            assert!(text.contains(&format!("# TYPE {} counter", name)), "missing {}", name);
        }
        assert!(!text.contains("signups_total 0\n"));
    }
}
