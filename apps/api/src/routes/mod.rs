pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Role catalog
        .route("/api/v1/roles", get(handlers::handle_list_roles))
        .route("/api/v1/roles/:key", get(handlers::handle_get_role))
        // Matching
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route(
            "/api/v1/analyze/pdf",
            post(handlers::handle_analyze_pdf).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/api/v1/analyses/normalize",
            post(handlers::handle_normalize),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::matching::catalog::RoleCatalog;

    fn app() -> Router {
        build_router(AppState::new(Config::default(), RoleCatalog::seed().unwrap()))
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_list_roles() {
        let (status, body) = send(Request::get("/api/v1/roles").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_get_role_and_unknown_role() {
        let (status, body) =
            send(Request::get("/api/v1/roles/uiux").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "UI/UX Designer");
        assert_eq!(body["optional"][0], "adobe xd");

        let (status, body) =
            send(Request::get("/api/v1/roles/chef").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_analyze_frontend_scenario() {
        let (status, body) = send(post_json(
            "/api/v1/analyze",
            json!({
                "resume_text": "Experienced with React, JavaScript, and HTML. Also know TypeScript and Git.",
                "job_role": "frontend",
                "is_custom": false
            }),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 54);
        assert_eq!(body["job_title"], "Frontend Developer");
        assert_eq!(body["verdict"], "MEDIUM");
        assert_eq!(body["matched"].as_array().unwrap().len(), 5);
        assert_eq!(body["missing"].as_array().unwrap().len(), 7);
        assert_eq!(body["missing"][0], json!({"name": "css", "weight": 3}));
    }

    #[tokio::test]
    async fn test_analyze_custom_description() {
        let (status, body) = send(post_json(
            "/api/v1/analyze",
            json!({
                "resume_text": "Backend developer shipping Python services on AWS.",
                "custom_jd": "We want Python, AWS and Kubernetes",
                "is_custom": true
            }),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["job_title"], "Custom Role");
        assert_eq!(body["score"], 67);
        assert_eq!(body["verdict"], "MEDIUM");
    }

    #[tokio::test]
    async fn test_analyze_unknown_role_is_404() {
        let (status, _) = send(post_json(
            "/api/v1/analyze",
            json!({"resume_text": "A long enough resume body text here.", "job_role": "astronaut"}),
        ))
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_analyze_short_resume_is_400() {
        let (status, body) = send(post_json(
            "/api/v1/analyze",
            json!({"resume_text": "react", "job_role": "frontend"}),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_custom_without_keywords_is_400() {
        let (status, body) = send(post_json(
            "/api/v1/analyze",
            json!({
                "resume_text": "A long enough resume body text here.",
                "custom_jd": "Friendly bakery seeks morning shift staff",
                "is_custom": true
            }),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            "No technical keywords detected in your job description."
        );
    }

    #[tokio::test]
    async fn test_analyze_pdf_requires_resume_field() {
        let boundary = "XBOUNDARY";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"job_role\"\r\n\r\nfrontend\r\n--{boundary}--\r\n"
        );
        let request = Request::post("/api/v1/analyze/pdf")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("'resume'"));
    }

    #[tokio::test]
    async fn test_normalize_legacy_result() {
        let (status, body) = send(post_json(
            "/api/v1/analyses/normalize",
            json!({
                "score": 75,
                "job_title": "Backend Developer",
                "matched": ["java", {"name": "git", "level": 2}],
                "missing": ["redis"]
            }),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matched"][0], json!({"name": "java", "weight": 3}));
        assert_eq!(body["matched"][1]["weight"], 2);
        assert_eq!(body["missing"][0]["weight"], 1);
        assert_eq!(body["verdict"], "STRONG");
    }
}
