pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::builder::handlers;
use crate::render::handlers as templates;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Template gallery
        .route("/api/v1/templates", get(templates::handle_list_templates))
        .route(
            "/api/v1/templates/:name/preview",
            get(templates::handle_template_preview),
        )
        // Builder sessions
        .route("/api/v1/sessions", post(handlers::handle_open_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_close_session),
        )
        .route(
            "/api/v1/sessions/:id/reset",
            post(handlers::handle_reset_session),
        )
        .route(
            "/api/v1/sessions/:id/sections/:section",
            put(handlers::handle_put_section),
        )
        .route(
            "/api/v1/sessions/:id/document",
            patch(handlers::handle_patch_document),
        )
        .route(
            "/api/v1/sessions/:id/template",
            put(handlers::handle_switch_template),
        )
        .route(
            "/api/v1/sessions/:id/layout",
            put(handlers::handle_replace_layout),
        )
        .route(
            "/api/v1/sessions/:id/layout/reorder",
            post(handlers::handle_reorder_layout),
        )
        .route(
            "/api/v1/sessions/:id/layout/:section/move",
            post(handlers::handle_move_section),
        )
        .route(
            "/api/v1/sessions/:id/layout/:section/toggle",
            post(handlers::handle_toggle_section),
        )
        .route(
            "/api/v1/sessions/:id/editing",
            put(handlers::handle_set_editing),
        )
        .route(
            "/api/v1/sessions/:id/preview",
            get(handlers::handle_session_preview),
        )
        .route("/api/v1/sessions/:id/save", post(handlers::handle_save))
        .route("/api/v1/sessions/:id/load", post(handlers::handle_load))
        .route(
            "/api/v1/sessions/:id/export/:format",
            get(handlers::handle_export),
        )
        // Persisted resumes
        .route("/api/v1/resumes", get(handlers::handle_list_resumes))
        .route(
            "/api/v1/resumes/:label",
            get(handlers::handle_get_resume).delete(handlers::handle_delete_resume),
        )
        .route(
            "/api/v1/resumes/:label/match",
            post(handlers::handle_match_resume),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::builder::BuilderService;
    use crate::config::Config;
    use crate::layout::ReconcilePolicy;
    use crate::persistence::InMemoryResumeStore;

    fn test_state() -> AppState {
        let config = Config {
            port: 0,
            rust_log: "debug".into(),
            persistence_api_url: None,
            persistence_api_token: None,
            persistence_timeout_secs: 5,
            export_timeout_secs: 30,
            reconcile_policy: ReconcilePolicy::ClearOnSwitch,
            session_ttl_secs: 3600,
        };
        let builder = BuilderService::new(
            Arc::new(InMemoryResumeStore::new()),
            Duration::from_secs(config.export_timeout_secs),
            config.reconcile_policy,
        );
        AppState {
            config,
            builder: Arc::new(builder),
        }
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn json_of(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state());
        let (status, body) = call(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body)["status"], "ok");
    }

    #[tokio::test]
    async fn test_template_catalog_lists_six() {
        let app = build_router(test_state());
        let (status, body) = call(&app, "GET", "/api/v1/templates", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body).as_array().unwrap().len(), 6);

        let (status, _) = call(&app, "GET", "/api/v1/templates/Unknown/preview", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_session_flow_save_then_export() {
        let app = build_router(test_state());
        let (status, body) = call(&app, "POST", "/api/v1/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = json_of(&body)["id"].as_str().unwrap().to_string();

        let (status, body) = call(
            &app,
            "PATCH",
            &format!("/api/v1/sessions/{id}/document"),
            Some(json!({ "title": "Data Engineer" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body)["document"]["title"], "Data Engineer");

        let (status, body) = call(&app, "GET", &format!("/api/v1/sessions/{id}/export/pdf"), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json_of(&body)["error"]["code"], "RENDER_PRECONDITION");

        let (status, body) = call(&app, "POST", &format!("/api/v1/sessions/{id}/save"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body)["resumeMeta"]["versionLabel"], "v1");
        assert_eq!(json_of(&body)["mode"], "create");

        let (status, body) = call(&app, "GET", &format!("/api/v1/sessions/{id}/export/txt"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body)["title"], "Data Engineer");

        let (status, _) = call(&app, "GET", &format!("/api/v1/sessions/{id}/export/gif"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_section_submission_is_400() {
        let app = build_router(test_state());
        let (_, body) = call(&app, "POST", "/api/v1/sessions", None).await;
        let id = json_of(&body)["id"].as_str().unwrap().to_string();

        let (status, body) = call(
            &app,
            "PUT",
            &format!("/api/v1/sessions/{id}/sections/summary"),
            Some(json!("x".repeat(501))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json_of(&body)["error"]["code"], "VALIDATION_ERROR");

        let (status, _) = call(
            &app,
            "PUT",
            &format!("/api/v1/sessions/{id}/sections/hobbies"),
            Some(json!([])),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_template_switch_and_layout_move() {
        let app = build_router(test_state());
        let (_, body) = call(&app, "POST", "/api/v1/sessions", None).await;
        let id = json_of(&body)["id"].as_str().unwrap().to_string();

        let (status, body) = call(
            &app,
            "PUT",
            &format!("/api/v1/sessions/{id}/template"),
            Some(json!({ "templateName": "ModernProfileTemplate" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let layout = json_of(&body)["session"]["layout"].clone();
        let visible = layout
            .as_array()
            .unwrap()
            .iter()
            .filter(|e| e["visible"] == true)
            .count();
        assert_eq!(visible, 7);

        let (status, _) = call(
            &app,
            "POST",
            &format!("/api/v1/sessions/{id}/layout/contact/move"),
            Some(json!({ "direction": "up" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_session_is_404() {
        let app = build_router(test_state());
        let (status, _) = call(
            &app,
            "GET",
            "/api/v1/sessions/00000000-0000-0000-0000-000000000000",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_traversal_labels_are_rejected() {
        let app = build_router(test_state());
        let (status, body) = call(&app, "GET", "/api/v1/resumes/..%2F..%2Fadmin%2Fusers", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json_of(&body)["error"]["code"], "VALIDATION_ERROR");

        let (status, _) = call(&app, "DELETE", "/api/v1/resumes/v1%2Fdelete", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(
            &app,
            "POST",
            "/api/v1/sessions",
            Some(json!({ "versionLabel": "..", "mode": "edit" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
