//! Behaviour when the note store is unavailable.
//!
//! Storage failures are not handled anywhere in the request path: they
//! surface as a sanitized 500, and the health endpoint reports `degraded`.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::Router;
use common::{body_json, delete, get, post_json, put_empty, test_config};
use serde_json::json;

use notekeeper_api::config::{ServerConfig, StoreKind};
use notekeeper_api::router::build_app_router;
use notekeeper_api::state::AppState;
use notekeeper_core::error::{CoreError, CoreResult};
use notekeeper_core::note::Note;
use notekeeper_core::repository::{NoteRepository, NoteTransaction};
use notekeeper_core::service::NoteService;
use notekeeper_core::types::DbId;

/// A repository whose every call fails as if the database were down.
struct UnavailableRepository;

fn unavailable() -> CoreError {
    CoreError::Storage("connection refused".into())
}

#[async_trait]
impl NoteRepository for UnavailableRepository {
    async fn find_by_id(&self, _id: DbId) -> CoreResult<Option<Note>> {
        Err(unavailable())
    }

    async fn find_by_archived(&self, _archived: bool) -> CoreResult<Vec<Note>> {
        Err(unavailable())
    }

    async fn health_check(&self) -> CoreResult<()> {
        Err(unavailable())
    }

    async fn begin(&self) -> CoreResult<Box<dyn NoteTransaction>> {
        Err(unavailable())
    }
}

fn build_failing_app() -> Router {
    let config = ServerConfig {
        store: StoreKind::Postgres,
        ..test_config()
    };
    let state = AppState {
        notes: NoteService::new(Arc::new(UnavailableRepository)),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

#[tokio::test]
async fn storage_failure_maps_to_500() {
    let app = build_failing_app();

    let responses = [
        post_json(&app, "/api/notes", json!({ "title": "t", "content": "c" })).await,
        get(&app, "/api/notes/1").await,
        get(&app, "/api/notes/active").await,
        put_empty(&app, "/api/notes/1/archive").await,
        delete(&app, "/api/notes/1").await,
    ];

    for response in responses {
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["code"], "INTERNAL_ERROR");
        assert_eq!(json["error"], "An internal error occurred");
    }
}

#[tokio::test]
async fn health_reports_degraded_store() {
    let app = build_failing_app();

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["store"], "postgres");
    assert_eq!(json["store_healthy"], false);
}
