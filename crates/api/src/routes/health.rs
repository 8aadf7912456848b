//! Liveness for the shelter service: the database and the photo directory.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct ShelterHealth {
    /// `ok` when every dependency answers, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// The upload directory exists and accepts new photos.
    pub uploads_healthy: bool,
}

impl ShelterHealth {
    fn new(db_healthy: bool, uploads_healthy: bool) -> Self {
        let status = if db_healthy && uploads_healthy {
            "ok"
        } else {
            "degraded"
        };
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
            uploads_healthy,
        }
    }

    /// `503` while degraded.
    fn status_code(&self) -> StatusCode {
        if self.status == "ok" {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

async fn shelter_health(State(state): State<AppState>) -> (StatusCode, Json<ShelterHealth>) {
    let db_healthy = shelter_db::health_check(&state.pool).await.is_ok();
    let uploads_healthy = state.uploads.is_writable().await;

    if !uploads_healthy {
        tracing::warn!(dir = %state.uploads.root().display(), "Upload directory unavailable");
    }

    let health = ShelterHealth::new(db_healthy, uploads_healthy);
    (health.status_code(), Json(health))
}

/// `GET /health`, mounted at the root rather than under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(shelter_health))
}
