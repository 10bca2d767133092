//! `RemindServer` — Axum HTTP server wiring.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use remind_service::{DeleteRemindInput, RemindService, UpdateThrottledInput};

use crate::config::ServerConfig;
use crate::dto::{
    CancelRemindsRequest, CreateRemindsRequest, RemindResponse, RemindsResponse,
    TimeRangeQuery, UpdateThrottledRequest,
};
use crate::error::ApiError;
use crate::health::{self, HealthResponse};

/// Shared state accessible from Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// The reminder use-case service.
    pub service: Arc<RemindService>,
    /// When the server started.
    pub start_time: Instant,
}

/// The main remind server.
pub struct RemindServer {
    config: ServerConfig,
    service: Arc<RemindService>,
    start_time: Instant,
}

impl RemindServer {
    /// Create a new server.
    pub fn new(config: ServerConfig, service: Arc<RemindService>) -> Self {
        Self {
            config,
            service,
            start_time: Instant::now(),
        }
    }

    /// Build the Axum router with all routes.
    pub fn router(&self) -> Router {
        let state = AppState {
            service: self.service.clone(),
            start_time: self.start_time,
        };

        Router::new()
            .route("/health", get(health_handler))
            .route("/reminds", post(create_reminds).get(get_reminds))
            .route("/reminds/{id}", delete(delete_remind))
            .route("/reminds/{id}/throttled", post(update_throttled))
            .route("/reminds/cancel", post(cancel_reminds))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Get the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// GET /health
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(health::health_check(state.start_time))
}

/// POST /reminds — create a reminder batch, idempotent on the task ID.
async fn create_reminds(
    State(state): State<AppState>,
    Json(req): Json<CreateRemindsRequest>,
) -> Result<(StatusCode, Json<RemindsResponse>), ApiError> {
    let out = state.service.create_reminds(req.into()).await?;
    Ok((StatusCode::CREATED, Json(out.into())))
}

/// GET /reminds?start=..&end=.. — inclusive time-range query.
async fn get_reminds(
    State(state): State<AppState>,
    Query(query): Query<TimeRangeQuery>,
) -> Result<Json<RemindsResponse>, ApiError> {
    let out = state.service.get_reminds_by_time_range(query.into()).await?;
    Ok(Json(out.into()))
}

/// POST /reminds/{id}/throttled — set the throttle latch.
async fn update_throttled(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateThrottledRequest>,
) -> Result<Json<RemindResponse>, ApiError> {
    let out = state
        .service
        .update_throttled(UpdateThrottledInput {
            id,
            throttled: req.throttled,
        })
        .await?;
    Ok(Json(out.into()))
}

/// DELETE /reminds/{id} — idempotent single delete.
async fn delete_remind(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.service.delete_remind(DeleteRemindInput { id }).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /reminds/cancel — delete a task's batch and emit one event.
async fn cancel_reminds(
    State(state): State<AppState>,
    Json(req): Json<CancelRemindsRequest>,
) -> Result<StatusCode, ApiError> {
    state.service.cancel_by_task_id(req.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}
