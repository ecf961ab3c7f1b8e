use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{entities::event_levels, error::ApiError, state::AppState};

#[derive(Deserialize, ToSchema)]
pub struct EventLevelRequest {
    pub event_level_name: String,
    pub event_level_details: String,
    pub priority: i32,
}

#[derive(Deserialize, ToSchema)]
pub struct EventLevelUpdateRequest {
    pub event_level_details: String,
    pub priority: i32,
}

#[derive(Serialize, ToSchema)]
pub struct EventLevelResponse {
    pub event_level_name: String,
    pub event_level_details: String,
    pub priority: i32,
}

impl From<event_levels::Model> for EventLevelResponse {
    fn from(model: event_levels::Model) -> Self {
        Self {
            event_level_name: model.event_level_name,
            event_level_details: model.event_level_details,
            priority: model.priority,
        }
    }
}

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/admin/event-levels", post(create_event_level))
        .route("/admin/event-levels", get(list_event_levels))
        .route("/admin/event-levels/:event_level_name", get(get_event_level))
        .route("/admin/event-levels/:event_level_name", put(update_event_level))
        .route(
            "/admin/event-levels/:event_level_name",
            delete(delete_event_level),
        )
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/admin/event-levels",
    request_body = EventLevelRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 409, description = "Event level already exists")
    ),
    tag = "event-levels"
)]
pub async fn create_event_level(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<EventLevelRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .event_levels()
        .create(
            &payload.event_level_name,
            &payload.event_level_details,
            payload.priority,
        )
        .await?;
    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    get,
    path = "/admin/event-levels",
    responses(
        (status = 200, description = "All event levels", body = [EventLevelResponse])
    ),
    tag = "event-levels"
)]
pub async fn list_event_levels(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<EventLevelResponse>>, ApiError> {
    let records = state.event_levels().list().await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/admin/event-levels/{event_level_name}",
    params(
        ("event_level_name" = String, Path, description = "Event level name")
    ),
    responses(
        (status = 200, description = "Event level", body = EventLevelResponse),
        (status = 404, description = "Event level does not exist")
    ),
    tag = "event-levels"
)]
pub async fn get_event_level(
    State(state): State<Arc<AppState>>,
    Path(event_level_name): Path<String>,
) -> Result<Json<EventLevelResponse>, ApiError> {
    let record = state.event_levels().get(&event_level_name).await?;
    Ok(Json(record.into()))
}

#[utoipa::path(
    put,
    path = "/admin/event-levels/{event_level_name}",
    request_body = EventLevelUpdateRequest,
    params(
        ("event_level_name" = String, Path, description = "Event level name")
    ),
    responses(
        (status = 204, description = "Updated"),
        (status = 404, description = "Event level does not exist")
    ),
    tag = "event-levels"
)]
pub async fn update_event_level(
    State(state): State<Arc<AppState>>,
    Path(event_level_name): Path<String>,
    Json(payload): Json<EventLevelUpdateRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .event_levels()
        .update(
            &event_level_name,
            &payload.event_level_details,
            payload.priority,
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/admin/event-levels/{event_level_name}",
    params(
        ("event_level_name" = String, Path, description = "Event level name")
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Event level does not exist"),
        (status = 409, description = "Event level referenced by active accounts")
    ),
    tag = "event-levels"
)]
pub async fn delete_event_level(
    State(state): State<Arc<AppState>>,
    Path(event_level_name): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.event_levels().delete(&event_level_name).await?;
    Ok(StatusCode::NO_CONTENT)
}
