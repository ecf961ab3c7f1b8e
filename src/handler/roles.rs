use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{entities::roles, error::ApiError, state::AppState};

#[derive(Deserialize, ToSchema)]
pub struct RoleRequest {
    pub role_id: String,
    pub role_name: String,
}

#[derive(Deserialize, ToSchema)]
pub struct RoleUpdateRequest {
    pub role_name: String,
}

#[derive(Serialize, ToSchema)]
pub struct RoleResponse {
    pub role_id: String,
    pub role_name: String,
}

impl From<roles::Model> for RoleResponse {
    fn from(model: roles::Model) -> Self {
        Self {
            role_id: model.role_id,
            role_name: model.role_name,
        }
    }
}

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/admin/roles", post(create_role))
        .route("/admin/roles", get(list_roles))
        .route("/admin/roles/:role_id", get(get_role))
        .route("/admin/roles/:role_id", put(update_role))
        .route("/admin/roles/:role_id", delete(delete_role))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/admin/roles",
    request_body = RoleRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 409, description = "Role already exists")
    ),
    tag = "roles"
)]
pub async fn create_role(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RoleRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .roles()
        .create(&payload.role_id, &payload.role_name)
        .await?;
    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    get,
    path = "/admin/roles",
    responses(
        (status = 200, description = "All roles", body = [RoleResponse])
    ),
    tag = "roles"
)]
pub async fn list_roles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RoleResponse>>, ApiError> {
    let records = state.roles().list().await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/admin/roles/{role_id}",
    params(
        ("role_id" = String, Path, description = "Role id")
    ),
    responses(
        (status = 200, description = "Role", body = RoleResponse),
        (status = 404, description = "Role does not exist")
    ),
    tag = "roles"
)]
pub async fn get_role(
    State(state): State<Arc<AppState>>,
    Path(role_id): Path<String>,
) -> Result<Json<RoleResponse>, ApiError> {
    let record = state.roles().get(&role_id).await?;
    Ok(Json(record.into()))
}

#[utoipa::path(
    put,
    path = "/admin/roles/{role_id}",
    request_body = RoleUpdateRequest,
    params(
        ("role_id" = String, Path, description = "Role id")
    ),
    responses(
        (status = 204, description = "Updated"),
        (status = 404, description = "Role does not exist")
    ),
    tag = "roles"
)]
pub async fn update_role(
    State(state): State<Arc<AppState>>,
    Path(role_id): Path<String>,
    Json(payload): Json<RoleUpdateRequest>,
) -> Result<StatusCode, ApiError> {
    state.roles().update(&role_id, &payload.role_name).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/admin/roles/{role_id}",
    params(
        ("role_id" = String, Path, description = "Role id")
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Role does not exist"),
        (status = 409, description = "Role referenced by active accounts")
    ),
    tag = "roles"
)]
pub async fn delete_role(
    State(state): State<Arc<AppState>>,
    Path(role_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.roles().delete(&role_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
