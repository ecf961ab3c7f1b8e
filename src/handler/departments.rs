use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{entities::departments, error::ApiError, state::AppState};

#[derive(Deserialize, ToSchema)]
pub struct DepartmentRequest {
    pub department_id: String,
    pub department_name: String,
}

#[derive(Deserialize, ToSchema)]
pub struct DepartmentUpdateRequest {
    pub department_name: String,
}

#[derive(Serialize, ToSchema)]
pub struct DepartmentResponse {
    pub department_id: String,
    pub department_name: String,
}

impl From<departments::Model> for DepartmentResponse {
    fn from(model: departments::Model) -> Self {
        Self {
            department_id: model.department_id,
            department_name: model.department_name,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct DashboardUpdateRequest {
    pub department_id: String,
    pub dashboard_uid: String,
    pub dashboard_title: String,
}

#[derive(Serialize, ToSchema)]
pub struct DashboardResponse {
    pub department_id: String,
    pub dashboard_uid: Option<String>,
    pub dashboard_title: Option<String>,
}

impl From<departments::Model> for DashboardResponse {
    fn from(model: departments::Model) -> Self {
        Self {
            department_id: model.department_id,
            dashboard_uid: model.main_dashboard_uid,
            dashboard_title: model.main_dashboard_title,
        }
    }
}

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/admin/departments", post(create_department))
        .route("/admin/departments", get(list_departments))
        .route("/admin/departments/:department_id", get(get_department))
        .route("/admin/departments/:department_id", put(update_department))
        .route("/admin/departments/:department_id", delete(delete_department))
        .with_state(state)
}

/// Dashboard assignment routes. These serve every signed-in surface, so they
/// live outside the admin gate.
pub fn dashboard_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/main/dashboard/:department_id", get(get_dashboard))
        .route("/main/dashboard", post(update_dashboard))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/admin/departments",
    request_body = DepartmentRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 409, description = "Department already exists")
    ),
    tag = "departments"
)]
pub async fn create_department(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DepartmentRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .departments()
        .create(&payload.department_id, &payload.department_name)
        .await?;
    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    get,
    path = "/admin/departments",
    responses(
        (status = 200, description = "All departments", body = [DepartmentResponse])
    ),
    tag = "departments"
)]
pub async fn list_departments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DepartmentResponse>>, ApiError> {
    let records = state.departments().list().await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/admin/departments/{department_id}",
    params(
        ("department_id" = String, Path, description = "Department id")
    ),
    responses(
        (status = 200, description = "Department", body = DepartmentResponse),
        (status = 404, description = "Department does not exist")
    ),
    tag = "departments"
)]
pub async fn get_department(
    State(state): State<Arc<AppState>>,
    Path(department_id): Path<String>,
) -> Result<Json<DepartmentResponse>, ApiError> {
    let record = state.departments().get(&department_id).await?;
    Ok(Json(record.into()))
}

#[utoipa::path(
    put,
    path = "/admin/departments/{department_id}",
    request_body = DepartmentUpdateRequest,
    params(
        ("department_id" = String, Path, description = "Department id")
    ),
    responses(
        (status = 204, description = "Updated"),
        (status = 404, description = "Department does not exist")
    ),
    tag = "departments"
)]
pub async fn update_department(
    State(state): State<Arc<AppState>>,
    Path(department_id): Path<String>,
    Json(payload): Json<DepartmentUpdateRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .departments()
        .update(&department_id, &payload.department_name)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/main/dashboard/{department_id}",
    params(
        ("department_id" = String, Path, description = "Department id")
    ),
    responses(
        (status = 200, description = "Dashboard assignment", body = DashboardResponse),
        (status = 404, description = "Department does not exist")
    ),
    tag = "departments"
)]
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Path(department_id): Path<String>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let record = state.departments().get(&department_id).await?;
    Ok(Json(record.into()))
}

#[utoipa::path(
    post,
    path = "/main/dashboard",
    request_body = DashboardUpdateRequest,
    responses(
        (status = 204, description = "Dashboard assigned"),
        (status = 404, description = "Department does not exist")
    ),
    tag = "departments"
)]
pub async fn update_dashboard(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DashboardUpdateRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .departments()
        .update_dashboard(
            &payload.department_id,
            &payload.dashboard_uid,
            &payload.dashboard_title,
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/admin/departments/{department_id}",
    params(
        ("department_id" = String, Path, description = "Department id")
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Department does not exist"),
        (status = 409, description = "Department referenced by active accounts")
    ),
    tag = "departments"
)]
pub async fn delete_department(
    State(state): State<Arc<AppState>>,
    Path(department_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.departments().delete(&department_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
