use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::{error::ApiError, repo::users::UserView, service::users::Paging, state::AppState};

#[derive(Deserialize, IntoParams)]
pub struct PageQuery {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl PageQuery {
    fn paging(&self, default_limit: u64) -> Paging {
        Paging {
            offset: self.offset.unwrap_or(0),
            limit: self.limit.unwrap_or(default_limit),
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct UserRoleUpdateRequest {
    pub user_email: String,
    pub role_id: String,
}

/// Administrative account routes. Privilege is enforced by the gate layered
/// over this router, not here.
pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/users/roles", put(update_user_role))
        .route("/admin/users/:user_email", get(get_user))
        .route("/admin/users/:user_email", delete(delete_user))
        .route(
            "/admin/departments/:department_id/users",
            get(list_users_by_department),
        )
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/admin/users",
    params(PageQuery),
    responses(
        (status = 200, description = "Active accounts", body = [UserView]),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Not an administrator")
    ),
    tag = "admin"
)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<UserView>>, ApiError> {
    let paging = page.paging(state.config().values().page_size);
    let views = state.users().list_users(paging).await?;
    Ok(Json(views))
}

#[utoipa::path(
    get,
    path = "/admin/users/{user_email}",
    params(
        ("user_email" = String, Path, description = "Account email")
    ),
    responses(
        (status = 200, description = "Account", body = UserView),
        (status = 404, description = "No active account")
    ),
    tag = "admin"
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_email): Path<String>,
) -> Result<Json<UserView>, ApiError> {
    let view = state.users().get_user(&user_email).await?;
    Ok(Json(view))
}

#[utoipa::path(
    get,
    path = "/admin/departments/{department_id}/users",
    params(
        ("department_id" = String, Path, description = "Department id"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Active accounts in the department", body = [UserView])
    ),
    tag = "admin"
)]
pub async fn list_users_by_department(
    State(state): State<Arc<AppState>>,
    Path(department_id): Path<String>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<UserView>>, ApiError> {
    let paging = page.paging(state.config().values().page_size);
    let views = state
        .users()
        .list_users_by_department(&department_id, paging)
        .await?;
    Ok(Json(views))
}

#[utoipa::path(
    put,
    path = "/admin/users/roles",
    request_body = UserRoleUpdateRequest,
    responses(
        (status = 204, description = "Role reassigned"),
        (status = 404, description = "Account or role missing")
    ),
    tag = "admin"
)]
pub async fn update_user_role(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UserRoleUpdateRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .users()
        .change_role(&payload.user_email, &payload.role_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/admin/users/{user_email}",
    params(
        ("user_email" = String, Path, description = "Account email")
    ),
    responses(
        (status = 204, description = "Account withdrawn"),
        (status = 404, description = "No active account")
    ),
    tag = "admin"
)]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(user_email): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.users().withdraw(&user_email).await?;
    Ok(StatusCode::NO_CONTENT)
}
