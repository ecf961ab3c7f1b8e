use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{
    crypto::password::generate_password,
    error::ApiError,
    middleware::caller_email,
    repo::users::UserView,
    service::users::{RegisterUser, UpdateUser},
    state::AppState,
};

#[derive(Deserialize, ToSchema)]
pub struct UserRegisterRequest {
    pub user_name: String,
    pub user_email: String,
    pub user_password: String,
    pub user_phone: String,
    pub department_id: String,
}

/// Social providers hand over the profile without a password; one is
/// generated when absent so the row still carries an unguessable digest.
#[derive(Deserialize, ToSchema)]
pub struct SocialUserRegisterRequest {
    pub user_name: String,
    pub user_email: String,
    pub user_password: Option<String>,
    pub user_phone: String,
    pub department_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct UserLoginRequest {
    pub user_email: String,
    pub user_password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct UserUpdateRequest {
    pub user_name: String,
    pub user_phone: String,
    pub department_id: String,
    pub event_level_name: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/users/auth/signUp", post(sign_up))
        .route("/users/auth/social/signUp", post(social_sign_up))
        .route("/users/auth/signIn", post(sign_in))
        .route("/users/me", get(my_info))
        .route("/users/me", put(update_my_info))
        .route("/users/me", delete(withdraw_me))
        .route("/users/me/password", put(change_password))
        .route("/users/:user_email", get(exists_by_email))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/users/auth/signUp",
    request_body = UserRegisterRequest,
    responses(
        (status = 201, description = "Registered"),
        (status = 404, description = "Department or configured default missing"),
        (status = 409, description = "Email already registered")
    ),
    tag = "users"
)]
pub async fn sign_up(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UserRegisterRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .users()
        .register(RegisterUser {
            user_name: payload.user_name,
            user_email: payload.user_email,
            user_password: payload.user_password,
            user_phone: payload.user_phone,
            department_id: payload.department_id,
            is_socialed: false,
        })
        .await?;
    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    post,
    path = "/users/auth/social/signUp",
    request_body = SocialUserRegisterRequest,
    responses(
        (status = 201, description = "Registered as a social member"),
        (status = 404, description = "Department or configured default missing"),
        (status = 409, description = "Email already registered")
    ),
    tag = "users"
)]
pub async fn social_sign_up(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SocialUserRegisterRequest>,
) -> Result<StatusCode, ApiError> {
    let user_password = payload.user_password.unwrap_or_else(generate_password);
    state
        .users()
        .register(RegisterUser {
            user_name: payload.user_name,
            user_email: payload.user_email,
            user_password,
            user_phone: payload.user_phone,
            department_id: payload.department_id,
            is_socialed: true,
        })
        .await?;
    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    post,
    path = "/users/auth/signIn",
    request_body = UserLoginRequest,
    responses(
        (status = 200, description = "Credentials verified"),
        (status = 401, description = "Password mismatch"),
        (status = 404, description = "No active account")
    ),
    tag = "users"
)]
pub async fn sign_in(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UserLoginRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .users()
        .login(&payload.user_email, &payload.user_password)
        .await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/users/me",
    responses(
        (status = 200, description = "Caller's account", body = UserView),
        (status = 401, description = "Missing or invalid identity header")
    ),
    tag = "users"
)]
pub async fn my_info(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<UserView>, ApiError> {
    let email = caller_email(&state, &headers)?;
    let view = state.users().get_user(&email).await?;
    Ok(Json(view))
}

#[utoipa::path(
    put,
    path = "/users/me",
    request_body = UserUpdateRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 401, description = "Missing or invalid identity header"),
        (status = 404, description = "Account, department, or event level missing")
    ),
    tag = "users"
)]
pub async fn update_my_info(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<UserUpdateRequest>,
) -> Result<StatusCode, ApiError> {
    let email = caller_email(&state, &headers)?;
    state
        .users()
        .update_user(
            &email,
            UpdateUser {
                user_name: payload.user_name,
                user_phone: payload.user_phone,
                department_id: payload.department_id,
                event_level_name: payload.event_level_name,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/users/me/password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Confirmation mismatch"),
        (status = 401, description = "Current password mismatch")
    ),
    tag = "users"
)]
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<StatusCode, ApiError> {
    let email = caller_email(&state, &headers)?;

    // Confirmation is a transport-boundary concern; the service does not
    // re-check it.
    if payload.new_password != payload.confirm_password {
        return Err(ApiError::BadRequest(
            "password confirmation mismatch".to_string(),
        ));
    }

    state
        .users()
        .change_password(&email, &payload.current_password, &payload.new_password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/users/me",
    responses(
        (status = 204, description = "Account withdrawn"),
        (status = 401, description = "Missing or invalid identity header"),
        (status = 404, description = "No active account")
    ),
    tag = "users"
)]
pub async fn withdraw_me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let email = caller_email(&state, &headers)?;
    state.users().withdraw(&email).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/users/{user_email}",
    params(
        ("user_email" = String, Path, description = "Email to check")
    ),
    responses(
        (status = 200, description = "Whether an active account exists", body = bool)
    ),
    tag = "users"
)]
pub async fn exists_by_email(
    State(state): State<Arc<AppState>>,
    Path(user_email): Path<String>,
) -> Result<Json<bool>, ApiError> {
    let exists = state.users().exists_by_email(&user_email).await?;
    Ok(Json(exists))
}
