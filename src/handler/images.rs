use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{error::ApiError, middleware::caller_email, state::AppState};

#[derive(Deserialize, ToSchema)]
pub struct ImageRequest {
    pub image_path: String,
}

#[derive(Serialize, ToSchema)]
pub struct ImageResponse {
    pub image_path: String,
}

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/users/me/image", get(get_image))
        .route("/users/me/image", post(create_image))
        .route("/users/me/image", put(update_image))
        .route("/users/me/image", delete(delete_image))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/users/me/image",
    responses(
        (status = 200, description = "Profile image path", body = ImageResponse),
        (status = 404, description = "No image set")
    ),
    tag = "images"
)]
pub async fn get_image(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ImageResponse>, ApiError> {
    let email = caller_email(&state, &headers)?;
    let image_path = state.images().get_image(&email).await?;
    Ok(Json(ImageResponse { image_path }))
}

#[utoipa::path(
    post,
    path = "/users/me/image",
    request_body = ImageRequest,
    responses(
        (status = 201, description = "Image set"),
        (status = 409, description = "Image already set")
    ),
    tag = "images"
)]
pub async fn create_image(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<ImageRequest>,
) -> Result<StatusCode, ApiError> {
    let email = caller_email(&state, &headers)?;
    state
        .images()
        .create_image(&email, &payload.image_path)
        .await?;
    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    put,
    path = "/users/me/image",
    request_body = ImageRequest,
    responses(
        (status = 204, description = "Image path updated"),
        (status = 404, description = "No image set")
    ),
    tag = "images"
)]
pub async fn update_image(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<ImageRequest>,
) -> Result<StatusCode, ApiError> {
    let email = caller_email(&state, &headers)?;
    state
        .images()
        .update_image(&email, &payload.image_path)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/users/me/image",
    responses(
        (status = 204, description = "Image removed"),
        (status = 404, description = "No image set")
    ),
    tag = "images"
)]
pub async fn delete_image(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let email = caller_email(&state, &headers)?;
    state.images().delete_image(&email).await?;
    Ok(StatusCode::NO_CONTENT)
}
