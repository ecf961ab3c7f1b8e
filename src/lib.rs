use std::sync::Arc;

use axum::{middleware::from_fn_with_state, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod crypto;
pub mod db;
pub mod entities;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod openapi;
pub mod repo;
pub mod schema;
pub mod service;
pub mod state;

use state::AppState;

/// Assembles the full application router. Everything under `/admin` passes
/// through the admin gate before a handler runs.
pub fn router(state: Arc<AppState>) -> Router {
    let admin = Router::new()
        .merge(handler::admin::routes(state.clone()))
        .merge(handler::departments::routes(state.clone()))
        .merge(handler::roles::routes(state.clone()))
        .merge(handler::event_levels::routes(state.clone()))
        .layer(from_fn_with_state(state.clone(), middleware::admin_gate));

    Router::new()
        .merge(handler::health::routes())
        .merge(handler::users::routes(state.clone()))
        .merge(handler::departments::dashboard_routes(state.clone()))
        .merge(handler::images::routes(state))
        .merge(admin)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}
