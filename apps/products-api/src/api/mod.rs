//! API routes module

pub mod health;
pub mod products;

use axum::Router;
use axum_helpers::{create_router, health_router};
use core_config::AppInfo;
use tower_http::cors::CorsLayer;

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Resource routes: `/products` and `/ready`
pub fn routes(state: &AppState) -> Router {
    products::router(state).merge(health::router(state.clone()))
}

/// The served application: `apis` plus `/health`, the API docs and the shared middleware
pub fn app(apis: Router, cors: CorsLayer, app_info: AppInfo) -> Router {
    create_router::<ApiDoc>(apis.merge(health_router(app_info)), cors)
}
