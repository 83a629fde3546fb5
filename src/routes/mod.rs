//! Router assembly: common routes, one resource router per record type, and the HTTP layers.

pub mod common;
pub mod resource;

pub use common::{common_routes, common_routes_with_ready, WELCOME_MESSAGE};
pub use resource::resource_routes;

use crate::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Full application router: `/`, `/health`, `/ready`, `/version`, `/pets`, `/books`.
/// CORS is open to every origin; bodies above `body_limit_bytes` get a JSON 413 from the body extractor.
pub fn app_routes(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(resource_routes(state.pets))
        .merge(resource_routes(state.books))
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
