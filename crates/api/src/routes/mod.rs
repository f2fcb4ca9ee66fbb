pub mod health;
pub mod vehicles;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// GET    /vehicles           -> list
/// POST   /vehicles           -> create
/// GET    /vehicles/{id}      -> get_by_id
/// PUT    /vehicles/{id}      -> update
/// DELETE /vehicles/{id}      -> delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/vehicles", vehicles::router())
}
