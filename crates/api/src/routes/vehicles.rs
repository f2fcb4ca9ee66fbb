//! Route definitions for the `/vehicles` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::vehicles;
use crate::state::AppState;

/// Routes mounted at `/vehicles`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(vehicles::list).post(vehicles::create))
        .route(
            "/{id}",
            get(vehicles::get_by_id)
                .put(vehicles::update)
                .delete(vehicles::delete),
        )
}
