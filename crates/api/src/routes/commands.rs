//! Route definitions for the `/commands` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::commands;
use crate::state::AppState;

/// Routes mounted at `/commands`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// PATCH  /{id}                              -> partial_update
/// DELETE /{id}                              -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(commands::list).post(commands::create))
        .route(
            "/{id}",
            get(commands::get_by_id)
                .put(commands::update)
                .patch(commands::partial_update)
                .delete(commands::delete),
        )
}
