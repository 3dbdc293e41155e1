pub mod commands;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /commands                                        list, create
/// /commands/{id}                                   get, replace, patch, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/commands", commands::router())
}
