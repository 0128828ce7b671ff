//! REST API over the record store.
//!
//! | Method | Path                 | Handler                    |
//! |--------|----------------------|----------------------------|
//! | GET    | `/data`              | [`handlers::list_data`]    |
//! | POST   | `/data`              | [`handlers::create_data`]  |
//! | GET    | `/data/:code`        | [`handlers::get_data`]     |
//! | PUT    | `/data/:code`        | [`handlers::update_data`]  |
//! | DELETE | `/data/:code`        | [`handlers::delete_data`]  |
//! | GET    | `/references/models` | [`handlers::list_models`]  |
//! | GET    | `/references/techs`  | [`handlers::list_techs`]   |

pub mod error;
pub mod handlers;
pub mod response;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::store::Store;

pub use error::ApiError;

/// Shared application state
pub type AppState = Arc<Store>;

/// Build the REST API router
pub fn router(state: AppState) -> Router {
    Router::new()
        // Records
        .route("/data", get(handlers::list_data).post(handlers::create_data))
        .route(
            "/data/:code",
            get(handlers::get_data)
                .put(handlers::update_data)
                .delete(handlers::delete_data),
        )
        // Reference tables
        .route("/references/models", get(handlers::list_models))
        .route("/references/techs", get(handlers::list_techs))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
