//! HTTP API layer.
//!
//! Routes, handlers, middleware and OpenAPI documentation.

pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
