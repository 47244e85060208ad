//! HTTP API module for the loan endpoints and the health check.

pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use extract::JsonObject;
pub use handlers::AppState;
pub use routes::create_router;
