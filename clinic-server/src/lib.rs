//! BiteCare clinic HTTP server
//!
//! axum router over the appointment, billing and inventory services. Every
//! response uses the `{ "success": true, "data": ... }` envelope and every
//! failure an [`ApiErrorResponse`].

pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod validation;

pub use error::*;
pub use server::ClinicServer;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Create the main application router with all routes and middleware
pub fn create_app(server: ClinicServer) -> Router {
    routes::create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(server)
}
