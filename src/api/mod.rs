//! API Module
//!
//! HTTP handlers and routing for the compiler host.
//!
//! # Endpoints
//! - `POST /pipeline` - Prepare (reuse or build) pipeline state for a config
//! - `GET /stats` - Get pipeline cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
