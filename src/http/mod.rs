//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace, timeout)
//!     → routing::RouteTree::resolve (full dispatch)
//!     → match:    response.rs (RouteMatch JSON, 200)
//!     → no match: debug::handle_unmatched_request → RenderedPage (404)
//!     → Send to client
//! ```

pub mod response;
pub mod server;

pub use response::RouteMatch;
pub use server::{AppState, HttpServer, RouteSnapshot, ServerError};

/// Correlation header set on every request and echoed on the response.
pub const X_REQUEST_ID: &str = "x-request-id";
