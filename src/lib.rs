//! Route coverage debug server library.
//!
//! Dispatches request paths against a configured route tree and, when
//! nothing matches, explains what the tree does offer below the longest
//! matched prefix.

pub mod config;
pub mod debug;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::FrontierConfig;
pub use debug::handle_unmatched_request;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{group_frontier, resolve_frontier};
