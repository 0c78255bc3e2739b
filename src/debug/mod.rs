//! Route coverage 404 page.
//!
//! # Data Flow
//! ```text
//! Unmatched request path + route snapshot
//!     → handler.rs (debug/production switch)
//!     → routing::resolve_frontier + routing::group_frontier
//!     → NotFoundContext { request_path, matched_prefix_path, grouped_fragments }
//!     → render.rs (HTML or JSON)
//!     → RenderedPage (status 404)
//! ```
//!
//! # Design Decisions
//! - Production mode returns a static body and never reads the tree
//! - Degrades to emptier output instead of failing

pub mod handler;
pub mod render;

pub use handler::{handle_unmatched_request, NotFoundContext, PageMode, RenderedPage, MINIMAL_NOT_FOUND};
pub use render::{HtmlRenderer, JsonRenderer, PageRenderer};
