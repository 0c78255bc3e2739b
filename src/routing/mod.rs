//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup / reload):
//!     RouteConfig[]
//!     → pattern.rs (compile route / regex syntax)
//!     → tree.rs (freeze as immutable RouteTree)
//!
//! Incoming Request (path):
//!     → tree.rs (full dispatch in registration order)
//!     → Return: ResolvedRoute or no match
//!
//! No match (debug page):
//!     → resolver.rs (walk to the deepest matched prefix)
//!     → grouping.rs + apps.rs (group frontier by owning app)
//! ```
//!
//! # Design Decisions
//! - Routes compiled once, immutable at runtime
//! - Deterministic: same input always yields the same walk
//! - First match wins (declaration order)
//! - The walker only sees the `RouteNode` view, never the owned tree

pub mod apps;
pub mod grouping;
pub mod pattern;
pub mod resolver;
pub mod tree;

pub use apps::AppRegistry;
pub use grouping::{group_frontier, GroupedFragments, OwnerLookup, OTHER_OWNER};
pub use pattern::{PatternError, PatternSyntax, RoutePattern};
pub use resolver::{resolve_frontier, MatchWalkResult};
pub use tree::{ResolvedRoute, Route, RouteKind, RouteNode, RouteTree};
