//! Entry point for requests no route matched.

use serde::Serialize;

use crate::debug::render::PageRenderer;
use crate::routing::{group_frontier, resolve_frontier, GroupedFragments, OwnerLookup, RouteNode};

/// Body returned when the debug page is disabled.
pub const MINIMAL_NOT_FOUND: &str = "<h1>404 – Not Found</h1>";

/// Whether route data may be shown on the 404 page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    Debug,
    Production,
}

impl PageMode {
    pub fn from_debug_flag(debug: bool) -> Self {
        if debug {
            PageMode::Debug
        } else {
            PageMode::Production
        }
    }
}

/// Data handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotFoundContext {
    pub request_path: String,
    pub matched_prefix_path: String,
    pub grouped_fragments: GroupedFragments,
}

impl NotFoundContext {
    /// Walk the tree for `request_path` and group what lies beyond the match.
    pub fn build<N, L>(request_path: &str, root_nodes: &[N], owner_lookup: &L) -> Self
    where
        N: RouteNode,
        L: OwnerLookup + ?Sized,
    {
        let walk = resolve_frontier(request_path, root_nodes);
        let grouped_fragments = group_frontier(walk.frontier_nodes, owner_lookup);

        Self {
            request_path: request_path.to_string(),
            matched_prefix_path: walk.matched_prefix_path(),
            grouped_fragments,
        }
    }
}

/// A finished 404 response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl RenderedPage {
    pub fn not_found(content_type: &'static str, body: String) -> Self {
        Self {
            status: 404,
            content_type,
            body,
        }
    }
}

/// Produce the 404 page for a path the host could not dispatch.
///
/// In production mode the tree is not consulted at all.
pub fn handle_unmatched_request<N, L>(
    request_path: &str,
    root_nodes: &[N],
    owner_lookup: &L,
    renderer: &dyn PageRenderer,
    mode: PageMode,
) -> RenderedPage
where
    N: RouteNode,
    L: OwnerLookup + ?Sized,
{
    match mode {
        PageMode::Production => {
            RenderedPage::not_found("text/html; charset=utf-8", MINIMAL_NOT_FOUND.to_string())
        }
        PageMode::Debug => {
            let context = NotFoundContext::build(request_path, root_nodes, owner_lookup);
            tracing::debug!(
                path = %request_path,
                matched_prefix = %context.matched_prefix_path,
                groups = context.grouped_fragments.len(),
                "Rendering route coverage page"
            );
            RenderedPage::not_found(renderer.content_type(), renderer.render(&context))
        }
    }
}
