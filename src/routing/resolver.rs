//! Frontier walk for unmatched request paths.
//!
//! # Responsibilities
//! - Walk the route tree segment by segment
//! - Stop at the deepest node that matched a prefix of the path
//! - Report the matched segments and the sibling nodes available there
//!
//! # Design Decisions
//! - Each segment is matched with a trailing `/` so `foo` never matches a
//!   pattern meant for `foobar`
//! - First match in declared order wins, like dispatch itself
//! - A leaf matched before the last segment is a dead end: the walk stops
//!   without counting that segment and keeps the current frontier
//! - Never fails; the walk is bounded by the number of segments

use crate::routing::tree::{RouteKind, RouteNode};

/// Outcome of a frontier walk. Borrows the frontier from the tree.
#[derive(Debug)]
pub struct MatchWalkResult<'a, N> {
    /// Longest run of path segments successfully consumed.
    pub matched_prefix_segments: Vec<String>,
    /// Nodes available right after the matched prefix.
    pub frontier_nodes: &'a [N],
}

impl<N> MatchWalkResult<'_, N> {
    /// The matched prefix as a path, e.g. `/blog/` or `/`.
    pub fn matched_prefix_path(&self) -> String {
        if self.matched_prefix_segments.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", self.matched_prefix_segments.join("/"))
        }
    }
}

impl<N> Clone for MatchWalkResult<'_, N> {
    fn clone(&self) -> Self {
        Self {
            matched_prefix_segments: self.matched_prefix_segments.clone(),
            frontier_nodes: self.frontier_nodes,
        }
    }
}

impl<N: PartialEq> PartialEq for MatchWalkResult<'_, N> {
    fn eq(&self, other: &Self) -> bool {
        self.matched_prefix_segments == other.matched_prefix_segments
            && self.frontier_nodes == other.frontier_nodes
    }
}

/// Split a request path into its non-empty segments.
pub fn path_segments(request_path: &str) -> Vec<&str> {
    request_path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Find the deepest matched prefix of `request_path` and the nodes below it.
pub fn resolve_frontier<'a, N: RouteNode>(
    request_path: &str,
    root_nodes: &'a [N],
) -> MatchWalkResult<'a, N> {
    let segments = path_segments(request_path);
    let last = segments.len().saturating_sub(1);

    let mut current: &'a [N] = root_nodes;
    let mut matched_count = 0;

    for (i, segment) in segments.iter().enumerate() {
        let candidate = format!("{}/", segment);
        let Some(node) = current.iter().find(|n| n.pattern().matches(&candidate)) else {
            break;
        };

        match node.kind() {
            RouteKind::Group(children) => {
                current = children;
                matched_count = i + 1;
            }
            RouteKind::Leaf if i == last => {
                current = &[];
                matched_count = i + 1;
                break;
            }
            RouteKind::Leaf => break,
        }
    }

    MatchWalkResult {
        matched_prefix_segments: segments[..matched_count]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        frontier_nodes: current,
    }
}
