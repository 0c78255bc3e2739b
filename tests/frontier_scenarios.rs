//! Frontier walk scenarios over a configured tree.

use route_frontier::routing::{
    group_frontier, resolve_frontier, AppRegistry, Route, RouteNode, RouteTree,
};

mod common;

fn tree() -> (RouteTree, AppRegistry) {
    let config = common::blog_config();
    (
        RouteTree::from_config(&config.routes).unwrap(),
        AppRegistry::from_config(&config.apps),
    )
}

fn sources(nodes: &[Route]) -> Vec<&str> {
    nodes.iter().map(|n| n.pattern().source()).collect()
}

#[test]
fn test_partial_match_inside_include() {
    let (tree, _) = tree();
    let result = resolve_frontier("blog/unknown/", tree.roots());
    assert_eq!(result.matched_prefix_segments, vec!["blog"]);
    assert_eq!(sources(result.frontier_nodes), vec!["posts/", "comments/"]);

    let all_blog = |_: &str| Some("Blog".to_string());
    let grouped = group_frontier(result.frontier_nodes, &all_blog);
    assert_eq!(grouped.len(), 1);
    assert_eq!(grouped.get("Blog").unwrap(), ["comments/", "posts/"]);
}

#[test]
fn test_no_match_returns_top_level() {
    let (tree, _) = tree();
    let result = resolve_frontier("unknown/", tree.roots());
    assert!(result.matched_prefix_segments.is_empty());
    assert_eq!(result.frontier_nodes, tree.roots());

    let all_blog = |_: &str| Some("Blog".to_string());
    let grouped = group_frontier(result.frontier_nodes, &all_blog);
    assert_eq!(grouped.get("Blog").unwrap(), ["about/", "blog/"]);
}

#[test]
fn test_exact_leaf_has_nothing_below() {
    let (tree, registry) = tree();
    let result = resolve_frontier("about/", tree.roots());
    assert_eq!(result.matched_prefix_segments, vec!["about"]);
    assert!(result.frontier_nodes.is_empty());
    assert!(group_frontier(result.frontier_nodes, &registry).is_empty());
}

#[test]
fn test_registry_groups_by_app() {
    let (tree, registry) = tree();
    let result = resolve_frontier("/missing/", tree.roots());
    let grouped = group_frontier(result.frontier_nodes, &registry);
    let owners: Vec<_> = grouped.owners().collect();
    assert_eq!(owners, vec!["Blog", "Pages"]);
}

#[test]
fn test_deep_paths_terminate_within_segment_count() {
    let (tree, _) = tree();
    let path = "blog/".repeat(50);
    let result = resolve_frontier(&path, tree.roots());
    assert!(result.matched_prefix_segments.len() <= 50);
    assert_eq!(result.matched_prefix_segments, vec!["blog"]);
}
