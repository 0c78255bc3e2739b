//! Route tree model and full-path dispatch.
//!
//! # Responsibilities
//! - Expose a read-only node view (`RouteNode`) to the frontier walker
//! - Own the compiled tree built from configuration (`RouteTree`)
//! - Dispatch a full request path in registration order
//!
//! # Design Decisions
//! - Immutable after construction; shared via `Arc` between requests
//! - Leaf vs include is a two-case sum type, never a runtime type check
//! - First match wins; a failed include falls through to the next sibling

use crate::config::RouteConfig;
use crate::routing::pattern::{PatternError, RoutePattern};

/// What a node does once its pattern matched.
#[derive(Debug, Clone, Copy)]
pub enum RouteKind<'a, N> {
    /// Terminal handler.
    Leaf,
    /// Nested sub-tree.
    Group(&'a [N]),
}

/// Read-only view of a node in a route tree.
pub trait RouteNode: Sized {
    fn pattern(&self) -> &RoutePattern;

    fn kind(&self) -> RouteKind<'_, Self>;

    /// Identifier of the module owning the handler or include, if known.
    fn owner(&self) -> Option<&str>;

    /// Children of a group; empty for a leaf.
    fn children(&self) -> &[Self] {
        match self.kind() {
            RouteKind::Leaf => &[],
            RouteKind::Group(children) => children,
        }
    }
}

/// A compiled route owned by a `RouteTree`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pattern: RoutePattern,
    name: Option<String>,
    module: Option<String>,
    children: Option<Vec<Route>>,
}

impl Route {
    /// A terminal route with a `route`-syntax pattern.
    pub fn leaf(pattern: &str, module: Option<&str>) -> Result<Self, PatternError> {
        Ok(Self {
            pattern: RoutePattern::endpoint(pattern)?,
            name: None,
            module: module.map(str::to_string),
            children: None,
        })
    }

    /// An include with a `route`-syntax prefix.
    pub fn group(
        pattern: &str,
        module: Option<&str>,
        children: Vec<Route>,
    ) -> Result<Self, PatternError> {
        Ok(Self {
            pattern: RoutePattern::prefix(pattern)?,
            name: None,
            module: module.map(str::to_string),
            children: Some(children),
        })
    }

    /// Build a route (and its includes) from configuration.
    pub fn from_config(config: &RouteConfig) -> Result<Self, PatternError> {
        let is_endpoint = config.include.is_none();
        let pattern = RoutePattern::compile(&config.pattern, config.syntax, is_endpoint)?;
        let children = match &config.include {
            Some(nested) => Some(
                nested
                    .iter()
                    .map(Route::from_config)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };

        Ok(Self {
            pattern,
            name: config.name.clone(),
            module: config.module.clone(),
            children,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_group(&self) -> bool {
        self.children.is_some()
    }
}

impl RouteNode for Route {
    fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    fn kind(&self) -> RouteKind<'_, Self> {
        match &self.children {
            Some(children) => RouteKind::Group(children),
            None => RouteKind::Leaf,
        }
    }

    fn owner(&self) -> Option<&str> {
        self.module.as_deref()
    }
}

/// Result of a successful full-path dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute<'a> {
    /// The matched leaf.
    pub route: &'a Route,
    /// Patterns along the matched branch, concatenated as written.
    pub route_path: String,
}

/// The compiled route tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTree {
    roots: Vec<Route>,
}

impl RouteTree {
    pub fn new(roots: Vec<Route>) -> Self {
        Self { roots }
    }

    /// Compile the configured routes in declaration order.
    pub fn from_config(routes: &[RouteConfig]) -> Result<Self, PatternError> {
        let roots = routes
            .iter()
            .map(Route::from_config)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { roots })
    }

    pub fn roots(&self) -> &[Route] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Dispatch a request path. The leading `/` is ignored.
    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute<'_>> {
        let path = path.strip_prefix('/').unwrap_or(path);
        resolve_in(&self.roots, path, String::new())
    }

    /// Visit every node depth-first with its depth.
    pub fn visit<F>(&self, mut f: F)
    where
        F: FnMut(usize, &Route),
    {
        fn walk<F: FnMut(usize, &Route)>(nodes: &[Route], depth: usize, f: &mut F) {
            for node in nodes {
                f(depth, node);
                walk(node.children(), depth + 1, f);
            }
        }
        walk(&self.roots, 0, &mut f);
    }
}

fn resolve_in<'a>(nodes: &'a [Route], remaining: &str, prefix: String) -> Option<ResolvedRoute<'a>> {
    for node in nodes {
        let Some(len) = node.pattern.match_len(remaining) else {
            continue;
        };
        let route_path = format!("{}{}", prefix, node.pattern.source());

        match node.kind() {
            RouteKind::Group(children) => {
                if let Some(found) = resolve_in(children, &remaining[len..], route_path) {
                    return Some(found);
                }
            }
            RouteKind::Leaf => {
                // Raw regex leaves without `$` may stop short.
                if len == remaining.len() {
                    return Some(ResolvedRoute {
                        route: node,
                        route_path,
                    });
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blog_tree() -> RouteTree {
        RouteTree::new(vec![
            Route::group(
                "blog/",
                Some("blog.urls"),
                vec![
                    Route::leaf("posts/", Some("blog.views")).unwrap().with_name("post-list"),
                    Route::leaf("posts/<int:pk>/", Some("blog.views")).unwrap(),
                    Route::leaf("comments/", Some("blog.views")).unwrap(),
                ],
            )
            .unwrap(),
            Route::leaf("about/", Some("pages.views")).unwrap(),
            Route::leaf("", Some("pages.views")).unwrap().with_name("home"),
        ])
    }

    #[test]
    fn test_resolve_nested_leaf() {
        let tree = blog_tree();
        let resolved = tree.resolve("/blog/posts/").unwrap();
        assert_eq!(resolved.route.name(), Some("post-list"));
        assert_eq!(resolved.route_path, "blog/posts/");
    }

    #[test]
    fn test_resolve_with_converter() {
        let tree = blog_tree();
        let resolved = tree.resolve("/blog/posts/42/").unwrap();
        assert_eq!(resolved.route_path, "blog/posts/<int:pk>/");
        assert_eq!(resolved.route.owner(), Some("blog.views"));
    }

    #[test]
    fn test_resolve_rejects_extra_segments() {
        let tree = blog_tree();
        assert!(tree.resolve("/blog/posts/extra/").is_none());
        assert!(tree.resolve("/about/team/").is_none());
    }

    #[test]
    fn test_resolve_root() {
        let tree = blog_tree();
        assert_eq!(tree.resolve("/").unwrap().route.name(), Some("home"));
    }

    #[test]
    fn test_failed_include_falls_through() {
        let tree = RouteTree::new(vec![
            Route::group("", None, vec![Route::leaf("a/", None).unwrap()]).unwrap(),
            Route::leaf("b/", Some("other.views")).unwrap().with_name("b"),
        ]);
        assert_eq!(tree.resolve("/b/").unwrap().route.name(), Some("b"));
    }

    #[test]
    fn test_children_of_leaf_is_empty() {
        let leaf = Route::leaf("x/", None).unwrap();
        assert!(leaf.children().is_empty());
        assert!(matches!(leaf.kind(), RouteKind::Leaf));
    }

    #[test]
    fn test_visit_depth_first() {
        let tree = blog_tree();
        let mut seen = Vec::new();
        tree.visit(|depth, route| seen.push((depth, route.pattern().source().to_string())));
        assert_eq!(seen[0], (0, "blog/".to_string()));
        assert_eq!(seen[1], (1, "posts/".to_string()));
        assert_eq!(seen[4], (0, "about/".to_string()));
        assert_eq!(seen.len(), 6);
    }
}
