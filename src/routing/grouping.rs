//! Frontier grouping for display.
//!
//! # Responsibilities
//! - Render each frontier node as a display fragment
//! - Keep direct children only (no inner `/`)
//! - Group fragments by owning app and sort them
//!
//! # Design Decisions
//! - Pure function over its inputs
//! - Unknown owners degrade to `"Other"`, never to an error
//! - Group keys are ordered case-insensitively, fragments lexically

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::routing::tree::RouteNode;

/// Group name used when a node's owner cannot be resolved.
pub const OTHER_OWNER: &str = "Other";

/// Maps an owner identifier (module path) to a display name.
pub trait OwnerLookup {
    fn resolve(&self, owner: &str) -> Option<String>;
}

impl<F> OwnerLookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve(&self, owner: &str) -> Option<String> {
        self(owner)
    }
}

/// Fragments grouped by owner, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedFragments {
    groups: Vec<(String, Vec<String>)>,
}

impl GroupedFragments {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Fragments for one owner.
    pub fn get(&self, owner: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|(name, _)| name == owner)
            .map(|(_, fragments)| fragments.as_slice())
    }

    pub fn owners(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(name, fragments)| (name.as_str(), fragments.as_slice()))
    }

    /// Re-apply the display ordering.
    pub fn sorted(mut self) -> Self {
        sort_groups(&mut self.groups);
        self
    }
}

impl Serialize for GroupedFragments {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (owner, fragments) in &self.groups {
            map.serialize_entry(owner, fragments)?;
        }
        map.end()
    }
}

fn sort_groups(groups: &mut [(String, Vec<String>)]) {
    for (_, fragments) in groups.iter_mut() {
        fragments.sort();
    }
    groups.sort_by_cached_key(|(name, _)| name.to_lowercase());
}

/// Whether a fragment names a direct child (no `/` once outer slashes are trimmed).
fn is_direct_child(fragment: &str) -> bool {
    !fragment.trim_matches('/').contains('/')
}

/// Group the frontier by owner for display.
pub fn group_frontier<N, L>(frontier_nodes: &[N], owner_lookup: &L) -> GroupedFragments
where
    N: RouteNode,
    L: OwnerLookup + ?Sized,
{
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for node in frontier_nodes {
        let fragment = node.pattern().display_fragment();
        if !is_direct_child(fragment) {
            continue;
        }

        let owner = node
            .owner()
            .and_then(|id| owner_lookup.resolve(id))
            .unwrap_or_else(|| OTHER_OWNER.to_string());

        grouped.entry(owner).or_default().push(fragment.to_string());
    }

    let mut groups: Vec<_> = grouped.into_iter().collect();
    sort_groups(&mut groups);
    GroupedFragments { groups }
}
