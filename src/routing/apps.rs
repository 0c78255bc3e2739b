//! Installed-app registry used to name route owners.

use crate::config::AppConfig;
use crate::routing::grouping::OwnerLookup;

/// A registered app and the name it is displayed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppEntry {
    /// Module prefix, e.g. `blog`.
    pub name: String,
    pub display_name: String,
}

/// Resolves owner module ids to app display names.
///
/// The first app (in declared order) whose name is the module id or a dotted
/// prefix of it wins: `blog` owns `blog.views` but not `blogroll.views`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppRegistry {
    apps: Vec<AppEntry>,
}

impl AppRegistry {
    pub fn new(apps: Vec<AppEntry>) -> Self {
        Self { apps }
    }

    pub fn from_config(apps: &[AppConfig]) -> Self {
        let apps = apps
            .iter()
            .map(|app| AppEntry {
                name: app.name.clone(),
                display_name: app.display_name(),
            })
            .collect();
        Self { apps }
    }

    pub fn apps(&self) -> &[AppEntry] {
        &self.apps
    }

    /// Find the app owning a module id.
    pub fn app_for(&self, module: &str) -> Option<&AppEntry> {
        self.apps.iter().find(|app| {
            module
                .strip_prefix(app.name.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
        })
    }
}

impl OwnerLookup for AppRegistry {
    fn resolve(&self, owner: &str) -> Option<String> {
        self.app_for(owner).map(|app| app.display_name.clone())
    }
}
