//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::PatternSyntax;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FrontierConfig {
    /// Serve the route coverage page on 404. When false, a minimal static
    /// 404 is returned and no route data leaves the process.
    pub debug: bool,

    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Installed apps, used to name route owners.
    pub apps: Vec<AppConfig>,

    /// Top-level routes in dispatch order.
    pub routes: Vec<RouteConfig>,
}

impl Default for FrontierConfig {
    fn default() -> Self {
        Self {
            debug: true,
            listener: ListenerConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
            apps: Vec::new(),
            routes: Vec::new(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8000".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// An installed app.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Dotted module prefix owning the app's views and url modules.
    pub name: String,

    /// Short label; defaults to the last component of `name`.
    #[serde(default)]
    pub label: Option<String>,

    /// Human-readable name shown on the debug page.
    #[serde(default)]
    pub verbose_name: Option<String>,
}

impl AppConfig {
    /// `verbose_name`, else `label`, else the last component of `name`.
    pub fn display_name(&self) -> String {
        self.verbose_name
            .clone()
            .or_else(|| self.label.clone())
            .unwrap_or_else(|| {
                self.name
                    .rsplit('.')
                    .next()
                    .unwrap_or(&self.name)
                    .to_string()
            })
    }
}

/// A route or an include.
///
/// Setting `include` (even to an empty list) makes this an include whose
/// pattern is a prefix; otherwise it is a terminal route.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteConfig {
    /// Pattern as written.
    pub pattern: String,

    /// Pattern syntax (`route` or `regex`).
    #[serde(default)]
    pub syntax: PatternSyntax,

    /// Route name, for display.
    #[serde(default)]
    pub name: Option<String>,

    /// Module owning the handler (leaf) or the included routes (include).
    #[serde(default)]
    pub module: Option<String>,

    /// Nested routes.
    #[serde(default)]
    pub include: Option<Vec<RouteConfig>>,
}

impl RouteConfig {
    pub fn leaf(pattern: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            syntax: PatternSyntax::Route,
            name: None,
            module: Some(module.into()),
            include: None,
        }
    }

    pub fn include(
        pattern: impl Into<String>,
        module: impl Into<String>,
        routes: Vec<RouteConfig>,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            syntax: PatternSyntax::Route,
            name: None,
            module: Some(module.into()),
            include: Some(routes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: FrontierConfig = toml::from_str("").unwrap();
        assert!(config.debug);
        assert_eq!(config.listener.bind_address, "127.0.0.1:8000");
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_nested_routes_parse() {
        let config: FrontierConfig = toml::from_str(
            r#"
            debug = false

            [[apps]]
            name = "blog"
            verbose_name = "Blog"

            [[routes]]
            pattern = "blog/"
            module = "blog.urls"

            [[routes.include]]
            pattern = "posts/"
            module = "blog.views"
            name = "post-list"

            [[routes]]
            pattern = '^archive/(?P<year>[0-9]{4})/$'
            syntax = "regex"
            module = "blog.views"
            "#,
        )
        .unwrap();

        assert!(!config.debug);
        assert_eq!(config.routes.len(), 2);
        let include = config.routes[0].include.as_ref().unwrap();
        assert_eq!(include[0].name.as_deref(), Some("post-list"));
        assert_eq!(config.routes[1].syntax, PatternSyntax::Regex);
        assert!(config.routes[1].include.is_none());
    }

    #[test]
    fn test_app_display_name_fallbacks() {
        let app = AppConfig {
            name: "shop.catalog".into(),
            label: None,
            verbose_name: None,
        };
        assert_eq!(app.display_name(), "catalog");
    }
}
