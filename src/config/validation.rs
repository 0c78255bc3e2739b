//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every route pattern compiles, with its position in the tree
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Detect duplicate apps
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: FrontierConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{FrontierConfig, RouteConfig};
use crate::routing::{PatternError, PatternSyntax, RoutePattern};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("apps[{0}]: name must not be empty")]
    EmptyAppName(usize),

    #[error("duplicate app '{0}'")]
    DuplicateApp(String),

    #[error("{position}: {source}")]
    InvalidPattern {
        position: String,
        source: PatternError,
    },

    #[error("{position}: route '{pattern}' must not start with '/'")]
    LeadingSlash { position: String, pattern: String },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &FrontierConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.to_lowercase().as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let mut seen = HashSet::new();
    for (i, app) in config.apps.iter().enumerate() {
        if app.name.trim().is_empty() {
            errors.push(ValidationError::EmptyAppName(i));
        } else if !seen.insert(app.name.as_str()) {
            errors.push(ValidationError::DuplicateApp(app.name.clone()));
        }
    }

    validate_routes(&config.routes, "routes", &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_routes(routes: &[RouteConfig], parent: &str, errors: &mut Vec<ValidationError>) {
    for (i, route) in routes.iter().enumerate() {
        let position = format!("{}[{}]", parent, i);

        if route.syntax == PatternSyntax::Route && route.pattern.starts_with('/') {
            errors.push(ValidationError::LeadingSlash {
                position: position.clone(),
                pattern: route.pattern.clone(),
            });
        }

        if let Err(source) =
            RoutePattern::compile(&route.pattern, route.syntax, route.include.is_none())
        {
            errors.push(ValidationError::InvalidPattern {
                position: position.clone(),
                source,
            });
        }

        if let Some(nested) = &route.include {
            validate_routes(nested, &format!("{}.include", position), errors);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::AppConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&FrontierConfig::default()).is_ok());
    }

    #[test]
    fn test_reports_every_invalid_pattern() {
        let mut config = FrontierConfig::default();
        config.routes = vec![
            RouteConfig::leaf("<float:x>/", "a.views"),
            RouteConfig::include(
                "blog/",
                "blog.urls",
                vec![
                    RouteConfig::leaf("ok/", "blog.views"),
                    RouteConfig::leaf("<int:pk/", "blog.views"),
                ],
            ),
        ];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(&errors[0], ValidationError::InvalidPattern { position, .. } if position == "routes[0]"));
        assert!(matches!(&errors[1], ValidationError::InvalidPattern { position, .. } if position == "routes[1].include[1]"));
    }

    #[test]
    fn test_leading_slash_rejected() {
        let mut config = FrontierConfig::default();
        config.routes = vec![RouteConfig::leaf("/about/", "pages.views")];
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::LeadingSlash { .. }));
    }

    #[test]
    fn test_scalar_checks() {
        let mut config = FrontierConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.observability.log_level = "loud".into();
        config.timeouts.request_secs = 0;
        config.apps = vec![
            AppConfig { name: "blog".into(), label: None, verbose_name: None },
            AppConfig { name: "blog".into(), label: None, verbose_name: None },
            AppConfig { name: " ".into(), label: None, verbose_name: None },
        ];

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: "not-an-address".into(),
        }));
        assert!(errors.contains(&ValidationError::UnknownLogLevel("loud".into())));
        assert!(errors.contains(&ValidationError::ZeroTimeout));
        assert!(errors.contains(&ValidationError::DuplicateApp("blog".into())));
        assert!(errors.contains(&ValidationError::EmptyAppName(2)));
    }
}
