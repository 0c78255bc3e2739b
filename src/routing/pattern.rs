//! Route pattern compilation.
//!
//! # Responsibilities
//! - Compile `route` syntax (`blog/<int:pk>/`) into an anchored regex
//! - Accept raw `regex` syntax as written
//! - Match from the start of the input only
//! - Produce the display fragment shown on the debug page
//!
//! # Design Decisions
//! - Group (include) patterns are prefix matches; leaf `route` patterns must
//!   consume the whole input
//! - Pattern length and compiled regex size are capped

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest pattern source accepted, in bytes.
pub const MAX_PATTERN_LENGTH: usize = 1024;

const MAX_REGEX_SIZE: usize = 256 * 1024;

/// Errors raised while compiling a route pattern.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern length {0} exceeds maximum of {max} bytes", max = MAX_PATTERN_LENGTH)]
    TooLong(usize),

    #[error("unknown path converter '{converter}' in '{pattern}'")]
    UnknownConverter { pattern: String, converter: String },

    #[error("invalid placeholder '<{placeholder}>' in '{pattern}'")]
    InvalidPlaceholder { pattern: String, placeholder: String },

    #[error("unterminated placeholder in '{0}'")]
    Unterminated(String),

    #[error("invalid regex '{pattern}': {reason}")]
    InvalidRegex { pattern: String, reason: String },
}

/// How a pattern source is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternSyntax {
    /// `path()` style: literal text with `<converter:name>` placeholders.
    #[default]
    Route,
    /// Raw regular expression.
    Regex,
}

/// A compiled, start-anchored route pattern.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    source: String,
    syntax: PatternSyntax,
    regex: Regex,
}

impl RoutePattern {
    /// Compile a pattern.
    ///
    /// `is_endpoint` anchors `route` syntax at the end as well, so terminal
    /// routes only match their whole input. `regex` syntax is used as written.
    pub fn compile(
        source: &str,
        syntax: PatternSyntax,
        is_endpoint: bool,
    ) -> Result<Self, PatternError> {
        if source.len() > MAX_PATTERN_LENGTH {
            return Err(PatternError::TooLong(source.len()));
        }

        let regex_src = match syntax {
            PatternSyntax::Route => route_to_regex(source, is_endpoint)?,
            PatternSyntax::Regex => format!("^(?:{})", source),
        };

        let regex = RegexBuilder::new(&regex_src)
            .size_limit(MAX_REGEX_SIZE)
            .build()
            .map_err(|e| PatternError::InvalidRegex {
                pattern: source.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            source: source.to_string(),
            syntax,
            regex,
        })
    }

    /// Compile a terminal `route` pattern.
    pub fn endpoint(source: &str) -> Result<Self, PatternError> {
        Self::compile(source, PatternSyntax::Route, true)
    }

    /// Compile an include (prefix) `route` pattern.
    pub fn prefix(source: &str) -> Result<Self, PatternError> {
        Self::compile(source, PatternSyntax::Route, false)
    }

    /// The pattern as written.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn syntax(&self) -> PatternSyntax {
        self.syntax
    }

    /// Length of the match starting at position 0, if any.
    pub fn match_len(&self, input: &str) -> Option<usize> {
        self.regex
            .find(input)
            .filter(|m| m.start() == 0)
            .map(|m| m.end())
    }

    /// Returns true if the pattern matches at the start of `input`.
    pub fn matches(&self, input: &str) -> bool {
        self.match_len(input).is_some()
    }

    /// The source with regex start/end anchors stripped.
    pub fn display_fragment(&self) -> &str {
        self.source.trim_start_matches('^').trim_end_matches('$')
    }
}

impl PartialEq for RoutePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.syntax == other.syntax
    }
}

impl Eq for RoutePattern {}

fn converter_regex(converter: &str) -> Option<&'static str> {
    match converter {
        "str" => Some("[^/]+"),
        "int" => Some("[0-9]+"),
        "slug" => Some("[-a-zA-Z0-9_]+"),
        "uuid" => Some("[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}"),
        "path" => Some(".+"),
        _ => None,
    }
}

fn route_to_regex(route: &str, is_endpoint: bool) -> Result<String, PatternError> {
    let mut out = String::from("^");
    let mut rest = route;

    while let Some(open) = rest.find('<') {
        out.push_str(&regex::escape(&rest[..open]));
        let after = &rest[open + 1..];
        let close = after
            .find('>')
            .ok_or_else(|| PatternError::Unterminated(route.to_string()))?;
        let placeholder = &after[..close];

        let (converter, name) = match placeholder.split_once(':') {
            Some((converter, name)) => (converter, name),
            None => ("str", placeholder),
        };

        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(PatternError::InvalidPlaceholder {
                pattern: route.to_string(),
                placeholder: placeholder.to_string(),
            });
        }

        let converter_re =
            converter_regex(converter).ok_or_else(|| PatternError::UnknownConverter {
                pattern: route.to_string(),
                converter: converter.to_string(),
            })?;

        out.push_str(&format!("(?P<{}>{})", name, converter_re));
        rest = &after[close + 1..];
    }

    out.push_str(&regex::escape(rest));
    if is_endpoint {
        out.push_str(r"\z");
    }
    Ok(out)
}
