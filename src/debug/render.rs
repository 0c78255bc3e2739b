//! Page renderers for the route coverage 404.
//!
//! # Responsibilities
//! - Turn a `NotFoundContext` into a response body
//! - HTML for browsers (tera template), JSON for tools
//!
//! # Design Decisions
//! - The HTML template is compiled into the binary and autoescaped
//! - Groups are handed to the template as an ordered list, never a map
//! - A render failure degrades to the minimal 404 body

use std::sync::OnceLock;

use serde::Serialize;
use tera::{Context, Tera};

use crate::debug::handler::{NotFoundContext, MINIMAL_NOT_FOUND};

/// Name of the debug 404 template.
pub const TECHNICAL_404_TEMPLATE: &str = "technical_404.html";

static TEMPLATES: OnceLock<Tera> = OnceLock::new();

fn templates() -> &'static Tera {
    TEMPLATES.get_or_init(|| {
        let mut tera = Tera::default();
        if let Err(e) = tera.add_raw_template(
            TECHNICAL_404_TEMPLATE,
            include_str!("../../templates/technical_404.html"),
        ) {
            tracing::error!(error = %e, "Failed to compile 404 template");
        }
        tera
    })
}

/// Renders the 404 context into a response body.
pub trait PageRenderer: Send + Sync {
    fn content_type(&self) -> &'static str;

    fn render(&self, context: &NotFoundContext) -> String;
}

/// Developer-facing HTML page.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

/// Machine-readable rendering of the same context.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

#[derive(Serialize)]
struct OwnerGroup<'a> {
    owner: &'a str,
    fragments: &'a [String],
}

impl PageRenderer for HtmlRenderer {
    fn content_type(&self) -> &'static str {
        "text/html; charset=utf-8"
    }

    fn render(&self, context: &NotFoundContext) -> String {
        let groups: Vec<OwnerGroup<'_>> = context
            .grouped_fragments
            .iter()
            .map(|(owner, fragments)| OwnerGroup { owner, fragments })
            .collect();

        let mut tera_context = Context::new();
        tera_context.insert("request_path", &context.request_path);
        tera_context.insert("matched_prefix_path", &context.matched_prefix_path);
        tera_context.insert("grouped_fragments", &groups);

        templates()
            .render(TECHNICAL_404_TEMPLATE, &tera_context)
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "Failed to render 404 template");
                MINIMAL_NOT_FOUND.to_string()
            })
    }
}

impl PageRenderer for JsonRenderer {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn render(&self, context: &NotFoundContext) -> String {
        serde_json::to_string(context).unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to serialize 404 context");
            "{}".to_string()
        })
    }
}
