//! Response construction.
//!
//! # Responsibilities
//! - Describe a dispatched route as JSON
//! - Turn a rendered 404 page into an HTTP response

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::debug::RenderedPage;
use crate::routing::{ResolvedRoute, RouteNode};

/// Body returned when a request path resolves to a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMatch {
    pub path: String,
    /// Patterns along the matched branch, as written.
    pub route: String,
    pub name: Option<String>,
    pub module: Option<String>,
}

impl RouteMatch {
    pub fn new(path: &str, resolved: &ResolvedRoute<'_>) -> Self {
        Self {
            path: path.to_string(),
            route: resolved.route_path.clone(),
            name: resolved.route.name().map(str::to_string),
            module: resolved.route.owner().map(str::to_string),
        }
    }
}

impl IntoResponse for RenderedPage {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::NOT_FOUND);
        (status, [(header::CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}
