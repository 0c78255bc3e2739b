//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the dispatch fallback
//! - Wire up middleware (tracing, timeout, request ID)
//! - Dispatch requests through the compiled route tree
//! - Serve the route coverage page when dispatch fails
//! - Swap the route snapshot on config reload
//! - Observability (metrics, correlation IDs)

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use percent_encoding::percent_decode_str;
use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    response::{IntoResponse, Response},
    Json, Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::FrontierConfig;
use crate::debug::{handle_unmatched_request, HtmlRenderer, JsonRenderer, PageMode, PageRenderer};
use crate::http::response::RouteMatch;
use crate::http::X_REQUEST_ID;
use crate::observability::metrics::{self, Outcome};
use crate::routing::{AppRegistry, PatternError, RouteTree};

/// Errors raised while building or running the server.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("route compilation failed: {0}")]
    Pattern(#[from] PatternError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Compiled routing state for one configuration generation.
#[derive(Debug)]
pub struct RouteSnapshot {
    pub tree: RouteTree,
    pub registry: AppRegistry,
    pub mode: PageMode,
}

impl RouteSnapshot {
    pub fn from_config(config: &FrontierConfig) -> Result<Self, PatternError> {
        Ok(Self {
            tree: RouteTree::from_config(&config.routes)?,
            registry: AppRegistry::from_config(&config.apps),
            mode: PageMode::from_debug_flag(config.debug),
        })
    }
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<ArcSwap<RouteSnapshot>>,
}

impl AppState {
    pub fn new(snapshot: RouteSnapshot) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(snapshot)),
        }
    }

    /// Compile `config` and swap it in. On failure the current snapshot stays.
    pub fn apply(&self, config: &FrontierConfig) -> bool {
        match RouteSnapshot::from_config(config) {
            Ok(snapshot) => {
                tracing::info!(
                    routes = snapshot.tree.roots().len(),
                    apps = snapshot.registry.apps().len(),
                    debug = config.debug,
                    "Route snapshot reloaded"
                );
                self.inner.store(Arc::new(snapshot));
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Rejected reloaded routes, keeping current snapshot");
                false
            }
        }
    }
}

/// Development server for a configured route tree.
pub struct HttpServer {
    router: Router,
    config: FrontierConfig,
    state: AppState,
}

impl HttpServer {
    /// Compile the configured routes and build the router.
    pub fn new(config: FrontierConfig) -> Result<Self, ServerError> {
        let state = AppState::new(RouteSnapshot::from_config(&config)?);
        let router = Self::build_router(&config, state.clone());
        Ok(Self {
            router,
            config,
            state,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &FrontierConfig, state: AppState) -> Router {
        Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The router, for serving in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    pub fn config(&self) -> &FrontierConfig {
        &self.config
    }

    /// Run the server until `shutdown` fires, applying config updates as they arrive.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<FrontierConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            debug = self.config.debug,
            "HTTP server starting"
        );

        let reload_state = self.state.clone();
        let mut reload_shutdown = shutdown.resubscribe();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    update = config_updates.recv() => match update {
                        Some(config) => {
                            reload_state.apply(&config);
                        }
                        None => break,
                    },
                    _ = reload_shutdown.recv() => break,
                }
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

fn accepts_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"))
}

/// Dispatch through the route tree; fall back to the coverage page.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let path = percent_decode_str(request.uri().path())
        .decode_utf8_lossy()
        .into_owned();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let snapshot = state.inner.load_full();

    if let Some(resolved) = snapshot.tree.resolve(&path) {
        tracing::debug!(
            request_id = %request_id,
            path = %path,
            route = %resolved.route_path,
            "Route matched"
        );
        metrics::record_request(Outcome::Matched, start);
        return Json(RouteMatch::new(&path, &resolved)).into_response();
    }

    let renderer: &dyn PageRenderer = if accepts_json(request.headers()) {
        &JsonRenderer
    } else {
        &HtmlRenderer
    };

    let page = handle_unmatched_request(
        &path,
        snapshot.tree.roots(),
        &snapshot.registry,
        renderer,
        snapshot.mode,
    );

    tracing::warn!(request_id = %request_id, path = %path, "No route matched");
    metrics::record_request(Outcome::Unmatched, start);
    page.into_response()
}
