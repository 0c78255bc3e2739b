//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use route_frontier::config::{parse_config, FrontierConfig};
use route_frontier::{HttpServer, Shutdown};

/// Route tree used across the integration tests.
pub const BLOG_CONFIG: &str = r#"
[[apps]]
name = "blog"
verbose_name = "Blog"

[[apps]]
name = "pages"
verbose_name = "Pages"

[[routes]]
pattern = "blog/"
module = "blog.urls"

[[routes.include]]
pattern = "posts/"
module = "blog.views"
name = "post-list"

[[routes.include]]
pattern = "comments/"
module = "blog.views"

[[routes]]
pattern = "about/"
module = "pages.views"
name = "about"
"#;

pub fn blog_config() -> FrontierConfig {
    parse_config(BLOG_CONFIG).unwrap()
}

/// Start the server on an ephemeral port.
///
/// Keep the returned `Shutdown` alive for as long as the server is needed.
pub async fn start_server(config: FrontierConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let (_, config_updates) = mpsc::unbounded_channel();
    let server = HttpServer::new(config).unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener, config_updates, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
