use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use percent_encoding::percent_decode_str;

use route_frontier::config::{load_config, parse_config, ConfigError};
use route_frontier::debug::NotFoundContext;
use route_frontier::routing::{AppRegistry, RouteNode, RouteTree, OTHER_OWNER};

#[derive(Parser)]
#[command(name = "frontier-cli")]
#[command(about = "Inspect a route tree configuration offline", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "frontier.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the matched prefix and available routes for a path
    Resolve {
        path: String,

        /// Print the page context as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the route tree with owners
    Routes,
    /// Validate the configuration and report every problem
    Check,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            let content = std::fs::read_to_string(&cli.config)?;
            match parse_config(&content) {
                Ok(config) => {
                    let mut count = 0;
                    RouteTree::from_config(&config.routes)?.visit(|_, _| count += 1);
                    println!("{}: ok ({} routes, {} apps)", cli.config.display(), count, config.apps.len());
                    Ok(ExitCode::SUCCESS)
                }
                Err(ConfigError::Validation(errors)) => {
                    for error in &errors {
                        eprintln!("{}: {}", cli.config.display(), error);
                    }
                    Ok(ExitCode::FAILURE)
                }
                Err(e) => {
                    eprintln!("{}: {}", cli.config.display(), e);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Routes => {
            let config = load_config(&cli.config)?;
            let tree = RouteTree::from_config(&config.routes)?;
            let registry = AppRegistry::from_config(&config.apps);

            tree.visit(|depth, route| {
                let owner = route
                    .owner()
                    .and_then(|m| registry.app_for(m))
                    .map(|app| app.display_name.as_str())
                    .unwrap_or(OTHER_OWNER);
                let marker = if route.is_group() { " (include)" } else { "" };
                let name = route.name().map(|n| format!(" [{}]", n)).unwrap_or_default();
                println!(
                    "{}{}{}{}  -- {}",
                    "  ".repeat(depth),
                    route.pattern().source(),
                    marker,
                    name,
                    owner
                );
            });
            Ok(ExitCode::SUCCESS)
        }
        Commands::Resolve { path, json } => {
            let path = percent_decode_str(&path).decode_utf8_lossy().into_owned();
            let config = load_config(&cli.config)?;
            let tree = RouteTree::from_config(&config.routes)?;
            let registry = AppRegistry::from_config(&config.apps);

            if let Some(resolved) = tree.resolve(&path) {
                println!("{} resolves to {}", path, resolved.route_path);
                return Ok(ExitCode::SUCCESS);
            }

            let context = NotFoundContext::build(&path, tree.roots(), &registry);
            if json {
                println!("{}", serde_json::to_string_pretty(&context)?);
            } else {
                println!("No route matches {}", context.request_path);
                println!("Longest matching prefix: {}", context.matched_prefix_path);
                for (owner, fragments) in context.grouped_fragments.iter() {
                    println!("{}:", owner);
                    for fragment in fragments {
                        println!("  {}{}", context.matched_prefix_path, fragment);
                    }
                }
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
