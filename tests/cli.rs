//! `frontier-cli` subcommands against configs on disk.

mod common;

use std::path::PathBuf;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_config(content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frontier.toml");
    std::fs::write(&path, content).unwrap();
    (dir, path)
}

fn cli(config: &PathBuf) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_frontier-cli"));
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn test_check_accepts_valid_config() {
    let (_dir, path) = write_config(common::BLOG_CONFIG);
    cli(&path)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("ok (4 routes, 2 apps)"));
}

#[test]
fn test_check_rejects_invalid_config() {
    let (_dir, path) = write_config(
        r#"
[[routes]]
pattern = "/blog/"
module = "blog.urls"

[[routes.include]]
pattern = "<float:x>/"
module = "blog.views"
"#,
    );
    cli(&path)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("routes[0]"))
        .stderr(predicate::str::contains("routes[0].include[0]"));
}

#[test]
fn test_check_rejects_malformed_toml() {
    let (_dir, path) = write_config("routes = [");
    cli(&path).arg("check").assert().failure();
}

#[test]
fn test_resolve_matched_path() {
    let (_dir, path) = write_config(common::BLOG_CONFIG);
    cli(&path)
        .args(["resolve", "/blog/posts/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("resolves to blog/posts/"));
}

#[test]
fn test_resolve_unmatched_path_lists_frontier() {
    let (_dir, path) = write_config(common::BLOG_CONFIG);
    cli(&path)
        .args(["resolve", "/blog/unknown/"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Longest matching prefix: /blog/"))
        .stdout(predicate::str::contains("Blog:"))
        .stdout(predicate::str::contains("  /blog/comments/"))
        .stdout(predicate::str::contains("about/").not());
}

#[test]
fn test_resolve_json() {
    let (_dir, path) = write_config(common::BLOG_CONFIG);
    let output = cli(&path)
        .args(["resolve", "--json", "/blog/unknown/"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["matched_prefix_path"], "/blog/");
    assert_eq!(value["grouped_fragments"]["Blog"][0], "comments/");
}

#[test]
fn test_routes_prints_tree_with_owners() {
    let (_dir, path) = write_config(common::BLOG_CONFIG);
    cli(&path)
        .arg("routes")
        .assert()
        .success()
        .stdout(predicate::str::contains("blog/ (include)  -- Blog"))
        .stdout(predicate::str::contains("  posts/ [post-list]  -- Blog"))
        .stdout(predicate::str::contains("about/ [about]  -- Pages"));
}
