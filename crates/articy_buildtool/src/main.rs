//! Articy build descriptor tool
//!
//! Resolves the plugin's module build descriptors against a target engine
//! version and prints the orchestrator schema as JSON on stdout. Errors go
//! to the log and the process exits non-zero, so nothing partially resolved
//! ever reaches a compiler.
//!
//! Run with: cargo run -p articy_buildtool -- path/to/articy_build.toml

mod manifest;

use std::path::{Path, PathBuf};

use thiserror::Error;

use articy_build::{BuildError, BuildGraph, GraphSchema};

use crate::manifest::ManifestError;

#[derive(Debug, Error)]
enum ToolError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("articy_build.toml"));

    match run(&path) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}

fn run(path: &Path) -> Result<String, ToolError> {
    let request = manifest::load(path)?;
    let graph = BuildGraph::resolve(&request)?;
    let schema = GraphSchema::from(&graph);
    Ok(serde_json::to_string_pretty(&schema)?)
}
