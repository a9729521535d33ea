//! Build manifest parsing - TOML to BuildRequest conversion
//!
//! Parses a build manifest into the request the resolver consumes. The host
//! version in the file can be overridden with the `ARTICY_HOST_VERSION`
//! environment variable, so CI can sweep engine versions without rewriting
//! the manifest.
//!
//! # Manifest Format
//!
//! ```toml
//! [host]
//! version = "5.0"
//! strict = false      # reject versions outside the known table
//!
//! [modules.ArticyRuntime]
//! root = "Source/ArticyRuntime"
//!
//! [modules.ArticyImporter]
//! root = "Source/ArticyImporter"
//!
//! [modules.ArticyEditor]
//! root = "Source/ArticyEditor"
//! extra_dependencies = ["MediaAssets"]
//!
//! [modules.ArticyGenerated]
//! root = "Source/ArticyGenerated"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use articy_build::{BuildRequest, ModuleConfig};
use articy_core::{EngineVersion, GatePolicy, InvalidVersion, ModuleName, UnknownModule};

/// Environment variable that overrides the manifest's host version.
pub const HOST_VERSION_ENV: &str = "ARTICY_HOST_VERSION";

/// Errors from manifest loading
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Version(#[from] InvalidVersion),

    #[error("unknown module section [modules.{0}]")]
    UnknownSection(String),
}

/// Result type for manifest operations
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Raw TOML structure for the host section
#[derive(Debug, Deserialize)]
struct HostToml {
    version: String,
    #[serde(default)]
    strict: bool,
}

/// Raw TOML structure for one module section
#[derive(Debug, Deserialize)]
struct ModuleToml {
    root: PathBuf,
    #[serde(default)]
    extra_dependencies: Vec<String>,
}

/// Root TOML structure
#[derive(Debug, Deserialize)]
struct ManifestToml {
    host: HostToml,
    #[serde(default)]
    modules: BTreeMap<String, ModuleToml>,
}

/// Load a build manifest from disk, applying the environment override.
pub fn load(path: &Path) -> ManifestResult<BuildRequest> {
    let text = std::fs::read_to_string(path)?;
    let override_version = std::env::var(HOST_VERSION_ENV).ok();
    parse(&text, override_version.as_deref())
}

/// Parse manifest text into a build request.
pub fn parse(text: &str, override_version: Option<&str>) -> ManifestResult<BuildRequest> {
    let raw: ManifestToml = toml::from_str(text)?;

    let version_str = override_version.unwrap_or(&raw.host.version);
    let version: EngineVersion = version_str.parse()?;
    if override_version.is_some() {
        log::info!("host version overridden to {} via {}", version, HOST_VERSION_ENV);
    }

    let policy = if raw.host.strict {
        GatePolicy::Strict
    } else {
        GatePolicy::Permissive
    };

    let mut request = BuildRequest::new(version).with_gate_policy(policy);
    for (name, module_toml) in raw.modules {
        let module: ModuleName = name
            .parse()
            .map_err(|UnknownModule(name)| ManifestError::UnknownSection(name))?;
        request.modules.insert(
            module,
            ModuleConfig {
                root: module_toml.root,
                extra_dependencies: module_toml.extra_dependencies,
            },
        );
    }
    Ok(request)
}
