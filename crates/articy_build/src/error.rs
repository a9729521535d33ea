//! Build resolution errors
//!
//! Resolution is fail-fast: the first error aborts the whole graph, since a
//! partially valid build configuration is unsafe to hand to a compiler.
//! Every error names the module and the path or edge implicated.

use articy_core::{ModuleName, UnsupportedVersion};
use thiserror::Error;

/// Errors surfaced while resolving a build graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A unit's root directory is missing or unusable.
    #[error("cannot resolve include paths for {module}: {reason}")]
    PathResolution { module: ModuleName, reason: String },

    /// A dependency edge names a module outside the known universe.
    #[error("{module} declares a dependency on unknown module '{dependency}'")]
    UnknownDependency {
        module: ModuleName,
        dependency: String,
    },

    /// The link-time dependency edges close a cycle among plugin units.
    #[error("dependency cycle between plugin modules: {}", fmt_cycle(.cycle))]
    CyclicDependency { cycle: Vec<ModuleName> },

    /// The strict version gate rejected the requested engine version.
    #[error(transparent)]
    UnsupportedVersion(#[from] UnsupportedVersion),
}

/// Result type for build resolution.
pub type BuildResult<T> = Result<T, BuildError>;

fn fmt_cycle(cycle: &[ModuleName]) -> String {
    cycle
        .iter()
        .map(ModuleName::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}
