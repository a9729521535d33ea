//! # Articy Build
//!
//! Resolves the Articy plugin's four build units (Importer, Runtime, Editor,
//! Generated) into the descriptors an external build orchestrator consumes:
//! include directories, link dependencies, precompiled-header policy, and
//! optimization policy, all selected against a target engine version.
//!
//! ## Resolution flow
//!
//! ```text
//! BuildRequest ──► VersionGate ──► FeatureFlags (once, shared)
//!                                      │
//!              paths + dependencies per unit (table-driven, gated)
//!                                      │
//!                         cycle check over link edges
//!                                      │
//!                              BuildGraph (immutable)
//! ```
//!
//! Resolution is pure computation over the request: no disk access, no
//! shared state, fail-fast on the first error. A returned [`BuildGraph`] is
//! always acyclic over its public and private plugin edges.

pub mod deps;
pub mod descriptor;
pub mod error;
pub mod graph;
pub mod paths;
pub mod schema;

pub use deps::{resolve_dependencies, DependencyEdge, LinkVisibility};
pub use descriptor::{ModuleDescriptor, OptimizationPolicy, PchPolicy};
pub use error::{BuildError, BuildResult};
pub use graph::{detect_cycle, BuildGraph, BuildRequest, ModuleConfig};
pub use paths::{resolve_paths, IncludePath, PathVisibility};
pub use schema::{GraphSchema, ModuleSchema};
