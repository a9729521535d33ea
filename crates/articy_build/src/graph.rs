//! Build graph assembly
//!
//! Resolves all four units against a single gated flag set, then rejects any
//! link-time cycle among plugin modules before the graph is handed to the
//! orchestrator. Resolution is fail-fast and idempotent: identical inputs
//! produce a structurally identical graph, and nothing partial is ever
//! returned.
//!
//! Each unit's resolution moves through `Unresolved -> PathsResolved ->
//! DependenciesResolved -> Validated`; only validated descriptors leave this
//! module.

use std::collections::BTreeMap;
use std::path::PathBuf;

use articy_core::{EngineVersion, FeatureFlags, GatePolicy, LinkTarget, ModuleName, VersionGate};
use log::{debug, info};

use crate::deps::{resolve_dependencies, resolve_extra_dependencies, DependencyEdge, LinkVisibility};
use crate::descriptor::{ModuleDescriptor, OptimizationPolicy, PchPolicy};
use crate::error::{BuildError, BuildResult};
use crate::paths::{resolve_paths, IncludePath};

/// Per-unit input to a resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModuleConfig {
    /// The unit's root directory.
    pub root: PathBuf,
    /// Additional private link dependencies beyond the built-in tables.
    pub extra_dependencies: Vec<String>,
}

impl ModuleConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extra_dependencies: Vec::new(),
        }
    }
}

/// Everything needed to resolve one build graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    pub version: EngineVersion,
    pub gate_policy: GatePolicy,
    pub modules: BTreeMap<ModuleName, ModuleConfig>,
}

impl BuildRequest {
    pub fn new(version: EngineVersion) -> Self {
        Self {
            version,
            gate_policy: GatePolicy::default(),
            modules: BTreeMap::new(),
        }
    }

    pub fn with_gate_policy(mut self, policy: GatePolicy) -> Self {
        self.gate_policy = policy;
        self
    }

    pub fn with_module(mut self, module: ModuleName, root: impl Into<PathBuf>) -> Self {
        self.modules.insert(module, ModuleConfig::new(root));
        self
    }

    /// Standard plugin layout: every unit under `Source/<UnitName>`.
    pub fn with_standard_layout(mut self, source_root: impl Into<PathBuf>) -> Self {
        let source_root = source_root.into();
        for module in ModuleName::ALL {
            self.modules
                .insert(module, ModuleConfig::new(source_root.join(module.as_str())));
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Unresolved,
    PathsResolved,
    DependenciesResolved,
    Validated,
}

struct Resolution {
    module: ModuleName,
    phase: Phase,
    paths: Vec<IncludePath>,
    edges: Vec<DependencyEdge>,
}

impl Resolution {
    fn new(module: ModuleName) -> Self {
        Self {
            module,
            phase: Phase::Unresolved,
            paths: Vec::new(),
            edges: Vec::new(),
        }
    }

    fn advance(&mut self, phase: Phase) {
        debug!("{}: {:?} -> {:?}", self.module, self.phase, phase);
        self.phase = phase;
    }
}

/// A fully resolved, validated build graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildGraph {
    version: EngineVersion,
    flags: FeatureFlags,
    modules: Vec<ModuleDescriptor>,
}

impl BuildGraph {
    /// Resolve a build graph for the given request.
    ///
    /// The version gate runs exactly once and its flags are shared by every
    /// unit's resolution.
    pub fn resolve(request: &BuildRequest) -> BuildResult<BuildGraph> {
        let flags = VersionGate::new(request.gate_policy).resolve(request.version)?;
        debug!("resolved flags for engine {}: {:?}", request.version, flags);

        let mut resolutions = Vec::with_capacity(ModuleName::ALL.len());
        for module in ModuleName::ALL {
            let config =
                request
                    .modules
                    .get(&module)
                    .ok_or_else(|| BuildError::PathResolution {
                        module,
                        reason: "no root directory configured".into(),
                    })?;

            let mut resolution = Resolution::new(module);
            resolution.paths = resolve_paths(module, &config.root, &flags)?;
            resolution.advance(Phase::PathsResolved);

            let mut edges = resolve_dependencies(module, &flags);
            edges.extend(resolve_extra_dependencies(module, &config.extra_dependencies)?);
            resolution.edges = edges;
            resolution.advance(Phase::DependenciesResolved);

            resolutions.push(resolution);
        }

        let all_edges: Vec<DependencyEdge> = resolutions
            .iter()
            .flat_map(|r| r.edges.iter().copied())
            .collect();
        if let Some(cycle) = detect_cycle(&all_edges) {
            return Err(BuildError::CyclicDependency { cycle });
        }

        let modules = resolutions
            .into_iter()
            .map(|mut resolution| {
                resolution.advance(Phase::Validated);
                ModuleDescriptor::new(
                    resolution.module,
                    resolution.paths,
                    resolution.edges,
                    PchPolicy::for_unit(resolution.module, &flags),
                    OptimizationPolicy::for_unit(resolution.module),
                )
            })
            .collect::<Vec<_>>();

        info!(
            "resolved build graph for engine {} ({} modules, {} edges)",
            request.version,
            modules.len(),
            all_edges.len()
        );

        Ok(BuildGraph {
            version: request.version,
            flags,
            modules,
        })
    }

    /// The engine version this graph was resolved against.
    pub fn version(&self) -> EngineVersion {
        self.version
    }

    /// The gated flag set shared by every descriptor in this graph.
    pub fn flags(&self) -> &FeatureFlags {
        &self.flags
    }

    /// All descriptors, in fixed unit order.
    pub fn modules(&self) -> &[ModuleDescriptor] {
        &self.modules
    }

    /// Look up one unit's descriptor.
    pub fn module(&self, name: ModuleName) -> Option<&ModuleDescriptor> {
        self.modules.iter().find(|m| m.name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    White,
    Grey,
    Black,
}

/// Find a link-time cycle among plugin units, if one exists.
///
/// Only public and private plugin-to-plugin edges participate; dynamic edges
/// are runtime loads, not link dependencies, and engine modules are leaves.
/// Returns the cycle as a module sequence starting and ending at the same
/// unit.
pub fn detect_cycle(edges: &[DependencyEdge]) -> Option<Vec<ModuleName>> {
    let mut adjacency: BTreeMap<ModuleName, Vec<ModuleName>> = BTreeMap::new();
    for edge in edges {
        if edge.visibility == LinkVisibility::Dynamic {
            continue;
        }
        if let LinkTarget::Plugin(to) = edge.to {
            adjacency.entry(edge.from).or_default().push(to);
        }
    }

    let mut marks: BTreeMap<ModuleName, Mark> =
        ModuleName::ALL.iter().map(|&m| (m, Mark::White)).collect();
    let mut stack = Vec::new();

    for module in ModuleName::ALL {
        if marks[&module] == Mark::White {
            if let Some(cycle) = visit(module, &adjacency, &mut marks, &mut stack) {
                return Some(cycle);
            }
        }
    }
    None
}

fn visit(
    node: ModuleName,
    adjacency: &BTreeMap<ModuleName, Vec<ModuleName>>,
    marks: &mut BTreeMap<ModuleName, Mark>,
    stack: &mut Vec<ModuleName>,
) -> Option<Vec<ModuleName>> {
    marks.insert(node, Mark::Grey);
    stack.push(node);

    for &next in adjacency.get(&node).map(Vec::as_slice).unwrap_or_default() {
        match marks[&next] {
            Mark::Grey => {
                // Back edge; grey nodes are always on the stack.
                let start = stack.iter().position(|&m| m == next).unwrap();
                let mut cycle = stack[start..].to_vec();
                cycle.push(next);
                return Some(cycle);
            }
            Mark::White => {
                if let Some(cycle) = visit(next, adjacency, marks, stack) {
                    return Some(cycle);
                }
            }
            Mark::Black => {}
        }
    }

    stack.pop();
    marks.insert(node, Mark::Black);
    None
}
