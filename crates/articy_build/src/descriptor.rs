//! Module descriptors
//!
//! The per-unit aggregate the orchestrator consumes: identity, resolved
//! include paths, dependency edges, and the precompiled-header and
//! optimization policies. Descriptors are immutable once built.

use articy_core::{FeatureFlags, ModuleKind, ModuleName};
use serde::{Deserialize, Serialize};

use crate::deps::{DependencyEdge, LinkVisibility};
use crate::paths::{IncludePath, PathVisibility};

/// Precompiled-header grouping policy for a unit's translation units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PchPolicy {
    /// No precompiled headers.
    None,
    /// One private PCH per unit.
    PerModule,
    /// Shared engine PCHs, or an explicit private PCH.
    SharedOrExplicit,
}

impl PchPolicy {
    /// Policy for a unit under the given flags.
    ///
    /// Shared PCH grouping applies everywhere once the engine supports it;
    /// older engines get one PCH per unit.
    pub fn for_unit(_module: ModuleName, flags: &FeatureFlags) -> Self {
        if flags.shared_pchs {
            PchPolicy::SharedOrExplicit
        } else {
            PchPolicy::PerModule
        }
    }
}

/// Whether optimization is suppressed for a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OptimizationPolicy {
    Default,
    Disabled,
}

impl OptimizationPolicy {
    /// Policy for a unit.
    ///
    /// Generated translation units are machine-written and large enough that
    /// optimizing them costs build time for no runtime benefit.
    pub fn for_unit(module: ModuleName) -> Self {
        match module {
            ModuleName::Generated => OptimizationPolicy::Disabled,
            _ => OptimizationPolicy::Default,
        }
    }
}

/// One unit's resolved build descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    name: ModuleName,
    kind: ModuleKind,
    paths: Vec<IncludePath>,
    dependencies: Vec<DependencyEdge>,
    pch: PchPolicy,
    optimization: OptimizationPolicy,
}

impl ModuleDescriptor {
    pub(crate) fn new(
        name: ModuleName,
        paths: Vec<IncludePath>,
        dependencies: Vec<DependencyEdge>,
        pch: PchPolicy,
        optimization: OptimizationPolicy,
    ) -> Self {
        Self {
            name,
            kind: name.kind(),
            paths,
            dependencies,
            pch,
            optimization,
        }
    }

    pub fn name(&self) -> ModuleName {
        self.name
    }

    pub fn kind(&self) -> ModuleKind {
        self.kind
    }

    /// All resolved include paths, in declaration order.
    pub fn include_paths(&self) -> &[IncludePath] {
        &self.paths
    }

    /// All dependency edges with this unit as source, in declaration order.
    pub fn dependencies(&self) -> &[DependencyEdge] {
        &self.dependencies
    }

    pub fn public_include_paths(&self) -> impl Iterator<Item = &IncludePath> {
        self.paths
            .iter()
            .filter(|p| p.visibility == PathVisibility::Public)
    }

    pub fn private_include_paths(&self) -> impl Iterator<Item = &IncludePath> {
        self.paths
            .iter()
            .filter(|p| p.visibility == PathVisibility::Private)
    }

    pub fn public_dependencies(&self) -> impl Iterator<Item = &DependencyEdge> {
        self.dependencies_with(LinkVisibility::Public)
    }

    pub fn private_dependencies(&self) -> impl Iterator<Item = &DependencyEdge> {
        self.dependencies_with(LinkVisibility::Private)
    }

    pub fn dynamic_dependencies(&self) -> impl Iterator<Item = &DependencyEdge> {
        self.dependencies_with(LinkVisibility::Dynamic)
    }

    fn dependencies_with(&self, visibility: LinkVisibility) -> impl Iterator<Item = &DependencyEdge> {
        self.dependencies
            .iter()
            .filter(move |e| e.visibility == visibility)
    }

    pub fn pch_policy(&self) -> PchPolicy {
        self.pch
    }

    pub fn optimization_policy(&self) -> OptimizationPolicy {
        self.optimization
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use articy_core::{EngineVersion, GatePolicy, VersionGate};

    fn flags_for(major: u16, minor: u16) -> FeatureFlags {
        VersionGate::new(GatePolicy::Permissive)
            .resolve(EngineVersion::new(major, minor))
            .unwrap()
    }

    #[test]
    fn test_pch_policy_follows_shared_pch_flag() {
        assert_eq!(
            PchPolicy::for_unit(ModuleName::Runtime, &flags_for(4, 19)),
            PchPolicy::PerModule
        );
        assert_eq!(
            PchPolicy::for_unit(ModuleName::Runtime, &flags_for(4, 21)),
            PchPolicy::SharedOrExplicit
        );
    }

    #[test]
    fn test_only_generated_suppresses_optimization() {
        for module in ModuleName::ALL {
            let expected = if module == ModuleName::Generated {
                OptimizationPolicy::Disabled
            } else {
                OptimizationPolicy::Default
            };
            assert_eq!(OptimizationPolicy::for_unit(module), expected);
        }
    }
}
