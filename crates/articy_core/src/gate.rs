//! Version gate
//!
//! Maps a target engine version to the set of feature flags the path and
//! dependency tables branch on. The mapping is a pure function of the
//! version: resolving the same version twice always yields the same flags.
//!
//! Unknown and future versions fall back to the flags of the nearest known
//! lower version, so a plugin built today keeps resolving against tomorrow's
//! engine releases. A strict gate can be configured instead, which rejects
//! any version outside the known table.

use log::warn;
use thiserror::Error;

use crate::version::EngineVersion;

/// Error produced by a strict gate for a version outside the known table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("engine version {0} is not supported by the strict version gate")]
pub struct UnsupportedVersion(pub EngineVersion);

/// Engine versions the path and dependency tables have been verified against.
pub const KNOWN_VERSIONS: &[EngineVersion] = &[
    EngineVersion::new(4, 19),
    EngineVersion::new(4, 20),
    EngineVersion::new(4, 21),
    EngineVersion::new(4, 22),
    EngineVersion::new(4, 23),
    EngineVersion::new(4, 24),
    EngineVersion::new(4, 25),
    EngineVersion::new(4, 26),
    EngineVersion::new(4, 27),
    EngineVersion::new(5, 0),
    EngineVersion::new(5, 1),
    EngineVersion::new(5, 2),
    EngineVersion::new(5, 3),
];

/// Feature flags derived from the target engine version.
///
/// These are the only version-dependent inputs the resolvers see; no other
/// state may influence which table rows are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeatureFlags {
    /// Engine-internal include directories are written engine-root relative
    /// instead of as bare module references.
    pub engine_source_includes: bool,
    /// Shared or explicit precompiled-header grouping is available.
    pub shared_pchs: bool,
    /// The split editor subsystems (EditorWidgets, SourceControl,
    /// ApplicationCore) exist as linkable modules.
    pub editor_subsystem_split: bool,
    /// The ToolMenus menu-registration module is present.
    pub tool_menus_api: bool,
}

/// Name of a single feature flag, used by gated table rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    EngineSourceIncludes,
    SharedPchs,
    EditorSubsystemSplit,
    ToolMenusApi,
}

impl FeatureFlags {
    /// Look up a flag by name.
    pub fn get(&self, flag: Flag) -> bool {
        match flag {
            Flag::EngineSourceIncludes => self.engine_source_includes,
            Flag::SharedPchs => self.shared_pchs,
            Flag::EditorSubsystemSplit => self.editor_subsystem_split,
            Flag::ToolMenusApi => self.tool_menus_api,
        }
    }

    fn for_version(version: EngineVersion) -> Self {
        Self {
            engine_source_includes: version >= EngineVersion::new(4, 20),
            shared_pchs: version >= EngineVersion::new(4, 21),
            editor_subsystem_split: version >= EngineVersion::new(4, 24),
            tool_menus_api: version >= EngineVersion::new(5, 0),
        }
    }
}

/// Condition under which a path or dependency table row is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Active at every version.
    Always,
    /// Active only when the named flag is set.
    If(Flag),
    /// Active only when the named flag is not set.
    Unless(Flag),
}

impl Gate {
    /// Whether this row is active under the given flags.
    pub fn admits(&self, flags: &FeatureFlags) -> bool {
        match self {
            Gate::Always => true,
            Gate::If(flag) => flags.get(*flag),
            Gate::Unless(flag) => !flags.get(*flag),
        }
    }
}

/// How the gate treats versions outside the known table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GatePolicy {
    /// Fall back to the nearest known lower version.
    #[default]
    Permissive,
    /// Reject any version not in the known table.
    Strict,
}

/// Resolves engine versions to feature flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VersionGate {
    policy: GatePolicy,
}

impl VersionGate {
    /// Create a gate with the given policy.
    pub const fn new(policy: GatePolicy) -> Self {
        Self { policy }
    }

    /// Resolve the flag set for a target version.
    ///
    /// Permissive gates never fail: an unknown version resolves to the flags
    /// of the nearest known lower version, and a version older than the whole
    /// table clamps to the oldest entry.
    pub fn resolve(&self, version: EngineVersion) -> Result<FeatureFlags, UnsupportedVersion> {
        let known = KNOWN_VERSIONS.contains(&version);
        if !known && self.policy == GatePolicy::Strict {
            return Err(UnsupportedVersion(version));
        }

        let effective = if known {
            version
        } else {
            let fallback = KNOWN_VERSIONS
                .iter()
                .rev()
                .find(|v| **v <= version)
                .copied()
                .unwrap_or(KNOWN_VERSIONS[0]);
            warn!(
                "engine version {} is not in the known set, using flags for {}",
                version, fallback
            );
            fallback
        };

        Ok(FeatureFlags::for_version(effective))
    }
}
