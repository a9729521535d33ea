//! Dependency declaration
//!
//! Fixed per-unit link-dependency tables with version-gated rows. A table
//! only says what its unit links against; whether the union of all edges
//! stays acyclic is checked by the build graph, not here.
//!
//! Edge order follows declaration order so the orchestrator sees a
//! reproducible link line.

use articy_core::{EngineModule, FeatureFlags, Flag, Gate, LinkTarget, ModuleName};
use log::debug;

use crate::error::{BuildError, BuildResult};

/// Link-time visibility of a dependency edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkVisibility {
    /// Statically linked and re-exported to dependents.
    Public,
    /// Statically linked, internal to the declaring unit.
    Private,
    /// Loaded at runtime rather than link time.
    Dynamic,
}

/// A resolved dependency edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DependencyEdge {
    pub from: ModuleName,
    pub to: LinkTarget,
    pub visibility: LinkVisibility,
}

/// One row of a unit's dependency table.
struct DepDecl {
    to: LinkTarget,
    visibility: LinkVisibility,
    gate: Gate,
}

const fn always(to: LinkTarget, visibility: LinkVisibility) -> DepDecl {
    DepDecl {
        to,
        visibility,
        gate: Gate::Always,
    }
}

const fn gated(to: LinkTarget, visibility: LinkVisibility, flag: Flag) -> DepDecl {
    DepDecl {
        to,
        visibility,
        gate: Gate::If(flag),
    }
}

use articy_core::LinkTarget::{Engine, Plugin};
use self::LinkVisibility::{Private, Public};

const RUNTIME_DEPS: &[DepDecl] = &[
    always(Engine(EngineModule::Core), Public),
    always(Engine(EngineModule::MediaAssets), Public),
    always(Engine(EngineModule::Projects), Private),
    always(Engine(EngineModule::InputCore), Private),
    always(Engine(EngineModule::CoreUObject), Private),
    always(Engine(EngineModule::Engine), Private),
    always(Engine(EngineModule::Slate), Private),
    always(Engine(EngineModule::SlateCore), Private),
    always(Engine(EngineModule::Json), Private),
];

const IMPORTER_DEPS: &[DepDecl] = &[
    always(Engine(EngineModule::Core), Public),
    always(Engine(EngineModule::Projects), Private),
    always(Engine(EngineModule::InputCore), Private),
    always(Engine(EngineModule::UnrealEd), Private),
    always(Engine(EngineModule::LevelEditor), Private),
    always(Engine(EngineModule::CoreUObject), Private),
    always(Engine(EngineModule::Engine), Private),
    always(Engine(EngineModule::Slate), Private),
    always(Engine(EngineModule::SlateCore), Private),
    always(Plugin(ModuleName::Runtime), Private),
    always(Engine(EngineModule::Json), Private),
    always(Engine(EngineModule::GameProjectGeneration), Private),
];

const EDITOR_DEPS: &[DepDecl] = &[
    always(Engine(EngineModule::Core), Public),
    gated(Engine(EngineModule::EditorWidgets), Public, Flag::EditorSubsystemSplit),
    always(Plugin(ModuleName::Runtime), Public),
    always(Engine(EngineModule::Projects), Private),
    always(Engine(EngineModule::InputCore), Private),
    always(Engine(EngineModule::UnrealEd), Private),
    always(Engine(EngineModule::LevelEditor), Private),
    always(Engine(EngineModule::CoreUObject), Private),
    always(Engine(EngineModule::Engine), Private),
    always(Engine(EngineModule::Slate), Private),
    always(Engine(EngineModule::SlateCore), Private),
    always(Engine(EngineModule::Json), Private),
    always(Engine(EngineModule::GameProjectGeneration), Private),
    always(Engine(EngineModule::ContentBrowser), Private),
    always(Engine(EngineModule::PropertyEditor), Private),
    always(Engine(EngineModule::EditorStyle), Private),
    gated(Engine(EngineModule::SourceControl), Private, Flag::EditorSubsystemSplit),
    always(Engine(EngineModule::GraphEditor), Private),
    gated(Engine(EngineModule::ApplicationCore), Private, Flag::EditorSubsystemSplit),
    gated(Engine(EngineModule::ToolMenus), Private, Flag::ToolMenusApi),
];

const GENERATED_DEPS: &[DepDecl] = &[
    always(Engine(EngineModule::Core), Public),
    always(Engine(EngineModule::CoreUObject), Public),
    always(Engine(EngineModule::Engine), Public),
    always(Plugin(ModuleName::Runtime), Private),
];

fn declarations(module: ModuleName) -> &'static [DepDecl] {
    match module {
        ModuleName::Runtime => RUNTIME_DEPS,
        ModuleName::Importer => IMPORTER_DEPS,
        ModuleName::Editor => EDITOR_DEPS,
        ModuleName::Generated => GENERATED_DEPS,
    }
}

/// Resolve the declared dependency edges for one unit under the given flags.
pub fn resolve_dependencies(module: ModuleName, flags: &FeatureFlags) -> Vec<DependencyEdge> {
    let edges: Vec<DependencyEdge> = declarations(module)
        .iter()
        .filter(|decl| decl.gate.admits(flags))
        .map(|decl| DependencyEdge {
            from: module,
            to: decl.to,
            visibility: decl.visibility,
        })
        .collect();
    debug!("{}: {} link dependencies", module, edges.len());
    edges
}

/// Parse orchestrator-supplied extra dependency names into private edges.
///
/// Names must resolve within the known module universe; anything else is an
/// unknown-dependency error naming the offending unit and string.
pub fn resolve_extra_dependencies(
    module: ModuleName,
    names: &[String],
) -> BuildResult<Vec<DependencyEdge>> {
    names
        .iter()
        .map(|name| {
            let to = name
                .parse::<LinkTarget>()
                .map_err(|_| BuildError::UnknownDependency {
                    module,
                    dependency: name.clone(),
                })?;
            Ok(DependencyEdge {
                from: module,
                to,
                visibility: LinkVisibility::Private,
            })
        })
        .collect()
}
