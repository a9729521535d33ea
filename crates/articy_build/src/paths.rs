//! Include-path resolution
//!
//! Each unit exposes a fixed base list of directories relative to its own
//! root, plus engine-internal directories whose written location depends on
//! the target version (the engine moved several subsystem header directories
//! between releases). Resolution order is declaration order and duplicates
//! keep their first occurrence, because compiler include-search order is
//! observable and must be reproducible across invocations.
//!
//! No disk access happens here; whether the directories exist is the
//! orchestrator's concern.

use std::path::{Path, PathBuf};

use articy_core::{FeatureFlags, Flag, Gate, ModuleName};
use log::debug;

use crate::error::{BuildError, BuildResult};

/// Who may see an include directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathVisibility {
    /// Visible to the unit itself and to every dependent.
    Public,
    /// Visible only within the declaring unit.
    Private,
}

/// Where a declared directory is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum PathRoot {
    /// Relative to the unit's own root directory.
    Module,
    /// Relative to the plugin source root, naming a sibling unit's directory.
    Sibling,
    /// Engine-internal; handed to the orchestrator as written.
    Engine,
}

/// A resolved include directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IncludePath {
    pub dir: PathBuf,
    pub visibility: PathVisibility,
}

/// One row of a unit's include-path table.
struct PathDecl {
    root: PathRoot,
    dir: &'static str,
    visibility: PathVisibility,
    gate: Gate,
}

const RUNTIME_PATHS: &[PathDecl] = &[
    PathDecl {
        root: PathRoot::Module,
        dir: "Public",
        visibility: PathVisibility::Public,
        gate: Gate::Always,
    },
    // The MediaAssets headers moved under the engine source tree in 4.20.
    PathDecl {
        root: PathRoot::Engine,
        dir: "Source/Runtime/MediaAssets/Public",
        visibility: PathVisibility::Public,
        gate: Gate::If(Flag::EngineSourceIncludes),
    },
    PathDecl {
        root: PathRoot::Engine,
        dir: "MediaAssets/Public",
        visibility: PathVisibility::Public,
        gate: Gate::Unless(Flag::EngineSourceIncludes),
    },
    PathDecl {
        root: PathRoot::Module,
        dir: "Private",
        visibility: PathVisibility::Private,
        gate: Gate::Always,
    },
];

const IMPORTER_PATHS: &[PathDecl] = &[
    PathDecl {
        root: PathRoot::Module,
        dir: "Public",
        visibility: PathVisibility::Public,
        gate: Gate::Always,
    },
    PathDecl {
        root: PathRoot::Engine,
        dir: "Source/Editor/GameProjectGeneration/Public",
        visibility: PathVisibility::Public,
        gate: Gate::If(Flag::EngineSourceIncludes),
    },
    PathDecl {
        root: PathRoot::Engine,
        dir: "GameProjectGeneration",
        visibility: PathVisibility::Public,
        gate: Gate::Unless(Flag::EngineSourceIncludes),
    },
    // The importer re-exports the runtime unit's public headers.
    PathDecl {
        root: PathRoot::Sibling,
        dir: "ArticyRuntime/Public",
        visibility: PathVisibility::Public,
        gate: Gate::Always,
    },
    PathDecl {
        root: PathRoot::Module,
        dir: "Private",
        visibility: PathVisibility::Private,
        gate: Gate::Always,
    },
];

const EDITOR_PATHS: &[PathDecl] = &[
    PathDecl {
        root: PathRoot::Module,
        dir: "Public",
        visibility: PathVisibility::Public,
        gate: Gate::Always,
    },
    PathDecl {
        root: PathRoot::Module,
        dir: "Private",
        visibility: PathVisibility::Private,
        gate: Gate::Always,
    },
];

const GENERATED_PATHS: &[PathDecl] = &[
    PathDecl {
        root: PathRoot::Module,
        dir: "Public",
        visibility: PathVisibility::Public,
        gate: Gate::Always,
    },
    PathDecl {
        root: PathRoot::Module,
        dir: "Private",
        visibility: PathVisibility::Private,
        gate: Gate::Always,
    },
];

fn declarations(module: ModuleName) -> &'static [PathDecl] {
    match module {
        ModuleName::Runtime => RUNTIME_PATHS,
        ModuleName::Importer => IMPORTER_PATHS,
        ModuleName::Editor => EDITOR_PATHS,
        ModuleName::Generated => GENERATED_PATHS,
    }
}

/// Resolve the ordered include-path list for one unit.
pub fn resolve_paths(
    module: ModuleName,
    module_root: &Path,
    flags: &FeatureFlags,
) -> BuildResult<Vec<IncludePath>> {
    if module_root.as_os_str().is_empty() {
        return Err(BuildError::PathResolution {
            module,
            reason: "module root directory is empty".into(),
        });
    }

    let resolved = resolve_declarations(declarations(module), module, module_root, flags)?;
    debug!("{}: {} include paths", module, resolved.len());
    Ok(resolved)
}

fn resolve_declarations(
    decls: &[PathDecl],
    module: ModuleName,
    module_root: &Path,
    flags: &FeatureFlags,
) -> BuildResult<Vec<IncludePath>> {
    let mut resolved: Vec<IncludePath> = Vec::with_capacity(decls.len());
    for decl in decls {
        if !decl.gate.admits(flags) {
            continue;
        }
        let dir = match decl.root {
            PathRoot::Module => module_root.join(decl.dir),
            PathRoot::Sibling => {
                let parent = module_root.parent().ok_or_else(|| BuildError::PathResolution {
                    module,
                    reason: format!(
                        "module root '{}' has no parent for sibling path '{}'",
                        module_root.display(),
                        decl.dir
                    ),
                })?;
                parent.join(decl.dir)
            }
            PathRoot::Engine => PathBuf::from(decl.dir),
        };
        // First declaration wins; later duplicates are dropped.
        if !resolved.iter().any(|p| p.dir == dir) {
            resolved.push(IncludePath {
                dir,
                visibility: decl.visibility,
            });
        }
    }
    Ok(resolved)
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

    fn dirs(paths: &[IncludePath]) -> Vec<String> {
        paths.iter().map(|p| p.dir.display().to_string()).collect()
    }

    #[test]
    fn test_runtime_paths_new_style() {
        let paths = resolve_paths(
            ModuleName::Runtime,
            Path::new("Source/ArticyRuntime"),
            &flags_for(4, 27),
        )
        .unwrap();
        assert_eq!(
            dirs(&paths),
            vec![
                "Source/ArticyRuntime/Public",
                "Source/Runtime/MediaAssets/Public",
                "Source/ArticyRuntime/Private",
            ]
        );
    }

    #[test]
    fn test_runtime_paths_old_style() {
        let paths = resolve_paths(
            ModuleName::Runtime,
            Path::new("Source/ArticyRuntime"),
            &flags_for(4, 19),
        )
        .unwrap();
        assert!(dirs(&paths).contains(&"MediaAssets/Public".to_string()));
        assert!(!dirs(&paths).contains(&"Source/Runtime/MediaAssets/Public".to_string()));
    }

    #[test]
    fn test_importer_reexports_runtime_headers() {
        let paths = resolve_paths(
            ModuleName::Importer,
            Path::new("Source/ArticyImporter"),
            &flags_for(5, 0),
        )
        .unwrap();
        let sibling = paths
            .iter()
            .find(|p| p.dir == Path::new("Source/ArticyRuntime/Public"))
            .unwrap();
        assert_eq!(sibling.visibility, PathVisibility::Public);
    }

    #[test]
    fn test_empty_root_is_rejected() {
        let err = resolve_paths(ModuleName::Editor, Path::new(""), &flags_for(5, 0)).unwrap_err();
        assert!(matches!(
            err,
            BuildError::PathResolution {
                module: ModuleName::Editor,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_declaration_keeps_first_occurrence() {
        // A directory declared in both the base list and a gated branch must
        // appear exactly once, at its first-declared position.
        let decls = [
            PathDecl {
                root: PathRoot::Module,
                dir: "Public",
                visibility: PathVisibility::Public,
                gate: Gate::Always,
            },
            PathDecl {
                root: PathRoot::Engine,
                dir: "MediaAssets/Public",
                visibility: PathVisibility::Public,
                gate: Gate::Always,
            },
            PathDecl {
                root: PathRoot::Module,
                dir: "Public",
                visibility: PathVisibility::Private,
                gate: Gate::If(Flag::ToolMenusApi),
            },
        ];
        let resolved = resolve_declarations(
            &decls,
            ModuleName::Runtime,
            Path::new("Source/ArticyRuntime"),
            &flags_for(5, 0),
        )
        .unwrap();
        assert_eq!(
            dirs(&resolved),
            vec!["Source/ArticyRuntime/Public", "MediaAssets/Public"]
        );
        assert_eq!(resolved[0].visibility, PathVisibility::Public);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let flags = flags_for(5, 2);
        let a = resolve_paths(ModuleName::Importer, Path::new("Source/ArticyImporter"), &flags);
        let b = resolve_paths(ModuleName::Importer, Path::new("Source/ArticyImporter"), &flags);
        assert_eq!(a, b);
    }
}
