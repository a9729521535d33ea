//! Module identity
//!
//! The plugin ships four build units; everything else it links against is an
//! engine module. Engine modules are leaves of the link graph — the engine
//! never depends back on plugin units, so only plugin-to-plugin edges can
//! form cycles.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error produced when a name matches neither a plugin unit nor an engine
/// module.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown module '{0}'")]
pub struct UnknownModule(pub String);

/// Build-unit kind: runtime units ship with the game, editor units only
/// build for editor targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    Runtime,
    Editor,
}

impl ModuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleKind::Runtime => "runtime",
            ModuleKind::Editor => "editor",
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four build units of the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModuleName {
    Runtime,
    Importer,
    Editor,
    Generated,
}

impl ModuleName {
    /// All units, in fixed resolution order.
    pub const ALL: [ModuleName; 4] = [
        ModuleName::Runtime,
        ModuleName::Importer,
        ModuleName::Editor,
        ModuleName::Generated,
    ];

    /// Unit name as the orchestrator and the manifest spell it.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleName::Runtime => "ArticyRuntime",
            ModuleName::Importer => "ArticyImporter",
            ModuleName::Editor => "ArticyEditor",
            ModuleName::Generated => "ArticyGenerated",
        }
    }

    /// Whether the unit builds for runtime or editor targets.
    pub fn kind(&self) -> ModuleKind {
        match self {
            ModuleName::Runtime | ModuleName::Generated => ModuleKind::Runtime,
            ModuleName::Importer | ModuleName::Editor => ModuleKind::Editor,
        }
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleName {
    type Err = UnknownModule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ArticyRuntime" | "Runtime" => Ok(ModuleName::Runtime),
            "ArticyImporter" | "Importer" => Ok(ModuleName::Importer),
            "ArticyEditor" | "Editor" => Ok(ModuleName::Editor),
            "ArticyGenerated" | "Generated" => Ok(ModuleName::Generated),
            _ => Err(UnknownModule(s.into())),
        }
    }
}

/// Engine modules the plugin links against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EngineModule {
    Core,
    CoreUObject,
    Engine,
    Projects,
    InputCore,
    Slate,
    SlateCore,
    Json,
    MediaAssets,
    UnrealEd,
    LevelEditor,
    GameProjectGeneration,
    ContentBrowser,
    PropertyEditor,
    EditorStyle,
    SourceControl,
    GraphEditor,
    ApplicationCore,
    EditorWidgets,
    ToolMenus,
}

impl EngineModule {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineModule::Core => "Core",
            EngineModule::CoreUObject => "CoreUObject",
            EngineModule::Engine => "Engine",
            EngineModule::Projects => "Projects",
            EngineModule::InputCore => "InputCore",
            EngineModule::Slate => "Slate",
            EngineModule::SlateCore => "SlateCore",
            EngineModule::Json => "Json",
            EngineModule::MediaAssets => "MediaAssets",
            EngineModule::UnrealEd => "UnrealEd",
            EngineModule::LevelEditor => "LevelEditor",
            EngineModule::GameProjectGeneration => "GameProjectGeneration",
            EngineModule::ContentBrowser => "ContentBrowser",
            EngineModule::PropertyEditor => "PropertyEditor",
            EngineModule::EditorStyle => "EditorStyle",
            EngineModule::SourceControl => "SourceControl",
            EngineModule::GraphEditor => "GraphEditor",
            EngineModule::ApplicationCore => "ApplicationCore",
            EngineModule::EditorWidgets => "EditorWidgets",
            EngineModule::ToolMenus => "ToolMenus",
        }
    }
}

impl fmt::Display for EngineModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineModule {
    type Err = UnknownModule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Core" => Ok(EngineModule::Core),
            "CoreUObject" => Ok(EngineModule::CoreUObject),
            "Engine" => Ok(EngineModule::Engine),
            "Projects" => Ok(EngineModule::Projects),
            "InputCore" => Ok(EngineModule::InputCore),
            "Slate" => Ok(EngineModule::Slate),
            "SlateCore" => Ok(EngineModule::SlateCore),
            "Json" => Ok(EngineModule::Json),
            "MediaAssets" => Ok(EngineModule::MediaAssets),
            "UnrealEd" => Ok(EngineModule::UnrealEd),
            "LevelEditor" => Ok(EngineModule::LevelEditor),
            "GameProjectGeneration" => Ok(EngineModule::GameProjectGeneration),
            "ContentBrowser" => Ok(EngineModule::ContentBrowser),
            "PropertyEditor" => Ok(EngineModule::PropertyEditor),
            "EditorStyle" => Ok(EngineModule::EditorStyle),
            "SourceControl" => Ok(EngineModule::SourceControl),
            "GraphEditor" => Ok(EngineModule::GraphEditor),
            "ApplicationCore" => Ok(EngineModule::ApplicationCore),
            "EditorWidgets" => Ok(EngineModule::EditorWidgets),
            "ToolMenus" => Ok(EngineModule::ToolMenus),
            _ => Err(UnknownModule(s.into())),
        }
    }
}

/// Anything a dependency edge can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LinkTarget {
    /// One of the four plugin units.
    Plugin(ModuleName),
    /// An engine module; always a leaf of the link graph.
    Engine(EngineModule),
}

impl LinkTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkTarget::Plugin(m) => m.as_str(),
            LinkTarget::Engine(m) => m.as_str(),
        }
    }
}

impl fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkTarget {
    type Err = UnknownModule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(module) = s.parse::<ModuleName>() {
            return Ok(LinkTarget::Plugin(module));
        }
        s.parse::<EngineModule>()
            .map(LinkTarget::Engine)
            .map_err(|_| UnknownModule(s.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_names_round_trip() {
        for module in ModuleName::ALL {
            assert_eq!(module.as_str().parse::<ModuleName>().unwrap(), module);
        }
    }

    #[test]
    fn test_module_kinds() {
        assert_eq!(ModuleName::Runtime.kind(), ModuleKind::Runtime);
        assert_eq!(ModuleName::Generated.kind(), ModuleKind::Runtime);
        assert_eq!(ModuleName::Importer.kind(), ModuleKind::Editor);
        assert_eq!(ModuleName::Editor.kind(), ModuleKind::Editor);
    }

    #[test]
    fn test_link_target_parsing() {
        assert_eq!(
            "ArticyRuntime".parse::<LinkTarget>().unwrap(),
            LinkTarget::Plugin(ModuleName::Runtime)
        );
        assert_eq!(
            "ToolMenus".parse::<LinkTarget>().unwrap(),
            LinkTarget::Engine(EngineModule::ToolMenus)
        );
        assert_eq!(
            "NotAModule".parse::<LinkTarget>(),
            Err(UnknownModule("NotAModule".into()))
        );
    }
}
