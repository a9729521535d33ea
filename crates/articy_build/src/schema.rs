//! Orchestrator wire schema
//!
//! Serializable mirror of a resolved graph, kept separate from the domain
//! types and produced by conversion. Field names and enum spellings are the
//! orchestrator's contract; changing them breaks downstream builds.

use serde::{Deserialize, Serialize};

use crate::descriptor::{ModuleDescriptor, OptimizationPolicy, PchPolicy};
use crate::graph::BuildGraph;

/// Wire form of one unit's descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSchema {
    pub name: String,
    pub kind: String,
    pub public_include_paths: Vec<String>,
    pub private_include_paths: Vec<String>,
    pub public_dependencies: Vec<String>,
    pub private_dependencies: Vec<String>,
    pub dynamic_dependencies: Vec<String>,
    pub precompiled_header_policy: PchPolicy,
    pub optimization_policy: OptimizationPolicy,
}

impl From<&ModuleDescriptor> for ModuleSchema {
    fn from(descriptor: &ModuleDescriptor) -> Self {
        Self {
            name: descriptor.name().to_string(),
            kind: descriptor.kind().to_string(),
            public_include_paths: descriptor
                .public_include_paths()
                .map(|p| p.dir.display().to_string())
                .collect(),
            private_include_paths: descriptor
                .private_include_paths()
                .map(|p| p.dir.display().to_string())
                .collect(),
            public_dependencies: descriptor
                .public_dependencies()
                .map(|e| e.to.to_string())
                .collect(),
            private_dependencies: descriptor
                .private_dependencies()
                .map(|e| e.to.to_string())
                .collect(),
            dynamic_dependencies: descriptor
                .dynamic_dependencies()
                .map(|e| e.to.to_string())
                .collect(),
            precompiled_header_policy: descriptor.pch_policy(),
            optimization_policy: descriptor.optimization_policy(),
        }
    }
}

/// Wire form of a resolved build graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSchema {
    pub host_version: String,
    pub modules: Vec<ModuleSchema>,
}

impl From<&BuildGraph> for GraphSchema {
    fn from(graph: &BuildGraph) -> Self {
        Self {
            host_version: graph.version().to_string(),
            modules: graph.modules().iter().map(ModuleSchema::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::BuildRequest;
    use articy_core::EngineVersion;

    #[test]
    fn test_wire_field_spellings() {
        let request =
            BuildRequest::new(EngineVersion::new(5, 0)).with_standard_layout("Source");
        let graph = BuildGraph::resolve(&request).unwrap();
        let json = serde_json::to_value(GraphSchema::from(&graph)).unwrap();

        assert_eq!(json["hostVersion"], "5.0");
        let runtime = &json["modules"][0];
        assert_eq!(runtime["name"], "ArticyRuntime");
        assert_eq!(runtime["kind"], "runtime");
        assert_eq!(runtime["precompiledHeaderPolicy"], "sharedOrExplicit");
        assert_eq!(runtime["optimizationPolicy"], "default");
        assert!(runtime["publicIncludePaths"].is_array());
        assert!(runtime["dynamicDependencies"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_pch_policy_spellings() {
        assert_eq!(serde_json::to_value(PchPolicy::None).unwrap(), "none");
        assert_eq!(serde_json::to_value(PchPolicy::PerModule).unwrap(), "perModule");
        assert_eq!(
            serde_json::to_value(PchPolicy::SharedOrExplicit).unwrap(),
            "sharedOrExplicit"
        );
    }

    #[test]
    fn test_schema_round_trips() {
        let request =
            BuildRequest::new(EngineVersion::new(4, 27)).with_standard_layout("Source");
        let graph = BuildGraph::resolve(&request).unwrap();
        let schema = GraphSchema::from(&graph);
        let json = serde_json::to_string(&schema).unwrap();
        let back: GraphSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(schema, back);
    }
}
