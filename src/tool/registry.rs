use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use crate::maps::MapsClient;
use crate::tool::{DynTool, MapsTool, MapsToolKind};

/// A registry of the tools a host can call, ordered by name.
#[derive(Clone)]
pub struct ToolRegistry {
    tools: BTreeMap<String, DynTool>,
}

impl ToolRegistry {
    /// Creates a new empty tool registry.
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Creates a registry holding every Google Maps tool.
    pub fn with_maps_tools(client: Arc<MapsClient>) -> Self {
        let mut registry = Self::new();
        for kind in MapsToolKind::ALL {
            registry.register(Arc::new(MapsTool::new(kind, client.clone())));
        }
        registry
    }

    /// Registers a tool, replacing any tool with the same name.
    pub fn register(&mut self, tool: DynTool) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Unregisters a tool from the registry.
    pub fn unregister(&mut self, name: &str) -> Option<DynTool> {
        self.tools.remove(name)
    }

    /// Gets a tool by name.
    pub fn get(&self, name: &str) -> Option<&DynTool> {
        self.tools.get(name)
    }

    /// Returns all registered tools.
    pub fn list(&self) -> Vec<&DynTool> {
        self.tools.values().collect()
    }

    /// Returns the number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Converts all tools to their definitions.
    pub fn to_tool_definitions(&self) -> Vec<crate::tool::ToolDefinition> {
        self.tools
            .values()
            .map(|tool| tool.to_definition())
            .collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<'a> IntoIterator for &'a ToolRegistry {
    type Item = (&'a String, &'a DynTool);
    type IntoIter = std::collections::btree_map::Iter<'a, String, DynTool>;

    fn into_iter(self) -> Self::IntoIter {
        self.tools.iter()
    }
}
