use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ServeError;
use crate::tools::ToolHandler;
use crate::types::ToolDefinition;

/// Every tool the server exposes. Populated once at startup; lookups are
/// case-sensitive and listings preserve registration order.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn ToolHandler>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Adds a tool under its advertised name. A name collision is a startup
    /// configuration error, not something to resolve silently.
    pub fn register(&mut self, tool: Arc<dyn ToolHandler>) -> Result<(), ServeError> {
        let name = tool.name();
        if self.index.contains_key(name) {
            return Err(ServeError::DuplicateTool(name.to_string()));
        }
        self.index.insert(name.to_string(), self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    pub fn resolve(&self, name: &str) -> Option<&Arc<dyn ToolHandler>> {
        self.index.get(name).map(|&slot| &self.tools[slot])
    }

    /// Definitions in registration order, ready for `tools/list`.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                input_schema: tool.input_schema(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// The closest registered name within an edit distance of 2, as long as
    /// exactly one candidate is the front-runner.
    pub fn suggest(&self, input: &str) -> Option<&'static str> {
        let mut best_dist = usize::MAX;
        let mut best_tool: Option<&'static str> = None;
        let mut ambiguous = false;

        for tool in &self.tools {
            let dist = strsim::levenshtein(input, tool.name());
            if dist < best_dist {
                best_dist = dist;
                best_tool = Some(tool.name());
                ambiguous = false;
            } else if dist == best_dist {
                ambiguous = true;
            }
        }

        if best_dist <= 2 && !ambiguous {
            best_tool
        } else {
            None
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
