pub mod edit_file;
pub mod list_files;
pub mod path;
pub mod read_file;
pub mod traits;

pub use edit_file::EditFile;
pub use list_files::ListFiles;
pub use path::resolve_path;
pub use read_file::ReadFile;
pub use traits::{error_result, Tool, ToolDefinition, ERROR_MARKER};

use std::path::Path;
use tracing::warn;

// ---------------------------------------------------------------------------
// Tool registry
// ---------------------------------------------------------------------------

/// Fixed set of tools, looked up by exact name at dispatch time.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// The built-in filesystem tools, resolving relative paths against `cwd`.
    pub fn with_defaults(cwd: &Path) -> Self {
        Self::new()
            .with(ListFiles::new(cwd))
            .with(ReadFile::new(cwd))
            .with(EditFile::new(cwd))
    }

    /// Add a tool. A tool with the same name replaces the earlier one so
    /// names stay unique.
    pub fn with(mut self, tool: impl Tool + 'static) -> Self {
        self.tools.retain(|t| t.name() != tool.name());
        self.tools.push(Box::new(tool));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Descriptors exposed to the inference model, in registration order.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    /// Execute a tool call by name. Unknown names become an error result.
    pub fn dispatch(&self, name: &str, raw_arguments: &str) -> String {
        match self.get(name) {
            Some(tool) => tool.execute(raw_arguments),
            None => {
                warn!("Model requested unknown tool: {}", name);
                error_result(format!("Unknown tool: {}", name))
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
