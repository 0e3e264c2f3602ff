//! Tool trait definition.

use serde::{Deserialize, Serialize};

/// Prefix marking a tool result (or turn reply) as a failure.
pub const ERROR_MARKER: &str = "<error>";

/// Definition of a tool exposed to the inference model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// A local capability the model may invoke mid-conversation.
///
/// `execute` never fails: problems are reported inside the returned text,
/// prefixed with [`ERROR_MARKER`], so the model can read them and retry.
pub trait Tool: Send + Sync {
    /// Tool name (used in function calls).
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's parameters.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with the raw argument payload sent by the model.
    fn execute(&self, raw_arguments: &str) -> String;

    /// Descriptor sent to the backend.
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

/// Format a failure as a tool result.
pub fn error_result(message: impl AsRef<str>) -> String {
    format!("{} {}", ERROR_MARKER, message.as_ref())
}
