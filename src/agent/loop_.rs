//! Core agent loop: Think → Act → Observe, bounded per user turn.
//!
//! Each turn:
//! 1. Appends the user message
//! 2. Calls the backend with the full history and tool descriptors
//! 3. Executes any requested tool calls and appends their results
//! 4. Repeats until the model answers with plain text or the cap is hit

use crate::agent::history::ConversationHistory;
use crate::backend::ChatBackend;
use crate::tools::{error_result, ToolDefinition, ToolRegistry};
use crate::types::*;
use tracing::{debug, error, info, warn};

/// Maximum backend round-trips per user turn.
pub const MAX_TOOL_ITERATIONS: usize = 8;

/// One conversation with a backend and a fixed set of tools.
///
/// `turn` takes `&mut self`, so at most one turn is in flight per session.
pub struct AgentSession<B> {
    backend: B,
    registry: ToolRegistry,
    tool_definitions: Vec<ToolDefinition>,
    history: ConversationHistory,
    max_iterations: usize,
}

impl<B: ChatBackend> AgentSession<B> {
    /// Create a session whose history starts with `system_prompt`.
    pub fn new(backend: B, registry: ToolRegistry, system_prompt: &str) -> Self {
        let tool_definitions = registry.definitions();
        Self {
            backend,
            registry,
            tool_definitions,
            history: ConversationHistory::with_system_prompt(system_prompt),
            max_iterations: MAX_TOOL_ITERATIONS,
        }
    }

    /// Override the per-turn iteration cap (minimum 1). With a cap of 1 the
    /// tool results of the only round are recorded but never sent back.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Run one user turn to completion and return the reply text.
    ///
    /// Never fails: protocol and transport problems come back as
    /// `<error>`-prefixed replies and the session stays usable.
    pub async fn turn(&mut self, user_text: &str) -> String {
        self.history.push(ChatMessage::user(user_text));

        for iteration in 1..=self.max_iterations {
            debug!(
                "[Iteration {}/{}] Requesting completion ({} messages)",
                iteration,
                self.max_iterations,
                self.history.len()
            );

            let completion = match self
                .backend
                .complete(
                    self.history.messages(),
                    &self.tool_definitions,
                    ToolChoice::Auto,
                )
                .await
            {
                Ok(Some(completion)) => completion,
                Ok(None) => {
                    warn!("Backend returned no completion choice");
                    return error_result("Empty response from model.");
                }
                Err(e) => {
                    error!("Backend error: {:#}", e);
                    return error_result(format!("{:#}", e));
                }
            };

            let tool_calls: Vec<ToolCall> = completion
                .tool_calls
                .into_iter()
                .map(with_call_id)
                .collect();
            let text = completion.content.unwrap_or_default();

            self.history
                .push(ChatMessage::assistant(text.clone(), tool_calls.clone()));

            if tool_calls.is_empty() {
                info!("Turn finished after {} iteration(s)", iteration);
                return text;
            }

            for call in &tool_calls {
                info!("[Iteration {}] Tool: {}({})", iteration, call.name, call.arguments);

                let output = self.registry.dispatch(&call.name, &call.arguments);
                debug!("[Iteration {}] Tool result: {} chars", iteration, output.len());

                self.history.push(ChatMessage::tool(call.id.clone(), output));
            }
        }

        warn!(
            "Turn exceeded {} tool iterations without a final reply",
            self.max_iterations
        );
        error_result("Exceeded maximum tool iterations.")
    }
}

/// Backends may omit call ids; tool results still need one to correlate.
fn with_call_id(mut call: ToolCall) -> ToolCall {
    if call.id.trim().is_empty() {
        call.id = format!("call_{}", ulid::Ulid::new());
    }
    call
}
