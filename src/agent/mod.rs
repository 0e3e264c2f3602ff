pub mod history;
pub mod loop_;
pub mod system_prompt;

pub use history::ConversationHistory;
pub use loop_::{AgentSession, MAX_TOOL_ITERATIONS};
pub use system_prompt::DEFAULT_SYSTEM_PROMPT;
