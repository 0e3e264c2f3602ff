//! Nimbo — conversational coding agent for the terminal.
//!
//! Keeps a chat session with a language-model backend and lets the model
//! list, read and edit local files mid-conversation.

pub mod agent;
pub mod backend;
pub mod config;
pub mod tools;
pub mod types;
