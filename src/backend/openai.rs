//! OpenAI-compatible chat-completions backend.
//!
//! Supports tool-use (function calling) in the OpenAI wire format.

use super::{BackendError, ChatBackend};
use crate::tools::ToolDefinition;
use crate::types::*;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// Chat backend speaking the `/v1/chat/completions` protocol.
#[derive(Debug, Clone)]
pub struct OpenAiBackend {
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
    http: reqwest::Client,
}

// -- OpenAI-compatible request/response types --------------------------------

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<MessagePayload<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ToolPayload<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<ToolChoice>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct MessagePayload<'a> {
    role: ChatRole,
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<ToolCallPayload>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ToolPayload<'a> {
    r#type: &'a str,
    function: FunctionPayload<'a>,
}

#[derive(Debug, Serialize)]
struct FunctionPayload<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ToolCallPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    id: String,
    #[serde(default = "function_type")]
    r#type: String,
    function: FunctionCallPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FunctionCallPayload {
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    choices: Vec<ChoicePayload>,
}

#[derive(Debug, Deserialize)]
struct ChoicePayload {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    tool_calls: Vec<ToolCallPayload>,
}

/// Compatible servers send `null` where OpenAI omits a field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn function_type() -> String {
    "function".into()
}

fn message_payload(message: &ChatMessage) -> MessagePayload<'_> {
    let tool_calls = (!message.tool_calls.is_empty()).then(|| {
        message
            .tool_calls
            .iter()
            .map(|tc| ToolCallPayload {
                id: tc.id.clone(),
                r#type: function_type(),
                function: FunctionCallPayload {
                    name: tc.name.clone(),
                    arguments: tc.arguments.clone(),
                },
            })
            .collect()
    });

    // Assistant turns that only call tools carry a null content.
    let content = if message.content.is_empty() && tool_calls.is_some() {
        None
    } else {
        Some(message.content.as_str())
    };

    MessagePayload {
        role: message.role,
        content,
        tool_calls,
        tool_call_id: message.tool_call_id.as_deref(),
    }
}

fn tool_payload(tool: &ToolDefinition) -> ToolPayload<'_> {
    ToolPayload {
        r#type: "function",
        function: FunctionPayload {
            name: &tool.name,
            description: &tool.description,
            parameters: &tool.parameters,
        },
    }
}

fn into_completion(response: ChatResponse) -> Option<Completion> {
    let choice = response.choices.into_iter().next()?;
    let tool_calls = choice
        .message
        .tool_calls
        .into_iter()
        .map(|tc| ToolCall::new(tc.id, tc.function.name, tc.function.arguments))
        .collect();

    Some(Completion {
        content: choice.message.content,
        tool_calls,
    })
}

impl OpenAiBackend {
    /// Create a new backend client.
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            max_tokens: 4096,
            temperature: 0.7,
            http: reqwest::Client::new(),
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
        tool_choice: ToolChoice,
    ) -> Result<Option<Completion>> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        // tool_choice is only valid alongside a non-empty tool list
        let (tool_payloads, tool_choice) = if tools.is_empty() {
            (None, None)
        } else {
            (
                Some(tools.iter().map(tool_payload).collect()),
                Some(tool_choice),
            )
        };

        let request = ChatRequest {
            model: &self.model,
            messages: messages.iter().map(message_payload).collect(),
            tools: tool_payloads,
            tool_choice,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        debug!(
            "Completion request to model {} ({} messages, {} tools)",
            self.model,
            messages.len(),
            tools.len()
        );

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|source| BackendError::Request {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BackendError::Status { status, body }.into());
        }

        let body: ChatResponse = resp.json().await.map_err(BackendError::Decode)?;
        Ok(into_completion(body))
    }
}
