//! MCP prompt templates.
//!
//! Pre-defined prompts a client can fetch with arguments substituted. A
//! template is an ordered list of role/text message templates; `{{name}}`
//! markers are replaced by the caller-supplied arguments.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Error, Result};

/// A prompt argument definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptArgument {
    pub name: String,
    pub description: String,
    pub required: bool,
}

/// A prompt definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub arguments: Vec<PromptArgument>,
}

/// A prompt message (the actual content).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: String,
    pub content: PromptContent,
}

/// Prompt content types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PromptContent {
    Text { text: String },
}

/// Result of prompts/list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPromptsResult {
    pub prompts: Vec<Prompt>,
}

/// Result of prompts/get.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPromptResult {
    pub description: Option<String>,
    pub messages: Vec<PromptMessage>,
}

/// Template for one message of a prompt.
#[derive(Debug, Clone)]
pub struct MessageTemplate {
    pub role: &'static str,
    pub template: &'static str,
}

/// Prompt registry.
#[derive(Debug, Clone, Default)]
pub struct PromptRegistry {
    prompts: HashMap<String, (Prompt, Vec<MessageTemplate>)>,
}

impl PromptRegistry {
    /// Create a new registry with the built-in prompts.
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register_builtin_prompts();
        registry
    }

    fn register_builtin_prompts(&mut self) {
        // Code review request
        self.register(
            Prompt {
                name: "ask_review".to_string(),
                description: "Generates a standard code review request".to_string(),
                arguments: vec![PromptArgument {
                    name: "code_snippet".to_string(),
                    description: "The code to review".to_string(),
                    required: true,
                }],
            },
            vec![MessageTemplate {
                role: "user",
                template: "Please review the following code snippet for potential bugs and style issues:\n```\n{{code_snippet}}\n```",
            }],
        );

        // Debugging help session opener
        self.register(
            Prompt {
                name: "debug_session_start".to_string(),
                description: "Initiates a debugging help session".to_string(),
                arguments: vec![PromptArgument {
                    name: "error_message".to_string(),
                    description: "The error message encountered".to_string(),
                    required: true,
                }],
            },
            vec![
                MessageTemplate {
                    role: "user",
                    template: "I encountered an error:\n{{error_message}}",
                },
                MessageTemplate {
                    role: "assistant",
                    template: "Okay, I can help with that. Can you provide the full traceback and tell me what you were trying to do?",
                },
            ],
        );
    }

    /// Register a prompt with its message templates.
    pub fn register(&mut self, prompt: Prompt, templates: Vec<MessageTemplate>) {
        self.prompts
            .insert(prompt.name.clone(), (prompt, templates));
    }

    /// List all prompts.
    pub fn list(&self) -> Vec<Prompt> {
        self.prompts.values().map(|(p, _)| p.clone()).collect()
    }

    /// Get a prompt by name with arguments substituted.
    ///
    /// Required arguments must be present; optional ones render as empty
    /// strings when absent.
    pub fn get(&self, name: &str, arguments: &HashMap<String, String>) -> Result<GetPromptResult> {
        let (prompt, templates) = self
            .prompts
            .get(name)
            .ok_or_else(|| Error::PromptNotFound(name.to_string()))?;

        for arg in &prompt.arguments {
            if arg.required && !arguments.contains_key(&arg.name) {
                return Err(Error::InvalidToolArguments(format!(
                    "Missing required argument: {}",
                    arg.name
                )));
            }
        }

        let messages = templates
            .iter()
            .map(|t| {
                let mut text = t.template.to_string();
                for arg in &prompt.arguments {
                    let marker = format!("{{{{{}}}}}", arg.name);
                    let value = arguments.get(&arg.name).map(String::as_str).unwrap_or("");
                    text = text.replace(&marker, value);
                }
                PromptMessage {
                    role: t.role.to_string(),
                    content: PromptContent::Text { text },
                }
            })
            .collect();

        Ok(GetPromptResult {
            description: Some(prompt.description.clone()),
            messages,
        })
    }
}
