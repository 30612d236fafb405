//! Concept-brief generation
//!
//! Turns a vague idea into a short project brief by delegating to an
//! external generator. The generated text is returned as is; a failed
//! generation is always an error and never stands in for a description.

use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use super::loader::PluginLoader;
use super::protocol::{IdeateParams, PluginRequest};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("No concept generator found: {0}")]
    NoGenerator(String),

    #[error("Failed to spawn generator {}: {source}", path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Generation failed: {0}")]
    Failed(String),

    #[error("Generator returned no text")]
    Empty,

    #[error("Invalid generator response: {0}")]
    Protocol(#[from] serde_json::Error),

    #[error("Generator I/O error: {0}")]
    Io(#[source] std::io::Error),
}

/// Instruction sent with every prompt unless configured otherwise
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are a visionary Cloud Software Architect with 20 years of experience designing massive global platforms. \
Take a vague user idea and convert it into a concrete, 1-paragraph technical Project Concept Brief. \
It must sound professional, dense and actionable, and mention potential scale, users and core requirements such as realtime delivery, caching or ML pipelines. \
Do not write more than 3-4 sentences. Do not use markdown formatting. Output raw paragraph text only.";

/// Prompt used when no idea is given
pub const RANDOM_IDEA_PROMPT: &str = "Generate a completely random, incredibly complex cloud infrastructure project idea (e.g. planetary sensor network, global crypto exchange). Keep it to 3 sentences max. No formatting.";

/// Builds the prompt sent for an idea
pub fn build_prompt(idea: &str) -> String {
    let idea = idea.trim();
    if idea.is_empty() {
        RANDOM_IDEA_PROMPT.to_string()
    } else {
        format!(
            "Draft a high-end 3-sentence architectural project brief for a system related to: \"{}\"",
            idea
        )
    }
}

/// Generates concept briefs through an external generator
pub struct Ideation<'a> {
    loader: &'a PluginLoader,
    command: Option<String>,
    system_instruction: String,
}

impl<'a> Ideation<'a> {
    pub fn new(
        loader: &'a PluginLoader,
        command: Option<String>,
        system_instruction: impl Into<String>,
    ) -> Self {
        Self {
            loader,
            command,
            system_instruction: system_instruction.into(),
        }
    }

    /// Generates a brief for the idea; an empty idea asks for a random one
    pub fn generate(&self, idea: &str) -> Result<String, GenerationError> {
        let path = self.loader.resolve(self.command.as_deref())?;
        let request = PluginRequest::ideate(&IdeateParams {
            system_instruction: self.system_instruction.clone(),
            prompt: build_prompt(idea),
        });

        let responses = self.loader.execute(&path, &request)?;

        let mut text = String::new();
        for response in &responses {
            if !response.success {
                let message = response
                    .error
                    .clone()
                    .unwrap_or_else(|| "unknown generator error".to_string());
                return Err(GenerationError::Failed(message));
            }
            if let Some(chunk) = response.text() {
                text.push_str(chunk);
            }
        }

        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(GenerationError::Empty);
        }

        debug!(chars = text.chars().count(), chunks = responses.len(), "generated concept brief");
        Ok(text)
    }
}
