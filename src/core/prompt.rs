//! Per-sentiment prompt templates.
//!
//! Templates are loaded once from a YAML file shaped like:
//!
//! ```yaml
//! system_prompt: "You are a customer care assistant."
//! llm_prompts:
//!   POSITIVE: "Thank the customer for: {feedback_text}"
//!   NEGATIVE: "Apologise for: {feedback_text}"
//!   NEUTRAL: "Acknowledge: {feedback_text}"
//! ```
//!
//! `NEUTRAL` is mandatory; any label without its own template falls back to it.
//!
//! `{{` and `}}` in a template render as literal `{` and `}`, so
//! `{{feedback_text}}` stays unexpanded. A lone brace is kept as written.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::core::error::{ConfigError, ConfigResult};
use crate::core::types::Sentiment;

/// Placeholder replaced by the feedback text
pub const FEEDBACK_PLACEHOLDER: &str = "{feedback_text}";

/// System instruction used when the template file does not provide one
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a friendly customer care assistant. \
Reply to the customer's feedback in two or three short spoken sentences. \
Do not use lists, markdown or emojis.";

/// Template map keyed by sentiment label
pub type PromptTemplates = HashMap<String, String>;

#[derive(Debug, Deserialize)]
struct PromptFile {
    #[serde(default)]
    system_prompt: Option<String>,
    #[serde(default)]
    llm_prompts: Option<PromptTemplates>,
}

/// Builds the user prompt for the response generator.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    templates: PromptTemplates,
    system_prompt: String,
}

impl PromptBuilder {
    /// Create a builder from an in-memory template set.
    ///
    /// # Errors
    /// `ConfigError::MissingTemplate` when there is no `NEUTRAL` entry.
    pub fn new(templates: PromptTemplates) -> ConfigResult<Self> {
        if !templates.contains_key(Sentiment::Neutral.as_str()) {
            return Err(ConfigError::MissingTemplate(
                Sentiment::Neutral.as_str().to_string(),
            ));
        }
        Ok(Self {
            templates,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        })
    }

    /// Replace the system instruction.
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    /// Load templates (and an optional system prompt) from a YAML file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: PromptFile = serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let templates = file.llm_prompts.ok_or_else(|| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: "missing 'llm_prompts' section".to_string(),
        })?;

        let mut builder = Self::new(templates)?;
        if let Some(system_prompt) = file.system_prompt.filter(|s| !s.trim().is_empty()) {
            builder.system_prompt = system_prompt;
        }

        info!(
            path = %path.display(),
            templates = builder.templates.len(),
            "Loaded prompt templates"
        );
        Ok(builder)
    }

    /// Format the template for `sentiment` with the feedback text.
    pub fn build(&self, sentiment: Sentiment, feedback_text: &str) -> String {
        self.build_for_label(sentiment.as_str(), feedback_text)
    }

    /// Format the template registered under an arbitrary label.
    ///
    /// Unknown labels use the `NEUTRAL` template. The feedback text is inserted
    /// verbatim; placeholders inside it are not expanded.
    pub fn build_for_label(&self, label: &str, feedback_text: &str) -> String {
        render(self.template_for(label), feedback_text)
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    fn template_for(&self, label: &str) -> &str {
        self.templates
            .get(label)
            .or_else(|| self.templates.get(Sentiment::Neutral.as_str()))
            .map(String::as_str)
            .unwrap_or(FEEDBACK_PLACEHOLDER)
    }
}

/// Single pass over the template: placeholders and doubled braces.
fn render(template: &str, feedback_text: &str) -> String {
    let mut out = String::with_capacity(template.len() + feedback_text.len());
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if tail.starts_with("{{") || tail.starts_with("}}") {
            out.push_str(&tail[..1]);
            rest = &tail[2..];
        } else if let Some(after) = tail.strip_prefix(FEEDBACK_PLACEHOLDER) {
            out.push_str(feedback_text);
            rest = after;
        } else {
            out.push_str(&tail[..1]);
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}
