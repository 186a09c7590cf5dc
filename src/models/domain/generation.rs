use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{config::ProviderConfig, models::domain::content::ContentType};

pub const DEFAULT_LANGUAGE: &str = "English";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[serde(rename = "openai")]
    OpenAi,
    Mistral,
}

impl ProviderKind {
    /// `mistral` selects Mistral; anything else, including nothing, falls back
    /// to OpenAI.
    pub fn select(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "mistral" => ProviderKind::Mistral,
            _ => ProviderKind::OpenAi,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Mistral => "mistral",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::Mistral => "Mistral",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional classroom context folded into the prompt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LearningContext {
    pub country: Option<String>,
    pub state: Option<String>,
    pub school_type: Option<String>,
    pub grade: Option<String>,
}

impl LearningContext {
    /// Present, non-blank entries as `(label, value)` in prompt order.
    pub fn lines(&self) -> Vec<(&'static str, &str)> {
        [
            ("Country", &self.country),
            ("State/Location", &self.state),
            ("School Type", &self.school_type),
            ("Grade Level", &self.grade),
        ]
        .into_iter()
        .filter_map(|(label, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (label, v))
        })
        .collect()
    }
}

/// A validated request for generated content.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationRequest {
    pub content_type: ContentType,
    pub subject: String,
    pub topic: String,
    pub difficulty: String,
    pub language: String,
    pub context: LearningContext,
    pub custom_prompt: Option<String>,
    pub provider: ProviderKind,
}

impl GenerationRequest {
    pub fn new(content_type: ContentType, subject: &str, topic: &str, difficulty: &str) -> Self {
        GenerationRequest {
            content_type,
            subject: subject.to_string(),
            topic: topic.to_string(),
            difficulty: difficulty.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            context: LearningContext::default(),
            custom_prompt: None,
            provider: ProviderKind::OpenAi,
        }
    }
}

/// System and user instructions sent to a provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposedPrompt {
    pub system: String,
    pub user: String,
}

/// Fixed sampling parameters, identical across providers.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for GenerationParams {
    fn default() -> Self {
        GenerationParams::from(&ProviderConfig::default())
    }
}

impl From<&ProviderConfig> for GenerationParams {
    fn from(config: &ProviderConfig) -> Self {
        GenerationParams {
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            timeout: config.timeout(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeneratedContent {
    pub content: String,
    pub provider: ProviderKind,
}
