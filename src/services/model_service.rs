use std::{collections::HashMap, sync::Arc, time::Duration};

use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    config::ProviderConfig,
    errors::{AppError, AppResult},
    models::domain::{ComposedPrompt, GenerationParams, ProviderKind},
};

/// A chat-completion backend. Implementations make exactly one request per
/// call and hand back the raw text of the first choice.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    async fn complete(&self, prompt: &ComposedPrompt, params: &GenerationParams)
        -> AppResult<String>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Request body shared by both providers' chat-completion endpoints.
#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

impl<'a> ChatCompletionBody<'a> {
    fn new(model: &'a str, prompt: &'a ComposedPrompt, params: &GenerationParams) -> Self {
        ChatCompletionBody {
            model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            max_tokens: params.max_tokens,
            temperature: params.temperature,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ChatCompletionReply {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatReplyMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatReplyMessage {
    content: Option<String>,
}

impl ChatCompletionReply {
    /// A reply without choices or content is an empty answer, not an error.
    fn into_text(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default()
    }
}

pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiProvider {
    /// The client's built-in retry loop is switched off: an upstream error
    /// surfaces after exactly one request, the same as for Mistral.
    pub fn new(api_key: &SecretString, model: &str, api_base: &str) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key.expose_secret())
            .with_api_base(api_base.trim_end_matches('/'));
        let no_retry = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        Self {
            client: Client::with_config(config).with_backoff(no_retry),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    async fn complete(
        &self,
        prompt: &ComposedPrompt,
        params: &GenerationParams,
    ) -> AppResult<String> {
        let body = ChatCompletionBody::new(&self.model, prompt, params);

        let reply: ChatCompletionReply =
            tokio::time::timeout(params.timeout, self.client.chat().create_byot(body))
                .await
                .map_err(|_| timed_out(self.kind(), params.timeout))?
                .map_err(|e| AppError::GenerationFailed(format!("OpenAI request failed: {}", e)))?;

        Ok(reply.into_text())
    }
}

pub struct MistralProvider {
    http: reqwest::Client,
    api_key: SecretString,
    model: String,
    api_base: String,
}

impl MistralProvider {
    pub fn new(api_key: SecretString, model: &str, api_base: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model: model.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

#[async_trait]
impl CompletionProvider for MistralProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Mistral
    }

    async fn complete(
        &self,
        prompt: &ComposedPrompt,
        params: &GenerationParams,
    ) -> AppResult<String> {
        let body = ChatCompletionBody::new(&self.model, prompt, params);

        let response = self
            .http
            .post(self.completions_url())
            .bearer_auth(self.api_key.expose_secret())
            .timeout(params.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    timed_out(self.kind(), params.timeout)
                } else {
                    AppError::GenerationFailed(format!("Mistral request failed: {}", e))
                }
            })?
            .error_for_status()
            .map_err(|e| AppError::GenerationFailed(format!("Mistral returned an error: {}", e)))?;

        let reply: ChatCompletionReply = response.json().await.map_err(|e| {
            AppError::GenerationFailed(format!("Mistral reply could not be parsed: {}", e))
        })?;

        Ok(reply.into_text())
    }
}

fn timed_out(kind: ProviderKind, timeout: Duration) -> AppError {
    AppError::GenerationFailed(format!(
        "{} request timed out after {}s",
        kind.display_name(),
        timeout.as_secs()
    ))
}

/// Providers that have credentials, keyed by kind.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderKind, Arc<dyn CompletionProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider only when its API key is set.
    pub fn from_config(config: &ProviderConfig) -> Self {
        let mut registry = Self::new();

        if let Some(key) = &config.openai_api_key {
            registry.register(Arc::new(OpenAiProvider::new(
                key,
                &config.openai_model,
                &config.openai_api_base,
            )));
        }
        if let Some(key) = &config.mistral_api_key {
            registry.register(Arc::new(MistralProvider::new(
                key.clone(),
                &config.mistral_model,
                &config.mistral_api_base,
            )));
        }

        registry
    }

    pub fn register(&mut self, provider: Arc<dyn CompletionProvider>) {
        self.providers.insert(provider.kind(), provider);
    }

    pub fn with_provider(mut self, provider: Arc<dyn CompletionProvider>) -> Self {
        self.register(provider);
        self
    }

    pub fn select(&self, kind: ProviderKind) -> AppResult<Arc<dyn CompletionProvider>> {
        self.providers.get(&kind).cloned().ok_or_else(|| {
            AppError::ProviderNotConfigured(format!(
                "{} API key is not configured",
                kind.display_name()
            ))
        })
    }

    pub fn configured(&self) -> Vec<ProviderKind> {
        let mut kinds: Vec<ProviderKind> = self.providers.keys().copied().collect();
        kinds.sort_by_key(|kind| kind.as_str());
        kinds
    }
}
