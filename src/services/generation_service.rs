use std::time::Instant;

use crate::{
    errors::AppResult,
    models::{
        domain::{GeneratedContent, GenerationParams, GenerationRequest},
        dto::request::GenerateContentRequest,
    },
    services::{
        model_service::ProviderRegistry, prompt_builder::build_prompt,
        response_normalizer::normalize,
    },
};

/// Validates a request, prompts the selected provider once and cleans the
/// reply. Nothing is persisted here.
pub struct GenerationService {
    providers: ProviderRegistry,
    params: GenerationParams,
}

impl GenerationService {
    pub fn new(providers: ProviderRegistry, params: GenerationParams) -> Self {
        Self { providers, params }
    }

    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    pub async fn generate(
        &self,
        request: GenerateContentRequest,
        request_id: &str,
    ) -> AppResult<GeneratedContent> {
        let request = GenerationRequest::try_from(request)?;
        let provider = self.providers.select(request.provider)?;
        let prompt = build_prompt(&request);

        log::info!(
            "[{}] Generating {} with {} (language: {})",
            request_id,
            request.content_type,
            request.provider,
            request.language
        );

        let started = Instant::now();
        let raw = match provider.complete(&prompt, &self.params).await {
            Ok(raw) => raw,
            Err(e) => {
                log::error!(
                    "[{}] {} generation failed after {}ms: {}",
                    request_id,
                    request.provider,
                    started.elapsed().as_millis(),
                    e
                );
                return Err(e);
            }
        };

        log::info!(
            "[{}] {} returned {} chars in {}ms",
            request_id,
            request.provider,
            raw.len(),
            started.elapsed().as_millis()
        );

        Ok(GeneratedContent {
            content: normalize(&raw),
            provider: request.provider,
        })
    }
}
