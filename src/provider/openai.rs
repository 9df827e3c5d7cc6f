use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::factory::{ClientFactory, ClientSettings, OpenAiCompatibleFactory};

use super::{AiProvider, collect_headers, create_client, require_api_key};

const PROVIDER_NAME: &str = "OpenAI";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI 官方托管 Provider 仅要求 apiKey baseURL 可选
#[derive(Debug, Clone)]
pub struct OpenAiProvider<F = OpenAiCompatibleFactory> {
    factory: F,
}

impl OpenAiProvider {
    /// 使用默认 reqwest 工厂
    pub fn new() -> Self {
        Self::with_factory(OpenAiCompatibleFactory::new())
    }
}

impl Default for OpenAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ClientFactory> OpenAiProvider<F> {
    /// 注入自定义客户端工厂
    pub fn with_factory(factory: F) -> Self {
        Self { factory }
    }

    fn resolve_base_url(config: &ProviderConfig) -> &str {
        config
            .base_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
    }
}

impl<F: ClientFactory> AiProvider for OpenAiProvider<F> {
    type Client = F::Client;

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn construct_client(&self, config: &ProviderConfig) -> Result<F::Client, ProviderError> {
        // Same check as the default `validate_auth`, keeping the key it returns.
        let api_key = require_api_key(PROVIDER_NAME, config)?;
        let base_url = Self::resolve_base_url(config);

        let mut settings = ClientSettings::new(PROVIDER_NAME, base_url).with_api_key(api_key);
        settings.default_model = config.model.clone().filter(|model| !model.is_empty());
        settings.headers = collect_headers(
            config,
            &[
                ("OpenAI-Organization", config.organization.as_ref()),
                ("OpenAI-Project", config.project.as_ref()),
            ],
        );

        create_client(self, &self.factory, settings)
    }
}
