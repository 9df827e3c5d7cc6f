use crate::config::ProviderConfig;
use crate::error::{ConfigField, ProviderError};
use crate::factory::{ClientFactory, ClientSettings, OpenAiCompatibleFactory};

use super::{AiProvider, collect_headers, create_client};

const PROVIDER_NAME: &str = "Ollama";
const DEFAULT_BASE_URL: &str = "http://localhost:11434/v1";

/// 本地 Ollama Provider 无密钥概念
///
/// apiKey 可省略 若提供则原样转发 baseURL 缺省时使用本地默认地址 但显式给出空串视为配置错误
#[derive(Debug, Clone)]
pub struct OllamaProvider<F = OpenAiCompatibleFactory> {
    factory: F,
}

impl OllamaProvider {
    /// 使用默认 reqwest 工厂
    pub fn new() -> Self {
        Self::with_factory(OpenAiCompatibleFactory::new())
    }
}

impl Default for OllamaProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ClientFactory> OllamaProvider<F> {
    /// 注入自定义客户端工厂
    pub fn with_factory(factory: F) -> Self {
        Self { factory }
    }
}

impl<F: ClientFactory> AiProvider for OllamaProvider<F> {
    type Client = F::Client;

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn construct_client(&self, config: &ProviderConfig) -> Result<F::Client, ProviderError> {
        self.validate_auth(config)?;
        let base_url = config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);

        let mut settings = ClientSettings::new(PROVIDER_NAME, base_url);
        settings.api_key = config.api_key.clone().filter(|key| !key.is_empty());
        settings.default_model = config.model.clone().filter(|model| !model.is_empty());
        settings.headers = collect_headers(config, &[]);

        create_client(self, &self.factory, settings)
    }

    fn validate_auth(&self, config: &ProviderConfig) -> Result<(), ProviderError> {
        match config.base_url.as_deref() {
            Some("") => Err(ProviderError::auth(PROVIDER_NAME, ConfigField::BaseUrl)),
            _ => Ok(()),
        }
    }
}
