use std::error::Error as StdError;
use std::sync::Arc;

use reqwest::Url;
use tracing::{debug, warn};

use crate::config::ProviderConfig;
use crate::error::{ConfigField, ProviderError};
use crate::factory::{ClientFactory, ClientSettings};

pub mod ollama;
pub mod openai;
pub mod third_party;

pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
pub use third_party::ThirdPartyProvider;

/// 客户端初始化操作名 所有 Provider 归一化错误时使用
pub const CLIENT_INITIALIZATION: &str = "client initialization";

/// 统一的 Provider Trait 所有供应商实现该接口即可接入
///
/// 只有 `construct_client` 必须实现 校验与错误归一化均有默认行为
pub trait AiProvider: Send + Sync {
    /// 构建成功后交给调用方的客户端句柄
    type Client;

    /// 供应商名称 仅用于诊断信息
    fn name(&self) -> &str;

    /// 校验配置后构建客户端 失败时经 `normalize_error` 归一化
    fn construct_client(&self, config: &ProviderConfig) -> Result<Self::Client, ProviderError>;

    /// 默认仅要求 apiKey 非空
    fn validate_auth(&self, config: &ProviderConfig) -> Result<(), ProviderError> {
        require_api_key(self.name(), config).map(|_| ())
    }

    /// 将任意底层错误包装为带操作名与供应商名的统一错误
    fn normalize_error(&self, operation: &str, cause: &(dyn StdError + 'static)) -> ProviderError {
        normalize_error(self.name(), operation, cause)
    }
}

/// 线程安全 Provider
pub type DynProvider<C> = Arc<dyn AiProvider<Client = C>>;

/// Returns the API key, rejecting an absent or empty value on behalf of `provider`.
pub fn require_api_key<'a>(
    provider: &str,
    config: &'a ProviderConfig,
) -> Result<&'a str, ProviderError> {
    non_empty(config.api_key.as_deref())
        .ok_or_else(|| ProviderError::auth(provider, ConfigField::ApiKey))
}

/// Returns the base URL, rejecting an absent or empty value on behalf of `provider`.
pub fn require_base_url<'a>(
    provider: &str,
    config: &'a ProviderConfig,
) -> Result<&'a str, ProviderError> {
    non_empty(config.base_url.as_deref())
        .ok_or_else(|| ProviderError::auth(provider, ConfigField::BaseUrl))
}

/// Shared normalization used by the default [`AiProvider::normalize_error`].
pub fn normalize_error(
    provider: &str,
    operation: &str,
    cause: &(dyn StdError + 'static),
) -> ProviderError {
    let error = ProviderError::normalized(provider, operation, cause);
    warn!(provider, operation, error = %error, "provider operation failed");
    error
}

/// Hands validated settings to `factory`, normalizing any failure through `provider`.
pub(crate) fn create_client<P, F>(
    provider: &P,
    factory: &F,
    settings: ClientSettings,
) -> Result<F::Client, ProviderError>
where
    P: AiProvider + ?Sized,
    F: ClientFactory,
{
    let base_url = loggable_url(&settings.base_url);
    debug!(provider = provider.name(), base_url = %base_url, "constructing client");

    let client = factory
        .create(settings)
        .map_err(|err| provider.normalize_error(CLIENT_INITIALIZATION, &*err))?;

    debug!(provider = provider.name(), base_url = %base_url, "client constructed");
    Ok(client)
}

/// Strips userinfo so credentials embedded in a URL never reach the logs.
fn loggable_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut url) if !url.cannot_be_a_base() => {
            let _ = url.set_username("");
            let _ = url.set_password(None);
            url.into()
        }
        _ => "<unparsable>".to_string(),
    }
}

// Empty strings count as missing.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// Merges `organization`/`project` style extras into header pairs, followed by the
/// caller's explicit headers.
pub(crate) fn collect_headers(
    config: &ProviderConfig,
    mapped: &[(&str, Option<&String>)],
) -> Vec<(String, String)> {
    mapped
        .iter()
        .filter_map(|(name, value)| value.map(|value| (name.to_string(), value.clone())))
        .chain(
            config
                .headers
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        )
        .collect()
}
