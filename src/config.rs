use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::ProviderError;
use crate::factory::OpenAiCompatibleClient;
use crate::provider::{DynProvider, OllamaProvider, OpenAiProvider, ThirdPartyProvider};

/// 构建客户端时由调用方提供的配置
///
/// 序列化键与上游 SDK 保持一致 `apiKey` 与 `baseURL`
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    /// 密钥 默认必填
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// 自定义 endpoint
    #[serde(default, rename = "baseURL", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// 附加请求头
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// 其余供应商自定义字段 例如 region
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl ProviderConfig {
    /// 空配置
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("organization", &self.organization)
            .field("project", &self.project)
            .field("headers", &self.headers)
            .field("extra", &self.extra)
            .finish()
    }
}

/// 供应商类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[serde(rename = "openai")]
    OpenAi,
    ThirdParty,
    Ollama,
}

impl ProviderKind {
    /// 使用默认客户端工厂创建对应 Provider
    pub fn provider(self) -> DynProvider<OpenAiCompatibleClient> {
        match self {
            ProviderKind::OpenAi => Arc::new(OpenAiProvider::new()),
            ProviderKind::ThirdParty => Arc::new(ThirdPartyProvider::new()),
            ProviderKind::Ollama => Arc::new(OllamaProvider::new()),
        }
    }
}

/// 一条具名配置 描述一个可构建的客户端
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderEntry {
    /// 自定义句柄 例如 `default-openai`
    pub handle: String,
    pub provider: ProviderKind,
    #[serde(flatten)]
    pub config: ProviderConfig,
}

/// 仅校验配置 不构建客户端
pub fn validate_config(kind: ProviderKind, config: &ProviderConfig) -> Result<(), ProviderError> {
    kind.provider().validate_auth(config)
}

/// 根据供应商类型构建单个客户端
pub fn build_client(
    kind: ProviderKind,
    config: &ProviderConfig,
) -> Result<OpenAiCompatibleClient, ProviderError> {
    kind.provider().construct_client(config)
}

/// 根据一组配置构建客户端 遇到第一个失败即返回
pub fn build_clients(
    entries: &[ProviderEntry],
) -> Result<HashMap<String, OpenAiCompatibleClient>, ProviderError> {
    let mut clients = HashMap::with_capacity(entries.len());

    for entry in entries {
        let client = build_client(entry.provider, &entry.config)?;
        debug!(handle = %entry.handle, provider = client.provider(), "registered client");
        clients.insert(entry.handle.clone(), client);
    }

    Ok(clients)
}
