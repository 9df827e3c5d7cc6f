//! 多供应商 LLM 客户端构建层 统一校验与错误归一化

pub mod config;
pub mod error;
pub mod factory;
pub mod provider;

pub use config::{ProviderConfig, ProviderEntry, ProviderKind, build_client, build_clients};
pub use error::{ConfigField, ProviderError};
pub use factory::{ClientFactory, ClientSettings, OpenAiCompatibleClient};
pub use provider::{AiProvider, DynProvider, OllamaProvider, OpenAiProvider, ThirdPartyProvider};
