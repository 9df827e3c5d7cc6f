use std::fmt;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};

use super::{ClientFactory, ClientSettings, FactoryError};

/// 基于 reqwest 的 OpenAI 兼容客户端工厂
#[derive(Debug, Clone, Default)]
pub struct OpenAiCompatibleFactory;

impl OpenAiCompatibleFactory {
    /// 创建工厂
    pub fn new() -> Self {
        Self
    }

    fn parse_base_url(raw: &str) -> Result<Url, FactoryError> {
        let url = Url::parse(raw).map_err(|err| format!("invalid base URL `{raw}`: {err}"))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => {
                Err(format!("unsupported base URL scheme `{other}`, expected http or https").into())
            }
        }
    }

    fn build_headers(settings: &ClientSettings) -> Result<HeaderMap, FactoryError> {
        let mut headers = HeaderMap::new();

        if let Some(api_key) = &settings.api_key {
            let mut value = HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|err| format!("invalid API key: {err}"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        for (name, value) in &settings.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|err| format!("invalid header name `{name}`: {err}"))?;
            if header_name == AUTHORIZATION && settings.api_key.is_some() {
                return Err("header `authorization` conflicts with the configured API key".into());
            }
            let mut header_value = HeaderValue::from_str(value)
                .map_err(|err| format!("invalid header value for {header_name}: {err}"))?;
            if header_name == AUTHORIZATION {
                header_value.set_sensitive(true);
            }
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }
}

impl ClientFactory for OpenAiCompatibleFactory {
    type Client = OpenAiCompatibleClient;

    fn create(&self, settings: ClientSettings) -> Result<OpenAiCompatibleClient, FactoryError> {
        let base_url = Self::parse_base_url(&settings.base_url)?;
        let headers = Self::build_headers(&settings)?;
        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|err| format!("failed to create reqwest client: {err}"))?;

        Ok(OpenAiCompatibleClient {
            provider: settings.provider,
            base_url,
            default_model: settings.default_model,
            http,
        })
    }
}

/// 已鉴权的 OpenAI 兼容客户端句柄 由调用方持有
#[derive(Clone)]
pub struct OpenAiCompatibleClient {
    provider: String,
    base_url: Url,
    default_model: Option<String>,
    http: Client,
}

impl OpenAiCompatibleClient {
    /// 创建该句柄的 Provider 名称
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// 解析后的 base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// 请求未指定模型时使用的默认模型
    pub fn default_model(&self) -> Option<&str> {
        self.default_model.as_deref()
    }

    /// 已注入鉴权头的 reqwest::Client
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// 将相对路径拼接到 base URL 的路径之后 例如 `chat/completions` 查询参数保持不变
    pub fn endpoint(&self, path: &str) -> String {
        let mut url = self.base_url.clone();
        // http(s) URLs always have a path that can be extended.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|segment| !segment.is_empty()));
        }
        url.into()
    }
}

impl fmt::Debug for OpenAiCompatibleClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiCompatibleClient")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url.as_str())
            .field("default_model", &self.default_model)
            .finish_non_exhaustive()
    }
}
