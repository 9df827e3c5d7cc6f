use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// Configuration fields that a provider may require before building a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    /// The secret credential, `apiKey` on the wire.
    ApiKey,
    /// The endpoint override, `baseURL` on the wire.
    BaseUrl,
}

impl ConfigField {
    /// Returns the key under which the field appears in a serialized configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use kotoba_providers::error::ConfigField;
    ///
    /// assert_eq!(ConfigField::BaseUrl.key(), "baseURL");
    /// ```
    pub fn key(self) -> &'static str {
        match self {
            ConfigField::ApiKey => "apiKey",
            ConfigField::BaseUrl => "baseURL",
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigField::ApiKey => f.write_str("API key"),
            ConfigField::BaseUrl => f.write_str("base URL"),
        }
    }
}

/// The only two failure shapes a caller can observe while constructing a client.
///
/// Validation failures are reported before any external call is made and are always
/// recoverable by supplying corrected configuration. Everything that goes wrong after
/// validation (inside the client factory) is normalized into
/// [`ProviderError::ClientInitialization`], so callers never need to know which vendor
/// SDK or transport produced the original failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// A required configuration field was absent or empty.
    #[error("{provider} {field} is required ({key})", key = .field.key())]
    AuthValidation {
        /// Identity of the provider that rejected the configuration.
        provider: String,
        /// The missing field.
        field: ConfigField,
    },
    /// A failure raised while building the client, after validation succeeded.
    #[error("{provider} {operation} failed: {message}")]
    ClientInitialization {
        /// Operation in progress when the failure occurred, such as `client initialization`.
        operation: String,
        /// Identity of the provider that owned the operation.
        provider: String,
        /// Message of the originating failure, including its source chain.
        message: String,
    },
}

impl ProviderError {
    /// Creates an [`ProviderError::AuthValidation`] for the given provider and field.
    ///
    /// # Examples
    ///
    /// ```
    /// use kotoba_providers::error::{ConfigField, ProviderError};
    ///
    /// let err = ProviderError::auth("ThirdParty", ConfigField::ApiKey);
    /// assert_eq!(err.to_string(), "ThirdParty API key is required (apiKey)");
    /// ```
    pub fn auth(provider: impl Into<String>, field: ConfigField) -> Self {
        Self::AuthValidation {
            provider: provider.into(),
            field,
        }
    }

    /// Wraps an arbitrary failure into [`ProviderError::ClientInitialization`].
    ///
    /// The message keeps every `source()` in the chain, joined with `": "`, because
    /// transport errors usually hide the useful detail one or two levels down.
    ///
    /// # Examples
    ///
    /// ```
    /// use kotoba_providers::error::ProviderError;
    ///
    /// let cause = std::io::Error::other("connection refused");
    /// let err = ProviderError::normalized("ThirdParty", "client initialization", &cause);
    /// assert_eq!(err.operation(), Some("client initialization"));
    /// assert_eq!(err.provider(), "ThirdParty");
    /// ```
    pub fn normalized(
        provider: impl Into<String>,
        operation: impl Into<String>,
        cause: &(dyn StdError + 'static),
    ) -> Self {
        Self::ClientInitialization {
            operation: operation.into(),
            provider: provider.into(),
            message: error_chain(cause),
        }
    }

    /// Identity of the provider that produced this error.
    pub fn provider(&self) -> &str {
        match self {
            Self::AuthValidation { provider, .. } | Self::ClientInitialization { provider, .. } => {
                provider
            }
        }
    }

    /// Operation name carried by normalized errors.
    pub fn operation(&self) -> Option<&str> {
        match self {
            Self::ClientInitialization { operation, .. } => Some(operation),
            Self::AuthValidation { .. } => None,
        }
    }

    /// Field named by a validation error.
    pub fn field(&self) -> Option<ConfigField> {
        match self {
            Self::AuthValidation { field, .. } => Some(*field),
            Self::ClientInitialization { .. } => None,
        }
    }

    /// Returns `true` when the caller can recover by fixing its configuration.
    pub fn is_auth_validation(&self) -> bool {
        matches!(self, Self::AuthValidation { .. })
    }
}

fn error_chain(cause: &(dyn StdError + 'static)) -> String {
    let mut message = cause.to_string();
    let mut source = cause.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = inner.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("handshake failed")]
    struct Outer {
        #[source]
        inner: std::io::Error,
    }

    #[test]
    fn auth_message_names_provider_and_field() {
        let err = ProviderError::auth("ThirdParty", ConfigField::BaseUrl);
        assert_eq!(err.to_string(), "ThirdParty base URL is required (baseURL)");
        assert_eq!(err.field(), Some(ConfigField::BaseUrl));
        assert_eq!(err.operation(), None);
        assert!(err.is_auth_validation());
    }

    #[test]
    fn normalized_message_includes_source_chain() {
        let cause = Outer {
            inner: std::io::Error::other("dns lookup failed"),
        };
        let err = ProviderError::normalized("OpenAI", "client initialization", &cause);

        match &err {
            ProviderError::ClientInitialization {
                operation,
                provider,
                message,
            } => {
                assert_eq!(operation, "client initialization");
                assert_eq!(provider, "OpenAI");
                assert_eq!(message, "handshake failed: dns lookup failed");
            }
            other => panic!("unexpected error type: {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "OpenAI client initialization failed: handshake failed: dns lookup failed"
        );
        assert!(!err.is_auth_validation());
    }

    #[test]
    fn normalized_message_skips_repeated_source_text() {
        #[derive(Debug, Error)]
        #[error("request failed: {inner}")]
        struct Verbose {
            #[source]
            inner: std::io::Error,
        }

        let cause = Verbose {
            inner: std::io::Error::other("timed out"),
        };
        let err = ProviderError::normalized("OpenAI", "client initialization", &cause);
        assert_eq!(
            err.to_string(),
            "OpenAI client initialization failed: request failed: timed out"
        );
    }
}
