use std::error::Error as StdError;
use std::fmt;

pub mod reqwest;

pub use self::reqwest::{OpenAiCompatibleClient, OpenAiCompatibleFactory};

/// Raw failure raised by a client factory before it is normalized by the owning provider.
pub type FactoryError = Box<dyn StdError + Send + Sync>;

/// Values a provider hands to its client factory once validation has passed.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Identity of the provider requesting the client, used for diagnostics only.
    pub provider: String,
    /// Credential forwarded verbatim; `None` only for providers without a key concept.
    pub api_key: Option<String>,
    /// Endpoint root forwarded verbatim.
    pub base_url: String,
    /// Model used when a request does not name one.
    pub default_model: Option<String>,
    /// Additional default headers installed on every request.
    pub headers: Vec<(String, String)>,
}

impl ClientSettings {
    /// Builds settings carrying only an endpoint.
    ///
    /// # Examples
    ///
    /// ```
    /// use kotoba_providers::factory::ClientSettings;
    ///
    /// let settings = ClientSettings::new("ThirdParty", "https://api.example.com")
    ///     .with_api_key("sk-test")
    ///     .with_header("X-Team", "core");
    /// assert_eq!(settings.api_key.as_deref(), Some("sk-test"));
    /// assert_eq!(settings.headers.len(), 1);
    /// ```
    pub fn new(provider: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            api_key: None,
            base_url: base_url.into(),
            default_model: None,
            headers: Vec::new(),
        }
    }

    /// Sets the credential.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the fallback model.
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }

    /// Appends a default header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

impl fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSettings")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("headers", &self.headers)
            .finish()
    }
}

/// External collaborator that turns validated settings into a ready-to-use client.
///
/// Providers treat the factory as opaque: only the success or failure of
/// [`ClientFactory::create`] is interpreted, never the client internals. Implementations
/// must not retry; a failed attempt is reported once and normalized by the provider.
///
/// # Examples
///
/// ```
/// use kotoba_providers::factory::{ClientFactory, ClientSettings, FactoryError};
///
/// struct EchoFactory;
///
/// impl ClientFactory for EchoFactory {
///     type Client = String;
///
///     fn create(&self, settings: ClientSettings) -> Result<String, FactoryError> {
///         Ok(settings.base_url)
///     }
/// }
///
/// let client = EchoFactory
///     .create(ClientSettings::new("Echo", "https://api.example.com"))
///     .unwrap();
/// assert_eq!(client, "https://api.example.com");
/// ```
pub trait ClientFactory: Send + Sync {
    /// Handle produced on success; owned by the caller once returned.
    type Client;

    /// Builds a client, returning the raw failure when that is not possible.
    fn create(&self, settings: ClientSettings) -> Result<Self::Client, FactoryError>;
}

impl<F: ClientFactory + ?Sized> ClientFactory for &F {
    type Client = F::Client;

    fn create(&self, settings: ClientSettings) -> Result<Self::Client, FactoryError> {
        (**self).create(settings)
    }
}
