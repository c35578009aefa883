//! Public configuration for the inference client.

use std::time::Duration;

/// Base URL of a locally running Ollama server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434/api";

/// Configuration for [`InferenceClient`](crate::InferenceClient) and
/// [`HttpHealthProbe`](crate::HttpHealthProbe).
///
/// Each operation has its own fixed latency budget. The defaults match what
/// the server needs in practice: chats answer within a minute, listings and
/// deletes are near-instant, and pulls may download many gigabytes.
///
/// # Example
///
/// ```
/// use ochat_client::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new()
///     .with_base_url("http://127.0.0.1:11500/api")
///     .with_chat_timeout(Duration::from_secs(120));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the server API, without a trailing slash
    pub(crate) base_url: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Bound on a whole chat call, streamed or not
    pub(crate) chat_timeout: Duration,
    /// Bound on listing models and reading the server version
    pub(crate) list_timeout: Duration,
    /// Bound on a whole pull, including the progress stream
    pub(crate) pull_timeout: Duration,
    /// Bound on deleting a model
    pub(crate) delete_timeout: Duration,
    /// Bound on a single liveness probe
    pub(crate) probe_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("ochat/", env!("CARGO_PKG_VERSION")).to_string(),
            chat_timeout: Duration::from_secs(60),
            list_timeout: Duration::from_secs(10),
            pull_timeout: Duration::from_secs(60 * 60),
            delete_timeout: Duration::from_secs(10),
            probe_timeout: Duration::from_secs(2),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the server API.
    ///
    /// Defaults to `http://localhost:11434/api`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Defaults to 60 seconds.
    #[must_use]
    pub const fn with_chat_timeout(mut self, timeout: Duration) -> Self {
        self.chat_timeout = timeout;
        self
    }

    /// Defaults to 10 seconds.
    #[must_use]
    pub const fn with_list_timeout(mut self, timeout: Duration) -> Self {
        self.list_timeout = timeout;
        self
    }

    /// Defaults to one hour.
    #[must_use]
    pub const fn with_pull_timeout(mut self, timeout: Duration) -> Self {
        self.pull_timeout = timeout;
        self
    }

    /// Defaults to 10 seconds.
    #[must_use]
    pub const fn with_delete_timeout(mut self, timeout: Duration) -> Self {
        self.delete_timeout = timeout;
        self
    }

    /// Defaults to 2 seconds.
    #[must_use]
    pub const fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    /// Full URL of an API endpoint, e.g. `endpoint("chat")`.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
