//! Liveness probe for the inference server.
//!
//! A single GET against the version endpoint. It never fails: a network
//! error, a timeout or any status other than 200 all mean "not alive".

use std::time::Duration;

use async_trait::async_trait;
use ochat_core::ServerProbe;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::config::ClientConfig;

/// HTTP implementation of the [`ServerProbe`] port.
#[derive(Debug, Clone)]
pub struct HttpHealthProbe {
    client: Client,
    version_url: String,
}

impl HttpHealthProbe {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: Client::new(),
            version_url: config.endpoint("version"),
        }
    }

    pub fn url(&self) -> &str {
        &self.version_url
    }
}

#[async_trait]
impl ServerProbe for HttpHealthProbe {
    async fn is_alive(&self, timeout: Duration) -> bool {
        match self.client.get(&self.version_url).timeout(timeout).send().await {
            Ok(response) if response.status() == StatusCode::OK => true,
            Ok(response) => {
                debug!(url = %self.version_url, status = %response.status(), "Probe answered with non-200");
                false
            }
            Err(e) => {
                debug!(url = %self.version_url, error = %e, "Probe failed");
                false
            }
        }
    }
}
