//! Service liveness probe
//!
//! A probe answers one question: is the service reachable right now? The
//! HTTP implementation issues a blocking GET with a short timeout; any
//! completed exchange with a success status counts as reachable.

use std::time::Duration;

/// Liveness probe abstraction
pub trait Probe {
    /// Whether the service responded to a probe just now
    fn is_reachable(&self) -> bool;
}

/// HTTP GET probe against a fixed URL
#[derive(Debug)]
pub struct HttpProbe {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpProbe {
    /// Build a probe with a per-request timeout
    pub fn new(url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.to_string(),
            client,
        })
    }
}

impl Probe for HttpProbe {
    fn is_reachable(&self) -> bool {
        match self.client.get(&self.url).send() {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                log::debug!("probe against {} failed: {err}", self.url);
                false
            },
        }
    }
}
