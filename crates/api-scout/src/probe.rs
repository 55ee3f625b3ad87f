//! Probe client: one JSON-bodied POST per call.
//!
//! [`ProbeClient::send`] reports transport and decode failures as a
//! [`ProbeError`]. [`ProbeClient::probe`] folds both into an empty
//! [`ProbeResult`] so the discovery loops can treat "nothing learned" as a
//! termination signal instead of an error.

use std::time::Duration;

use serde_json::{Map, Value};

use crate::config::DiscoveryConfig;
use crate::types::{ProbeResult, ScoutResult};

/// Why a probe produced no usable response.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// Connection refused, DNS failure, timeout, or a body that could not be read.
    #[error("transport failure for {url}: {message}")]
    Transport {
        url: String,
        message: String,
        timed_out: bool,
    },

    /// The server answered, but not with JSON.
    #[error("decode failure (status {status}): {message}")]
    Decode {
        status: u16,
        raw: String,
        message: String,
    },
}

impl ProbeError {
    fn transport(url: &str, err: reqwest::Error) -> Self {
        ProbeError::Transport {
            url: url.to_string(),
            timed_out: err.is_timeout(),
            message: err.to_string(),
        }
    }

    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeError::Transport { timed_out: true, .. } => "timeout",
            ProbeError::Transport { .. } => "transport",
            ProbeError::Decode { .. } => "decode",
        }
    }
}

/// HTTP client shared by every probe of a discovery run.
#[derive(Clone)]
pub struct ProbeClient {
    client: reqwest::Client,
}

impl ProbeClient {
    /// Build a client with the configured timeout and User-Agent.
    pub fn new(config: &DiscoveryConfig) -> ScoutResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }

    /// POST `payload` as JSON and decode the reply.
    pub async fn send(
        &self,
        url: &str,
        payload: &Map<String, Value>,
    ) -> Result<ProbeResult, ProbeError> {
        let resp = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| ProbeError::transport(url, e))?;

        let status = resp.status().as_u16();
        let raw = resp
            .text()
            .await
            .map_err(|e| ProbeError::transport(url, e))?;

        match serde_json::from_str::<Value>(&raw) {
            Ok(body) => Ok(ProbeResult { body, raw, status }),
            Err(e) => Err(ProbeError::Decode {
                status,
                raw,
                message: e.to_string(),
            }),
        }
    }

    /// Fail-soft probe: any failure becomes [`ProbeResult::empty`].
    pub async fn probe(&self, url: &str, payload: &Map<String, Value>) -> ProbeResult {
        match self.send(url, payload).await {
            Ok(result) => result,
            Err(e) => {
                tracing::debug!(url, kind = e.kind(), error = %e, "probe yielded nothing");
                ProbeResult::empty()
            }
        }
    }
}
