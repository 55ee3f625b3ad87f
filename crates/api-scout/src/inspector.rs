//! Inspection driver: runs every stage for each target path and keeps the
//! registry for one discovery run.

use url::Url;

use crate::behavior::probe_behavior;
use crate::config::DiscoveryConfig;
use crate::flatten::flatten_keys;
use crate::probe::ProbeClient;
use crate::schema::discover_schema;
use crate::synth::{collapsed_endpoints, synthesize, synthesize_keyed};
use crate::types::{Descriptor, EndpointRecord, KeyedDescriptor, Registry, ScoutError, ScoutResult};

/// Black-box inspector bound to one base URL.
pub struct Inspector {
    base_url: Url,
    base: String,
    config: DiscoveryConfig,
    client: ProbeClient,
    registry: Registry,
}

impl Inspector {
    /// Create an inspector. Fails only on a bad URL, config, or HTTP client.
    pub fn new(base_url: &str, config: &DiscoveryConfig) -> ScoutResult<Self> {
        config.validate()?;
        let base = base_url.trim_end_matches('/').to_string();
        let parsed =
            Url::parse(&base).map_err(|e| ScoutError::InvalidUrl(format!("{base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScoutError::InvalidUrl(format!(
                "{base_url}: unsupported scheme '{}'",
                parsed.scheme()
            )));
        }

        Ok(Self {
            base_url: parsed,
            base,
            client: ProbeClient::new(config)?,
            config: config.clone(),
            registry: Registry::new(),
        })
    }

    /// Base URL as given, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Records collected so far, in inspection order.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Absolute URL for `path`, resolved against the base URL.
    pub fn endpoint_url(&self, path: &str) -> ScoutResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ScoutError::InvalidUrl(format!("{path}: {e}")))
    }

    /// Run schema discovery, behavior probing and key extraction for `path`.
    ///
    /// Never fails: a path that cannot be resolved or an unreachable
    /// endpoint still produces an (empty) record.
    pub async fn inspect_endpoint(&mut self, path: &str) -> &EndpointRecord {
        let record = match self.endpoint_url(path) {
            Ok(url) => self.inspect_url(path, url.as_str()).await,
            Err(e) => {
                tracing::warn!(path, error = %e, "cannot resolve endpoint; recording empty inspection");
                EndpointRecord::new(path)
            }
        };

        // Re-inspection replaces the record in place.
        self.registry.insert(path.to_string(), record);
        &self.registry[path]
    }

    async fn inspect_url(&self, path: &str, url: &str) -> EndpointRecord {
        tracing::info!(path, url, "inspecting endpoint");

        let mut record = EndpointRecord::new(path);

        let discovery = discover_schema(&self.client, url, &self.config).await;
        if !discovery.converged {
            tracing::debug!(path, rounds = discovery.rounds, "schema did not converge");
        }

        record.behavior = probe_behavior(&self.client, url, &discovery.schema, &self.config).await;

        let sample = self.client.probe(url, &discovery.schema).await;
        record.response_keys = flatten_keys(&sample.body);

        record.fields = discovery.schema.keys().cloned().collect();
        record.schema_template = discovery.schema;

        if record.is_empty() {
            tracing::warn!(path, "inspection learned nothing; endpoint may be unreachable");
        }
        tracing::info!(
            path,
            fields = record.fields.len(),
            controller = record.behavior.controller.as_deref().unwrap_or("-"),
            response_keys = record.response_keys.len(),
            "endpoint inspected"
        );

        record
    }

    /// Inspect each path in order. One bad path never stops the run.
    pub async fn inspect_all<S: AsRef<str>>(&mut self, paths: &[S]) {
        for path in paths {
            self.inspect_endpoint(path.as_ref()).await;
        }
    }

    /// Reduce the registry to the single-entry-per-category descriptor.
    pub fn synthesize(&self) -> Descriptor {
        let (auth_dropped, data_dropped) = collapsed_endpoints(&self.registry);
        if !auth_dropped.is_empty() {
            tracing::warn!(dropped = ?auth_dropped, "several workflow endpoints; only the last is kept in auth_logic");
        }
        if !data_dropped.is_empty() {
            tracing::warn!(dropped = ?data_dropped, "several data endpoints; only the last is kept in data_logic");
        }
        synthesize(&self.base, &self.registry)
    }

    /// Descriptor keeping every endpoint, keyed by path.
    pub fn synthesize_keyed(&self) -> KeyedDescriptor {
        synthesize_keyed(&self.base, &self.registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_url() {
        let config = DiscoveryConfig::default();
        assert!(matches!(
            Inspector::new("not a url", &config),
            Err(ScoutError::InvalidUrl(_))
        ));
        assert!(matches!(
            Inspector::new("ftp://example.com", &config),
            Err(ScoutError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = DiscoveryConfig {
            max_rounds: 0,
            ..DiscoveryConfig::default()
        };
        assert!(matches!(
            Inspector::new("https://example.com", &config),
            Err(ScoutError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_endpoint_url_joins_against_document() {
        let config = DiscoveryConfig::default();
        let inspector = Inspector::new("https://api.example.com/index.html", &config).unwrap();
        assert_eq!(
            inspector.endpoint_url("/api/customer/login").unwrap().as_str(),
            "https://api.example.com/api/customer/login"
        );
        assert_eq!(inspector.base_url(), "https://api.example.com/index.html");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = DiscoveryConfig::default();
        let inspector = Inspector::new("https://api.example.com/", &config).unwrap();
        assert_eq!(inspector.base_url(), "https://api.example.com");
        assert_eq!(
            inspector.endpoint_url("/login").unwrap().as_str(),
            "https://api.example.com/login"
        );
        assert!(inspector.registry().is_empty());
    }
}
