//! Schema discovery from error feedback.
//!
//! Starting from an empty payload, each round probes the endpoint, mines
//! quoted identifiers out of the raw response text and adds every one not
//! yet in the payload with an inferred value. The loop stops at the first
//! round that yields nothing new, or after the round budget.
//!
//! Field order follows the order in which the server's error text mentions
//! them, so two runs against a deterministic server agree on the field set
//! and agree on order only as far as the server's messages do.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::config::DiscoveryConfig;
use crate::infer::infer_value;
use crate::probe::ProbeClient;

/// Converged (or budget-capped) discovery result.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDiscovery {
    /// Discovered fields with their inferred values, in discovery order.
    pub schema: Map<String, Value>,
    /// Probes issued.
    pub rounds: usize,
    /// False when the round budget ran out before a fixed point.
    pub converged: bool,
}

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"["']([A-Za-z0-9_\-]+)["']"#).expect("token regex is valid"))
}

/// Quoted identifiers in `raw` that are not keys of `payload`.
///
/// Returned in first-occurrence order without duplicates.
pub fn mine_tokens(raw: &str, payload: &Map<String, Value>, min_len: usize) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for cap in token_regex().captures_iter(raw) {
        let token = &cap[1];
        if token.len() < min_len || payload.contains_key(token) {
            continue;
        }
        if found.iter().any(|t| t == token) {
            continue;
        }
        found.push(token.to_string());
    }
    found
}

/// Grow a payload for `url` until the server stops naming new fields.
pub async fn discover_schema(
    client: &ProbeClient,
    url: &str,
    config: &DiscoveryConfig,
) -> SchemaDiscovery {
    let mut schema = Map::new();

    for round in 1..=config.max_rounds {
        let result = client.probe(url, &schema).await;
        let new_keys = mine_tokens(&result.raw, &schema, config.min_token_len);

        if new_keys.is_empty() {
            tracing::debug!(url, round, fields = schema.len(), "schema converged");
            return SchemaDiscovery {
                schema,
                rounds: round,
                converged: true,
            };
        }

        tracing::debug!(url, round, status = result.status, new_keys = ?new_keys, "mined new fields");
        for key in new_keys {
            let value = infer_value(&key);
            schema.insert(key, value);
        }
    }

    tracing::debug!(url, rounds = config.max_rounds, "round budget exhausted");
    SchemaDiscovery {
        schema,
        rounds: config.max_rounds,
        converged: false,
    }
}
