//! Workflow controller detection by echo test.
//!
//! Each field of the converged schema is overwritten, one at a time, with
//! each candidate action literal. A literal that comes back verbatim in the
//! raw response marks the field as a controller and the literal as a valid
//! state. When several fields pass, the last one probed is reported.

use futures::future::join_all;
use serde_json::{Map, Value};

use crate::config::DiscoveryConfig;
use crate::probe::ProbeClient;
use crate::types::Behavior;

/// True when the server repeated `literal` verbatim.
pub fn echoes(raw: &str, literal: &str) -> bool {
    !literal.is_empty() && raw.contains(literal)
}

/// Copy of `schema` with only `field` replaced by `literal`.
pub fn mutate(schema: &Map<String, Value>, field: &str, literal: &str) -> Map<String, Value> {
    let mut payload = schema.clone();
    payload.insert(field.to_string(), Value::String(literal.to_string()));
    payload
}

async fn run_trial(
    client: &ProbeClient,
    url: &str,
    schema: &Map<String, Value>,
    field: &str,
    literal: &str,
) -> bool {
    let payload = mutate(schema, field, literal);
    let result = client.probe(url, &payload).await;
    echoes(&result.raw, literal)
}

/// Echo results for every candidate literal on one field, in candidate order.
async fn trial_field(
    client: &ProbeClient,
    url: &str,
    schema: &Map<String, Value>,
    field: &str,
    config: &DiscoveryConfig,
) -> Vec<bool> {
    if config.parallel_trials {
        let trials = config
            .candidate_actions
            .iter()
            .map(|literal| run_trial(client, url, schema, field, literal));
        return join_all(trials).await;
    }

    let mut hits = Vec::with_capacity(config.candidate_actions.len());
    for literal in &config.candidate_actions {
        hits.push(run_trial(client, url, schema, field, literal).await);
    }
    hits
}

/// Find the controller field of `url`, if any, and the states it accepts.
pub async fn probe_behavior(
    client: &ProbeClient,
    url: &str,
    schema: &Map<String, Value>,
    config: &DiscoveryConfig,
) -> Behavior {
    let mut behavior = Behavior::default();

    for field in schema.keys() {
        let hits = trial_field(client, url, schema, field, config).await;

        for (literal, hit) in config.candidate_actions.iter().zip(hits) {
            if !hit {
                continue;
            }
            if let Some(previous) = behavior.controller.as_deref() {
                if previous != field {
                    tracing::debug!(url, previous, field = field.as_str(), "controller overridden by later field");
                }
            }
            tracing::debug!(url, field = field.as_str(), literal = literal.as_str(), "echo hit");
            behavior.controller = Some(field.clone());
            behavior.discovered_states.insert(literal.clone());
        }
    }

    behavior
}
