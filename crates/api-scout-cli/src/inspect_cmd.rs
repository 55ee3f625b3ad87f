//! `api-scout inspect <base-url> <path>...` — probe endpoints and print the
//! inferred contract.

use anyhow::{Context, Result};
use serde_json::{json, Value};

use api_scout::{scenarios, AuthLogic, DiscoveryConfig, Inspector};

/// Options for one inspect run.
#[derive(Debug, Clone, Default)]
pub struct InspectOptions {
    pub config: Option<String>,
    pub rounds: Option<usize>,
    pub timeout_ms: Option<u64>,
    pub parallel_trials: bool,
    pub keyed: bool,
    pub json: bool,
}

/// Resolve the config file and apply command-line overrides.
pub fn build_config(opts: &InspectOptions) -> Result<DiscoveryConfig> {
    let mut config =
        DiscoveryConfig::load(opts.config.as_deref()).context("failed to load discovery config")?;

    if let Some(rounds) = opts.rounds {
        config.max_rounds = rounds;
    }
    if let Some(timeout_ms) = opts.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    if opts.parallel_trials {
        config.parallel_trials = true;
    }

    config.validate()?;
    Ok(config)
}

fn scenario_values<'a>(auths: impl Iterator<Item = &'a AuthLogic>) -> Vec<Value> {
    auths
        .flat_map(|auth| {
            scenarios(auth).into_iter().map(move |s| {
                json!({
                    "endpoint": auth.endpoint,
                    "action": s.action,
                    "payload": s.payload,
                })
            })
        })
        .collect()
}

/// Render the inspection result, either as one JSON document or as text.
pub fn render(config: &Value, scenarios: &[Value], as_json: bool) -> Result<String> {
    if as_json {
        let doc = json!({ "config": config, "scenarios": scenarios });
        return Ok(serde_json::to_string_pretty(&doc)?);
    }

    let mut out = String::new();
    out.push_str("[Self-Inspected Configuration]\n");
    out.push_str(&serde_json::to_string_pretty(config)?);
    out.push_str("\n\n[Generated Payload Scenarios]\n");
    if scenarios.is_empty() {
        out.push_str("(no workflow endpoint detected)\n");
    }
    for scenario in scenarios {
        let action = scenario["action"].as_str().unwrap_or_default();
        out.push_str(&format!(
            "\nScenario ({action}):\n{}\n",
            serde_json::to_string_pretty(&scenario["payload"])?
        ));
    }
    Ok(out)
}

/// Run the inspect command.
pub async fn run(base_url: &str, paths: &[String], opts: &InspectOptions) -> Result<()> {
    let config = build_config(opts)?;
    tracing::debug!(?config, "resolved discovery config");
    let mut inspector = Inspector::new(base_url, &config)?;
    inspector.inspect_all(paths).await;

    let (config_value, scenario_list) = if opts.keyed {
        let keyed = inspector.synthesize_keyed();
        let list = scenario_values(keyed.auth_logic.values());
        (serde_json::to_value(&keyed)?, list)
    } else {
        let descriptor = inspector.synthesize();
        let list = scenario_values(descriptor.auth_logic.iter());
        (serde_json::to_value(&descriptor)?, list)
    };

    println!("{}", render(&config_value, &scenario_list, opts.json)?);
    Ok(())
}
