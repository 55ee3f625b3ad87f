//! Config synthesis: reduce a registry to an endpoint descriptor.
//!
//! An endpoint with a controller field is a workflow/auth endpoint, anything
//! else is a data endpoint. [`synthesize`] keeps one entry per category and
//! the last endpoint of that category in registry order wins. Use
//! [`synthesize_keyed`] to keep every endpoint.

use serde_json::{Map, Value};

use crate::types::{
    AuthLogic, DataLogic, Descriptor, EndpointRecord, KeyedDescriptor, Registry, Scenario,
};

fn auth_logic(record: &EndpointRecord, controller: &str) -> AuthLogic {
    AuthLogic {
        endpoint: record.path.clone(),
        parameter: controller.to_string(),
        actions: record.behavior.discovered_states.iter().cloned().collect(),
        required_inputs: record
            .fields
            .iter()
            .filter(|f| f.as_str() != controller)
            .cloned()
            .collect(),
    }
}

fn data_logic(record: &EndpointRecord) -> DataLogic {
    DataLogic {
        endpoint: record.path.clone(),
        fields: record.fields.clone(),
    }
}

/// Single-entry-per-category descriptor. Later endpoints overwrite earlier ones.
pub fn synthesize(base_url: &str, registry: &Registry) -> Descriptor {
    let mut descriptor = Descriptor {
        base_url: base_url.to_string(),
        auth_logic: None,
        data_logic: None,
    };

    for record in registry.values() {
        match record.behavior.controller.as_deref() {
            Some(controller) => descriptor.auth_logic = Some(auth_logic(record, controller)),
            None => descriptor.data_logic = Some(data_logic(record)),
        }
    }

    descriptor
}

/// Descriptor keeping every endpoint, keyed by path.
pub fn synthesize_keyed(base_url: &str, registry: &Registry) -> KeyedDescriptor {
    let mut descriptor = KeyedDescriptor {
        base_url: base_url.to_string(),
        ..KeyedDescriptor::default()
    };

    for (path, record) in registry {
        match record.behavior.controller.as_deref() {
            Some(controller) => {
                descriptor
                    .auth_logic
                    .insert(path.clone(), auth_logic(record, controller));
            }
            None => {
                descriptor.data_logic.insert(path.clone(), data_logic(record));
            }
        }
    }

    descriptor
}

/// Paths dropped by [`synthesize`], as `(auth, data)`.
pub fn collapsed_endpoints(registry: &Registry) -> (Vec<String>, Vec<String>) {
    let (auth, data): (Vec<&EndpointRecord>, Vec<&EndpointRecord>) = registry
        .values()
        .partition(|r| r.behavior.controller.is_some());

    let dropped = |records: Vec<&EndpointRecord>| -> Vec<String> {
        let keep = records.len().saturating_sub(1);
        records
            .into_iter()
            .take(keep)
            .map(|r| r.path.clone())
            .collect()
    };

    (dropped(auth), dropped(data))
}

/// One example request per action of a workflow endpoint.
///
/// The controller carries the action literal; every other input gets a
/// `<field_value>` placeholder.
pub fn scenarios(auth: &AuthLogic) -> Vec<Scenario> {
    auth.actions
        .iter()
        .map(|action| {
            let mut payload = Map::new();
            payload.insert(auth.parameter.clone(), Value::String(action.clone()));
            for input in &auth.required_inputs {
                payload.insert(input.clone(), Value::String(format!("<{input}_value>")));
            }
            Scenario {
                action: action.clone(),
                payload,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Behavior;
    use serde_json::json;

    fn record(path: &str, fields: &[&str], controller: Option<&str>, states: &[&str]) -> EndpointRecord {
        EndpointRecord {
            path: path.to_string(),
            fields: fields.iter().map(|s| s.to_string()).collect(),
            behavior: Behavior {
                controller: controller.map(str::to_string),
                discovered_states: states.iter().map(|s| s.to_string()).collect(),
            },
            ..EndpointRecord::default()
        }
    }

    fn registry(records: Vec<EndpointRecord>) -> Registry {
        records.into_iter().map(|r| (r.path.clone(), r)).collect()
    }

    #[test]
    fn test_auth_and_data_split() {
        let reg = registry(vec![
            record("/login", &["mobile", "step", "otp"], Some("step"), &["send_otp", "verify_otp"]),
            record("/profile", &["name", "email"], None, &[]),
        ]);

        let descriptor = synthesize("https://api.example.com", &reg);
        let auth = descriptor.auth_logic.unwrap();
        assert_eq!(auth.endpoint, "/login");
        assert_eq!(auth.parameter, "step");
        assert_eq!(auth.actions, vec!["send_otp", "verify_otp"]);
        assert_eq!(auth.required_inputs, vec!["mobile", "otp"]);

        let data = descriptor.data_logic.unwrap();
        assert_eq!(data.endpoint, "/profile");
        assert_eq!(data.fields, vec!["name", "email"]);
    }

    #[test]
    fn test_last_workflow_endpoint_wins() {
        let reg = registry(vec![
            record("/login", &["step"], Some("step"), &["send_otp"]),
            record("/reset", &["action"], Some("action"), &["init"]),
        ]);

        let descriptor = synthesize("https://api.example.com", &reg);
        assert_eq!(descriptor.auth_logic.unwrap().endpoint, "/reset");
        assert!(descriptor.data_logic.is_none());

        let (auth_dropped, data_dropped) = collapsed_endpoints(&reg);
        assert_eq!(auth_dropped, vec!["/login"]);
        assert!(data_dropped.is_empty());
    }

    #[test]
    fn test_keyed_keeps_everything() {
        let reg = registry(vec![
            record("/login", &["step"], Some("step"), &["send_otp"]),
            record("/reset", &["action"], Some("action"), &["init"]),
            record("/a", &[], None, &[]),
        ]);

        let keyed = synthesize_keyed("https://api.example.com", &reg);
        assert_eq!(
            keyed.auth_logic.keys().collect::<Vec<_>>(),
            vec!["/login", "/reset"]
        );
        assert_eq!(keyed.data_logic["/a"].fields, Vec::<String>::new());
    }

    #[test]
    fn test_failed_inspection_becomes_empty_data_entry() {
        let reg = registry(vec![EndpointRecord::new("/down")]);
        let descriptor = synthesize("https://api.example.com", &reg);
        let data = descriptor.data_logic.unwrap();
        assert_eq!(data.endpoint, "/down");
        assert!(data.fields.is_empty());
        assert!(reg["/down"].is_empty());
    }

    #[test]
    fn test_descriptor_json_shape() {
        let reg = registry(vec![record("/profile", &["name"], None, &[])]);
        let descriptor = synthesize("https://api.example.com", &reg);
        let value = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(
            value,
            json!({
                "base_url": "https://api.example.com",
                "data_logic": {"endpoint": "/profile", "fields": ["name"]}
            })
        );
    }

    #[test]
    fn test_scenarios_per_action() {
        let auth = AuthLogic {
            endpoint: "/login".to_string(),
            parameter: "step".to_string(),
            actions: vec!["send_otp".to_string(), "verify_otp".to_string()],
            required_inputs: vec!["mobile".to_string(), "otp".to_string()],
        };

        let out = scenarios(&auth);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].action, "send_otp");
        assert_eq!(
            Value::Object(out[1].payload.clone()),
            json!({"step": "verify_otp", "mobile": "<mobile_value>", "otp": "<otp_value>"})
        );
        assert_eq!(
            out[0].payload.keys().collect::<Vec<_>>(),
            vec!["step", "mobile", "otp"]
        );
    }
}
