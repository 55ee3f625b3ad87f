//! api-scout — infer the request/response contract of an undocumented HTTP
//! JSON API from the server's own error feedback.

pub mod behavior;
pub mod config;
pub mod flatten;
pub mod infer;
pub mod inspector;
pub mod probe;
pub mod schema;
pub mod synth;
pub mod types;

pub use behavior::probe_behavior;
pub use config::{resolve_config_path, DiscoveryConfig};
pub use flatten::flatten_keys;
pub use infer::{classify, infer_value, ValueKind};
pub use inspector::Inspector;
pub use probe::{ProbeClient, ProbeError};
pub use schema::{discover_schema, mine_tokens, SchemaDiscovery};
pub use synth::{collapsed_endpoints, scenarios, synthesize, synthesize_keyed};
pub use types::*;
