//! Sample run configurations for distribution scaffolding.

use serde_json::{Map, Value};

use crate::MilvusVectorIoConfig;

/// Environment variable holding the Milvus endpoint in generated run configs.
pub const MILVUS_ENDPOINT_ENV: &str = "MILVUS_ENDPOINT";

/// Environment variable holding the Milvus token in generated run configs.
pub const MILVUS_TOKEN_ENV: &str = "MILVUS_TOKEN";

/// Provider configs that can describe themselves as a run-config template.
///
/// Every provider config exposes the same signature so that distribution
/// tooling can scaffold them uniformly, even when a provider ignores the
/// distribution directory or the extra options.
pub trait SampleRunConfig {
    /// Returns the template mapping for a run configuration.
    ///
    /// Values are usually `${env.NAME}` placeholders resolved at deployment time.
    fn sample_run_config(distro_dir: &str, options: &Map<String, Value>) -> Map<String, Value>;
}

impl SampleRunConfig for MilvusVectorIoConfig {
    fn sample_run_config(_distro_dir: &str, _options: &Map<String, Value>) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(
            "uri".to_owned(),
            Value::String(env_placeholder(MILVUS_ENDPOINT_ENV)),
        );
        map.insert(
            "token".to_owned(),
            Value::String(env_placeholder(MILVUS_TOKEN_ENV)),
        );
        map
    }
}

/// Renders a deferred environment variable reference, e.g. `${env.MILVUS_TOKEN}`.
pub fn env_placeholder(name: &str) -> String {
    format!("${{env.{name}}}")
}
