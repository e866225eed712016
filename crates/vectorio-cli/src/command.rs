//! Subcommand implementations.
//!
//! Each command returns the text to print so the entry point owns stdout.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde_json::{Map, Value};
use vectorio_milvus::{MilvusVectorIoConfig, SampleRunConfig};

use crate::TRACING_TARGET_COMMAND;

/// Replacement for the token in printed configurations.
const REDACTED: &str = "********";

/// Renders the sample run configuration.
pub fn sample(distro_dir: &str) -> anyhow::Result<String> {
    tracing::info!(
        target: TRACING_TARGET_COMMAND,
        distro_dir = %distro_dir,
        "generating sample run configuration"
    );

    let sample = MilvusVectorIoConfig::sample_run_config(distro_dir, &Map::new());
    serde_json::to_string_pretty(&sample).context("failed to render sample run configuration")
}

/// Validates a JSON run-config file and renders it normalized.
pub fn check(path: &Path) -> anyhow::Result<String> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let config = MilvusVectorIoConfig::from_json_str(&contents)
        .with_context(|| format!("invalid milvus configuration in {}", path.display()))?;

    tracing::info!(
        target: TRACING_TARGET_COMMAND,
        path = %path.display(),
        "milvus configuration is valid"
    );

    render(&config)
}

/// Re-validates a configuration assembled from flags and renders it.
pub fn resolve(config: MilvusVectorIoConfig) -> anyhow::Result<String> {
    // Flags bypass deserialization, so normalize through the map form.
    let config = MilvusVectorIoConfig::from_map(config.to_map())
        .context("invalid milvus configuration from flags or environment")?;

    render(&config)
}

fn render(config: &MilvusVectorIoConfig) -> anyhow::Result<String> {
    serde_json::to_string_pretty(&redacted(config)).context("failed to render configuration")
}

fn redacted(config: &MilvusVectorIoConfig) -> Value {
    let mut map = config.to_map();
    if let Some(token) = map.get_mut("token") {
        *token = Value::String(REDACTED.to_owned());
    }
    Value::Object(map)
}
