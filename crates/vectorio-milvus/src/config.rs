//! Milvus connection configuration.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use vectorio_milvus::MilvusVectorIoConfig;
//!
//! let config = MilvusVectorIoConfig::from_value(json!({
//!     "uri": "http://localhost:19530",
//!     "token": "root:Milvus",
//!     "db_name": "default",
//! }))?;
//!
//! assert_eq!(config.token(), Some("root:Milvus"));
//! assert_eq!(config.consistency_level(), "Strong");
//! assert_eq!(config.extra_field("db_name"), Some(&json!("default")));
//! # Ok::<(), vectorio_milvus::Error>(())
//! ```

#[cfg(feature = "config")]
use clap::Args;
#[cfg(feature = "config")]
use clap::builder::NonEmptyStringValueParser;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::{ConsistencyLevel, Error, Result, TRACING_TARGET_CONFIG};

/// Consistency level applied when the source does not name one.
const DEFAULT_CONSISTENCY_LEVEL: &str = "Strong";

/// Keys owned by the typed fields; never stored in [`MilvusVectorIoConfig::extra`].
const RECOGNIZED_FIELDS: [&str; 3] = ["uri", "token", "consistency_level"];

/// Connection configuration for the Milvus vector I/O backend.
///
/// The schema is open: keys other than `uri`, `token` and `consistency_level`
/// are accepted and kept verbatim, so backend-specific options survive a
/// deserialize/serialize cycle.
///
/// An empty `token` is treated the same as a missing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[must_use = "config does nothing unless you use it"]
pub struct MilvusVectorIoConfig {
    /// Milvus endpoint URI
    #[cfg_attr(feature = "config", arg(long = "milvus-uri", env = "MILVUS_ENDPOINT"))]
    uri: String,

    /// Authentication token
    #[serde(
        default,
        deserialize_with = "deserialize_token",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(
        feature = "config",
        arg(
            long = "milvus-token",
            env = "MILVUS_TOKEN",
            value_parser = NonEmptyStringValueParser::new()
        )
    )]
    #[cfg_attr(feature = "schema", schemars(with = "Option<String>"))]
    token: Option<String>,

    /// Consistency level name passed through to Milvus
    #[serde(
        default = "default_consistency_level",
        deserialize_with = "deserialize_consistency_level"
    )]
    #[cfg_attr(
        feature = "config",
        arg(
            long = "milvus-consistency-level",
            env = "MILVUS_CONSISTENCY_LEVEL",
            default_value = DEFAULT_CONSISTENCY_LEVEL
        )
    )]
    #[cfg_attr(feature = "schema", schemars(with = "String"))]
    consistency_level: String,

    /// Unrecognized keys, carried along as backend-specific options
    #[serde(flatten)]
    #[cfg_attr(feature = "config", arg(skip))]
    extra: Map<String, Value>,
}

impl MilvusVectorIoConfig {
    /// Creates a configuration for the given endpoint with default settings.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            token: None,
            consistency_level: default_consistency_level(),
            extra: Map::new(),
        }
    }

    /// Constructs a configuration from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `value` is not an object, if `uri` is
    /// missing, or if a recognized field has the wrong type.
    pub fn from_value(value: Value) -> Result<Self> {
        Self::log_outcome(Self::parse_value(value))
    }

    /// Constructs a configuration from a mapping of field names to values.
    ///
    /// # Errors
    ///
    /// See [`MilvusVectorIoConfig::from_value`].
    pub fn from_map(map: Map<String, Value>) -> Result<Self> {
        Self::from_value(Value::Object(map))
    }

    /// Constructs a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the document is not valid JSON or does
    /// not describe a valid configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let result = serde_json::from_str::<Value>(json)
            .map_err(Error::from)
            .and_then(Self::parse_value);
        Self::log_outcome(result)
    }

    /// Returns the endpoint URI.
    #[inline]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Returns the authentication token, if set.
    #[inline]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the consistency level name as configured.
    #[inline]
    pub fn consistency_level(&self) -> &str {
        &self.consistency_level
    }

    /// Returns the consistency level if it names one of the known levels.
    pub fn consistency(&self) -> Option<ConsistencyLevel> {
        self.consistency_level.parse().ok()
    }

    /// Returns the unrecognized fields.
    #[inline]
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Returns a single unrecognized field.
    pub fn extra_field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Sets the authentication token. An empty token clears it.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into()).filter(|token| !token.is_empty());
        self
    }

    /// Sets the consistency level.
    pub fn with_consistency_level(mut self, level: impl Into<String>) -> Self {
        self.consistency_level = level.into();
        self
    }

    /// Adds a backend-specific option.
    ///
    /// Keys that name a recognized field are ignored; use the dedicated setter.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if RECOGNIZED_FIELDS.contains(&key.as_str()) {
            tracing::warn!(
                target: TRACING_TARGET_CONFIG,
                key = %key,
                "ignoring extra option that shadows a recognized field"
            );
            return self;
        }

        self.extra.insert(key, value.into());
        self
    }

    /// Serializes the configuration back into a mapping.
    ///
    /// Extra fields are emitted alongside the recognized ones; an unset token
    /// is omitted.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = self.extra.clone();
        map.insert("uri".to_owned(), Value::String(self.uri.clone()));
        if let Some(token) = &self.token {
            map.insert("token".to_owned(), Value::String(token.clone()));
        }
        map.insert(
            "consistency_level".to_owned(),
            Value::String(self.consistency_level.clone()),
        );
        map
    }

    /// Serializes the configuration back into a JSON value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.to_map())
    }

    fn parse_value(value: Value) -> Result<Self> {
        match value {
            value @ Value::Object(_) => serde_json::from_value::<Self>(value).map_err(Error::from),
            other => Err(Error::validation(format!(
                "expected a mapping of configuration fields, found {}",
                value_kind(&other)
            ))),
        }
    }

    fn log_outcome(result: Result<Self>) -> Result<Self> {
        match &result {
            Ok(config) => config.log_constructed(),
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET_CONFIG,
                    error = %error,
                    "rejected milvus configuration"
                );
            }
        }

        result
    }

    fn log_constructed(&self) {
        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            uri = %self.uri,
            consistency_level = %self.consistency_level,
            has_token = self.token.is_some(),
            extra_fields = self.extra.len(),
            "milvus configuration constructed"
        );
    }
}

impl TryFrom<Value> for MilvusVectorIoConfig {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl TryFrom<Map<String, Value>> for MilvusVectorIoConfig {
    type Error = Error;

    fn try_from(map: Map<String, Value>) -> Result<Self> {
        Self::from_map(map)
    }
}

impl From<MilvusVectorIoConfig> for Map<String, Value> {
    fn from(config: MilvusVectorIoConfig) -> Self {
        config.to_map()
    }
}

fn default_consistency_level() -> String {
    DEFAULT_CONSISTENCY_LEVEL.to_owned()
}

fn deserialize_token<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let token = Option::<String>::deserialize(deserializer)?;
    Ok(token.filter(|token| !token.is_empty()))
}

fn deserialize_consistency_level<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let level = Option::<String>::deserialize(deserializer)?;
    Ok(level.unwrap_or_else(default_consistency_level))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn uri_only_uses_defaults() {
        let config = MilvusVectorIoConfig::from_value(json!({
            "uri": "http://localhost:19530"
        }))
        .unwrap();

        assert_eq!(config.uri(), "http://localhost:19530");
        assert_eq!(config.token(), None);
        assert_eq!(config.consistency_level(), "Strong");
        assert_eq!(config.consistency(), Some(ConsistencyLevel::Strong));
        assert!(config.extra().is_empty());
    }

    #[test]
    fn all_recognized_fields_are_kept() {
        let config = MilvusVectorIoConfig::from_value(json!({
            "uri": "http://localhost:19530",
            "token": "abc123",
            "consistency_level": "Bounded"
        }))
        .unwrap();

        assert_eq!(config.uri(), "http://localhost:19530");
        assert_eq!(config.token(), Some("abc123"));
        assert_eq!(config.consistency_level(), "Bounded");
        assert_eq!(config.consistency(), Some(ConsistencyLevel::Bounded));
    }

    #[test]
    fn reject_missing_uri() {
        let err = MilvusVectorIoConfig::from_value(json!({ "token": "abc123" })).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("uri"));
    }

    #[test]
    fn reject_null_uri() {
        let err = MilvusVectorIoConfig::from_value(json!({ "uri": null })).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn reject_mistyped_fields() {
        let inputs = [
            json!({ "uri": 19530 }),
            json!({ "uri": "http://localhost:19530", "token": 42 }),
            json!({ "uri": "http://localhost:19530", "consistency_level": ["Strong"] }),
        ];

        for input in inputs {
            let result = MilvusVectorIoConfig::from_value(input.clone());
            assert!(
                matches!(result, Err(Error::Validation(_))),
                "accepted {input}"
            );
        }
    }

    #[test]
    fn reject_non_object_input() {
        let err = MilvusVectorIoConfig::from_value(json!("http://localhost:19530")).unwrap_err();
        assert_eq!(
            err,
            Error::validation("expected a mapping of configuration fields, found a string")
        );
    }

    #[test]
    fn json_documents_share_value_validation() {
        let err = MilvusVectorIoConfig::from_json_str("42").unwrap_err();
        assert_eq!(
            err,
            Error::validation("expected a mapping of configuration fields, found a number")
        );
    }

    #[test]
    fn reject_malformed_json() {
        let result = MilvusVectorIoConfig::from_json_str("{\"uri\": ");
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn extra_fields_are_accepted_and_preserved() {
        let config = MilvusVectorIoConfig::from_value(json!({
            "uri": "x",
            "extra_flag": true,
            "db_name": "vectors"
        }))
        .unwrap();

        assert_eq!(config.extra().len(), 2);
        assert_eq!(config.extra_field("extra_flag"), Some(&json!(true)));

        let map = config.to_map();
        assert_eq!(map.get("extra_flag"), Some(&json!(true)));
        assert_eq!(map.get("db_name"), Some(&json!("vectors")));
    }

    #[test]
    fn null_and_empty_token_are_absent() {
        for token in [json!(null), json!("")] {
            let config =
                MilvusVectorIoConfig::from_value(json!({ "uri": "x", "token": token })).unwrap();
            assert_eq!(config.token(), None);
        }

        let config = MilvusVectorIoConfig::new("x").with_token("");
        assert_eq!(config.token(), None);
    }

    #[test]
    fn null_consistency_level_falls_back_to_strong() {
        let config =
            MilvusVectorIoConfig::from_value(json!({ "uri": "x", "consistency_level": null }))
                .unwrap();
        assert_eq!(config.consistency_level(), "Strong");
    }

    #[test]
    fn unknown_consistency_level_is_carried_verbatim() {
        let config = MilvusVectorIoConfig::from_value(json!({
            "uri": "x",
            "consistency_level": "Linearizable"
        }))
        .unwrap();

        assert_eq!(config.consistency_level(), "Linearizable");
        assert_eq!(config.consistency(), None);
    }

    #[test]
    fn round_trip_through_map() {
        let inputs = [
            json!({ "uri": "http://localhost:19530" }),
            json!({ "uri": "http://localhost:19530", "token": "abc123", "consistency_level": "Session" }),
            json!({ "uri": "x", "extra_flag": true, "nested": { "nprobe": 16 } }),
        ];

        for input in inputs {
            let config = MilvusVectorIoConfig::from_value(input).unwrap();
            let rebuilt = MilvusVectorIoConfig::from_map(config.to_map()).unwrap();
            assert_eq!(config, rebuilt);
        }
    }

    #[test]
    fn serde_serialization_matches_to_map() {
        let config = MilvusVectorIoConfig::new("http://localhost:19530")
            .with_consistency_level(ConsistencyLevel::Eventually)
            .with_extra("timeout", 30);

        let serialized = serde_json::to_value(&config).unwrap();
        assert_eq!(serialized, config.to_value());
        assert_eq!(
            serialized,
            json!({
                "uri": "http://localhost:19530",
                "consistency_level": "Eventually",
                "timeout": 30
            })
        );
    }

    #[test]
    fn with_extra_ignores_recognized_keys() {
        let config = MilvusVectorIoConfig::new("x")
            .with_extra("uri", "y")
            .with_extra("token", "secret");

        assert!(config.extra().is_empty());
        assert_eq!(config.uri(), "x");
        assert_eq!(config.token(), None);
    }

    #[test]
    fn try_from_json_str() {
        let config = MilvusVectorIoConfig::from_json_str(
            r#"{"uri": "https://in01.example.zillizcloud.com", "token": "db_admin:pw"}"#,
        )
        .unwrap();
        assert_eq!(config.uri(), "https://in01.example.zillizcloud.com");
        assert_eq!(config.token(), Some("db_admin:pw"));
    }

    #[cfg(feature = "config")]
    mod cli {
        use clap::Parser;

        use super::*;

        #[derive(Debug, Parser)]
        struct TestCli {
            #[clap(flatten)]
            milvus: MilvusVectorIoConfig,
        }

        #[test]
        fn parses_arguments() {
            let cli = TestCli::try_parse_from([
                "test",
                "--milvus-uri",
                "http://milvus:19530",
                "--milvus-token",
                "abc123",
                "--milvus-consistency-level",
                "Bounded",
            ])
            .unwrap();

            assert_eq!(cli.milvus.uri(), "http://milvus:19530");
            assert_eq!(cli.milvus.token(), Some("abc123"));
            assert_eq!(cli.milvus.consistency_level(), "Bounded");
            assert!(cli.milvus.extra().is_empty());
        }

        #[test]
        fn reject_empty_token_argument() {
            let result = TestCli::try_parse_from([
                "test",
                "--milvus-uri",
                "http://milvus:19530",
                "--milvus-token",
                "",
            ]);
            assert!(result.is_err());
        }

        #[test]
        fn parsed_arguments_round_trip() {
            let cli = TestCli::try_parse_from([
                "test",
                "--milvus-uri",
                "http://milvus:19530",
                "--milvus-token",
                "abc123",
            ])
            .unwrap();

            let rebuilt = MilvusVectorIoConfig::from_map(cli.milvus.to_map()).unwrap();
            assert_eq!(cli.milvus, rebuilt);
        }
    }

    #[cfg(feature = "schema")]
    mod schema {
        use serde_json::{Value, json};

        use super::*;

        fn schema() -> Value {
            serde_json::to_value(schemars::schema_for!(MilvusVectorIoConfig)).unwrap()
        }

        #[test]
        fn only_uri_is_required() {
            let schema = schema();
            assert_eq!(schema["required"], json!(["uri"]));
        }

        #[test]
        fn token_is_nullable() {
            let token = schema()["properties"]["token"].to_string();
            assert!(token.contains("null"), "token schema: {token}");
        }

        #[test]
        fn consistency_level_defaults_to_strong() {
            let schema = schema();
            assert_eq!(
                schema["properties"]["consistency_level"]["default"],
                json!("Strong")
            );
        }

        #[test]
        fn extra_fields_are_allowed() {
            let schema = schema();
            assert_eq!(schema["additionalProperties"], json!(true));
        }

        #[test]
        fn description_has_no_examples() {
            let description = schema()["description"].to_string();
            assert!(!description.contains("# Examples"));
        }
    }
}
