#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod consistency;
mod error;
mod sample;

pub use config::MilvusVectorIoConfig;
pub use consistency::ConsistencyLevel;
pub use error::{Error, Result};
pub use sample::{MILVUS_ENDPOINT_ENV, MILVUS_TOKEN_ENV, SampleRunConfig, env_placeholder};

/// Tracing target for configuration construction.
///
/// Use this target for logging validation outcomes of Milvus connection configs.
pub const TRACING_TARGET_CONFIG: &str = "vectorio_milvus::config";
