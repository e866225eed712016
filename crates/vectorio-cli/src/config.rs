//! CLI configuration.
//!
//! ```text
//! Cli
//! └── command: Command
//!     ├── sample   # print the run-config template
//!     ├── check    # validate a JSON run-config file
//!     └── resolve  # build the config from flags / environment
//! ```
//!
//! Every Milvus option of `resolve` can also be supplied through the
//! environment (`MILVUS_ENDPOINT`, `MILVUS_TOKEN`, `MILVUS_CONSISTENCY_LEVEL`).

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use vectorio_milvus::MilvusVectorIoConfig;

use crate::TRACING_TARGET_STARTUP;

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "vectorio")]
#[command(about = "Milvus vector I/O configuration tooling")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the sample run configuration as JSON.
    Sample {
        /// Distribution directory the sample is generated for.
        #[arg(long, default_value = ".")]
        distro_dir: String,
    },

    /// Validate a JSON run configuration file.
    Check {
        /// Path to the JSON file.
        path: PathBuf,
    },

    /// Build the configuration from flags and environment variables.
    Resolve {
        #[clap(flatten)]
        milvus: MilvusVectorIoConfig,
    },
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    ///
    /// This should be called before parsing CLI arguments so that clap's `env`
    /// feature can pick up values from .env files.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    ///
    /// Logs go to stderr so that command output on stdout stays machine-readable.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    /// Logs build information at debug level.
    pub fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
