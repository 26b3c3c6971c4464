//! # Herald Runtime
//!
//! Orchestration layer for the Herald automation client.
//!
//! This crate provides:
//! - Configuration loading (`ClientConfig`, `ConfigLoader`)
//! - Logging setup (`LoggingBuilder`)
//! - The client startup sequence (`Client`)
//!
//! # Startup Sequence
//!
//! [`Client::start`] runs the whole sequence in order:
//!
//! 1. Require an authentication token (fatal when absent).
//! 2. Install the registered [`ModuleSet`](herald_framework::ModuleSet)
//!    (fatal when empty — login is never attempted).
//! 3. Subscribe the interaction router to the gateway.
//! 4. Log in (fatal on rejection).
//! 5. Bulk-register commands with the platform (failure logged, startup
//!    continues).
//!
//! ```rust,ignore
//! use herald_runtime::{Client, ConfigLoader};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::new().load()?;
//!     let mut client = Client::new(config, gateway).modules(modules);
//!     client.run().await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod logging;

pub use client::Client;
pub use config::{
    ClientConfig, ConfigError, ConfigLoader, LogFormat, LogLevel, LogOutput, LoggingConfig,
};
pub use error::StartupError;
pub use logging::LoggingBuilder;

// Re-export tracing for use by bot crates
pub use tracing;
pub use tracing_subscriber;
