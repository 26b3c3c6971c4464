//! Startup error types.

use thiserror::Error;

use herald_core::GatewayError;
use herald_framework::InstallError;

use crate::config::ConfigError;

/// Errors that abort client startup.
///
/// Everything here is fatal by design: binaries are expected to exit
/// non-zero when `start` or `run` returns one of these. Per-module and
/// per-invocation failures never surface this way — they are warned or
/// contained where they happen.
#[derive(Debug, Error)]
pub enum StartupError {
    /// No authentication token was configured.
    #[error("authentication token is not configured")]
    MissingToken,

    /// Module installation failed (the set was empty).
    #[error(transparent)]
    Install(#[from] InstallError),

    /// The platform rejected the login.
    #[error("gateway login failed: {0}")]
    Login(#[source] GatewayError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
