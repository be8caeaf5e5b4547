//! Route selection errors.

use stepwright_config::ConfigError;

/// Errors from route selector setup.
///
/// Resolution itself never fails; these only surface from installation and
/// from reading the proxy rule, where the selector logs them and disables
/// the override.
#[derive(Debug, thiserror::Error)]
pub enum NetError {
    /// A process-wide route resolver is already installed.
    #[error("a route resolver is already installed")]
    AlreadyInstalled,

    /// The configured proxy port is not a valid TCP port.
    #[error("invalid proxy port {0}: must be between 1 and 65535")]
    InvalidPort(i64),

    /// A proxy property could not be read.
    #[error("proxy configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for route selection operations.
pub type NetResult<T> = Result<T, NetError>;
