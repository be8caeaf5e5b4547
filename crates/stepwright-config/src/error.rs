use thiserror::Error;

/// Errors raised while loading or reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path of the offending file.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A config file is not valid TOML.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path of the offending file (or a synthetic label).
        path: String,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// A property holds a value outside its allowed range or shape.
    #[error("invalid value for {field}: {message}")]
    ValidationError {
        /// Dotted property key.
        field: String,
        /// Human-readable explanation.
        message: String,
    },

    /// A property exists but cannot be read as the requested type.
    #[error("property {key} is not a valid {expected} (found {found})")]
    TypeMismatch {
        /// Dotted property key.
        key: String,
        /// Requested type.
        expected: &'static str,
        /// TOML type actually present.
        found: &'static str,
    },

    /// The resolved configuration could not be rendered.
    #[error("failed to render configuration: {0}")]
    SerializeError(String),

    /// The provider itself could not be consulted.
    #[error("configuration unavailable: {0}")]
    Unavailable(String),

    /// No home directory could be determined for user config discovery.
    #[error("could not determine home directory")]
    NoHomeDir,
}

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
