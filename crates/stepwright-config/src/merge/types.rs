use std::collections::HashMap;
use std::path::PathBuf;

/// Which configuration layer a value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLayer {
    /// Compiled-in defaults (`defaults.toml`).
    Defaults,
    /// User-level configuration (`~/.stepwright/config.toml`).
    User,
    /// A file passed explicitly by the caller.
    File(PathBuf),
    /// Environment variable override.
    Environment,
}

impl std::fmt::Display for ConfigLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Defaults => write!(f, "defaults"),
            Self::User => write!(f, "user (~/.stepwright/config.toml)"),
            Self::File(path) => write!(f, "file ({})", path.display()),
            Self::Environment => write!(f, "environment variable"),
        }
    }
}

/// Tracks which layer set each property.
pub type FieldSources = HashMap<String, ConfigLayer>;
