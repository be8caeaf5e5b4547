//! Source priority ranking.

use stepwright_config::{ConfigProvider, keys};
use tracing::warn;

/// Ordered list of origin-path prefixes used to rank conflicting steps.
///
/// The priority of an origin path is the index of the first prefix that
/// matches it (plain string prefix, after `/` → `.` normalization), or the
/// list length when nothing matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourcePriorityList {
    prefixes: Vec<String>,
}

impl SourcePriorityList {
    /// Build a list from prefixes in priority order.
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Read the list from [`keys::STEP_PROVIDER_PKG`].
    ///
    /// A malformed value is logged and treated as an empty list.
    #[must_use]
    pub fn from_config(config: &dyn ConfigProvider) -> Self {
        match config.get_list(keys::STEP_PROVIDER_PKG) {
            Ok(prefixes) => Self::new(prefixes),
            Err(e) => {
                warn!(key = keys::STEP_PROVIDER_PKG, error = %e, "ignoring unreadable step source list");
                Self::default()
            },
        }
    }

    /// Priority index of `origin_path`.
    #[must_use]
    pub fn priority_of(&self, origin_path: &str) -> usize {
        let normalized = origin_path.replace('/', ".");
        self.prefixes
            .iter()
            .position(|prefix| normalized.starts_with(prefix.as_str()))
            .unwrap_or(self.prefixes.len())
    }

    /// Index assigned to paths that match no prefix.
    #[must_use]
    pub fn unmatched(&self) -> usize {
        self.prefixes.len()
    }

    /// The configured prefixes.
    #[must_use]
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Number of prefixes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Whether no prefixes are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}
