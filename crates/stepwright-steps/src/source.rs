//! Source scopes and the enumerator contract.

use std::fmt;

use crate::error::SourceScanError;
use crate::provider::ProviderType;
use crate::unit::StepUnit;

/// A namespace that bounds one discovery scan (`com.acme.steps`).
///
/// Slashes are accepted and normalized to dots; trailing separators are
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceScope(String);

impl SourceScope {
    /// Create a scope from a dotted or slashed path.
    pub fn new(path: impl AsRef<str>) -> Self {
        let normalized = path.as_ref().trim().replace('/', ".");
        Self(normalized.trim_end_matches('.').to_owned())
    }

    /// The normalized dotted path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `path` lies inside this scope.
    ///
    /// Matches on segment boundaries: `com.acme` contains `com.acme` and
    /// `com.acme.steps`, but not `com.acmecorp`. The empty scope contains
    /// everything. This is stricter than a plain string prefix, which is
    /// what [`SourcePriorityList`](crate::SourcePriorityList) uses for
    /// ranking: a package-prefix scanner would also pick up `com.acmecorp`.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        if self.0.is_empty() {
            return true;
        }
        let path = path.replace('/', ".");
        match path.strip_prefix(self.0.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('.'),
            None => false,
        }
    }
}

impl fmt::Display for SourceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceScope {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// Everything a full scan found under one scope.
#[derive(Debug, Clone, Default)]
pub struct ScopeScan {
    /// Individually marked step methods.
    pub methods: Vec<StepUnit>,
    /// Types carrying the provider marker.
    pub providers: Vec<ProviderType>,
}

/// Enumerates step units under a scope.
///
/// Implementations back discovery with whatever index they maintain; the
/// finder only relies on this contract.
pub trait SourceEnumerator: Send + Sync {
    /// Full scan: marked methods plus provider types.
    ///
    /// # Errors
    ///
    /// Returns [`SourceScanError`] if the scope cannot be enumerated. The
    /// caller then falls back to [`scan_marked_methods`](Self::scan_marked_methods).
    fn scan(&self, scope: &SourceScope) -> Result<ScopeScan, SourceScanError>;

    /// Best-effort scan of individually marked methods only. Must not fail;
    /// return what can be found.
    fn scan_marked_methods(&self, scope: &SourceScope) -> Vec<StepUnit>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_normalization() {
        assert_eq!(SourceScope::new("com/acme/steps/").as_str(), "com.acme.steps");
        assert_eq!(SourceScope::from(" com.acme. ").as_str(), "com.acme");
    }

    #[test]
    fn test_scope_contains_on_segment_boundary() {
        let scope = SourceScope::new("com.acme");
        assert!(scope.contains("com.acme"));
        assert!(scope.contains("com.acme.steps.LoginSteps"));
        assert!(scope.contains("com/acme/steps"));
        assert!(!scope.contains("com.acmecorp.steps"));
        assert!(!scope.contains("org.acme"));
        assert!(SourceScope::new("").contains("anything.at.all"));
    }
}
