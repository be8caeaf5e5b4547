//! Explicit step manifest.
//!
//! Producers register their steps and providers into a [`StepIndex`] at
//! startup instead of relying on runtime type introspection. The index then
//! answers scans by matching each entry's origin path against the requested
//! scope.
//!
//! Providers may be registered eagerly or through a factory. Factories run
//! on every full scan of a matching scope; a failing factory makes that scan
//! fail, and discovery falls back to the marked methods of the scope.

use std::fmt;
use std::sync::Arc;

use crate::error::SourceScanError;
use crate::provider::ProviderType;
use crate::source::{ScopeScan, SourceEnumerator, SourceScope};
use crate::unit::StepUnit;

type ProviderFactory = dyn Fn() -> Result<ProviderType, String> + Send + Sync;

#[derive(Clone)]
enum ProviderEntry {
    Ready(ProviderType),
    Deferred {
        origin_path: String,
        factory: Arc<ProviderFactory>,
    },
}

impl ProviderEntry {
    fn origin_path(&self) -> &str {
        match self {
            Self::Ready(provider) => provider.origin_path(),
            Self::Deferred { origin_path, .. } => origin_path,
        }
    }
}

impl fmt::Debug for ProviderEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(provider) => f.debug_tuple("Ready").field(provider).finish(),
            Self::Deferred { origin_path, .. } => f
                .debug_struct("Deferred")
                .field("origin_path", origin_path)
                .finish_non_exhaustive(),
        }
    }
}

/// In-memory manifest of registered steps and providers.
#[derive(Debug, Clone, Default)]
pub struct StepIndex {
    steps: Vec<StepUnit>,
    providers: Vec<ProviderEntry>,
}

impl StepIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an individually marked step.
    pub fn register_step(&mut self, unit: StepUnit) -> &mut Self {
        self.steps.push(unit);
        self
    }

    /// Register a provider type.
    pub fn register_provider(&mut self, provider: ProviderType) -> &mut Self {
        self.providers.push(ProviderEntry::Ready(provider));
        self
    }

    /// Register a provider that is materialized on each full scan.
    pub fn register_provider_with<F>(&mut self, origin_path: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> Result<ProviderType, String> + Send + Sync + 'static,
    {
        self.providers.push(ProviderEntry::Deferred {
            origin_path: origin_path.into(),
            factory: Arc::new(factory),
        });
        self
    }

    /// Builder form of [`register_step`](Self::register_step).
    #[must_use]
    pub fn with_step(mut self, unit: StepUnit) -> Self {
        self.register_step(unit);
        self
    }

    /// Builder form of [`register_provider`](Self::register_provider).
    #[must_use]
    pub fn with_provider(mut self, provider: ProviderType) -> Self {
        self.register_provider(provider);
        self
    }

    /// Number of registered steps.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Number of registered providers.
    #[must_use]
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    fn marked_in(&self, scope: &SourceScope) -> Vec<StepUnit> {
        self.steps
            .iter()
            .filter(|unit| scope.contains(unit.origin_path()))
            .cloned()
            .collect()
    }
}

impl SourceEnumerator for StepIndex {
    fn scan(&self, scope: &SourceScope) -> Result<ScopeScan, SourceScanError> {
        let mut providers = Vec::new();
        for entry in self.providers.iter().filter(|e| scope.contains(e.origin_path())) {
            match entry {
                ProviderEntry::Ready(provider) => providers.push(provider.clone()),
                ProviderEntry::Deferred {
                    origin_path,
                    factory,
                } => {
                    let provider = factory().map_err(|message| SourceScanError::ProviderFailed {
                        scope: scope.clone(),
                        provider: origin_path.clone(),
                        message,
                    })?;
                    providers.push(provider);
                },
            }
        }
        Ok(ScopeScan {
            methods: self.marked_in(scope),
            providers,
        })
    }

    fn scan_marked_methods(&self, scope: &SourceScope) -> Vec<StepUnit> {
        self.marked_in(scope)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::provider::ProviderKind;
    use crate::unit::StepHandle;

    fn unit(name: &str, origin: &str) -> StepUnit {
        StepUnit::new(
            name,
            format!("{origin}::{name}"),
            origin,
            StepHandle::new(|_| Ok(Value::Null)),
        )
        .unwrap()
    }

    #[test]
    fn test_scan_filters_by_scope() {
        let index = StepIndex::new()
            .with_step(unit("a", "com.acme.steps.A"))
            .with_step(unit("b", "com.other.steps.B"))
            .with_provider(ProviderType::new(
                "P",
                "com.acme.providers.P",
                ProviderKind::Concrete,
            ));

        let scan = index.scan(&SourceScope::new("com.acme")).unwrap();
        assert_eq!(scan.methods.len(), 1);
        assert_eq!(scan.methods[0].name(), "a");
        assert_eq!(scan.providers.len(), 1);

        let scan = index.scan(&SourceScope::new("com.other")).unwrap();
        assert_eq!(scan.methods[0].name(), "b");
        assert!(scan.providers.is_empty());
    }

    #[test]
    fn test_failing_factory_fails_full_scan_only() {
        let mut index = StepIndex::new();
        index
            .register_step(unit("a", "com.acme.steps.A"))
            .register_provider_with("com.acme.steps.Broken", || Err("no default ctor".into()));

        let scope = SourceScope::new("com.acme");
        let err = index.scan(&scope).unwrap_err();
        assert!(matches!(err, SourceScanError::ProviderFailed { ref provider, .. } if provider == "com.acme.steps.Broken"));
        assert_eq!(index.scan_marked_methods(&scope).len(), 1);

        // Factories outside the scope are never run.
        assert!(index.scan(&SourceScope::new("com.other")).is_ok());
    }

    #[test]
    fn test_deferred_provider_materializes() {
        let mut index = StepIndex::new();
        index.register_provider_with("com.acme.steps.Lazy", || {
            Ok(ProviderType::new("Lazy", "com.acme.steps.Lazy", ProviderKind::Concrete)
                .with_method(unit("lazy step", "com.acme.steps.Lazy")))
        });
        let scan = index.scan(&SourceScope::new("com.acme.steps")).unwrap();
        assert_eq!(scan.providers[0].methods().len(), 1);
        assert_eq!(index.provider_count(), 1);
        assert_eq!(index.step_count(), 0);
    }
}
