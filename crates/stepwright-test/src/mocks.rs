//! Mock collaborators for testing.

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use stepwright_config::{ConfigError, ConfigProvider, ConfigResult, PropertyBundle};
use stepwright_net::{ProxyAddress, ProxyEndpoint, RouteResolver};
use stepwright_steps::{
    ProviderType, ScopeScan, SourceEnumerator, SourceScanError, SourceScope, StepUnit,
};
use url::Url;

/// In-memory [`ConfigProvider`] that counts every property read.
///
/// Clones share the read counter.
#[derive(Debug, Clone, Default)]
pub struct MapConfig {
    bundle: PropertyBundle,
    failure: Option<String>,
    reads: Arc<AtomicUsize>,
}

impl MapConfig {
    /// Create an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<toml::Value>) -> Self {
        self.bundle.set(key, value);
        self
    }

    /// Make every read fail with [`ConfigError::Unavailable`].
    #[must_use]
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Number of property reads so far.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl ConfigProvider for MapConfig {
    fn property(&self, key: &str) -> ConfigResult<Option<toml::Value>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(message) => Err(ConfigError::Unavailable(message.clone())),
            None => self.bundle.property(key),
        }
    }
}

/// [`SourceEnumerator`] with per-scope scripted results.
///
/// Scopes are matched exactly after normalization. Unknown scopes scan as
/// empty.
#[derive(Debug, Default)]
pub struct ScriptedEnumerator {
    methods: HashMap<SourceScope, Vec<StepUnit>>,
    providers: HashMap<SourceScope, Vec<ProviderType>>,
    failures: HashMap<SourceScope, String>,
    scanned: Mutex<Vec<SourceScope>>,
    fallbacks: Mutex<Vec<SourceScope>>,
}

impl ScriptedEnumerator {
    /// Create an enumerator with nothing scripted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marked methods returned for `scope`, by both scan kinds.
    #[must_use]
    pub fn with_methods(mut self, scope: &str, methods: Vec<StepUnit>) -> Self {
        self.methods
            .entry(SourceScope::new(scope))
            .or_default()
            .extend(methods);
        self
    }

    /// Provider types returned for `scope` by the full scan.
    #[must_use]
    pub fn with_providers(mut self, scope: &str, providers: Vec<ProviderType>) -> Self {
        self.providers
            .entry(SourceScope::new(scope))
            .or_default()
            .extend(providers);
        self
    }

    /// Make the full scan of `scope` fail.
    #[must_use]
    pub fn failing_scope(mut self, scope: &str, message: impl Into<String>) -> Self {
        self.failures.insert(SourceScope::new(scope), message.into());
        self
    }

    /// Scopes passed to the full scan, in call order.
    #[must_use]
    pub fn scanned(&self) -> Vec<SourceScope> {
        self.scanned.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Scopes passed to the marker-only scan, in call order.
    #[must_use]
    pub fn fallbacks(&self) -> Vec<SourceScope> {
        self.fallbacks.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

impl SourceEnumerator for ScriptedEnumerator {
    fn scan(&self, scope: &SourceScope) -> Result<ScopeScan, SourceScanError> {
        if let Ok(mut guard) = self.scanned.lock() {
            guard.push(scope.clone());
        }
        if let Some(message) = self.failures.get(scope) {
            return Err(SourceScanError::Unresolvable {
                scope: scope.clone(),
                message: message.clone(),
            });
        }
        Ok(ScopeScan {
            methods: self.methods.get(scope).cloned().unwrap_or_default(),
            providers: self.providers.get(scope).cloned().unwrap_or_default(),
        })
    }

    fn scan_marked_methods(&self, scope: &SourceScope) -> Vec<StepUnit> {
        if let Ok(mut guard) = self.fallbacks.lock() {
            guard.push(scope.clone());
        }
        self.methods.get(scope).cloned().unwrap_or_default()
    }
}

/// One recorded `connect_failed` call.
#[derive(Debug, Clone)]
pub struct RecordedFailure {
    /// Destination being connected to.
    pub destination: Url,
    /// Proxy that failed.
    pub address: ProxyAddress,
    /// Rendered cause.
    pub cause: String,
}

/// [`RouteResolver`] that answers a fixed route list and records calls.
#[derive(Debug)]
pub struct RecordingResolver {
    answer: Vec<ProxyEndpoint>,
    resolved: Mutex<Vec<Url>>,
    failures: Mutex<Vec<RecordedFailure>>,
}

impl RecordingResolver {
    /// Resolver answering `[DIRECT]`.
    #[must_use]
    pub fn new() -> Self {
        Self::returning(vec![ProxyEndpoint::direct()])
    }

    /// Resolver answering `answer` for every destination.
    #[must_use]
    pub fn returning(answer: Vec<ProxyEndpoint>) -> Self {
        Self {
            answer,
            resolved: Mutex::new(Vec::new()),
            failures: Mutex::new(Vec::new()),
        }
    }

    /// The fixed answer.
    #[must_use]
    pub fn answer(&self) -> &[ProxyEndpoint] {
        &self.answer
    }

    /// Destinations this resolver was asked about.
    #[must_use]
    pub fn resolved(&self) -> Vec<Url> {
        self.resolved.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Forwarded connection failures.
    #[must_use]
    pub fn failures(&self) -> Vec<RecordedFailure> {
        self.failures.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

impl Default for RecordingResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteResolver for RecordingResolver {
    fn resolve(&self, destination: &Url) -> Vec<ProxyEndpoint> {
        if let Ok(mut guard) = self.resolved.lock() {
            guard.push(destination.clone());
        }
        self.answer.clone()
    }

    fn connect_failed(&self, destination: &Url, address: &ProxyAddress, cause: &io::Error) {
        if let Ok(mut guard) = self.failures.lock() {
            guard.push(RecordedFailure {
                destination: destination.clone(),
                address: address.clone(),
                cause: cause.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_config_counts_reads() {
        let config = MapConfig::new().with("proxy.server", "p");
        let shared = config.clone();
        assert_eq!(config.get_string("proxy.server").unwrap().as_deref(), Some("p"));
        assert!(config.get_string("missing").unwrap().is_none());
        assert_eq!(shared.reads(), 2);
    }

    #[test]
    fn test_failing_map_config() {
        let config = MapConfig::new().with("a", 1).failing("down");
        assert!(matches!(config.property("a"), Err(ConfigError::Unavailable(_))));
    }

    #[test]
    fn test_scripted_failure_keeps_marked_methods() {
        let enumerator = ScriptedEnumerator::new().failing_scope("com.broken", "boom");
        let scope = SourceScope::new("com.broken");
        assert!(enumerator.scan(&scope).is_err());
        assert!(enumerator.scan_marked_methods(&scope).is_empty());
        assert_eq!(enumerator.scanned(), vec![scope.clone()]);
        assert_eq!(enumerator.fallbacks(), vec![scope]);
    }

    #[test]
    fn test_recording_resolver() {
        let resolver = RecordingResolver::new();
        let url = Url::parse("http://example.com/").unwrap();
        assert_eq!(resolver.resolve(&url), vec![ProxyEndpoint::direct()]);
        resolver.connect_failed(
            &url,
            &ProxyAddress::new("p", 8080),
            &io::Error::other("reset"),
        );
        assert_eq!(resolver.resolved(), vec![url]);
        assert_eq!(resolver.failures()[0].cause, "reset");
    }
}
