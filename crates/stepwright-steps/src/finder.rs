//! Step discovery.
//!
//! A [`StepFinder`] scans the built-in scope followed by every configured
//! scope, merges the results, and builds a [`StepRegistry`]. A scope whose
//! full scan fails is retried with the enumerator's marker-only scan; one bad
//! scope never aborts the pass.

use std::collections::HashSet;

use stepwright_config::{ConfigProvider, keys};
use tracing::{debug, error, info, warn};

use crate::priority::SourcePriorityList;
use crate::registry::{RegistryBuilder, StepRegistry};
use crate::source::{SourceEnumerator, SourceScope};
use crate::unit::StepUnit;

/// Scope holding the built-in steps. Always scanned first.
pub const DEFAULT_STEP_SCOPE: &str = "stepwright.steps";

/// Runs discovery passes over a [`SourceEnumerator`].
pub struct StepFinder<'a> {
    enumerator: &'a dyn SourceEnumerator,
    scopes: Vec<SourceScope>,
    priorities: SourcePriorityList,
}

impl<'a> StepFinder<'a> {
    /// Create a finder that scans only [`DEFAULT_STEP_SCOPE`] and ranks
    /// nothing.
    #[must_use]
    pub fn new(enumerator: &'a dyn SourceEnumerator) -> Self {
        Self {
            enumerator,
            scopes: vec![SourceScope::new(DEFAULT_STEP_SCOPE)],
            priorities: SourcePriorityList::default(),
        }
    }

    /// Create a finder from configuration.
    ///
    /// Every entry of [`keys::STEP_PROVIDER_PKG`] is scanned after the
    /// default scope, and the same list ranks conflicting steps.
    #[must_use]
    pub fn from_config(enumerator: &'a dyn SourceEnumerator, config: &dyn ConfigProvider) -> Self {
        let priorities = SourcePriorityList::from_config(config);
        let mut finder = Self::new(enumerator);
        for prefix in priorities.prefixes() {
            finder = finder.with_scope(prefix.as_str());
        }
        finder.with_priorities(priorities)
    }

    /// Append a scope to scan. Duplicate scopes are ignored.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<SourceScope>) -> Self {
        let scope = scope.into();
        if self.scopes.contains(&scope) {
            warn!(scope = %scope, "Step scope listed more than once, ignoring repeat");
        } else {
            self.scopes.push(scope);
        }
        self
    }

    /// Replace the priority list used for conflicts.
    #[must_use]
    pub fn with_priorities(mut self, priorities: SourcePriorityList) -> Self {
        self.priorities = priorities;
        self
    }

    /// Scopes in scan order.
    #[must_use]
    pub fn scopes(&self) -> &[SourceScope] {
        &self.scopes
    }

    /// The priority list used for conflicts.
    #[must_use]
    pub fn priorities(&self) -> &SourcePriorityList {
        &self.priorities
    }

    /// Run one discovery pass.
    ///
    /// Marked methods of every scope are inserted first, in scope order;
    /// provider steps from every scope follow. With equal priorities the
    /// later insertion wins, so a provider step beats a marked step of the
    /// same name. Each call scans afresh and returns an independent registry.
    #[must_use]
    pub fn discover(&self) -> StepRegistry {
        let mut marked = Vec::new();
        let mut provided = Vec::new();
        for scope in &self.scopes {
            info!(scope = %scope, "Scanning for steps");
            let (methods, provider_steps) = self.scan_scope(scope);
            marked.extend(methods);
            provided.extend(provider_steps);
        }

        let mut seen = HashSet::new();
        let mut builder = RegistryBuilder::new(&self.priorities);
        for unit in marked.into_iter().chain(provided) {
            if !seen.insert(unit.identity()) {
                continue;
            }
            if unit.visibility().is_private() {
                debug!(step = unit.name(), signature = unit.signature(), "Skipping private step");
                continue;
            }
            builder.insert(unit);
        }

        let registry = builder.finish();
        info!(count = registry.len(), scopes = self.scopes.len(), "Step discovery finished");
        registry
    }

    /// Marked methods and provider steps of one scope.
    fn scan_scope(&self, scope: &SourceScope) -> (Vec<StepUnit>, Vec<StepUnit>) {
        match self.enumerator.scan(scope) {
            Ok(scan) => {
                let provided = scan
                    .providers
                    .iter()
                    .flat_map(|provider| provider.contributed_steps().cloned())
                    .collect();
                (scan.methods, provided)
            },
            Err(e) => {
                error!(
                    scope = %scope,
                    error = %e,
                    "Step scan failed, falling back to marked methods only"
                );
                (self.enumerator.scan_marked_methods(scope), Vec::new())
            },
        }
    }
}

/// Discover every step visible through `enumerator` using the scopes and
/// priorities in `config`.
#[must_use]
pub fn find_all_steps(enumerator: &dyn SourceEnumerator, config: &dyn ConfigProvider) -> StepRegistry {
    StepFinder::from_config(enumerator, config).discover()
}
