//! Step registry.
//!
//! The finished result of one discovery pass. Steps are keyed by their
//! upper-cased name so lookups are case-insensitive, and each key holds
//! exactly one winning [`StepUnit`].

use std::collections::HashMap;

use tracing::debug;

use crate::priority::SourcePriorityList;
use crate::unit::StepUnit;

/// Read-only snapshot of discovered steps.
#[derive(Debug, Clone, Default)]
pub struct StepRegistry {
    steps: HashMap<String, StepUnit>,
}

impl StepRegistry {
    /// Look up a step by name, ignoring case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StepUnit> {
        self.steps.get(&name.to_uppercase())
    }

    /// Whether a step with this name exists, ignoring case.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.steps.contains_key(&name.to_uppercase())
    }

    /// Number of registered steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterate `(key, unit)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StepUnit)> {
        self.steps.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Registry keys, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.steps.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Borrow the underlying map.
    #[must_use]
    pub fn as_map(&self) -> &HashMap<String, StepUnit> {
        &self.steps
    }
}

/// Accumulates units and applies the conflict rule.
#[derive(Debug)]
pub(crate) struct RegistryBuilder<'a> {
    priorities: &'a SourcePriorityList,
    steps: HashMap<String, StepUnit>,
}

impl<'a> RegistryBuilder<'a> {
    pub(crate) fn new(priorities: &'a SourcePriorityList) -> Self {
        Self {
            priorities,
            steps: HashMap::new(),
        }
    }

    /// Insert a unit under its registry key.
    ///
    /// On a collision the previously stored unit is kept only when its
    /// priority index is strictly greater than the new unit's.
    pub(crate) fn insert(&mut self, unit: StepUnit) {
        let key = unit.registry_key();
        let Some(old) = self.steps.insert(key.clone(), unit) else {
            return;
        };

        let old_priority = self.priorities.priority_of(old.origin_path());
        let Some(new) = self.steps.get(&key) else {
            return;
        };
        let new_priority = self.priorities.priority_of(new.origin_path());
        let keep_old = old_priority > new_priority;

        debug!(
            step = %key,
            old = old.signature(),
            new = new.signature(),
            old_priority,
            new_priority,
            "Duplicate step; old one has {} priority",
            if keep_old { "higher" } else { "lower" }
        );

        if keep_old {
            self.steps.insert(key, old);
        }
    }

    pub(crate) fn finish(self) -> StepRegistry {
        StepRegistry { steps: self.steps }
    }
}
