//! Step provider types.
//!
//! A provider is a type tagged as a whole: every public method it exposes is
//! treated as a step, without marking each method individually.

use crate::unit::{StepUnit, Visibility};

/// What kind of type a provider is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProviderKind {
    /// An instantiable type. Contributes its public methods.
    #[default]
    Concrete,
    /// An interface or abstract type. Contributes nothing.
    Interface,
    /// A UI component base type. Excluded from the provider path; its
    /// individually marked methods are still found by the method scan.
    UiComponent,
}

/// A type carrying the provider marker.
#[derive(Debug, Clone)]
pub struct ProviderType {
    name: String,
    origin_path: String,
    kind: ProviderKind,
    methods: Vec<StepUnit>,
}

impl ProviderType {
    /// Create a provider with no methods.
    pub fn new(name: impl Into<String>, origin_path: impl Into<String>, kind: ProviderKind) -> Self {
        Self {
            name: name.into(),
            origin_path: origin_path.into(),
            kind,
            methods: Vec::new(),
        }
    }

    /// Add a method exposed by the provider.
    #[must_use]
    pub fn with_method(mut self, method: StepUnit) -> Self {
        self.methods.push(method);
        self
    }

    /// Provider type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the module that declares the provider.
    #[must_use]
    pub fn origin_path(&self) -> &str {
        &self.origin_path
    }

    /// Provider kind.
    #[must_use]
    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    /// Every method the provider declares, regardless of visibility.
    #[must_use]
    pub fn methods(&self) -> &[StepUnit] {
        &self.methods
    }

    /// The steps this provider contributes through the provider path:
    /// public methods of concrete providers, nothing otherwise.
    pub fn contributed_steps(&self) -> impl Iterator<Item = &StepUnit> {
        let contributes = matches!(self.kind, ProviderKind::Concrete);
        self.methods
            .iter()
            .filter(move |m| contributes && m.visibility() == Visibility::Public)
    }
}
