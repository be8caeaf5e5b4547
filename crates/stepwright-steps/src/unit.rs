//! Discovered step units.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{StepError, StepResult};

/// Origin recorded when a source cannot say where a step came from.
pub const UNKNOWN_ORIGIN: &str = "<unknown>";

/// Visibility of the member that implements a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Callable from anywhere.
    #[default]
    Public,
    /// Callable from subtypes.
    Protected,
    /// Callable within the declaring module.
    Package,
    /// Callable only inside the declaring type. Never registered.
    Private,
}

impl Visibility {
    /// Whether this is [`Visibility::Private`].
    #[must_use]
    pub fn is_private(self) -> bool {
        matches!(self, Self::Private)
    }
}

type StepFn = dyn Fn(&[Value]) -> StepResult<Value> + Send + Sync;

/// Opaque, cheaply cloneable reference to a step implementation.
///
/// The registry never calls or inspects it; the runner does.
#[derive(Clone)]
pub struct StepHandle {
    func: Arc<StepFn>,
    arity: Option<usize>,
}

impl StepHandle {
    /// Wrap a step body that accepts any number of arguments.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&[Value]) -> StepResult<Value> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
            arity: None,
        }
    }

    /// Wrap a step body that takes exactly `arity` arguments.
    pub fn with_arity<F>(arity: usize, func: F) -> Self
    where
        F: Fn(&[Value]) -> StepResult<Value> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
            arity: Some(arity),
        }
    }

    /// Declared argument count, if fixed.
    #[must_use]
    pub fn arity(&self) -> Option<usize> {
        self.arity
    }

    /// Call the step body.
    ///
    /// # Errors
    ///
    /// Propagates whatever the step body returns.
    pub fn invoke(&self, args: &[Value]) -> StepResult<Value> {
        (self.func)(args)
    }

    /// Whether two handles point at the same implementation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for StepHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepHandle")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Identity of a unit for de-duplication across scans.
///
/// Two scans that reach the same member yield equal identities; two members
/// that merely share a step name do not.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnitIdentity {
    /// Normalized origin path.
    pub origin_path: String,
    /// Member signature.
    pub signature: String,
}

/// One discovered step.
#[derive(Debug, Clone)]
pub struct StepUnit {
    name: String,
    signature: String,
    origin_path: String,
    visibility: Visibility,
    handle: StepHandle,
}

impl StepUnit {
    /// Create a public step unit.
    ///
    /// A blank `origin_path` is recorded as [`UNKNOWN_ORIGIN`].
    ///
    /// # Errors
    ///
    /// Returns [`StepError::InvalidUnit`] if `name` is blank.
    pub fn new(
        name: impl Into<String>,
        signature: impl Into<String>,
        origin_path: impl Into<String>,
        handle: StepHandle,
    ) -> StepResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(StepError::InvalidUnit("step name must not be empty".into()));
        }
        let origin_path = origin_path.into();
        let origin_path = if origin_path.trim().is_empty() {
            UNKNOWN_ORIGIN.to_owned()
        } else {
            origin_path
        };
        Ok(Self {
            name,
            signature: signature.into(),
            origin_path,
            visibility: Visibility::Public,
            handle,
        })
    }

    /// Set the member visibility.
    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Step name as declared.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable identity for diagnostics.
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Path of the module that contributed this unit.
    #[must_use]
    pub fn origin_path(&self) -> &str {
        &self.origin_path
    }

    /// Visibility of the implementing member.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// The implementation handle.
    #[must_use]
    pub fn handle(&self) -> &StepHandle {
        &self.handle
    }

    /// Key under which the registry stores this unit.
    #[must_use]
    pub fn registry_key(&self) -> String {
        self.name.to_uppercase()
    }

    /// De-duplication identity.
    #[must_use]
    pub fn identity(&self) -> UnitIdentity {
        UnitIdentity {
            origin_path: self.origin_path.replace('/', "."),
            signature: self.signature.clone(),
        }
    }

    /// Invoke the step, checking the declared arity first.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::ArgumentCount`] on an arity mismatch, otherwise
    /// whatever the step body returns.
    pub fn invoke(&self, args: &[Value]) -> StepResult<Value> {
        match self.handle.arity() {
            Some(expected) if expected != args.len() => {
                return Err(StepError::ArgumentCount {
                    step: self.name.clone(),
                    expected,
                    found: args.len(),
                });
            },
            _ => {},
        }
        self.handle.invoke(args)
    }
}
