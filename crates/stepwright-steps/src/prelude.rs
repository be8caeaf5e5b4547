//! Prelude module - commonly used types for convenient import.
//!
//! Use `use stepwright_steps::prelude::*;` to import all essential types.

// Errors
pub use crate::{SourceScanError, StepError, StepResult};

// Units and providers
pub use crate::{ProviderKind, ProviderType, StepHandle, StepUnit, Visibility};

// Discovery
pub use crate::{SourceEnumerator, SourceScope, StepFinder, StepIndex, find_all_steps};

// Results
pub use crate::{SourcePriorityList, StepRegistry};
