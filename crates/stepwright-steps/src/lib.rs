//! Step discovery for the stepwright test runtime.
//!
//! Test steps are contributed by independent source scopes (module
//! namespaces such as `stepwright.steps` or `com.acme.checkout.steps`). This
//! crate scans every configured scope, merges what it finds into a single
//! registry keyed by upper-cased step name, and resolves name collisions
//! with a source-priority rule.
//!
//! - [`StepUnit`]: one discovered step (name, signature, origin, handle)
//! - [`ProviderType`]: a type whose public methods all count as steps
//! - [`SourceEnumerator`]: enumerates steps and providers under a scope
//! - [`StepIndex`]: explicit manifest that producers register into at startup
//! - [`SourcePriorityList`]: ranks origins by configured prefix
//! - [`StepFinder`] / [`find_all_steps`]: run a discovery pass
//! - [`StepRegistry`]: the finished, read-only snapshot
//!
//! # Conflict Resolution
//!
//! When two units share a name, each gets a priority index: the position of
//! the first `step.provider.pkg` entry that prefixes its origin path, or the
//! list length if none does. The previously stored unit survives only when
//! its index is strictly greater; otherwise the newer unit wins.
//!
//! # Example
//!
//! ```
//! use stepwright_config::PropertyBundle;
//! use stepwright_steps::{StepHandle, StepIndex, StepUnit, find_all_steps};
//!
//! let mut index = StepIndex::new();
//! index.register_step(
//!     StepUnit::new(
//!         "open login page",
//!         "LoginSteps::open_login_page()",
//!         "stepwright.steps.login",
//!         StepHandle::new(|_args| Ok(serde_json::Value::Null)),
//!     )
//!     .unwrap(),
//! );
//!
//! let registry = find_all_steps(&index, &PropertyBundle::new());
//! assert!(registry.get("Open Login Page").is_some());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod error;
pub mod finder;
pub mod index;
pub mod priority;
pub mod provider;
pub mod registry;
pub mod source;
pub mod unit;

pub use error::{SourceScanError, StepError, StepResult};
pub use finder::{DEFAULT_STEP_SCOPE, StepFinder, find_all_steps};
pub use index::StepIndex;
pub use priority::SourcePriorityList;
pub use provider::{ProviderKind, ProviderType};
pub use registry::StepRegistry;
pub use source::{ScopeScan, SourceEnumerator, SourceScope};
pub use unit::{StepHandle, StepUnit, UNKNOWN_ORIGIN, UnitIdentity, Visibility};
