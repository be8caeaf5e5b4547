//! Stepwright Test - Shared test utilities.
//!
//! This crate provides in-memory collaborators and fixtures used by the
//! integration tests of the other stepwright crates.
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! stepwright-test.workspace = true
//! ```
//!
//! Then use in your integration tests:
//!
//! ```rust,ignore
//! use stepwright_steps::find_all_steps;
//! use stepwright_test::{MapConfig, ScriptedEnumerator, test_step};
//!
//! #[test]
//! fn test_discovery() {
//!     let enumerator = ScriptedEnumerator::new()
//!         .with_methods("stepwright.steps", vec![test_step("open page", "stepwright.steps.Nav")]);
//!     let registry = find_all_steps(&enumerator, &MapConfig::new());
//!     assert!(registry.contains("OPEN PAGE"));
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod fixtures;
pub mod harness;
pub mod mocks;

pub use fixtures::*;
pub use harness::*;
pub use mocks::*;
