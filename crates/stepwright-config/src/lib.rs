#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Layered property configuration for stepwright.
//!
//! Configuration is a flat bundle of dotted keys (`proxy.server`,
//! `host.to.proxy`, ...) read through the [`ConfigProvider`] trait. The
//! bundle is assembled from TOML layers; nested tables and dotted keys are
//! equivalent, so `[proxy] server = "x"` and `proxy.server = "x"` set the
//! same property.
//!
//! # Usage
//!
//! ```rust,no_run
//! use stepwright_config::{ConfigProvider, keys};
//!
//! let resolved = stepwright_config::load(&[], None).unwrap();
//! let server = resolved.bundle.get_string_or(keys::PROXY_SERVER, "").unwrap();
//! println!("proxy server: {server}");
//! ```
//!
//! # Configuration Precedence
//!
//! From highest to lowest priority:
//!
//! 1. **Environment variables** (`STEPWRIGHT_PROXY_SERVER` → `proxy.server`)
//! 2. **Explicit files** passed to [`load`], later files win
//! 3. **User** (`~/.stepwright/config.toml`, or `$STEPWRIGHT_HOME/config.toml`)
//! 4. **Embedded defaults** (`defaults.toml` compiled into the binary)

/// Property bundle and the provider trait.
pub mod bundle;
/// Environment variable overrides.
pub mod env;
/// Configuration error types.
pub mod error;
/// Well-known property keys.
pub mod keys;
/// Configuration file discovery and loading.
pub mod loader;
/// Layer merging with source tracking.
pub mod merge;
/// Property validation rules.
pub mod validate;

pub use bundle::{ConfigProvider, PropertyBundle};
pub use error::{ConfigError, ConfigResult};
pub use loader::{ResolvedConfig, ShowFormat, load, load_file, load_with_env};
pub use merge::{ConfigLayer, FieldSources};
