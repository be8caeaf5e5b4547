//! Proxy route selection for stepwright.
//!
//! A [`UriProxySelector`] wraps the resolver that was active before it and
//! substitutes a proxy route for destinations whose host matches a
//! configured pattern. Everything else is delegated unchanged.
//!
//! The proxy rule is read from configuration on first use and cached for
//! the lifetime of the selector. Missing or broken configuration disables
//! the override instead of failing.
//!
//! # Configuration
//!
//! | Key             | Meaning                                   |
//! |-----------------|-------------------------------------------|
//! | `proxy.server`  | Proxy host; blank disables the override   |
//! | `proxy.port`    | Proxy port, default `80`                  |
//! | `host.to.proxy` | Host substrings routed through the proxy  |
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use stepwright_config::PropertyBundle;
//! use stepwright_net::{DirectResolver, RouteResolver, UriProxySelector};
//! use url::Url;
//!
//! let mut config = PropertyBundle::new();
//! config.set("proxy.server", "proxy.example");
//! config.set("proxy.port", 8080);
//! config.set("host.to.proxy", "internal.example");
//!
//! let selector = UriProxySelector::new(Arc::new(config), Arc::new(DirectResolver));
//! let url = Url::parse("http://internal.example.com/health").unwrap();
//! assert_eq!(selector.resolve(&url).len(), 2);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod endpoint;
pub mod error;
#[cfg(feature = "reqwest")]
pub mod http;
pub mod resolver;
pub mod rule;
pub mod selector;

pub use endpoint::{ProxyAddress, ProxyEndpoint, ProxyKind};
pub use error::{NetError, NetResult};
#[cfg(feature = "reqwest")]
pub use http::to_reqwest_proxy;
pub use resolver::{DirectResolver, RouteResolver, install_route_resolver, installed_route_resolver};
pub use rule::ProxyRule;
pub use selector::{RouteDecision, UriProxySelector};
