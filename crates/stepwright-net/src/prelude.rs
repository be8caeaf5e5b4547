//! Prelude module - commonly used types for convenient import.
//!
//! Use `use stepwright_net::prelude::*;` to import all essential types.

// Errors
pub use crate::{NetError, NetResult};

// Routes
pub use crate::{ProxyAddress, ProxyEndpoint, ProxyKind, ProxyRule, RouteDecision};

// Resolvers
pub use crate::{DirectResolver, RouteResolver, UriProxySelector};
pub use crate::{install_route_resolver, installed_route_resolver};
