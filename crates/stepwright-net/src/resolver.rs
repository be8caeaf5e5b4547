//! The destination-resolution contract and the process-wide authority.

use std::io;
use std::sync::{Arc, OnceLock};

use tracing::{debug, info};
use url::Url;

use crate::endpoint::{ProxyAddress, ProxyEndpoint};
use crate::error::{NetError, NetResult};

/// Decides which routes to try for a destination.
pub trait RouteResolver: Send + Sync {
    /// Candidate routes for `destination`, in the order they should be tried.
    fn resolve(&self, destination: &Url) -> Vec<ProxyEndpoint>;

    /// Report that connecting to `destination` through `address` failed.
    fn connect_failed(&self, destination: &Url, address: &ProxyAddress, cause: &io::Error);
}

/// Resolver that always connects directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectResolver;

impl RouteResolver for DirectResolver {
    fn resolve(&self, _destination: &Url) -> Vec<ProxyEndpoint> {
        vec![ProxyEndpoint::direct()]
    }

    fn connect_failed(&self, destination: &Url, address: &ProxyAddress, cause: &io::Error) {
        debug!(
            destination = %destination,
            proxy = %address,
            error = %cause,
            "Proxy connection failed"
        );
    }
}

static ROUTE_RESOLVER: OnceLock<Arc<dyn RouteResolver>> = OnceLock::new();

/// Install the process-wide route resolver.
///
/// Call once during bootstrap, before any component resolves destinations.
///
/// # Errors
///
/// Returns [`NetError::AlreadyInstalled`] if a resolver was installed
/// earlier. The earlier resolver stays active.
pub fn install_route_resolver(resolver: Arc<dyn RouteResolver>) -> NetResult<()> {
    ROUTE_RESOLVER
        .set(resolver)
        .map_err(|_| NetError::AlreadyInstalled)?;
    info!("Installed process-wide route resolver");
    Ok(())
}

/// The installed process-wide route resolver, if any.
#[must_use]
pub fn installed_route_resolver() -> Option<Arc<dyn RouteResolver>> {
    ROUTE_RESOLVER.get().cloned()
}
