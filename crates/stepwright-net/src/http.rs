//! `reqwest` integration.

use std::sync::Arc;

use crate::endpoint::ProxyKind;
use crate::resolver::RouteResolver;

/// Build a [`reqwest::Proxy`] that asks `resolver` for every request.
///
/// The first HTTP endpoint the resolver returns is used as the proxy. A
/// destination with no HTTP endpoint (direct or SOCKS only) is connected
/// without a proxy.
#[must_use]
pub fn to_reqwest_proxy(resolver: Arc<dyn RouteResolver>) -> reqwest::Proxy {
    reqwest::Proxy::custom(move |url| {
        resolver
            .resolve(url)
            .into_iter()
            .filter(|endpoint| endpoint.kind() == ProxyKind::Http)
            .find_map(|endpoint| endpoint.address().map(|address| format!("http://{address}")))
    })
}
