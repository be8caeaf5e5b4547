//! Property keys understood by the stepwright crates.

/// Proxy server host. Blank or absent disables the route override.
pub const PROXY_SERVER: &str = "proxy.server";

/// Proxy server port.
pub const PROXY_PORT: &str = "proxy.port";

/// Port used when [`PROXY_PORT`] is not set.
pub const DEFAULT_PROXY_PORT: i64 = 80;

/// Host substrings whose traffic goes through the proxy.
pub const HOSTS_TO_PROXY: &str = "host.to.proxy";

/// Extra step source scopes, in priority order.
///
/// Used both to extend the set of scanned scopes and to rank the winner when
/// two scopes contribute a step with the same name.
pub const STEP_PROVIDER_PKG: &str = "step.provider.pkg";

/// Keys whose values are lists.
pub const LIST_KEYS: &[&str] = &[HOSTS_TO_PROXY, STEP_PROVIDER_PKG];
