//! Proxy-overriding route selector.

use std::io;
use std::sync::{Arc, OnceLock};

use stepwright_config::{ConfigProvider, keys};
use tracing::{error, info, warn};
use url::Url;

use crate::endpoint::{ProxyAddress, ProxyEndpoint};
use crate::resolver::RouteResolver;
use crate::rule::ProxyRule;

/// Outcome of one route selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// The destination matched the proxy rule.
    Override(Vec<ProxyEndpoint>),
    /// The wrapped resolver's answer, unchanged.
    Default(Vec<ProxyEndpoint>),
}

impl RouteDecision {
    /// Whether the proxy rule applied.
    #[must_use]
    pub fn is_override(&self) -> bool {
        matches!(self, Self::Override(_))
    }

    /// The candidate routes.
    #[must_use]
    pub fn endpoints(&self) -> &[ProxyEndpoint] {
        match self {
            Self::Override(endpoints) | Self::Default(endpoints) => endpoints,
        }
    }

    /// Consume the decision, returning the candidate routes.
    #[must_use]
    pub fn into_endpoints(self) -> Vec<ProxyEndpoint> {
        match self {
            Self::Override(endpoints) | Self::Default(endpoints) => endpoints,
        }
    }
}

/// Route resolver that sends matching hosts through a configured proxy.
///
/// The rule is read from configuration the first time it is needed.
/// Concurrent first callers block until that single read finishes, and the
/// result (including a disabled rule after a failed read) is never
/// refreshed.
pub struct UriProxySelector {
    config: Arc<dyn ConfigProvider>,
    default: Arc<dyn RouteResolver>,
    rule: OnceLock<ProxyRule>,
}

impl UriProxySelector {
    /// Wrap `default`, reading the proxy rule from `config` on first use.
    #[must_use]
    pub fn new(config: Arc<dyn ConfigProvider>, default: Arc<dyn RouteResolver>) -> Self {
        Self {
            config,
            default,
            rule: OnceLock::new(),
        }
    }

    /// The active rule, initializing it if needed.
    pub fn rule(&self) -> &ProxyRule {
        self.rule.get_or_init(|| load_rule(self.config.as_ref()))
    }

    /// Decide the route for `destination`.
    pub fn select_route(&self, destination: &Url) -> RouteDecision {
        let rule = self.rule();
        match destination.host_str() {
            Some(host) if rule.matches(host) => RouteDecision::Override(rule.proxies().to_vec()),
            _ => RouteDecision::Default(self.default.resolve(destination)),
        }
    }
}

impl RouteResolver for UriProxySelector {
    fn resolve(&self, destination: &Url) -> Vec<ProxyEndpoint> {
        self.select_route(destination).into_endpoints()
    }

    fn connect_failed(&self, destination: &Url, address: &ProxyAddress, cause: &io::Error) {
        self.default.connect_failed(destination, address, cause);
    }
}

impl std::fmt::Debug for UriProxySelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UriProxySelector")
            .field("rule", &self.rule.get())
            .finish_non_exhaustive()
    }
}

fn load_rule(config: &dyn ConfigProvider) -> ProxyRule {
    match ProxyRule::from_config(config) {
        Ok(rule) if rule.is_enabled() => {
            info!(rule = %rule, "Proxy override enabled");
            rule
        },
        Ok(rule) => {
            warn!(
                key = keys::PROXY_SERVER,
                "Proxy override inactive: no proxy server configured"
            );
            rule
        },
        Err(e) => {
            error!(error = %e, "Failed to read proxy configuration, proxy override disabled");
            ProxyRule::disabled()
        },
    }
}
