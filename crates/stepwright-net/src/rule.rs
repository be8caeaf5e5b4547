//! The proxy override rule.

use std::fmt;

use stepwright_config::{ConfigProvider, keys};

use crate::endpoint::{ProxyAddress, ProxyEndpoint};
use crate::error::{NetError, NetResult};

/// Which hosts to proxy and through which endpoints.
///
/// A rule with no endpoints never overrides anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyRule {
    hosts_to_proxy: Vec<String>,
    proxies: Vec<ProxyEndpoint>,
}

impl ProxyRule {
    /// Create a rule. Host patterns are matched case-insensitively.
    #[must_use]
    pub fn new(hosts_to_proxy: Vec<String>, proxies: Vec<ProxyEndpoint>) -> Self {
        Self {
            hosts_to_proxy: hosts_to_proxy
                .into_iter()
                .map(|h| h.trim().to_lowercase())
                .filter(|h| !h.is_empty())
                .collect(),
            proxies,
        }
    }

    /// A rule that never overrides.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Read the rule from configuration.
    ///
    /// A blank `proxy.server` yields a rule without endpoints. Otherwise the
    /// rule carries an HTTP and a SOCKS endpoint for the same address.
    ///
    /// # Errors
    ///
    /// Returns [`NetError::Config`] if a property has the wrong type, or
    /// [`NetError::InvalidPort`] if the port does not fit a TCP port.
    pub fn from_config(config: &dyn ConfigProvider) -> NetResult<Self> {
        let server = config.get_string_or(keys::PROXY_SERVER, "")?;
        let hosts = config.get_list(keys::HOSTS_TO_PROXY)?;
        let server = server.trim();
        if server.is_empty() {
            return Ok(Self::new(hosts, Vec::new()));
        }

        let port = config.get_int_or(keys::PROXY_PORT, keys::DEFAULT_PROXY_PORT)?;
        let port = match u16::try_from(port) {
            Ok(p) if p != 0 => p,
            _ => return Err(NetError::InvalidPort(port)),
        };

        let address = ProxyAddress::new(server, port);
        Ok(Self::new(
            hosts,
            vec![ProxyEndpoint::http(address.clone()), ProxyEndpoint::socks(address)],
        ))
    }

    /// Whether the rule can override anything.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.proxies.is_empty()
    }

    /// Lower-cased host patterns.
    #[must_use]
    pub fn hosts_to_proxy(&self) -> &[String] {
        &self.hosts_to_proxy
    }

    /// Override endpoints.
    #[must_use]
    pub fn proxies(&self) -> &[ProxyEndpoint] {
        &self.proxies
    }

    /// Whether `host` should be proxied: the rule is enabled and the host
    /// contains one of the patterns, ignoring case.
    #[must_use]
    pub fn matches(&self, host: &str) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let host = host.to_lowercase();
        self.hosts_to_proxy
            .iter()
            .any(|pattern| host.contains(pattern.as_str()))
    }
}

impl fmt::Display for ProxyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_enabled() {
            return f.write_str("no proxy override");
        }
        let proxies: Vec<String> = self.proxies.iter().map(ToString::to_string).collect();
        write!(
            f,
            "[{}] for hosts [{}]",
            proxies.join(", "),
            self.hosts_to_proxy.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use stepwright_config::PropertyBundle;

    use super::*;

    fn config(server: &str, port: i64, hosts: &str) -> PropertyBundle {
        let mut bundle = PropertyBundle::new();
        bundle.set(keys::PROXY_SERVER, server);
        bundle.set(keys::PROXY_PORT, port);
        bundle.set(keys::HOSTS_TO_PROXY, hosts);
        bundle
    }

    #[test]
    fn test_from_config_builds_http_and_socks() {
        let rule = ProxyRule::from_config(&config("proxy.example", 8080, "Internal.Example")).unwrap();
        assert!(rule.is_enabled());
        assert_eq!(rule.hosts_to_proxy(), ["internal.example"]);
        let address = ProxyAddress::new("proxy.example", 8080);
        assert_eq!(
            rule.proxies(),
            [ProxyEndpoint::http(address.clone()), ProxyEndpoint::socks(address)]
        );
        assert_eq!(
            rule.to_string(),
            "[HTTP @ proxy.example:8080, SOCKS @ proxy.example:8080] for hosts [internal.example]"
        );
    }

    #[test]
    fn test_default_port() {
        let mut bundle = PropertyBundle::new();
        bundle.set(keys::PROXY_SERVER, "proxy.example");
        let rule = ProxyRule::from_config(&bundle).unwrap();
        assert_eq!(rule.proxies()[0].address().unwrap().port(), 80);
    }

    #[test]
    fn test_blank_server_disables() {
        let rule = ProxyRule::from_config(&config("  ", 8080, "internal.example")).unwrap();
        assert!(!rule.is_enabled());
        assert!(!rule.matches("internal.example.com"));
        assert_eq!(rule.to_string(), "no proxy override");
    }

    #[test]
    fn test_invalid_ports_rejected() {
        for port in [0, -1, 70_000] {
            let err = ProxyRule::from_config(&config("proxy.example", port, "")).unwrap_err();
            assert!(matches!(err, NetError::InvalidPort(p) if p == port));
        }
    }

    #[test]
    fn test_matches_substring_case_insensitively() {
        let rule = ProxyRule::from_config(&config("p", 1, "internal.example;corp")).unwrap();
        assert!(rule.matches("api.INTERNAL.example.com"));
        assert!(rule.matches("mycorp.net"));
        assert!(!rule.matches("external.example.com"));
    }
}
