//! Route candidates.

use std::fmt;

/// Transport kind of a route candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyKind {
    /// Connect to the destination without a proxy.
    Direct,
    /// HTTP-style proxy (`CONNECT` for TLS).
    Http,
    /// SOCKS proxy.
    Socks,
}

impl fmt::Display for ProxyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => f.write_str("DIRECT"),
            Self::Http => f.write_str("HTTP"),
            Self::Socks => f.write_str("SOCKS"),
        }
    }
}

/// Unresolved proxy socket address.
///
/// The host is kept as configured; name resolution is left to whoever
/// connects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProxyAddress {
    host: String,
    port: u16,
}

impl ProxyAddress {
    /// Create an address.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Proxy host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Proxy port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for ProxyAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// One route candidate returned by a resolver.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProxyEndpoint {
    kind: ProxyKind,
    address: Option<ProxyAddress>,
}

impl ProxyEndpoint {
    /// The no-proxy route.
    #[must_use]
    pub fn direct() -> Self {
        Self {
            kind: ProxyKind::Direct,
            address: None,
        }
    }

    /// An HTTP proxy route.
    #[must_use]
    pub fn http(address: ProxyAddress) -> Self {
        Self {
            kind: ProxyKind::Http,
            address: Some(address),
        }
    }

    /// A SOCKS proxy route.
    #[must_use]
    pub fn socks(address: ProxyAddress) -> Self {
        Self {
            kind: ProxyKind::Socks,
            address: Some(address),
        }
    }

    /// Route kind.
    #[must_use]
    pub fn kind(&self) -> ProxyKind {
        self.kind
    }

    /// Proxy address; `None` for direct routes.
    #[must_use]
    pub fn address(&self) -> Option<&ProxyAddress> {
        self.address.as_ref()
    }

    /// Whether this is the no-proxy route.
    #[must_use]
    pub fn is_direct(&self) -> bool {
        self.kind == ProxyKind::Direct
    }
}

impl fmt::Display for ProxyEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.address {
            Some(address) => write!(f, "{} @ {address}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let address = ProxyAddress::new("proxy.example", 8080);
        assert_eq!(ProxyEndpoint::http(address.clone()).to_string(), "HTTP @ proxy.example:8080");
        assert_eq!(ProxyEndpoint::socks(address).to_string(), "SOCKS @ proxy.example:8080");
        assert_eq!(ProxyEndpoint::direct().to_string(), "DIRECT");
    }

    #[test]
    fn test_direct_has_no_address() {
        let direct = ProxyEndpoint::direct();
        assert!(direct.is_direct());
        assert!(direct.address().is_none());
        assert!(!ProxyEndpoint::http(ProxyAddress::new("p", 1)).is_direct());
    }
}
