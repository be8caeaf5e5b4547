//! Process-wide resolver installation.
//!
//! Lives in its own test binary because installation is one-shot per
//! process.

use std::sync::Arc;

use stepwright_net::{
    DirectResolver, NetError, RouteResolver, UriProxySelector, install_route_resolver,
    installed_route_resolver,
};
use stepwright_test::{RecordingResolver, test_proxy_config};
use url::Url;

#[test]
fn test_install_once() {
    assert!(installed_route_resolver().is_none());

    let selector = UriProxySelector::new(
        Arc::new(test_proxy_config("proxy.example", 8080, &["internal"])),
        Arc::new(RecordingResolver::new()),
    );
    install_route_resolver(Arc::new(selector)).unwrap();

    let err = install_route_resolver(Arc::new(DirectResolver)).unwrap_err();
    assert!(matches!(err, NetError::AlreadyInstalled));

    let active = installed_route_resolver().unwrap();
    let routes = active.resolve(&Url::parse("http://internal.example/").unwrap());
    assert_eq!(routes.len(), 2);
}
