//! Route selection against scripted configuration.

use std::io;
use std::sync::{Arc, Barrier};
use std::thread;

use stepwright_config::keys;
use stepwright_net::{
    ProxyAddress, ProxyEndpoint, ProxyKind, RouteDecision, RouteResolver, UriProxySelector,
};
use stepwright_test::{MapConfig, RecordingResolver, setup_test_logging_default, test_proxy_config};
use url::Url;

fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

fn selector_with(config: &MapConfig) -> (UriProxySelector, Arc<RecordingResolver>) {
    let default = Arc::new(RecordingResolver::new());
    let selector = UriProxySelector::new(Arc::new(config.clone()), default.clone());
    (selector, default)
}

#[test]
fn test_matching_host_gets_both_proxies() {
    setup_test_logging_default();
    let config = test_proxy_config("proxy.example", 8080, &["internal.example"]);
    let (selector, default) = selector_with(&config);

    let routes = selector.resolve(&url("http://internal.EXAMPLE.com/x"));

    let address = ProxyAddress::new("proxy.example", 8080);
    assert_eq!(routes.len(), 2);
    assert!(routes.contains(&ProxyEndpoint::http(address.clone())));
    assert!(routes.contains(&ProxyEndpoint::socks(address)));
    assert!(default.resolved().is_empty());
}

#[test]
fn test_other_hosts_get_default_answer_unchanged() {
    let config = test_proxy_config("proxy.example", 8080, &["internal.example"]);
    let answer = vec![ProxyEndpoint::socks(ProxyAddress::new("corp-socks", 1080))];
    let default = Arc::new(RecordingResolver::returning(answer.clone()));
    let selector = UriProxySelector::new(Arc::new(config), default.clone());

    let destination = url("http://external.example.com/x");
    assert_eq!(
        selector.select_route(&destination),
        RouteDecision::Default(answer)
    );
    assert_eq!(default.resolved(), vec![destination]);
}

#[test]
fn test_blank_server_always_delegates() {
    let config = test_proxy_config("", 8080, &["internal.example", "example"]);
    let (selector, default) = selector_with(&config);

    for destination in ["http://internal.example.com/", "https://example.org/", "ftp://files.example/"] {
        let routes = selector.resolve(&url(destination));
        assert_eq!(routes, vec![ProxyEndpoint::direct()]);
    }
    assert_eq!(default.resolved().len(), 3);
    assert!(!selector.rule().is_enabled());
}

#[test]
fn test_missing_server_key_always_delegates() {
    let config = MapConfig::new().with(keys::HOSTS_TO_PROXY, "internal.example");
    let (selector, _default) = selector_with(&config);
    assert!(!selector.select_route(&url("http://internal.example/")).is_override());
}

#[test]
fn test_concurrent_first_use_initializes_once() {
    let config = test_proxy_config("proxy.example", 3128, &["internal"]);
    let (selector, _default) = selector_with(&config);
    let selector = Arc::new(selector);
    let barrier = Arc::new(Barrier::new(16));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let selector = Arc::clone(&selector);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let host = if i % 2 == 0 { "internal.corp" } else { "public.net" };
                selector.select_route(&Url::parse(&format!("http://{host}/")).unwrap())
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let decision = handle.join().unwrap();
        assert_eq!(decision.is_override(), i % 2 == 0);
        if decision.is_override() {
            assert!(decision.endpoints().iter().all(|e| e.kind() != ProxyKind::Direct));
        }
    }

    // A single initialization reads each proxy property once.
    let reads_after_init = config.reads();
    let reference = test_proxy_config("proxy.example", 3128, &["internal"]);
    let (single, _) = selector_with(&reference);
    let _ = single.rule();
    assert_eq!(reads_after_init, reference.reads());

    for _ in 0..100 {
        let _ = selector.resolve(&url("http://internal.corp/"));
    }
    assert_eq!(config.reads(), reads_after_init);
}

#[test]
fn test_failed_init_is_never_retried() {
    let config = MapConfig::new().failing("config store offline");
    let (selector, default) = selector_with(&config);

    assert!(!selector.select_route(&url("http://internal.example/")).is_override());
    let reads = config.reads();
    assert!(reads > 0);

    for _ in 0..10 {
        let _ = selector.resolve(&url("http://internal.example/"));
    }
    assert_eq!(config.reads(), reads);
    assert_eq!(default.resolved().len(), 11);
}

#[test]
fn test_invalid_port_disables_override() {
    let config = test_proxy_config("proxy.example", 123_456, &["internal"]);
    let (selector, _default) = selector_with(&config);
    assert!(!selector.select_route(&url("http://internal/")).is_override());
}

#[test]
fn test_connect_failed_is_forwarded() {
    let config = test_proxy_config("proxy.example", 8080, &["internal"]);
    let (selector, default) = selector_with(&config);
    let destination = url("https://internal.example/login");
    let address = ProxyAddress::new("proxy.example", 8080);

    selector.connect_failed(
        &destination,
        &address,
        &io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"),
    );

    let failures = default.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].destination, destination);
    assert_eq!(failures[0].address, address);
    assert_eq!(failures[0].cause, "connection refused");
}
