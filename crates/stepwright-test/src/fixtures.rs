//! Test fixtures for common types.

use serde_json::Value;
use stepwright_config::keys;
use stepwright_steps::{ProviderKind, ProviderType, StepHandle, StepUnit, Visibility};

use crate::mocks::MapConfig;

/// Create a public step whose body returns its name.
///
/// The signature is derived from `origin` and `name`, so two fixtures with
/// the same pair have the same identity.
///
/// # Panics
///
/// Panics if `name` is blank.
#[must_use]
pub fn test_step(name: &str, origin: &str) -> StepUnit {
    let body = name.to_owned();
    StepUnit::new(
        name,
        format!("{origin}::{}()", name.replace(' ', "_")),
        origin,
        StepHandle::new(move |_| Ok(Value::String(body.clone()))),
    )
    .expect("fixture step name must not be blank")
}

/// Create a step with the given visibility.
#[must_use]
pub fn test_step_with_visibility(name: &str, origin: &str, visibility: Visibility) -> StepUnit {
    test_step(name, origin).with_visibility(visibility)
}

/// Create a provider exposing one public step per name.
#[must_use]
pub fn test_provider(type_name: &str, origin: &str, kind: ProviderKind, steps: &[&str]) -> ProviderType {
    steps
        .iter()
        .fold(ProviderType::new(type_name, origin, kind), |provider, name| {
            provider.with_method(test_step(name, origin))
        })
}

/// Configuration enabling the proxy override for `hosts`.
#[must_use]
pub fn test_proxy_config(server: &str, port: i64, hosts: &[&str]) -> MapConfig {
    let hosts: Vec<toml::Value> = hosts.iter().map(|h| toml::Value::from(*h)).collect();
    MapConfig::new()
        .with(keys::PROXY_SERVER, server)
        .with(keys::PROXY_PORT, port)
        .with(keys::HOSTS_TO_PROXY, hosts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_fixture_is_invocable() {
        let step = test_step("say hello", "stepwright.steps.Greeting");
        assert_eq!(step.invoke(&[]).unwrap(), Value::from("say hello"));
        assert_eq!(step.signature(), "stepwright.steps.Greeting::say_hello()");
    }

    #[test]
    fn test_provider_fixture() {
        let provider = test_provider("Forms", "a.Forms", ProviderKind::Concrete, &["fill", "submit"]);
        assert_eq!(provider.contributed_steps().count(), 2);
    }
}
