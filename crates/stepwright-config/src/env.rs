//! Environment variable overrides.
//!
//! Every property already known to the bundle can be overridden by an
//! environment variable named `STEPWRIGHT_` followed by the key in upper case
//! with `.` and `-` replaced by `_` (`host.to.proxy` → `STEPWRIGHT_HOST_TO_PROXY`).
//! Unknown variables are ignored.

use std::collections::HashMap;

use toml::Value;

use crate::bundle::{PropertyBundle, split_list};
use crate::merge::{ConfigLayer, FieldSources};

/// Prefix shared by all stepwright environment variables.
pub const ENV_PREFIX: &str = "STEPWRIGHT_";

/// Snapshot the process environment, keeping only `STEPWRIGHT_*` variables.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(name, _)| name.starts_with(ENV_PREFIX))
        .collect()
}

/// Environment variable name that overrides `key`.
#[must_use]
pub fn env_var_name(key: &str) -> String {
    format!(
        "{ENV_PREFIX}{}",
        key.to_ascii_uppercase().replace(['.', '-'], "_")
    )
}

/// Apply overrides from `env` to every known key. Returns how many keys were
/// overridden.
///
/// The raw string is coerced to the shape of the value it replaces: lists
/// are split on `;`/`,`, integers are parsed when possible.
pub fn apply_env_overrides(
    bundle: &mut PropertyBundle,
    sources: &mut FieldSources,
    env: &HashMap<String, String>,
) -> usize {
    let keys: Vec<String> = bundle.keys().map(str::to_owned).collect();
    let mut applied = 0_usize;
    for key in keys {
        let Some(raw) = env.get(&env_var_name(&key)) else {
            continue;
        };
        let value = coerce(raw, bundle.get(&key));
        bundle.set(key.clone(), value);
        sources.insert(key, ConfigLayer::Environment);
        applied = applied.saturating_add(1);
    }
    applied
}

fn coerce(raw: &str, existing: Option<&Value>) -> Value {
    match existing {
        Some(Value::Array(_)) => {
            Value::Array(split_list(raw).into_iter().map(Value::String).collect())
        },
        Some(Value::Integer(_)) => raw
            .trim()
            .parse::<i64>()
            .map_or_else(|_| Value::String(raw.to_owned()), Value::Integer),
        _ => Value::String(raw.to_owned()),
    }
}
