//! Post-merge property validation.
//!
//! Checks the shape and range of well-known keys. Unknown keys are left
//! alone; they belong to whoever reads them.

use crate::bundle::ConfigProvider;
use crate::error::{ConfigError, ConfigResult};
use crate::keys;

/// Validate a fully merged bundle.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &dyn ConfigProvider) -> ConfigResult<()> {
    validate_proxy_port(config)?;
    validate_lists(config)?;
    Ok(())
}

fn validate_proxy_port(config: &dyn ConfigProvider) -> ConfigResult<()> {
    let Some(port) = config.get_int(keys::PROXY_PORT)? else {
        return Ok(());
    };
    if !matches!(u16::try_from(port), Ok(p) if p != 0) {
        return Err(ConfigError::ValidationError {
            field: keys::PROXY_PORT.to_owned(),
            message: format!("port {port} is out of range; must be between 1 and 65535"),
        });
    }
    Ok(())
}

fn validate_lists(config: &dyn ConfigProvider) -> ConfigResult<()> {
    for key in keys::LIST_KEYS {
        config.get_list(key)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::PropertyBundle;

    #[test]
    fn test_empty_bundle_is_valid() {
        assert!(validate(&PropertyBundle::new()).is_ok());
    }

    #[test]
    fn test_port_range() {
        let mut bundle = PropertyBundle::new();
        bundle.set(keys::PROXY_PORT, 8080);
        assert!(validate(&bundle).is_ok());

        bundle.set(keys::PROXY_PORT, 0);
        assert!(matches!(
            validate(&bundle),
            Err(ConfigError::ValidationError { .. })
        ));

        bundle.set(keys::PROXY_PORT, 70_000);
        assert!(validate(&bundle).is_err());
    }

    #[test]
    fn test_list_keys_must_hold_strings() {
        let bundle = PropertyBundle::from_toml_str("step.provider.pkg = [1]", "t").unwrap();
        assert!(matches!(
            validate(&bundle),
            Err(ConfigError::TypeMismatch { .. })
        ));
    }
}
