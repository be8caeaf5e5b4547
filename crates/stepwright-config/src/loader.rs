//! Config file discovery and layered loading.
//!
//! Implements the [`load`] algorithm:
//! 1. Parse `defaults.toml` → base
//! 2. Merge the user config (`~/.stepwright/config.toml`, else
//!    `$STEPWRIGHT_HOME/config.toml`)
//! 3. Merge each explicit file in order
//! 4. Apply `STEPWRIGHT_*` environment overrides for known keys
//! 5. Validate
//! 6. Return `ResolvedConfig`

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use toml::Value;
use tracing::{debug, info};

use crate::bundle::{ConfigProvider, PropertyBundle};
use crate::env::{apply_env_overrides, collect_env_vars};
use crate::error::{ConfigError, ConfigResult};
use crate::merge::{ConfigLayer, FieldSources, merge_layer, record_layer};
use crate::validate;

/// Embedded default configuration.
const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// Maximum allowed config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// Name of the per-user configuration directory under `$HOME`.
const USER_DIR: &str = ".stepwright";

/// Output format for [`ResolvedConfig::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowFormat {
    /// Flat TOML with quoted dotted keys.
    Toml,
    /// Pretty-printed JSON object.
    Json,
}

/// A merged property bundle plus provenance information.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The merged properties.
    pub bundle: PropertyBundle,
    /// Which layer set each property.
    pub field_sources: FieldSources,
    /// Files that contributed, in merge order.
    pub loaded_files: Vec<String>,
}

impl ResolvedConfig {
    /// The layer that set `key`, if any.
    #[must_use]
    pub fn source_of(&self, key: &str) -> Option<&ConfigLayer> {
        self.field_sources.get(key)
    }

    /// Render the merged properties for display.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SerializeError`] if serialization fails.
    pub fn render(&self, format: ShowFormat) -> ConfigResult<String> {
        match format {
            ShowFormat::Toml => toml::to_string(&self.bundle)
                .map_err(|e| ConfigError::SerializeError(e.to_string())),
            ShowFormat::Json => serde_json::to_string_pretty(&self.bundle)
                .map_err(|e| ConfigError::SerializeError(e.to_string())),
        }
    }
}

impl ConfigProvider for ResolvedConfig {
    fn property(&self, key: &str) -> ConfigResult<Option<Value>> {
        self.bundle.property(key)
    }
}

/// Load configuration with the full precedence chain, reading overrides from
/// the process environment.
///
/// `files` are merged in order after the user config; later files win.
/// `home_override` replaces user config discovery: `{home_override}/config.toml`
/// is used as the user layer.
///
/// # Errors
///
/// Returns a [`ConfigError`] if any config file is malformed, an explicit
/// file is missing, or the merged properties fail validation.
pub fn load(files: &[PathBuf], home_override: Option<&Path>) -> ConfigResult<ResolvedConfig> {
    load_with_env(files, home_override, &collect_env_vars())
}

/// Same as [`load`], with an explicit environment snapshot.
///
/// # Errors
///
/// See [`load`].
pub fn load_with_env(
    files: &[PathBuf],
    home_override: Option<&Path>,
    env_vars: &HashMap<String, String>,
) -> ConfigResult<ResolvedConfig> {
    // 1. Embedded defaults.
    let mut merged = PropertyBundle::from_toml_str(DEFAULTS_TOML, "<embedded defaults>")?;
    let mut field_sources = FieldSources::new();
    let mut loaded_files = Vec::new();
    record_layer(&merged, &ConfigLayer::Defaults, &mut field_sources);

    // 2. User config.
    if let Some((overlay, path)) = load_user_layer(home_override, env_vars)? {
        merge_layer(&mut merged, &overlay, &ConfigLayer::User, &mut field_sources);
        loaded_files.push(path.display().to_string());
        info!(path = %path.display(), "loaded user config");
    }

    // 3. Explicit files.
    for path in files {
        let overlay = read_bundle(path)?;
        let count = merge_layer(
            &mut merged,
            &overlay,
            &ConfigLayer::File(path.clone()),
            &mut field_sources,
        );
        loaded_files.push(path.display().to_string());
        info!(path = %path.display(), properties = count, "loaded config file");
    }

    // 4. Environment overrides.
    let env_count = apply_env_overrides(&mut merged, &mut field_sources, env_vars);
    if env_count > 0 {
        debug!(count = env_count, "applied environment variable overrides");
    }

    // 5. Validate.
    validate::validate(&merged)?;

    Ok(ResolvedConfig {
        bundle: merged,
        field_sources,
        loaded_files,
    })
}

/// Load a single file (no layering, no defaults).
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read, parsed, or fails
/// validation.
pub fn load_file(path: &Path) -> ConfigResult<PropertyBundle> {
    let bundle = read_bundle(path)?;
    validate::validate(&bundle)?;
    Ok(bundle)
}

fn load_user_layer(
    home_override: Option<&Path>,
    env_vars: &HashMap<String, String>,
) -> ConfigResult<Option<(PropertyBundle, PathBuf)>> {
    if let Some(h) = home_override {
        // When overridden, treat the path as the .stepwright directory itself.
        let path = h.join("config.toml");
        return Ok(try_load_file(&path)?.map(|overlay| (overlay, path)));
    }

    let user_path = home_directory()?.join(USER_DIR).join("config.toml");
    if let Some(overlay) = try_load_file(&user_path)? {
        return Ok(Some((overlay, user_path)));
    }

    let Some(raw_home) = env_vars.get("STEPWRIGHT_HOME") else {
        return Ok(None);
    };
    match PathBuf::from(raw_home).canonicalize() {
        Ok(dir) if dir.is_dir() => {
            let alt_path = dir.join("config.toml");
            Ok(try_load_file(&alt_path)?.map(|overlay| (overlay, alt_path)))
        },
        _ => {
            tracing::warn!(path = %raw_home, "STEPWRIGHT_HOME is not a directory; ignoring");
            Ok(None)
        },
    }
}

/// Read and parse a file that must exist.
fn read_bundle(path: &Path) -> ConfigResult<PropertyBundle> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_checked(path, &content)
}

/// Try to load a file, returning `None` if the file doesn't exist.
///
/// Uses a single read operation to avoid TOCTOU races (no separate
/// exists/metadata checks before reading).
fn try_load_file(path: &Path) -> ConfigResult<Option<PropertyBundle>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found, skipping");
            return Ok(None);
        },
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.display().to_string(),
                source: e,
            });
        },
    };
    parse_checked(path, &content).map(Some)
}

fn parse_checked(path: &Path, content: &str) -> ConfigResult<PropertyBundle> {
    // Check size after reading to avoid TOCTOU between stat and read.
    if content.len() as u64 > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "config file is {} bytes, exceeding the {} byte limit",
                content.len(),
                MAX_CONFIG_FILE_SIZE
            ),
        });
    }
    PropertyBundle::from_toml_str(content, &path.display().to_string())
}

/// Determine the user's home directory.
fn home_directory() -> ConfigResult<PathBuf> {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys;

    fn no_env() -> HashMap<String, String> {
        HashMap::new()
    }

    #[test]
    fn test_defaults_parse() {
        let bundle = PropertyBundle::from_toml_str(DEFAULTS_TOML, "defaults").unwrap();
        assert_eq!(bundle.get_string(keys::PROXY_SERVER).unwrap().as_deref(), Some(""));
        assert_eq!(bundle.get_int(keys::PROXY_PORT).unwrap(), Some(80));
        assert!(bundle.get_list(keys::HOSTS_TO_PROXY).unwrap().is_empty());
        assert!(bundle.contains_key(keys::STEP_PROVIDER_PKG));
    }

    #[test]
    fn test_load_with_empty_home() {
        let home = tempfile::tempdir().unwrap();
        let resolved = load_with_env(&[], Some(home.path()), &no_env()).unwrap();
        assert!(resolved.loaded_files.is_empty());
        assert_eq!(resolved.source_of(keys::PROXY_PORT), Some(&ConfigLayer::Defaults));
    }

    #[test]
    fn test_layer_precedence() {
        let home = tempfile::tempdir().unwrap();
        std::fs::write(
            home.path().join("config.toml"),
            "[proxy]\nserver = \"user.proxy\"\nport = 3128\n",
        )
        .unwrap();
        let explicit = home.path().join("run.toml");
        std::fs::write(&explicit, "proxy.port = 8080\nhost.to.proxy = [\"internal\"]\n").unwrap();

        let env = HashMap::from([(
            "STEPWRIGHT_PROXY_SERVER".to_owned(),
            "env.proxy".to_owned(),
        )]);
        let resolved = load_with_env(&[explicit.clone()], Some(home.path()), &env).unwrap();

        assert_eq!(
            resolved.get_string(keys::PROXY_SERVER).unwrap().as_deref(),
            Some("env.proxy")
        );
        assert_eq!(resolved.get_int(keys::PROXY_PORT).unwrap(), Some(8080));
        assert_eq!(resolved.get_list(keys::HOSTS_TO_PROXY).unwrap(), vec!["internal"]);
        assert_eq!(
            resolved.source_of(keys::PROXY_SERVER),
            Some(&ConfigLayer::Environment)
        );
        assert_eq!(
            resolved.source_of(keys::PROXY_PORT),
            Some(&ConfigLayer::File(explicit))
        );
        assert_eq!(resolved.loaded_files.len(), 2);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let home = tempfile::tempdir().unwrap();
        let missing = home.path().join("nope.toml");
        let result = load_with_env(&[missing], Some(home.path()), &no_env());
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_invalid_port_fails_validation() {
        let home = tempfile::tempdir().unwrap();
        std::fs::write(home.path().join("config.toml"), "proxy.port = 0\n").unwrap();
        let result = load_with_env(&[], Some(home.path()), &no_env());
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn test_try_load_file_missing() {
        let result = try_load_file(Path::new("/nonexistent/config.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_file_nonexistent() {
        let result = load_file(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_oversized_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("huge.toml");
        // Write a file exceeding 1 MB.
        let data = format!("x = \"{}\"", "a".repeat(1_100_000));
        std::fs::write(&file_path, data).unwrap();

        let result = try_load_file(&file_path);
        assert!(
            matches!(result, Err(ConfigError::ValidationError { .. })),
            "Expected ValidationError for oversized config, got: {result:?}"
        );
    }

    #[test]
    fn test_render_formats() {
        let home = tempfile::tempdir().unwrap();
        let resolved = load_with_env(&[], Some(home.path()), &no_env()).unwrap();
        let as_toml = resolved.render(ShowFormat::Toml).unwrap();
        assert!(as_toml.contains("\"proxy.port\" = 80"));
        let as_json = resolved.render(ShowFormat::Json).unwrap();
        assert!(as_json.contains("\"proxy.port\": 80"));
    }
}
