//! Test harness helpers.

use std::path::{Path, PathBuf};

use stepwright_telemetry::{LogConfig, LogTarget, setup_logging};
use tempfile::TempDir;

/// Set up test logging with the given filter.
///
/// Installs the regular stepwright subscriber writing to the test capture.
/// Safe to call from every test; only the first call installs a subscriber.
///
/// # Example
///
/// ```rust,ignore
/// use stepwright_test::setup_test_logging;
///
/// #[test]
/// fn my_test() {
///     setup_test_logging("stepwright_steps=debug");
///     // ... test code
/// }
/// ```
pub fn setup_test_logging(filter: &str) {
    let _ = setup_logging(&test_log_config(filter));
}

fn test_log_config(filter: &str) -> LogConfig {
    LogConfig::new(filter).with_target(LogTarget::Test)
}

/// Set up test logging with default filter (warn level).
pub fn setup_test_logging_default() {
    setup_test_logging("warn");
}

/// A temporary directory for configuration file fixtures.
#[derive(Debug)]
pub struct TestContext {
    /// Temporary directory for the test.
    pub dir: TempDir,
}

impl TestContext {
    /// Create a new test context.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the temporary directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the test directory, creating parents.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    #[must_use]
    pub fn create_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Write `config.toml` into the test directory, laid out as a
    /// stepwright home.
    #[must_use]
    pub fn create_home_config(&self, content: &str) -> PathBuf {
        self.create_file("config.toml", content)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_targets_capture() {
        let config = test_log_config("stepwright_steps=debug");
        assert_eq!(config.target, LogTarget::Test);
        assert_eq!(config.filter_string(), "stepwright_steps=debug");
    }

    #[test]
    fn test_repeated_setup_is_harmless() {
        setup_test_logging("warn");
        setup_test_logging_default();
        tracing::warn!(step = "login", "logged through the test capture");
    }

    #[test]
    fn test_context_files() {
        let ctx = TestContext::new();
        let path = ctx.create_file("nested/dir/steps.toml", "a = 1");
        assert!(path.starts_with(ctx.path()));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "a = 1");
        assert!(ctx.create_home_config("").ends_with("config.toml"));
    }
}
