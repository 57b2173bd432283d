// SPDX-License-Identifier: MPL-2.0
//! Centralized path management for application directories.
//!
//! # Path Resolution Order
//!
//! Paths are resolved in the following priority order:
//! 1. **Explicit override** - parameter to `_with_override()` functions (for tests)
//! 2. **CLI arguments** (`--data-dir`, `--config-dir`) - set via [`init_cli_overrides`]
//! 3. **Environment variables** (`AUTHBAR_DATA_DIR`, `AUTHBAR_CONFIG_DIR`)
//! 4. **Platform default** - via `dirs` crate, with the application name appended
//!
//! The data directory holds the shared session store (token, cached profile,
//! acting user). Every running instance that resolves the same data directory
//! sees the same session, which is what cross-instance sync relies on.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
const APP_NAME: &str = "AuthBar";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "AUTHBAR_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "AUTHBAR_CONFIG_DIR";

/// CLI overrides, set once at startup.
static CLI_OVERRIDES: OnceLock<CliOverrides> = OnceLock::new();

#[derive(Debug, Default)]
struct CliOverrides {
    data_dir: Option<PathBuf>,
    config_dir: Option<PathBuf>,
}

/// Records the `--data-dir` / `--config-dir` arguments.
///
/// Returns `false` when overrides were already recorded; the first call wins.
pub fn init_cli_overrides(data_dir: Option<String>, config_dir: Option<String>) -> bool {
    CLI_OVERRIDES
        .set(CliOverrides {
            data_dir: data_dir.map(PathBuf::from),
            config_dir: config_dir.map(PathBuf::from),
        })
        .is_ok()
}

fn env_dir(var: &str) -> Option<PathBuf> {
    std::env::var(var)
        .ok()
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn resolve(
    override_path: Option<PathBuf>,
    cli: Option<PathBuf>,
    env_var: &str,
    platform: Option<PathBuf>,
) -> Option<PathBuf> {
    override_path
        .or(cli)
        .or_else(|| env_dir(env_var))
        .or_else(|| platform.map(|base| base.join(APP_NAME)))
}

/// Returns the application data directory path.
///
/// Returns `None` if the data directory cannot be determined (rare edge case).
pub fn get_app_data_dir() -> Option<PathBuf> {
    get_app_data_dir_with_override(None)
}

/// Returns the application data directory path with an optional override.
pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    let cli = CLI_OVERRIDES.get().and_then(|o| o.data_dir.clone());
    resolve(override_path, cli, ENV_DATA_DIR, dirs::data_dir())
}

/// Returns the application config directory path.
///
/// This directory holds `settings.toml`.
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Returns the application config directory path with an optional override.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    let cli = CLI_OVERRIDES.get().and_then(|o| o.config_dir.clone());
    resolve(override_path, cli, ENV_CONFIG_DIR, dirs::config_dir())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to prevent parallel tests from interfering with each other's env vars
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn app_data_dir_contains_app_name() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::remove_var(ENV_DATA_DIR);

        if let Some(path) = get_app_data_dir() {
            assert!(path.to_string_lossy().contains(APP_NAME));
        }
    }

    #[test]
    fn override_path_takes_precedence_for_config_dir() {
        let override_path = PathBuf::from("/custom/config/path");
        let result = get_app_config_dir_with_override(Some(override_path.clone()));
        assert_eq!(result, Some(override_path));
    }

    #[test]
    fn env_var_overrides_default_data_dir() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_DATA_DIR, "/test/data/dir");

        let result = get_app_data_dir();
        assert_eq!(result, Some(PathBuf::from("/test/data/dir")));

        std::env::remove_var(ENV_DATA_DIR);
    }

    #[test]
    fn empty_env_var_uses_default() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_CONFIG_DIR, "");

        if let Some(path) = get_app_config_dir() {
            assert!(path.to_string_lossy().contains(APP_NAME));
        }

        std::env::remove_var(ENV_CONFIG_DIR);
    }

    #[test]
    fn resolve_prefers_cli_over_env_and_platform() {
        let resolved = resolve(
            None,
            Some(PathBuf::from("/cli")),
            "AUTHBAR_TEST_UNSET_VARIABLE",
            Some(PathBuf::from("/platform")),
        );
        assert_eq!(resolved, Some(PathBuf::from("/cli")));
    }

    #[test]
    fn resolve_appends_app_name_to_platform_dir() {
        let resolved = resolve(
            None,
            None,
            "AUTHBAR_TEST_UNSET_VARIABLE",
            Some(PathBuf::from("/platform")),
        );
        assert_eq!(resolved, Some(PathBuf::from("/platform").join(APP_NAME)));
    }
}
