//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Locate the TOML configuration file / 定位 TOML 配置文件
//! - ✅ Parse TOML into AppConfig DTO / 将 TOML 解析为 AppConfig DTO
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No default value logic / 禁止默认值逻辑**
//!
//! The file is optional. A missing file is an empty config; a malformed one
//! is logged and treated as empty.

use std::path::{Path, PathBuf};

use anyhow::Context;
use pp_core::{AppConfig, AppDirs};
use tracing::{debug, warn};

/// Env var holding an explicit config file path.
pub const CONFIG_ENV: &str = "PP_CONFIG";

/// `PP_CONFIG` when set, otherwise `<config>/config.toml`.
pub fn resolve_config_path(app_dirs: &AppDirs) -> PathBuf {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => app_dirs.config_file(),
    }
}

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

pub fn load_config_or_default(config_path: &Path) -> AppConfig {
    if !config_path.exists() {
        debug!(path = %config_path.display(), "no config file, using defaults");
        return AppConfig::empty();
    }
    match load_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            warn!(
                path = %config_path.display(),
                error = %format!("{err:#}"),
                "ignoring config file"
            );
            AppConfig::empty()
        }
    }
}
