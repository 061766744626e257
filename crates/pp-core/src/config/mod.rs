//! # Configuration DTO / 配置数据
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Define configuration data structures / 定义配置数据结构
//! - ✅ Provide TOML → DTO mapping / 提供 TOML → DTO 的映射
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No path resolution or existence checks / 禁止路径解析与存在性检查**
//! ❌ **No default value calculation / 禁止默认值计算**
//!
//! Absent keys stay absent (`None` / empty). The bootstrap layer decides what
//! an absent key means.

use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
/// 应用配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Override for the preview cache directory.
    pub cache_dir: Option<PathBuf>,

    /// Override for the preferences document.
    pub preferences_file: Option<PathBuf>,

    /// Ordered strategy names. Empty means "not configured".
    pub preview_strategies: Vec<String>,

    /// Executable of the external presentation application.
    pub automation_program: Option<String>,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    /// 从 TOML 值创建 AppConfig
    ///
    /// Non-string entries in `[preview] strategies` are ignored.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let str_at = |table: &str, key: &str| {
            toml_value
                .get(table)
                .and_then(|t| t.get(key))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };

        let preview_strategies = toml_value
            .get("preview")
            .and_then(|p| p.get("strategies"))
            .and_then(|v| v.as_array())
            .map(|values| {
                values
                    .iter()
                    .filter_map(|v| v.as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            cache_dir: str_at("paths", "cache_dir").map(PathBuf::from),
            preferences_file: str_at("paths", "preferences_file").map(PathBuf::from),
            preview_strategies,
            automation_program: str_at("automation", "program"),
        })
    }

    /// Create empty AppConfig (nothing configured)
    /// 创建空的 AppConfig
    pub fn empty() -> Self {
        Self::default()
    }
}
