use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

use crate::errors::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticConfig {
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Suffix every registration key carries, e.g. `.page`.
    #[serde(default = "default_page_suffix")]
    pub page_suffix: String,
    /// Basename tried for the directory-index convention.
    #[serde(default = "default_index_basename")]
    pub index_basename: String,
    /// Log the full registry key listing when a lookup misses.
    #[serde(default = "default_list_on_miss")]
    pub list_on_miss: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    /// Append to this file instead of stdout when set and non-empty.
    #[serde(default)]
    pub file: Option<String>,
}

/// 日志输出格式
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => {
                let valid: Vec<String> =
                    LogFormat::iter().map(|v| v.as_ref().to_string()).collect();
                Err(format!(
                    "Invalid log format: '{}'. Valid: {}",
                    s,
                    valid.join(", ")
                ))
            }
        }
    }
}

// Default value functions
fn default_page_suffix() -> String {
    ".page".to_string()
}

fn default_index_basename() -> String {
    "index".to_string()
}

fn default_list_on_miss() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            page_suffix: default_page_suffix(),
            index_basename: default_index_basename(),
            list_on_miss: default_list_on_miss(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            file: None,
        }
    }
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            resolver: ResolverConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl StaticConfig {
    /// Load `pageloader.toml` (optional) overlaid with `PL`-prefixed
    /// environment variables. Any load error falls back to defaults so a
    /// broken config never keeps the resolver from starting.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();

        match Self::try_load() {
            Ok(config) => config,
            Err(e) => {
                eprintln!("[ERROR] {}", e.format_simple());
                Self::default()
            }
        }
    }

    pub fn try_load() -> Result<Self> {
        use config::{Config, Environment, File};
        use crate::errors::PageloaderError;

        let path = "pageloader.toml";

        let builder = Config::builder()
            // 1. 从 TOML 文件加载（可选）
            .add_source(File::with_name(path).required(false))
            // 2. 从环境变量覆盖，前缀 PL，分隔符 __
            .add_source(
                Environment::with_prefix("PL")
                    .separator("__")
                    .try_parsing(true),
            );

        let settings = builder
            .build()
            .map_err(|e| PageloaderError::config(format!("failed to build config: {e}")))?;
        settings
            .try_deserialize::<StaticConfig>()
            .map_err(|e| PageloaderError::config(format!("failed to deserialize config: {e}")))
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// Write the sample config to a file, for `--init`-style tooling.
    pub fn write_sample_config(path: &str) -> Result<()> {
        std::fs::write(path, Self::generate_sample_config())?;
        Ok(())
    }
}
