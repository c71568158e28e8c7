//! 配置模块
//!
//! 支持从 JSON 文件加载看板配置，后端地址可由环境变量覆盖

use anyhow::{anyhow, Context};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// 覆盖后端地址的环境变量名
pub const API_BASE_ENV: &str = "STOCKSHARK_API_BASE";

/// 后端 API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// 后端 API 根地址（包含 /api 前缀）
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// 连接超时时间（秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

/// 看板行为配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// 错误提示自动消失的时间（秒）
    #[serde(default = "default_banner_ttl")]
    pub banner_ttl_secs: u64,
    /// 走势图回看的自然日天数
    #[serde(default = "default_history_days")]
    pub history_days: i64,
    /// 判断交易日所用的时区
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 后端 API 配置
    #[serde(default)]
    pub api: ApiConfig,
    /// 看板行为配置
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

// 默认值函数
fn default_base_url() -> String { "http://localhost:5001/api".to_string() }
fn default_timeout() -> u64 { 30 }
fn default_connect_timeout() -> u64 { 10 }
fn default_banner_ttl() -> u64 { 5 }
fn default_history_days() -> i64 { 90 }
fn default_timezone() -> String { "Asia/Shanghai".to_string() }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            banner_ttl_secs: default_banner_ttl(),
            history_days: default_history_days(),
            timezone: default_timezone(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl DashboardConfig {
    pub fn banner_ttl(&self) -> Duration {
        Duration::from_secs(self.banner_ttl_secs)
    }

    /// 解析时区名称，如 "Asia/Shanghai"
    pub fn tz(&self) -> anyhow::Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow!("无效的时区 {}: {}", self.timezone, e))
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("读取配置文件 {} 失败", path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 加载配置，优先从文件，失败则使用默认值；随后应用环境变量覆盖
    pub fn load() -> Self {
        let mut config = Self::load_file_or_default();

        if let Ok(base_url) = env::var(API_BASE_ENV) {
            if !base_url.trim().is_empty() {
                log::info!("使用环境变量 {} 指定的后端地址: {}", API_BASE_ENV, base_url);
                config.api.base_url = base_url.trim().to_string();
            }
        }

        config
    }

    fn load_file_or_default() -> Self {
        let config_paths = ["config.json", "config/config.json"];

        for path in config_paths {
            if Path::new(path).exists() {
                match Self::from_file(path) {
                    Ok(config) => {
                        log::info!("从 {} 加载配置成功", path);
                        return config;
                    }
                    Err(e) => {
                        log::warn!("加载配置文件 {} 失败: {}", path, e);
                    }
                }
            }
        }

        log::info!("使用默认配置");
        Self::default()
    }
}
