//! 负责处理插件的持久化配置。
//!
//! 配置以 JSON 格式保存在用户配置目录下，缺失的字段使用默认值填充。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{MusicSourceError, Result};

const CONFIG_DIR_NAME: &str = "music-plugins-rs";
const CONFIG_FILE_NAME: &str = "config.json";

/// 插件请求时默认使用的桌面浏览器 User-Agent。
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// 所有插件共享的配置。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PluginConfig {
    /// 单次 HTTP 请求的超时时间（秒）。
    pub timeout_secs: u64,
    /// 请求时携带的 User-Agent。
    pub user_agent: String,
    /// QQ 音乐插件的配置。
    pub qq: QqConfig,
    /// 网易云音乐插件的配置。
    pub netease: NeteaseConfig,
    /// Spotify 插件的配置。
    pub spotify: SpotifyConfig,
}

/// QQ 音乐插件的配置项。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct QqConfig {
    /// API 的根地址。
    pub api_base: String,
    /// 分页接口每页的条目数。
    pub page_size: u32,
}

/// 网易云音乐插件的配置项。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct NeteaseConfig {
    /// 搜索请求携带的 `X-Real-IP` 头。
    pub real_ip: String,
}

/// Spotify 插件的配置项。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SpotifyConfig {
    /// 原样透传的 Bearer Token，本库不负责获取或刷新。
    pub token: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            qq: QqConfig::default(),
            netease: NeteaseConfig::default(),
            spotify: SpotifyConfig::default(),
        }
    }
}

impl Default for QqConfig {
    fn default() -> Self {
        Self {
            api_base: "https://c.y.qq.com".to_string(),
            page_size: 20,
        }
    }
}

impl Default for NeteaseConfig {
    fn default() -> Self {
        Self {
            real_ip: "116.25.146.177".to_string(),
        }
    }
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            token: "[YOUR_CLIENT_TOKEN]".to_string(),
        }
    }
}

/// 获取应用配置目录下指定文件的完整路径。
///
/// # 参数
/// * `filename` - 目标配置文件的名称，例如 "config.json"。
pub fn get_config_file_path(filename: &str) -> Result<PathBuf> {
    if let Some(mut config_dir) = dirs::config_dir() {
        config_dir.push(CONFIG_DIR_NAME);
        fs::create_dir_all(&config_dir)?;
        config_dir.push(filename);
        Ok(config_dir)
    } else {
        Err(MusicSourceError::Config("无法找到用户配置目录".to_string()))
    }
}

/// 从指定路径加载配置。文件不存在时返回默认配置。
pub fn load_config_from(path: &Path) -> Result<PluginConfig> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let config: PluginConfig = serde_json::from_str(&content).map_err(|e| {
                MusicSourceError::Config(format!("解析配置文件 {} 失败: {e}", path.display()))
            })?;
            info!("已从 {} 加载插件配置。", path.display());
            Ok(config)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("配置文件 {} 不存在，使用默认配置。", path.display());
            Ok(PluginConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// 将配置序列化为 JSON 并保存到指定路径。
pub fn save_config_to(path: &Path, config: &PluginConfig) -> Result<()> {
    let content = serde_json::to_string_pretty(config)?;
    fs::write(path, content)?;
    info!("插件配置已保存到 {}。", path.display());
    Ok(())
}

/// 从用户配置目录加载配置。
pub fn load_config() -> Result<PluginConfig> {
    load_config_from(&get_config_file_path(CONFIG_FILE_NAME)?)
}

/// 将配置保存到用户配置目录。
pub fn save_config(config: &PluginConfig) -> Result<()> {
    save_config_to(&get_config_file_path(CONFIG_FILE_NAME)?, config)
}
