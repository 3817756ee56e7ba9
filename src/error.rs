//! 定义了整个 `music-plugins` 库的错误类型 `MusicSourceError`。

use std::io;
use thiserror::Error;

/// `music-plugins` 库的通用错误枚举。
#[derive(Error, Debug)]
pub enum MusicSourceError {
    /// 通用的 anyhow 错误
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    /// 网络请求失败 (源自 `reqwest::Error`)
    #[error("网络请求失败: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// JSON 解析失败 (源自 `serde_json::Error`)
    #[error("JSON 解析失败: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O 错误 (源自 `io::Error`)
    #[error("I/O 错误: {0}")]
    Io(#[from] io::Error),

    /// API 返回错误或空数据
    #[error("API 为 `{0}` 返回了错误或空数据")]
    ApiError(String),

    /// 无法从链接中解析出资源 ID
    #[error("无效的链接: '{0}'")]
    InvalidUrl(String),

    /// 平台没有返回可播放的音源
    #[error("未找到可播放的音源: {0}")]
    MediaNotFound(String),

    /// 插件未实现该功能
    #[error("插件 '{platform}' 不支持操作 `{operation}`")]
    NotSupported {
        /// 插件名称。
        platform: &'static str,
        /// 操作名称。
        operation: &'static str,
    },

    /// 配置文件读取或保存失败
    #[error("配置错误: {0}")]
    Config(String),

    /// 内部错误
    #[error("内部错误: {0}")]
    Internal(String),
}

/// `MusicSourceError` 的 `Result` 类型别名，方便在函数签名中使用。
pub type Result<T> = std::result::Result<T, MusicSourceError>;
