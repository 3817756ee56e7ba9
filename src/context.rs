//! 插件运行所需的能力上下文。
//!
//! 宿主构造一个 `PluginContext` 并交给各个插件，插件通过它发起 HTTP 请求、读取配置。

use std::sync::Arc;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use reqwest::Client;

use crate::{config::PluginConfig, error::Result};

/// 插件共享的 HTTP 客户端与配置。克隆的开销很小。
#[derive(Debug, Clone)]
pub struct PluginContext {
    http_client: Client,
    config: Arc<PluginConfig>,
}

impl PluginContext {
    /// 根据配置创建上下文，构建带超时的 HTTP 客户端。
    pub fn new(config: PluginConfig) -> Result<Self> {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        let http_client = builder.build()?;

        Ok(Self {
            http_client,
            config: Arc::new(config),
        })
    }

    /// 使用默认配置创建上下文。
    pub fn with_defaults() -> Result<Self> {
        Self::new(PluginConfig::default())
    }

    /// 共享的 HTTP 客户端。
    pub fn http(&self) -> &Client {
        &self.http_client
    }

    /// 当前配置。
    pub fn config(&self) -> &PluginConfig {
        &self.config
    }
}
