#![warn(missing_docs)]

//! # Music Plugins RS
//!
//! 音乐聚合器的音源插件集合。每个插件把一个第三方音乐平台的 HTTP API
//! 转换成统一的数据结构：搜索、获取音源，以及（仅 QQ 音乐插件）
//! 歌词、专辑、歌单、排行榜与链接导入。
//!
//! ## 内置插件
//!
//! | 名称 | 平台 | 功能 |
//! |------|------|------|
//! | `qq` | QQ音乐 | 全部操作 |
//! | `qq-lite` | QQ音乐 | 搜索 |
//! | `netease` | 网易云音乐 | 搜索、音源 |
//! | `kugou` | 酷狗音乐 | 搜索、音源 |
//! | `bilibili` | B站音频 | 搜索、音源 |
//! | `spotify` | Spotify | 搜索、30 秒试听 |
//! | `youtube` | YouTube音乐 | 搜索、视频页链接 |
//!
//! ## 示例
//!
//! ```rust,no_run
//! use music_plugins_rs::{MusicSources, PluginContext, SearchType};
//!
//! async {
//!     let ctx = PluginContext::with_defaults().unwrap();
//!     let sources = MusicSources::new(ctx);
//!
//!     let qq = sources.plugin("qq").unwrap();
//!     match qq.search("晴天", 1, SearchType::Music).await {
//!         Ok(page) => println!("找到 {} 首歌曲，是否最后一页: {}", page.data.len(), page.is_end),
//!         Err(e) => eprintln!("搜索失败: {}", e),
//!     }
//! };
//! ```
pub mod config;
pub mod context;
pub mod error;
pub mod model;
pub mod plugins;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use crate::{
    config::PluginConfig,
    context::PluginContext,
    error::{MusicSourceError, Result},
    model::{
        generic::{Album, Artist, Lyric, MediaSource, Sheet, TopListGroup, TopListItem, Track},
        page::{DetailPage, Page, Quality, SearchItem, SearchType},
    },
    plugins::{Operation, Plugin, PluginInfo},
};

use crate::plugins::{
    bilibili::BilibiliAudio, kugou::KugouMusic, netease::NeteaseMusic, qq::QQMusic,
    qq_lite::QQMusicLite, spotify::Spotify, youtube::YouTubeMusic,
};

// ==========================================================
//  顶层 API
// ==========================================================

/// 所有内置插件的集合，是宿主与本库交互的主要入口点。
pub struct MusicSources {
    plugins: Vec<Box<dyn Plugin>>,
}

impl MusicSources {
    /// 用同一个上下文创建所有内置插件。
    pub fn new(ctx: PluginContext) -> Self {
        let plugins: Vec<Box<dyn Plugin>> = vec![
            Box::new(QQMusic::new(ctx.clone())),
            Box::new(QQMusicLite::new(ctx.clone())),
            Box::new(NeteaseMusic::new(ctx.clone())),
            Box::new(KugouMusic::new(ctx.clone())),
            Box::new(BilibiliAudio::new(ctx.clone())),
            Box::new(Spotify::new(ctx.clone())),
            Box::new(YouTubeMusic::new(ctx)),
        ];

        for plugin in &plugins {
            tracing::debug!(
                "[Main] 插件 '{}' ({}) 已加载。",
                plugin.name(),
                plugin.info().platform
            );
        }

        Self { plugins }
    }

    /// 读取配置文件并创建所有内置插件。
    pub fn from_config_file() -> Result<Self> {
        let config = config::load_config()?;
        Ok(Self::new(PluginContext::new(config)?))
    }

    /// 所有插件，顺序固定。
    pub fn plugins(&self) -> &[Box<dyn Plugin>] {
        &self.plugins
    }

    /// 按名称查找插件，例如 `"qq"`、`"netease"`。
    pub fn plugin(&self, name: &str) -> Option<&dyn Plugin> {
        self.plugins
            .iter()
            .find(|p| p.name() == name)
            .map(|p| p.as_ref())
    }

    /// 实现了某个操作的插件。
    pub fn supporting(&self, operation: Operation) -> impl Iterator<Item = &dyn Plugin> {
        self.plugins
            .iter()
            .map(|p| p.as_ref())
            .filter(move |p| p.supports(operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources() -> MusicSources {
        MusicSources::new(PluginContext::with_defaults().unwrap())
    }

    #[test]
    fn test_all_plugins_are_registered() {
        let sources = sources();
        let names: Vec<&str> = sources.plugins().iter().map(|p| p.name()).collect();
        assert_eq!(
            names,
            ["qq", "qq-lite", "netease", "kugou", "bilibili", "spotify", "youtube"]
        );
    }

    #[test]
    fn test_lookup_by_name() {
        let sources = sources();
        assert_eq!(sources.plugin("kugou").map(|p| p.info().platform), Some("酷狗音乐"));
        assert!(sources.plugin("tidal").is_none());
    }

    #[test]
    fn test_supporting() {
        let sources = sources();
        let lyric: Vec<&str> = sources
            .supporting(Operation::GetLyric)
            .map(|p| p.name())
            .collect();
        assert_eq!(lyric, ["qq"]);

        assert_eq!(sources.supporting(Operation::Search).count(), 7);
        assert_eq!(sources.supporting(Operation::GetMediaSource).count(), 6);
    }
}
