//! 用于演示 `music-plugins` 库的核心功能。
//!
//! ## 如何运行
//!
//! ```bash
//! cargo run --package music_plugins_rs --example demo -- 晴天
//! ```

use music_plugins_rs::{
    MusicSources, Operation, PluginContext, Quality, SearchItem, SearchType, error::Result,
};

use tracing::{Level, error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let keyword = std::env::args().nth(1).unwrap_or_else(|| "晴天".to_string());

    info!("正在初始化...");
    let sources = MusicSources::new(PluginContext::with_defaults()?);

    for plugin in sources.plugins() {
        match plugin.search(&keyword, 1, SearchType::Music).await {
            Ok(page) => {
                info!(
                    "[{}] 找到 {} 首歌曲 (最后一页: {})",
                    plugin.info().platform,
                    page.data.len(),
                    page.is_end
                );
                for item in page.data.iter().take(3) {
                    if let SearchItem::Music(track) = item {
                        info!("    {} - {} ({})", track.title, track.artist, track.id);
                    }
                }
            }
            Err(e) => warn!("[{}] 搜索失败: {}", plugin.info().platform, e),
        }
    }

    let Some(qq) = sources.plugin("qq") else {
        error!("未找到 QQ 音乐插件。");
        return Ok(());
    };

    let page = qq.search(&keyword, 1, SearchType::Music).await?;
    let Some(track) = page.data.first().and_then(SearchItem::as_track) else {
        warn!("QQ 音乐没有找到 '{}'，程序退出。", keyword);
        return Ok(());
    };

    info!("选择了 '{}' - '{}'。", track.title, track.artist);

    if qq.supports(Operation::GetLyric) {
        let lyric = qq.get_lyric(track).await?;
        info!(
            "歌词共 {} 行，翻译共 {} 行。",
            lyric.raw_lrc.lines().count(),
            lyric.translation.lines().count()
        );
    }

    match qq.get_media_source(track, Quality::High).await {
        Ok(source) => info!("音源: {}", source.url),
        Err(e) => warn!("获取音源失败: {}", e),
    }

    let groups = qq.get_top_lists().await?;
    for group in &groups {
        info!("榜单分组 '{}': {} 个榜单", group.title, group.data.len());
    }

    Ok(())
}
