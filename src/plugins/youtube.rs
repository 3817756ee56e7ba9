//! 实现了 YouTube 的插件。
//!
//! 搜索走 `yt.lemnoslife.com` 的无密钥镜像，播放链接为视频页地址。
//! 该接口不返回视频时长。

use async_trait::async_trait;
use tracing::info;

use crate::{
    context::PluginContext,
    error::Result,
    model::{
        generic::{MediaSource, Track},
        page::{Page, Quality, SearchItem, SearchType},
    },
    plugins::{Operation, Plugin, PluginInfo, fetch_json, single_track_page},
};

const SEARCH_URL: &str = "https://yt.lemnoslife.com/search";
const WATCH_URL: &str = "https://www.youtube.com/watch";

/// 搜索结果中代表视频的 `id.kind`。
pub const VIDEO_KIND: &str = "youtube#video";

const INFO: PluginInfo = PluginInfo::basic("youtube", "YouTube音乐", "1.0.0");
const OPERATIONS: &[Operation] = &[Operation::Search, Operation::GetMediaSource];

/// YouTube 的插件实现。
#[derive(Debug, Clone)]
pub struct YouTubeMusic {
    ctx: PluginContext,
}

impl YouTubeMusic {
    /// 创建插件实例。
    pub fn new(ctx: PluginContext) -> Self {
        Self { ctx }
    }

    /// 搜索视频，频道与播放列表会被丢弃。
    pub async fn search_tracks(&self, keyword: &str) -> Result<Vec<Track>> {
        let request = self
            .ctx
            .http()
            .get(SEARCH_URL)
            .query(&[("q", keyword), ("part", "snippet")]);

        let response: models::SearchResponse = fetch_json(request, INFO.name).await?;
        let tracks = videos_to_tracks(response.items);

        info!(keyword, count = tracks.len(), "YouTube 搜索完成");
        Ok(tracks)
    }
}

/// 只保留视频条目并转换为 [`Track`]。
pub fn videos_to_tracks(items: Vec<models::SearchItem>) -> Vec<Track> {
    items
        .into_iter()
        .filter_map(|item| {
            let video_id = item.id.video_id.filter(|_| item.id.kind == VIDEO_KIND)?;
            Some(Track {
                id: video_id,
                title: item.snippet.title,
                artist: item.snippet.channel_title,
                ..Default::default()
            })
        })
        .collect()
}

/// 视频页地址。
pub fn watch_url(video_id: &str) -> String {
    format!("{WATCH_URL}?v={video_id}")
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Plugin for YouTubeMusic {
    fn info(&self) -> &PluginInfo {
        &INFO
    }

    fn operations(&self) -> &'static [Operation] {
        OPERATIONS
    }

    async fn search(
        &self,
        query: &str,
        _page: u32,
        search_type: SearchType,
    ) -> Result<Page<SearchItem>> {
        if search_type != SearchType::Music {
            return Ok(Page::end());
        }
        Ok(single_track_page(self.search_tracks(query).await?))
    }

    async fn get_media_source(&self, track: &Track, _quality: Quality) -> Result<MediaSource> {
        Ok(MediaSource::from_url(watch_url(&track.id)))
    }
}

/// YouTube 搜索接口的响应模型。
pub mod models {
    use serde::Deserialize;

    /// 搜索接口的顶层响应。
    #[derive(Debug, Deserialize)]
    pub struct SearchResponse {
        /// 搜索结果，混合了视频、频道与播放列表。
        #[serde(default)]
        pub items: Vec<SearchItem>,
    }

    /// 单个搜索结果。
    #[derive(Debug, Deserialize)]
    pub struct SearchItem {
        /// 资源标识。
        pub id: ResourceId,
        /// 摘要信息。
        pub snippet: Snippet,
    }

    /// 资源标识，只有视频才有 `videoId`。
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResourceId {
        /// 资源类型，例如 `youtube#video`。
        pub kind: String,
        /// 视频 ID。
        pub video_id: Option<String>,
    }

    /// 资源摘要。
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Snippet {
        /// 标题。
        #[serde(default)]
        pub title: String,
        /// 频道名，作为艺术家。
        #[serde(default)]
        pub channel_title: String,
    }
}
