//! 实现了 Spotify 的插件。
//!
//! 只能拿到 30 秒的试听片段。访问令牌来自配置文件中的 `spotify.token`。

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use tracing::info;

use crate::{
    context::PluginContext,
    error::{MusicSourceError, Result},
    model::{
        generic::{MediaSource, Track},
        page::{Page, Quality, SearchItem, SearchType},
    },
    plugins::{Operation, Plugin, PluginInfo, fetch_json, single_track_page},
};

const SEARCH_URL: &str = "https://api.spotify.com/v1/search";

/// 试听地址在 [`Track::extra`] 中的键名。
pub const PREVIEW_URL_KEY: &str = "preview_url";

const INFO: PluginInfo = PluginInfo::basic("spotify", "Spotify", "1.0.0");
const OPERATIONS: &[Operation] = &[Operation::Search, Operation::GetMediaSource];

/// Spotify 的插件实现。
#[derive(Debug, Clone)]
pub struct Spotify {
    ctx: PluginContext,
}

impl Spotify {
    /// 创建插件实例。
    pub fn new(ctx: PluginContext) -> Self {
        Self { ctx }
    }

    /// 搜索单曲。
    pub async fn search_tracks(&self, keyword: &str) -> Result<Vec<Track>> {
        let token = &self.ctx.config().spotify.token;
        let request = self
            .ctx
            .http()
            .get(SEARCH_URL)
            .query(&[("q", keyword), ("type", "track")])
            .header(AUTHORIZATION, format!("Bearer {token}"));

        let response: models::SearchResponse = fetch_json(request, INFO.name).await?;
        let tracks: Vec<Track> = response
            .tracks
            .map(|t| t.items)
            .unwrap_or_default()
            .into_iter()
            .map(Track::from)
            .collect();

        info!(keyword, count = tracks.len(), "Spotify 搜索完成");
        Ok(tracks)
    }
}

/// 读取歌曲的试听地址。
pub fn preview_url(track: &Track) -> Option<&str> {
    track
        .extra
        .get(PREVIEW_URL_KEY)
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Plugin for Spotify {
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
        preview_url(track)
            .map(MediaSource::from_url)
            .ok_or_else(|| MusicSourceError::MediaNotFound(format!("歌曲 {} 没有试听片段", track.id)))
    }
}

impl From<models::SpotifyTrack> for Track {
    fn from(item: models::SpotifyTrack) -> Self {
        let mut track = Self {
            id: item.id,
            title: item.name,
            artist: item
                .artists
                .into_iter()
                .next()
                .map(|a| a.name)
                .unwrap_or_default(),
            duration: item.duration_ms,
            ..Default::default()
        };
        if let Some(url) = item.preview_url {
            track
                .extra
                .insert(PREVIEW_URL_KEY.to_string(), Value::String(url));
        }
        track
    }
}

/// Spotify Web API 搜索接口的响应模型。
pub mod models {
    use serde::Deserialize;

    /// 搜索接口的顶层响应。
    #[derive(Debug, Deserialize)]
    pub struct SearchResponse {
        /// 单曲结果，只请求了 `type=track` 时存在。
        pub tracks: Option<TrackPaging>,
    }

    /// 单曲结果分页。
    #[derive(Debug, Deserialize)]
    pub struct TrackPaging {
        /// 当前页的单曲。
        #[serde(default)]
        pub items: Vec<SpotifyTrack>,
    }

    /// 单曲。
    #[derive(Debug, Deserialize)]
    pub struct SpotifyTrack {
        /// Base62 编码的曲目 ID。
        pub id: String,
        /// 曲名。
        pub name: String,
        /// 艺术家列表。
        #[serde(default)]
        pub artists: Vec<SpotifyArtist>,
        /// 时长，单位为毫秒。
        pub duration_ms: Option<u64>,
        /// 30 秒试听地址，很多曲目没有。
        pub preview_url: Option<String>,
    }

    /// 艺术家。
    #[derive(Debug, Deserialize)]
    pub struct SpotifyArtist {
        /// 艺术家名称。
        pub name: String,
    }
}
