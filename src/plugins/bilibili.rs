//! 实现了 B 站音频区的插件。

use async_trait::async_trait;
use tracing::{info, warn};

use crate::{
    context::PluginContext,
    error::{MusicSourceError, Result},
    model::{
        generic::{MediaSource, Track},
        page::{Page, Quality, SearchItem, SearchType},
    },
    plugins::{Operation, Plugin, PluginInfo, fetch_json, single_track_page},
};

const SEARCH_URL: &str = "https://api.bilibili.com/audio/music-service-c/s";
const MEDIA_URL: &str = "https://www.bilibili.com/audio/music-service-c/web/url";

const INFO: PluginInfo = PluginInfo::basic("bilibili", "B站音频", "1.0.0");
const OPERATIONS: &[Operation] = &[Operation::Search, Operation::GetMediaSource];

/// B 站音频的插件实现。
#[derive(Debug, Clone)]
pub struct BilibiliAudio {
    ctx: PluginContext,
}

impl BilibiliAudio {
    /// 创建插件实例。
    pub fn new(ctx: PluginContext) -> Self {
        Self { ctx }
    }

    /// 搜索音频。
    pub async fn search_tracks(&self, keyword: &str) -> Result<Vec<Track>> {
        let request = self
            .ctx
            .http()
            .get(SEARCH_URL)
            .query(&[("search_type", "music"), ("keyword", keyword)]);

        let response: models::ApiResponse<models::SearchData> =
            fetch_json(request, INFO.name).await?;
        let tracks: Vec<Track> = response
            .data
            .map(|d| d.result)
            .unwrap_or_default()
            .into_iter()
            .map(Track::from)
            .collect();

        info!(keyword, count = tracks.len(), "B站音频搜索完成");
        Ok(tracks)
    }

    /// 获取音频的第一个 CDN 地址。
    pub async fn get_cdn_url(&self, sid: &str) -> Result<String> {
        let request = self.ctx.http().get(MEDIA_URL).query(&[("sid", sid)]);
        let response: models::ApiResponse<models::UrlData> = fetch_json(request, INFO.name).await?;

        first_cdn(response.data).ok_or_else(|| {
            warn!(sid, "B站音频没有可用的 CDN 地址");
            MusicSourceError::MediaNotFound(format!("B站音频 {sid} 没有可用的 CDN 地址"))
        })
    }
}

/// 取出响应中第一个非空的 CDN 地址。
pub fn first_cdn(data: Option<models::UrlData>) -> Option<String> {
    data?.cdns.into_iter().find(|url| !url.is_empty())
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Plugin for BilibiliAudio {
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
        let url = self.get_cdn_url(&track.id).await?;
        Ok(MediaSource::from_url(url))
    }
}

impl From<models::AudioItem> for Track {
    fn from(item: models::AudioItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            artist: item.author,
            duration: item.duration.map(|secs| secs.saturating_mul(1000)),
            ..Default::default()
        }
    }
}

/// B 站音频接口的响应模型。
pub mod models {
    use serde::Deserialize;

    use crate::model::generic::deserialize_id;

    /// 通用的响应外壳。
    #[derive(Debug, Deserialize)]
    pub struct ApiResponse<T> {
        /// 业务返回码，`0` 表示成功。
        #[serde(default)]
        pub code: i32,
        /// 响应数据，出错时为 `null`。
        pub data: Option<T>,
    }

    /// 搜索结果。
    #[derive(Debug, Deserialize)]
    pub struct SearchData {
        /// 匹配到的音频。
        #[serde(default)]
        pub result: Vec<AudioItem>,
    }

    /// 单个音频。
    #[derive(Debug, Deserialize)]
    pub struct AudioItem {
        /// 音频 ID，即 `sid`。
        #[serde(deserialize_with = "deserialize_id")]
        pub id: String,
        /// 标题。
        pub title: String,
        /// UP 主。
        #[serde(default)]
        pub author: String,
        /// 时长，单位为秒。
        pub duration: Option<u64>,
    }

    /// 播放地址接口的数据。
    #[derive(Debug, Deserialize)]
    pub struct UrlData {
        /// 按优先级排列的 CDN 地址。
        #[serde(default)]
        pub cdns: Vec<String>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_cdn() {
        let data: models::UrlData = serde_json::from_value(serde_json::json!({
            "cdns": ["", "https://upos-sz.bilivideo.com/a.m4a", "https://b.m4a"]
        }))
        .unwrap();
        assert_eq!(
            first_cdn(Some(data)).as_deref(),
            Some("https://upos-sz.bilivideo.com/a.m4a")
        );
    }

    #[test]
    fn test_first_cdn_missing() {
        assert_eq!(first_cdn(None), None);
        assert_eq!(first_cdn(Some(models::UrlData { cdns: vec![] })), None);
    }

    #[test]
    fn test_audio_item_to_track() {
        let item: models::AudioItem = serde_json::from_value(serde_json::json!({
            "id": 15662,
            "title": "<em class=\"keyword\">晴天</em>",
            "author": "某UP主",
            "duration": 270
        }))
        .unwrap();

        let track = Track::from(item);
        assert_eq!(track.id, "15662");
        assert_eq!(track.artist, "某UP主");
        assert_eq!(track.duration, Some(270_000));
    }

    #[test]
    fn test_huge_duration_saturates() {
        let item: models::AudioItem = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "t",
            "duration": u64::MAX / 10
        }))
        .unwrap();
        assert_eq!(Track::from(item).duration, Some(u64::MAX));
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_search() {
        let plugin = BilibiliAudio::new(PluginContext::with_defaults().unwrap());
        let tracks = plugin.search_tracks("晴天").await.unwrap();
        assert!(!tracks.is_empty());
    }
}
