//! 此模块实现了网易云音乐的插件。
//!
//! 搜索使用网页端的 `/api/search/get` 接口，播放链接使用公开的外链地址。

use async_trait::async_trait;
use reqwest::header::REFERER;
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

const BASE_URL_NETEASE: &str = "https://music.163.com";
const SEARCH_URL: &str = "https://music.163.com/api/search/get";

/// 搜索接口中“单曲”的类型值。
const SEARCH_TYPE_SONG: u32 = 1;
const SUCCESS_CODE: i32 = 200;

const INFO: PluginInfo = PluginInfo::basic("netease", "网易云音乐", "1.0.1");
const OPERATIONS: &[Operation] = &[Operation::Search, Operation::GetMediaSource];

/// 网易云音乐的插件实现。
#[derive(Debug, Clone)]
pub struct NeteaseMusic {
    ctx: PluginContext,
}

impl NeteaseMusic {
    /// 创建插件实例。
    pub fn new(ctx: PluginContext) -> Self {
        Self { ctx }
    }

    /// 搜索单曲。请求会携带配置中的 `X-Real-IP` 头。
    pub async fn search_tracks(&self, keyword: &str) -> Result<Vec<Track>> {
        let form = [
            ("s", keyword.to_string()),
            ("type", SEARCH_TYPE_SONG.to_string()),
            ("offset", "0".to_string()),
        ];

        let request = self
            .ctx
            .http()
            .post(SEARCH_URL)
            .header("X-Real-IP", self.ctx.config().netease.real_ip.as_str())
            .header(REFERER, BASE_URL_NETEASE)
            .form(&form);

        let response: models::SearchResult = fetch_json(request, INFO.name).await?;
        let tracks = search_result_tracks(response)?;

        info!(keyword, count = tracks.len(), "网易云搜索完成");
        Ok(tracks)
    }
}

/// 检查返回码并取出搜索到的歌曲。返回码不是 `200` 时视为错误。
pub fn search_result_tracks(response: models::SearchResult) -> Result<Vec<Track>> {
    if response.code != SUCCESS_CODE {
        return Err(MusicSourceError::ApiError(format!(
            "网易云搜索返回错误码: {}",
            response.code
        )));
    }

    Ok(response
        .result
        .map(|r| r.songs)
        .unwrap_or_default()
        .into_iter()
        .map(Track::from)
        .collect())
}

/// 根据歌曲 ID 拼接外链播放地址。
pub fn outer_media_url(song_id: &str) -> String {
    format!("{BASE_URL_NETEASE}/song/media/outer/url?id={song_id}.mp3")
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Plugin for NeteaseMusic {
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
        Ok(MediaSource::from_url(outer_media_url(&track.id)))
    }
}

impl From<models::Song> for Track {
    fn from(song: models::Song) -> Self {
        Self {
            id: song.id,
            title: song.name,
            artist: song
                .artists
                .into_iter()
                .next()
                .map(|a| a.name)
                .unwrap_or_default(),
            duration: song.duration,
            ..Default::default()
        }
    }
}

/// 此模块定义了用于反序列化网易云音乐搜索响应的数据结构。
pub mod models {
    use serde::Deserialize;

    use crate::model::generic::deserialize_id;

    /// 搜索 API 的顶层响应结构。
    #[derive(Debug, Deserialize)]
    pub struct SearchResult {
        /// API 返回码，通常 `200` 表示成功。
        pub code: i32,
        /// 包含搜索结果的容器，没有结果时可能缺失。
        pub result: Option<SearchResultData>,
    }

    /// 搜索结果的数据部分。
    #[derive(Debug, Deserialize)]
    pub struct SearchResultData {
        /// 匹配到的歌曲对象列表。
        #[serde(default)]
        pub songs: Vec<Song>,
    }

    /// 单首歌曲。
    #[derive(Debug, Deserialize)]
    pub struct Song {
        /// 歌曲的数字 ID。
        #[serde(deserialize_with = "deserialize_id")]
        pub id: String,
        /// 歌曲名。
        pub name: String,
        /// 艺术家列表。
        #[serde(default)]
        pub artists: Vec<Artist>,
        /// 时长，单位为毫秒。
        pub duration: Option<u64>,
    }

    /// 艺术家。
    #[derive(Debug, Deserialize)]
    pub struct Artist {
        /// 艺术家姓名。
        pub name: String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outer_media_url() {
        insta::assert_snapshot!(
            outer_media_url("186016"),
            @"https://music.163.com/song/media/outer/url?id=186016.mp3"
        );
    }

    #[test]
    fn test_song_without_artists_maps_to_empty_artist() {
        let song: models::Song = serde_json::from_value(serde_json::json!({
            "id": 186016,
            "name": "晴天",
            "artists": [],
            "duration": 269000
        }))
        .unwrap();

        let track = Track::from(song);
        assert_eq!(track.id, "186016");
        assert_eq!(track.artist, "");
        assert_eq!(track.duration, Some(269_000));
    }

    #[test]
    fn test_error_code_is_reported() {
        let response: models::SearchResult = serde_json::from_value(serde_json::json!({
            "code": -460,
            "message": "Cheating"
        }))
        .unwrap();

        let err = search_result_tracks(response).unwrap_err();
        assert!(matches!(err, MusicSourceError::ApiError(msg) if msg.contains("-460")));
    }

    #[test]
    fn test_success_without_result_is_empty() {
        let response: models::SearchResult =
            serde_json::from_value(serde_json::json!({ "code": 200 })).unwrap();
        assert!(search_result_tracks(response).unwrap().is_empty());
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_search() {
        let plugin = NeteaseMusic::new(PluginContext::with_defaults().unwrap());
        let tracks = plugin.search_tracks("晴天").await.unwrap();
        assert!(!tracks.is_empty());
    }
}
