//! 精简版的 QQ 音乐插件，只支持单曲搜索。
//!
//! 使用旧的 `search_for_qq_cp` 接口，返回结果不分页。

use async_trait::async_trait;
use tracing::info;

use crate::{
    context::PluginContext,
    error::Result,
    model::{
        generic::Track,
        page::{Page, SearchItem, SearchType},
    },
    plugins::{Operation, Plugin, PluginInfo, fetch_json, single_track_page},
};

const SEARCH_URL: &str = "https://c.y.qq.com/soso/fcgi-bin/search_for_qq_cp";

const INFO: PluginInfo = PluginInfo::basic("qq-lite", "QQ音乐", "1.0.0");
const OPERATIONS: &[Operation] = &[Operation::Search];

/// 精简版 QQ 音乐插件。
#[derive(Debug, Clone)]
pub struct QQMusicLite {
    ctx: PluginContext,
}

impl QQMusicLite {
    /// 创建插件实例。
    pub fn new(ctx: PluginContext) -> Self {
        Self { ctx }
    }

    /// 搜索单曲。
    pub async fn search_tracks(&self, keyword: &str) -> Result<Vec<Track>> {
        let request = self
            .ctx
            .http()
            .get(SEARCH_URL)
            .query(&[("w", keyword), ("format", "json")]);

        let response: models::SearchResponse = fetch_json(request, INFO.name).await?;
        let tracks: Vec<Track> = response
            .data
            .song
            .list
            .into_iter()
            .map(Track::from)
            .collect();

        info!(keyword, count = tracks.len(), "QQ音乐（精简）搜索完成");
        Ok(tracks)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Plugin for QQMusicLite {
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
}

impl From<models::Song> for Track {
    fn from(song: models::Song) -> Self {
        Self {
            id: song.songid,
            title: song.songname,
            artist: song
                .singer
                .into_iter()
                .next()
                .map(|s| s.name)
                .unwrap_or_default(),
            ..Default::default()
        }
    }
}

/// `search_for_qq_cp` 接口的响应模型。
pub mod models {
    use serde::Deserialize;

    use crate::model::generic::deserialize_id;

    /// 顶层响应。
    #[derive(Debug, Deserialize)]
    pub struct SearchResponse {
        /// 响应数据。
        pub data: SearchData,
    }

    /// 搜索数据。
    #[derive(Debug, Deserialize)]
    pub struct SearchData {
        /// 单曲结果。
        pub song: SongList,
    }

    /// 单曲结果列表。
    #[derive(Debug, Deserialize)]
    pub struct SongList {
        /// 匹配到的单曲。
        #[serde(default)]
        pub list: Vec<Song>,
    }

    /// 单曲。
    #[derive(Debug, Deserialize)]
    pub struct Song {
        /// 数字形式的歌曲 ID。
        #[serde(deserialize_with = "deserialize_id")]
        pub songid: String,
        /// 歌曲名。
        pub songname: String,
        /// 歌手列表。
        #[serde(default)]
        pub singer: Vec<Singer>,
    }

    /// 歌手。
    #[derive(Debug, Deserialize)]
    pub struct Singer {
        /// 歌手名。
        pub name: String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::page::Quality;

    #[test]
    fn test_song_to_track() {
        let song: models::Song = serde_json::from_value(serde_json::json!({
            "songid": 97773,
            "songname": "晴天",
            "singer": [{ "id": 4558, "name": "周杰伦" }]
        }))
        .unwrap();

        let track = Track::from(song);
        assert_eq!(track.id, "97773");
        assert_eq!(track.artist, "周杰伦");
        assert_eq!(track.duration, None);
    }

    #[tokio::test]
    async fn test_media_source_is_not_supported() {
        let plugin = QQMusicLite::new(PluginContext::with_defaults().unwrap());
        assert!(!plugin.supports(Operation::GetMediaSource));

        let err = plugin
            .get_media_source(&Track::default(), Quality::Standard)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("qq-lite"));
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_search() {
        let plugin = QQMusicLite::new(PluginContext::with_defaults().unwrap());
        let tracks = plugin.search_tracks("周杰伦").await.unwrap();
        assert!(!tracks.is_empty());
    }
}
