//! 实现了酷狗音乐的插件。
//!
//! 搜索使用移动端的公开接口，歌曲以 `hash` 作为 ID，
//! 播放链接直接由 `hash` 拼接而成，无需额外请求。

use async_trait::async_trait;
use tracing::info;

use crate::{
    context::PluginContext,
    error::Result,
    model::{
        generic::{MediaSource, Track},
        page::{DEFAULT_PAGE_SIZE, Page, Quality, SearchItem, SearchType},
    },
    plugins::{Operation, Plugin, PluginInfo, fetch_json},
};

const SEARCH_URL: &str = "http://mobilecdn.kugou.com/api/v3/search/song";
const SONG_INFO_URL: &str = "http://m.kugou.com/app/i/getSongInfo.php";

const INFO: PluginInfo = PluginInfo::basic("kugou", "酷狗音乐", "1.0.0");
const OPERATIONS: &[Operation] = &[Operation::Search, Operation::GetMediaSource];

/// 酷狗音乐的插件实现
#[derive(Debug, Clone)]
pub struct KugouMusic {
    ctx: PluginContext,
}

impl KugouMusic {
    /// 创建插件实例。
    pub fn new(ctx: PluginContext) -> Self {
        Self { ctx }
    }

    /// 搜索单曲的指定页。
    pub async fn search_tracks(&self, keyword: &str, page: u32) -> Result<Vec<Track>> {
        let request = self.ctx.http().get(SEARCH_URL).query(&[
            ("keyword", keyword.to_string()),
            ("page", page.max(1).to_string()),
            ("pagesize", DEFAULT_PAGE_SIZE.to_string()),
        ]);

        let response: models::SearchResponse = fetch_json(request, INFO.name).await?;
        let tracks: Vec<Track> = response.data.info.into_iter().map(Track::from).collect();
        info!(keyword, count = tracks.len(), "酷狗搜索完成");
        Ok(tracks)
    }
}

/// 根据歌曲 `hash` 拼接歌曲信息链接。
pub fn song_info_url(hash: &str) -> String {
    format!("{SONG_INFO_URL}?hash={}", urlencoding::encode(hash))
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Plugin for KugouMusic {
    fn info(&self) -> &PluginInfo {
        &INFO
    }

    fn operations(&self) -> &'static [Operation] {
        OPERATIONS
    }

    async fn search(
        &self,
        query: &str,
        page: u32,
        search_type: SearchType,
    ) -> Result<Page<SearchItem>> {
        if search_type != SearchType::Music {
            return Ok(Page::end());
        }
        let tracks = self.search_tracks(query, page).await?;
        Ok(Page::from_batch(tracks, DEFAULT_PAGE_SIZE).map(SearchItem::Music))
    }

    async fn get_media_source(&self, track: &Track, _quality: Quality) -> Result<MediaSource> {
        Ok(MediaSource::from_url(song_info_url(&track.id)))
    }
}

impl From<models::SongInfo> for Track {
    fn from(song: models::SongInfo) -> Self {
        Self {
            id: song.hash,
            title: song.songname,
            artist: song.singername,
            duration: song.duration.map(|secs| secs.saturating_mul(1000)),
            ..Default::default()
        }
    }
}

/// 酷狗搜索接口的响应模型。
pub mod models {
    use serde::Deserialize;

    /// 搜索接口的顶层响应。
    #[derive(Debug, Deserialize)]
    pub struct SearchResponse {
        /// 响应数据。
        pub data: SearchData,
    }

    /// 搜索结果数据。
    #[derive(Debug, Deserialize)]
    pub struct SearchData {
        /// 匹配到的歌曲。
        #[serde(default)]
        pub info: Vec<SongInfo>,
    }

    /// 单首歌曲。
    #[derive(Debug, Deserialize)]
    pub struct SongInfo {
        /// 歌曲文件哈希，作为歌曲 ID。
        pub hash: String,
        /// 歌曲名。
        pub songname: String,
        /// 歌手名。
        #[serde(default)]
        pub singername: String,
        /// 时长，单位为秒。
        pub duration: Option<u64>,
    }
}
