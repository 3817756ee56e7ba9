//! 插件模块
//!
//! 该模块定义了宿主与各音源插件交互的核心抽象。

use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use strum_macros::{Display, EnumIter, IntoStaticStr};

use crate::{
    error::{MusicSourceError, Result},
    model::{
        generic::{Album, Lyric, MediaSource, Sheet, TopListGroup, TopListItem, Track},
        page::{DetailPage, Page, Quality, SearchItem, SearchType},
    },
};

pub mod bilibili;
pub mod kugou;
pub mod netease;
pub mod qq;
pub mod qq_lite;
pub mod spotify;
pub mod youtube;

/// 插件的静态元信息。
#[derive(Debug, Clone, Copy)]
pub struct PluginInfo {
    /// 全小写的唯一名称，例如 `"qq"`。
    pub name: &'static str,
    /// 展示给用户的平台名称，例如 `"QQ音乐"`。
    pub platform: &'static str,
    /// 插件版本。
    pub version: &'static str,
    /// 插件作者。
    pub author: Option<&'static str>,
    /// 插件的更新地址。
    pub src_url: Option<&'static str>,
    /// 用于判断两首歌曲是否相同的字段。
    pub primary_key: &'static [&'static str],
    /// 导入单曲时展示给用户的提示。
    pub import_music_item_hints: &'static [&'static str],
    /// 导入歌单时展示给用户的提示。
    pub import_music_sheet_hints: &'static [&'static str],
}

impl PluginInfo {
    /// 只有名称、平台名和版本的元信息。
    pub const fn basic(name: &'static str, platform: &'static str, version: &'static str) -> Self {
        Self {
            name,
            platform,
            version,
            author: None,
            src_url: None,
            primary_key: &["id"],
            import_music_item_hints: &[],
            import_music_sheet_hints: &[],
        }
    }
}

/// 插件可以实现的操作。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum Operation {
    /// 搜索
    Search,
    /// 获取音源
    GetMediaSource,
    /// 获取歌词
    GetLyric,
    /// 获取专辑详情
    GetAlbumInfo,
    /// 获取歌单详情
    GetMusicSheetInfo,
    /// 通过链接导入单曲
    ImportMusicItem,
    /// 通过链接导入歌单
    ImportMusicSheet,
    /// 获取排行榜列表
    GetTopLists,
    /// 获取排行榜详情
    GetTopListDetail,
}

/// 定义了所有音源插件需要实现的通用接口。
///
/// 除 `info`、`operations` 与 `search` 外，其它方法都有默认实现，
/// 返回 [`MusicSourceError::NotSupported`]。
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Plugin: Send + Sync {
    /// 插件的元信息。
    fn info(&self) -> &PluginInfo;

    /// 插件实际实现了的操作。
    fn operations(&self) -> &'static [Operation];

    /// 插件是否实现了某个操作。
    fn supports(&self, operation: Operation) -> bool {
        self.operations().contains(&operation)
    }

    /// 插件的唯一名称。
    fn name(&self) -> &'static str {
        self.info().name
    }

    ///
    /// 按类型搜索。
    ///
    /// # 参数
    /// * `query` - 搜索关键词。
    /// * `page` - 页码，从 1 开始。
    /// * `search_type` - 要搜索的资源类型。
    ///
    /// # 返回
    /// 一页搜索结果，条目类型与 `search_type` 一致。
    ///
    async fn search(
        &self,
        query: &str,
        page: u32,
        search_type: SearchType,
    ) -> Result<Page<SearchItem>>;

    ///
    /// 获取歌曲的可播放音源。
    ///
    /// # 注意
    /// 大概率因版权、地区限制或 VIP 而失败。
    ///
    async fn get_media_source(&self, _track: &Track, _quality: Quality) -> Result<MediaSource> {
        Err(self.not_supported(Operation::GetMediaSource))
    }

    /// 获取歌曲的歌词与翻译。
    async fn get_lyric(&self, _track: &Track) -> Result<Lyric> {
        Err(self.not_supported(Operation::GetLyric))
    }

    /// 分页获取专辑的歌曲，第一页同时返回专辑详情。
    async fn get_album_info(&self, _album: &Album, _page: u32) -> Result<DetailPage<Album>> {
        Err(self.not_supported(Operation::GetAlbumInfo))
    }

    /// 分页获取歌单的歌曲，第一页同时返回歌单详情。
    async fn get_music_sheet_info(&self, _sheet: &Sheet, _page: u32) -> Result<DetailPage<Sheet>> {
        Err(self.not_supported(Operation::GetMusicSheetInfo))
    }

    /// 根据分享链接或 ID 导入单曲。
    async fn import_music_item(&self, _url_like: &str) -> Result<Track> {
        Err(self.not_supported(Operation::ImportMusicItem))
    }

    /// 根据分享链接或 ID 导入整个歌单的歌曲。
    async fn import_music_sheet(&self, _url_like: &str) -> Result<Vec<Track>> {
        Err(self.not_supported(Operation::ImportMusicSheet))
    }

    /// 获取所有排行榜，按分组返回。
    async fn get_top_lists(&self) -> Result<Vec<TopListGroup>> {
        Err(self.not_supported(Operation::GetTopLists))
    }

    /// 分页获取排行榜的歌曲。
    async fn get_top_list_detail(
        &self,
        _top_list: &TopListItem,
        _page: u32,
    ) -> Result<DetailPage<TopListItem>> {
        Err(self.not_supported(Operation::GetTopListDetail))
    }

    /// 构造一个“不支持该操作”的错误。
    fn not_supported(&self, operation: Operation) -> MusicSourceError {
        MusicSourceError::NotSupported {
            platform: self.info().name,
            operation: operation.into(),
        }
    }
}

/// 发送请求并将 JSON 响应体反序列化为 `R`。非 2xx 状态码视为错误。
pub(crate) async fn fetch_json<R>(request: RequestBuilder, platform: &str) -> Result<R>
where
    R: DeserializeOwned,
{
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(MusicSourceError::ApiError(format!(
            "{platform} 请求失败，HTTP状态码: {status}"
        )));
    }

    let response_text = response.text().await?;

    tracing::trace!(
        platform = platform,
        response.body = %response_text,
        "原始 JSON 响应"
    );

    Ok(serde_json::from_str(&response_text)?)
}

/// 将不分页的单曲搜索结果包装为最后一页。
pub(crate) fn single_track_page(tracks: Vec<Track>) -> Page<SearchItem> {
    Page::single(tracks.into_iter().map(SearchItem::Music).collect())
}
