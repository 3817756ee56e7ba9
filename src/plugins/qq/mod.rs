//! QQ音乐插件模块。
//!
//! 该模块提供了与 QQ 音乐 API 交互的各种功能，
//! 包括搜索（单曲、专辑、歌手、歌单）、获取播放链接、歌词、专辑、歌单和排行榜信息，
//! 以及通过分享链接导入单曲和歌单。
//!
//! 所有请求都是 `GET {api_base}/{endpoint}?{params}`，响应的业务数据位于 `data` 字段。
//! 除获取音源和导入外，其它操作出错时只记录日志并返回空结果。

use std::collections::BTreeMap;

use async_trait::async_trait;
use base64::{Engine, prelude::BASE64_STANDARD};
use reqwest::header::{ORIGIN, REFERER, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::{error, info, instrument, trace};

use crate::{
    context::PluginContext,
    error::{MusicSourceError, Result},
    model::{
        generic::{
            Album, Artist, Lyric, MediaSource, Sheet, TopListGroup, TopListItem, Track,
            join_artists,
        },
        page::{DetailPage, Page, Quality, SearchItem, SearchType, page_offset},
    },
    plugins::{Operation, Plugin, PluginInfo, fetch_json, qq::models::QQMusicCoverSize},
};

pub mod models;
pub mod url;

const QQ_REFERER: &str = "https://y.qq.com/";
const QQ_ORIGIN: &str = "https://y.qq.com";

const SEARCH_ENDPOINT: &str = "search";
const SONG_URL_ENDPOINT: &str = "songUrl";
const LYRIC_ENDPOINT: &str = "lyric";
const ALBUM_DETAIL_ENDPOINT: &str = "albumDetail";
const PLAYLIST_DETAIL_ENDPOINT: &str = "playlistDetail";
const SONG_DETAIL_ENDPOINT: &str = "songDetail";
const TOPLIST_CATEGORIES_ENDPOINT: &str = "topListCategories";
const TOPLIST_DETAIL_ENDPOINT: &str = "topListDetail";

/// 导入歌单时一次性拉取的最大歌曲数。
const IMPORT_SHEET_LIMIT: u32 = 1000;

const INFO: PluginInfo = PluginInfo {
    name: "qq",
    platform: "QQ音乐",
    version: "1.0.0",
    author: Some("Snoweer"),
    src_url: Some("https://your-domain.com/qqmusic-plugin.js"),
    primary_key: &["id", "mid"],
    import_music_item_hints: &[
        "1. 支持导入QQ音乐单曲链接，如：https://y.qq.com/n/ryqq/songDetail/004Z8Ihr0JIu5s",
    ],
    import_music_sheet_hints: &[
        "1. 支持导入QQ音乐歌单链接，如：https://y.qq.com/n/ryqq/playlist/8223335694",
    ],
};

const OPERATIONS: &[Operation] = &[
    Operation::Search,
    Operation::GetMediaSource,
    Operation::GetLyric,
    Operation::GetAlbumInfo,
    Operation::GetMusicSheetInfo,
    Operation::ImportMusicItem,
    Operation::ImportMusicSheet,
    Operation::GetTopLists,
    Operation::GetTopListDetail,
];

/// QQ 音乐的插件实现。
#[derive(Debug, Clone)]
pub struct QQMusic {
    ctx: PluginContext,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Plugin for QQMusic {
    fn info(&self) -> &PluginInfo {
        &INFO
    }

    fn operations(&self) -> &'static [Operation] {
        OPERATIONS
    }

    /// 按类型搜索，出错时返回空的最后一页。
    async fn search(
        &self,
        query: &str,
        page: u32,
        search_type: SearchType,
    ) -> Result<Page<SearchItem>> {
        match self.search_by_type(query, page, search_type).await {
            Ok(result) => Ok(result),
            Err(e) => {
                error!("搜索出错: {e}");
                Ok(Page::end())
            }
        }
    }

    /// 获取播放链接，出错时记录日志后向上传递错误。
    async fn get_media_source(&self, track: &Track, quality: Quality) -> Result<MediaSource> {
        self.get_song_url(&track.id, quality).await.inspect_err(|e| {
            error!("获取音源出错: {e}");
        })
    }

    /// 获取歌词，出错时返回空歌词。
    async fn get_lyric(&self, track: &Track) -> Result<Lyric> {
        match self.get_song_lyric(&track.id).await {
            Ok(lyric) => Ok(lyric),
            Err(e) => {
                error!("获取歌词出错: {e}");
                Ok(Lyric::default())
            }
        }
    }

    /// 分页获取专辑歌曲，仅第一页携带专辑详情。
    async fn get_album_info(&self, album: &Album, page: u32) -> Result<DetailPage<Album>> {
        let page_size = self.page_size();
        match self
            .get_album_detail(&album.id, page_offset(page, page_size), page_size)
            .await
        {
            Ok(detail) => Ok(album_detail_page(detail, page, page_size)),
            Err(e) => {
                error!("获取专辑详情出错: {e}");
                Ok(DetailPage::end())
            }
        }
    }

    /// 分页获取歌单歌曲，仅第一页携带歌单详情。
    async fn get_music_sheet_info(&self, sheet: &Sheet, page: u32) -> Result<DetailPage<Sheet>> {
        let page_size = self.page_size();
        match self
            .get_playlist_detail(&sheet.id, page_offset(page, page_size), page_size)
            .await
        {
            Ok(detail) => Ok(sheet_detail_page(detail, page, page_size)),
            Err(e) => {
                error!("获取歌单详情出错: {e}");
                Ok(DetailPage::end())
            }
        }
    }

    /// 通过链接导入单曲，出错时记录日志后向上传递错误。
    async fn import_music_item(&self, url_like: &str) -> Result<Track> {
        self.import_song(url_like)
            .await
            .inspect_err(|e| error!("导入单曲出错: {e}"))
    }

    /// 通过链接导入歌单，出错时记录日志后向上传递错误。
    async fn import_music_sheet(&self, url_like: &str) -> Result<Vec<Track>> {
        self.import_playlist_tracks(url_like)
            .await
            .inspect_err(|e| error!("导入歌单出错: {e}"))
    }

    /// 获取所有排行榜分组，出错时返回空列表。
    async fn get_top_lists(&self) -> Result<Vec<TopListGroup>> {
        match self
            .execute_api_request::<Vec<models::TopListCategory>>(TOPLIST_CATEGORIES_ENDPOINT, &[])
            .await
        {
            Ok(categories) => Ok(top_list_groups(categories)),
            Err(e) => {
                error!("获取榜单列表出错: {e}");
                Ok(Vec::new())
            }
        }
    }

    /// 分页获取排行榜歌曲，每一页都携带榜单详情。
    async fn get_top_list_detail(
        &self,
        top_list: &TopListItem,
        page: u32,
    ) -> Result<DetailPage<TopListItem>> {
        let page_size = self.page_size();
        let params = paged_params(&top_list.id, page_offset(page, page_size), page_size);
        match self
            .execute_api_request::<models::TopListDetail>(TOPLIST_DETAIL_ENDPOINT, &params)
            .await
        {
            Ok(detail) => Ok(top_list_detail_page(detail, page_size)),
            Err(e) => {
                error!("获取榜单详情出错: {e}");
                Ok(DetailPage::end())
            }
        }
    }
}

impl QQMusic {
    ///
    /// 创建一个新的 `QQMusic` 插件实例。
    ///
    /// # 参数
    ///
    /// * `ctx` - 宿主提供的上下文，包含 HTTP 客户端与配置。
    ///
    pub fn new(ctx: PluginContext) -> Self {
        Self { ctx }
    }

    fn page_size(&self) -> u32 {
        self.ctx.config().qq.page_size.max(1)
    }

    #[instrument(skip(self, params), level = "debug")]
    async fn execute_api_request<R>(&self, endpoint: &str, params: &[(&str, String)]) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let config = self.ctx.config();
        let url = format!("{}/{endpoint}", config.qq.api_base.trim_end_matches('/'));

        let request = self
            .ctx
            .http()
            .get(&url)
            .query(params)
            .header(REFERER, QQ_REFERER)
            .header(ORIGIN, QQ_ORIGIN)
            .header(USER_AGENT, config.user_agent.as_str());

        let parsed: models::ApiResponse<R> = fetch_json(request, INFO.name).await?;
        Ok(parsed.data)
    }

    ///
    /// 按类型搜索，错误向上传递。
    ///
    /// # 参数
    ///
    /// * `query` - 要搜索的关键词。
    /// * `page` - 结果的页码（从1开始）。
    /// * `search_type` - 搜索的资源类型。
    ///
    pub async fn search_by_type(
        &self,
        query: &str,
        page: u32,
        search_type: SearchType,
    ) -> Result<Page<SearchItem>> {
        let page_size = self.page_size();
        let offset = page_offset(page, page_size);

        let items: Vec<SearchItem> = match search_type {
            SearchType::Music => self
                .search_list::<models::SearchSong>(query, models::SearchKind::Song, offset, page_size)
                .await?
                .into_iter()
                .map(|s| SearchItem::Music(s.into()))
                .collect(),
            SearchType::Album => self
                .search_list::<models::SearchAlbum>(query, models::SearchKind::Album, offset, page_size)
                .await?
                .into_iter()
                .map(|a| SearchItem::Album(a.into()))
                .collect(),
            SearchType::Artist => self
                .search_list::<models::SearchSinger>(
                    query,
                    models::SearchKind::Singer,
                    offset,
                    page_size,
                )
                .await?
                .into_iter()
                .map(|s| SearchItem::Artist(s.into()))
                .collect(),
            SearchType::Sheet => self
                .search_list::<models::SearchSonglist>(
                    query,
                    models::SearchKind::Songlist,
                    offset,
                    page_size,
                )
                .await?
                .into_iter()
                .map(|s| SearchItem::Sheet(s.into()))
                .collect(),
        };

        info!(query, %search_type, count = items.len(), "QQ 音乐搜索完成");
        Ok(Page::from_batch(items, page_size))
    }

    async fn search_list<T: DeserializeOwned>(
        &self,
        query: &str,
        kind: models::SearchKind,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<T>> {
        let params = [
            ("key", query.to_string()),
            ("type", kind.as_u32().to_string()),
            ("offset", offset.to_string()),
            ("limit", limit.to_string()),
        ];
        let data: models::ListData<T> = self.execute_api_request(SEARCH_ENDPOINT, &params).await?;
        Ok(data.list)
    }

    ///
    /// 获取歌曲的播放链接。
    ///
    /// # 注意
    ///
    /// 无法获取 VIP 歌曲或需要付费的歌曲的链接，会返回错误。
    ///
    pub async fn get_song_url(&self, song_id: &str, quality: Quality) -> Result<MediaSource> {
        let params = [
            ("id", song_id.to_string()),
            ("quality", quality.bitrate().to_string()),
        ];
        let data: models::SongUrlData = self
            .execute_api_request(SONG_URL_ENDPOINT, &params)
            .await?;

        let url = data.url.filter(|u| !u.is_empty()).ok_or_else(|| {
            MusicSourceError::MediaNotFound(format!(
                "无法获取歌曲 '{song_id}' 的链接 (url 为空)，可能是 VIP 歌曲。"
            ))
        })?;

        Ok(MediaSource {
            url,
            headers: qq_headers(),
            user_agent: Some(self.ctx.config().user_agent.clone()),
        })
    }

    /// 获取歌曲的原文与翻译歌词。
    pub async fn get_song_lyric(&self, song_id: &str) -> Result<Lyric> {
        let params = [("id", song_id.to_string())];
        let data: models::LyricData = self.execute_api_request(LYRIC_ENDPOINT, &params).await?;
        Ok(data.into())
    }

    /// 获取专辑详情与一页歌曲。
    pub async fn get_album_detail(
        &self,
        album_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<models::AlbumDetail> {
        self.execute_api_request(ALBUM_DETAIL_ENDPOINT, &paged_params(album_id, offset, limit))
            .await
    }

    /// 获取歌单详情与一页歌曲。
    pub async fn get_playlist_detail(
        &self,
        playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<models::PlaylistDetail> {
        self.execute_api_request(
            PLAYLIST_DETAIL_ENDPOINT,
            &paged_params(playlist_id, offset, limit),
        )
        .await
    }

    /// 从单曲链接或 ID 导入歌曲。
    pub async fn import_song(&self, url_like: &str) -> Result<Track> {
        let song_id = url::extract_song_id(url_like)?;
        self.get_song_detail(&song_id).await
    }

    /// 从歌单链接或 ID 导入歌单内的全部歌曲（最多 1000 首）。
    pub async fn import_playlist_tracks(&self, url_like: &str) -> Result<Vec<Track>> {
        let playlist_id = url::extract_playlist_id(url_like)?;
        let detail = self
            .get_playlist_detail(&playlist_id, 0, IMPORT_SHEET_LIMIT)
            .await?;
        Ok(detail.tracks.into_iter().map(Track::from).collect())
    }

    /// 获取单首歌曲的详细信息。
    pub async fn get_song_detail(&self, song_id: &str) -> Result<Track> {
        let params = [("id", song_id.to_string())];
        let song: models::DetailSong = self
            .execute_api_request(SONG_DETAIL_ENDPOINT, &params)
            .await?;
        Ok(song.into())
    }
}

fn paged_params(id: &str, offset: u32, limit: u32) -> [(&'static str, String); 3] {
    [
        ("id", id.to_string()),
        ("offset", offset.to_string()),
        ("limit", limit.to_string()),
    ]
}

fn qq_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Referer".to_string(), QQ_REFERER.to_string()),
        ("Origin".to_string(), QQ_ORIGIN.to_string()),
    ])
}

/// 歌词可能以 Base64 编码返回。只有解码结果是有效的 UTF-8 且看起来像 LRC 时才采用，
/// 否则原样返回。
pub fn decode_lyric_text(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with('[') {
        return text.to_string();
    }

    if let Ok(decoded_bytes) = BASE64_STANDARD.decode(trimmed)
        && let Ok(decoded_str) = String::from_utf8(decoded_bytes)
        && decoded_str.contains('[')
    {
        trace!("歌词为 Base64 编码，已解码。");
        return decoded_str;
    }

    text.to_string()
}

/// 根据 QQ 音乐专辑的 MID 构造指定尺寸的封面图片 URL。
///
/// # 参数
/// * `album_mid` - 专辑的 `mid` 字符串。
/// * `size` - 想要的封面图片尺寸，使用 `QQMusicCoverSize` 枚举。
///
/// # 返回
/// 一个包含了完整封面图片链接的 `String`。
pub fn album_artwork_url(album_mid: &str, size: QQMusicCoverSize) -> String {
    let size_val = size.as_u32();
    format!("https://y.qq.com/music/photo_new/T002R{size_val}x{size_val}M000{album_mid}.jpg")
}

/// 根据歌手的 MID 构造头像 URL。
pub fn artist_avatar_url(singer_mid: &str, size: QQMusicCoverSize) -> String {
    let size_val = size.as_u32();
    format!("https://y.qq.com/music/photo_new/T001R{size_val}x{size_val}M000{singer_mid}.jpg")
}

/// 将专辑详情响应转换为详情页，仅第一页携带专辑信息。
pub fn album_detail_page(
    mut detail: models::AlbumDetail,
    page: u32,
    page_size: u32,
) -> DetailPage<Album> {
    let songs = std::mem::take(&mut detail.songs);
    let music_list: Vec<Track> = songs.into_iter().map(Track::from).collect();
    let item = (page <= 1).then(|| Album::from(detail));
    DetailPage::from_batch(music_list, page_size, item)
}

/// 将歌单详情响应转换为详情页，仅第一页携带歌单信息。
pub fn sheet_detail_page(
    mut detail: models::PlaylistDetail,
    page: u32,
    page_size: u32,
) -> DetailPage<Sheet> {
    let tracks = std::mem::take(&mut detail.tracks);
    let music_list: Vec<Track> = tracks.into_iter().map(Track::from).collect();
    let item = (page <= 1).then(|| Sheet::from(detail));
    DetailPage::from_batch(music_list, page_size, item)
}

/// 将排行榜详情响应转换为详情页，每一页都携带榜单信息。
pub fn top_list_detail_page(
    detail: models::TopListDetail,
    page_size: u32,
) -> DetailPage<TopListItem> {
    let music_list: Vec<Track> = detail.songs.into_iter().map(Track::from).collect();
    let item = TopListItem {
        id: detail.id,
        title: detail.name,
        artwork: detail.pic_url,
        update_frequency: detail.update_frequency,
        update_time: detail.update_time,
        description: detail.description,
    };
    DetailPage::from_batch(music_list, page_size, Some(item))
}

/// 将排行榜分组响应转换为通用分组。
pub fn top_list_groups(categories: Vec<models::TopListCategory>) -> Vec<TopListGroup> {
    categories
        .into_iter()
        .map(|category| TopListGroup {
            title: category.name,
            data: category
                .list
                .into_iter()
                .map(|brief| TopListItem {
                    id: brief.id,
                    title: brief.name,
                    artwork: brief.pic_url,
                    update_frequency: brief.update_frequency,
                    ..Default::default()
                })
                .collect(),
        })
        .collect()
}

impl From<models::SearchSong> for Track {
    fn from(song: models::SearchSong) -> Self {
        Self {
            artwork: song
                .albummid
                .as_deref()
                .map(|mid| album_artwork_url(mid, QQMusicCoverSize::Size300)),
            id: song.songid,
            mid: song.songmid,
            title: song.songname,
            artist: join_artists(song.singer.iter().map(|s| s.name.as_str())),
            album: song.albumname,
            album_id: song.albumid,
            album_mid: song.albummid,
            duration: song.interval.map(|secs| secs.saturating_mul(1000)),
            extra: BTreeMap::new(),
        }
    }
}

impl From<models::LyricData> for Lyric {
    fn from(data: models::LyricData) -> Self {
        Self {
            raw_lrc: data.lyric.as_deref().map(decode_lyric_text).unwrap_or_default(),
            translation: data.tlyric.as_deref().map(decode_lyric_text).unwrap_or_default(),
        }
    }
}

impl From<models::SearchAlbum> for Album {
    fn from(album: models::SearchAlbum) -> Self {
        Self {
            artwork: album
                .albummid
                .as_deref()
                .map(|mid| album_artwork_url(mid, QQMusicCoverSize::Size300)),
            id: album.albumid,
            mid: album.albummid,
            title: album.albumname,
            artist: album.singername,
            artist_id: album.singerid,
            description: Some(album.desc.unwrap_or_default()),
            publish_time: None,
        }
    }
}

impl From<models::SearchSinger> for Artist {
    fn from(singer: models::SearchSinger) -> Self {
        Self {
            avatar: singer
                .singermid
                .as_deref()
                .map(|mid| artist_avatar_url(mid, QQMusicCoverSize::Size300)),
            id: singer.singerid,
            mid: singer.singermid,
            name: singer.singername,
            works_num: singer.songnum,
        }
    }
}

impl From<models::SearchSonglist> for Sheet {
    fn from(list: models::SearchSonglist) -> Self {
        Self {
            id: list.dissid,
            title: list.dissname,
            artwork: list.imgurl,
            creator: list.creator.map(|c| c.name),
            play_count: list.listennum,
            create_time: list.createtime,
            ..Default::default()
        }
    }
}

impl From<models::DetailSong> for Track {
    fn from(song: models::DetailSong) -> Self {
        Self {
            id: song.id,
            mid: song.mid,
            title: song.name,
            artist: join_artists(song.singer.iter().map(|s| s.name.as_str())),
            album: song.album.name,
            album_id: song.album.id,
            album_mid: song.album.mid,
            artwork: song.album.pic_url,
            duration: song.interval.map(|secs| secs.saturating_mul(1000)),
            extra: BTreeMap::new(),
        }
    }
}

impl From<models::ChartSong> for Track {
    fn from(song: models::ChartSong) -> Self {
        Self {
            id: song.id,
            mid: song.mid,
            title: song.name,
            artist: join_artists(song.ar.iter().map(|s| s.name.as_str())),
            album: song.al.name,
            album_id: song.al.id,
            album_mid: song.al.mid,
            artwork: song.al.pic_url,
            duration: song.dt,
            extra: BTreeMap::new(),
        }
    }
}

impl From<models::AlbumDetail> for Album {
    fn from(detail: models::AlbumDetail) -> Self {
        Self {
            id: detail.id,
            mid: None,
            title: detail.name,
            artist: detail.singer.unwrap_or_default(),
            artist_id: detail.singer_id,
            artwork: detail.pic_url,
            description: detail.desc,
            publish_time: detail.publish_time,
        }
    }
}

impl From<models::PlaylistDetail> for Sheet {
    fn from(detail: models::PlaylistDetail) -> Self {
        Self {
            id: detail.id,
            title: detail.name,
            artwork: detail.cover_img_url,
            creator: detail.creator.nickname,
            creator_id: detail.creator.user_id,
            play_count: detail.play_count,
            track_count: detail.track_count,
            create_time: detail.create_time,
            description: detail.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PluginConfig;
    use serde_json::json;
    use strum::IntoEnumIterator;
    use tracing_test::traced_test;

    /// 指向一个不可达地址的插件，用于验证出错时的兜底行为。
    fn unreachable_plugin() -> QQMusic {
        let mut config = PluginConfig::default();
        config.qq.api_base = "http://127.0.0.1:1".to_string();
        config.timeout_secs = 2;
        QQMusic::new(PluginContext::new(config).unwrap())
    }

    fn live_plugin() -> QQMusic {
        QQMusic::new(PluginContext::with_defaults().unwrap())
    }

    #[test]
    fn test_supports_every_operation() {
        let plugin = unreachable_plugin();
        for op in Operation::iter() {
            assert!(plugin.supports(op), "QQ 插件应支持 {op}");
        }
        assert_eq!(plugin.info().primary_key, &["id", "mid"]);
    }

    #[test]
    fn test_search_song_mapping() {
        let song: models::SearchSong = serde_json::from_value(json!({
            "songid": 97773,
            "songmid": "0039MnYb0qxYhV",
            "songname": "晴天",
            "singer": [{ "name": "周杰伦" }, { "name": "杨瑞代" }],
            "albumname": "叶惠美",
            "albumid": 8220,
            "albummid": "000MkMni19ClKG",
            "interval": 269
        }))
        .unwrap();

        let track = Track::from(song);
        assert_eq!(track.id, "97773");
        assert_eq!(track.mid.as_deref(), Some("0039MnYb0qxYhV"));
        assert_eq!(track.artist, "周杰伦/杨瑞代");
        assert_eq!(track.album_id.as_deref(), Some("8220"));
        assert_eq!(track.duration, Some(269_000));
        assert_eq!(
            track.artwork.as_deref(),
            Some("https://y.qq.com/music/photo_new/T002R300x300M000000MkMni19ClKG.jpg")
        );
    }

    #[test]
    fn test_huge_interval_saturates() {
        let song: models::SearchSong = serde_json::from_value(json!({
            "songid": 1,
            "songname": "t",
            "interval": 18_446_744_073_709_552_u64
        }))
        .unwrap();
        assert_eq!(Track::from(song).duration, Some(u64::MAX));

        let song: models::DetailSong = serde_json::from_value(json!({
            "id": 1,
            "name": "t",
            "interval": u64::MAX
        }))
        .unwrap();
        assert_eq!(Track::from(song).duration, Some(u64::MAX));
    }

    #[test]
    fn test_search_album_defaults_description_to_empty() {
        let album: models::SearchAlbum = serde_json::from_value(json!({
            "albumid": 8220,
            "albummid": "000MkMni19ClKG",
            "albumname": "叶惠美",
            "singername": "周杰伦",
            "singerid": 4558
        }))
        .unwrap();

        let album = Album::from(album);
        assert_eq!(album.description.as_deref(), Some(""));
        assert_eq!(album.artist_id.as_deref(), Some("4558"));
    }

    #[test]
    fn test_artist_avatar_url() {
        insta::assert_snapshot!(
            artist_avatar_url("0025NhlN2yWrP4", QQMusicCoverSize::Size300),
            @"https://y.qq.com/music/photo_new/T001R300x300M0000025NhlN2yWrP4.jpg"
        );
    }

    #[test]
    fn test_decode_lyric_text() {
        let plain = "[00:01.00]晴天";
        assert_eq!(decode_lyric_text(plain), plain);

        let encoded = BASE64_STANDARD.encode("[00:01.00]Sunny");
        assert_eq!(decode_lyric_text(&encoded), "[00:01.00]Sunny");

        // 可以被 Base64 解码但不像歌词的文本保持原样
        assert_eq!(decode_lyric_text("abcd"), "abcd");
        assert_eq!(decode_lyric_text(""), "");
    }

    #[test]
    fn test_album_detail_page_only_carries_album_on_first_page() {
        let detail = || -> models::AlbumDetail {
            serde_json::from_value(json!({
                "id": 8220,
                "name": "叶惠美",
                "singer": "周杰伦",
                "songs": [{
                    "id": 97773,
                    "mid": "0039MnYb0qxYhV",
                    "name": "晴天",
                    "singer": [{ "name": "周杰伦" }],
                    "album": { "name": "叶惠美", "id": 8220, "mid": "000MkMni19ClKG" },
                    "interval": 269
                }]
            }))
            .unwrap()
        };

        let first = album_detail_page(detail(), 1, 20);
        assert!(first.is_end);
        assert_eq!(first.item.as_ref().map(|a| a.title.as_str()), Some("叶惠美"));
        assert_eq!(first.music_list[0].album.as_deref(), Some("叶惠美"));

        let second = album_detail_page(detail(), 2, 20);
        assert!(second.item.is_none());
        assert_eq!(second.music_list.len(), 1);

        let full = album_detail_page(detail(), 1, 1);
        assert!(!full.is_end, "本页条目数等于页大小时不是最后一页");
    }

    #[tokio::test]
    #[traced_test]
    async fn test_search_failure_returns_end_page() {
        let plugin = unreachable_plugin();
        let page = plugin.search("晴天", 1, SearchType::Music).await.unwrap();

        assert!(page.is_end);
        assert!(page.data.is_empty());
        assert!(logs_contain("搜索出错"));
    }

    #[tokio::test]
    async fn test_unreachable_api_surfaces_reqwest_error() {
        let plugin = unreachable_plugin();
        let err = plugin.get_song_detail("97773").await.unwrap_err();
        assert!(matches!(err, MusicSourceError::Reqwest(_)), "实际为: {err:?}");
    }

    #[tokio::test]
    #[traced_test]
    async fn test_neutral_results_when_unreachable() {
        let plugin = unreachable_plugin();
        let track = Track {
            id: "97773".into(),
            ..Default::default()
        };

        assert_eq!(plugin.get_lyric(&track).await.unwrap(), Lyric::default());
        assert!(plugin.get_top_lists().await.unwrap().is_empty());

        let album = Album {
            id: "8220".into(),
            ..Default::default()
        };
        let album_page = plugin.get_album_info(&album, 1).await.unwrap();
        assert!(album_page.is_end && album_page.music_list.is_empty());

        let sheet = Sheet {
            id: "8223335694".into(),
            ..Default::default()
        };
        let sheet_page = plugin.get_music_sheet_info(&sheet, 1).await.unwrap();
        assert!(sheet_page.is_end && sheet_page.item.is_none());

        let top = TopListItem {
            id: "26".into(),
            ..Default::default()
        };
        let top_page = plugin.get_top_list_detail(&top, 1).await.unwrap();
        assert!(top_page.is_end && top_page.music_list.is_empty());

        assert!(logs_contain("获取歌词出错"));
        assert!(logs_contain("获取榜单列表出错"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_media_source_and_import_rethrow() {
        let plugin = unreachable_plugin();
        let track = Track {
            id: "97773".into(),
            ..Default::default()
        };

        assert!(plugin.get_media_source(&track, Quality::High).await.is_err());
        assert!(
            plugin
                .import_music_item("https://y.qq.com/n/ryqq/songDetail/004Z8Ihr0JIu5s")
                .await
                .is_err()
        );
        assert!(
            plugin
                .import_music_sheet("https://y.qq.com/n/ryqq/playlist/8223335694")
                .await
                .is_err()
        );
        assert!(logs_contain("获取音源出错"));
        assert!(logs_contain("导入歌单出错"));
    }

    #[tokio::test]
    async fn test_import_with_empty_input_is_invalid_url() {
        let plugin = unreachable_plugin();
        let err = plugin.import_music_item("  ").await.unwrap_err();
        assert!(matches!(err, MusicSourceError::InvalidUrl(_)));
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_search() {
        let plugin = live_plugin();
        let page = plugin.search_by_type("周杰伦", 1, SearchType::Music).await;
        assert!(page.is_ok(), "搜索失败: {:?}", page.err());
    }
}
