//! 此模块定义了所有用于反序列化 QQ 音乐 API 响应的数据结构。
//!
//! 不同接口对同一实体使用了不同的字段命名：搜索接口是全小写的扁平字段
//! (`songmid`, `albumname`)，专辑/单曲详情接口使用嵌套的 `singer`、`album`，
//! 歌单与排行榜接口则使用 `ar`、`al`、`dt` 这类缩写。

use serde::Deserialize;
use serde_json::Value;

use crate::model::generic::{deserialize_id, deserialize_opt_id};

/// 所有接口共用的外层容器，业务数据位于 `data` 字段。
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    /// 业务数据。
    pub data: T,
}

/// 搜索接口的数据部分。
#[derive(Debug, Deserialize)]
pub struct ListData<T> {
    /// 本页结果。
    #[serde(default = "Vec::new")]
    pub list: Vec<T>,
}

/// QQ 音乐搜索接口的 `type` 参数。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    /// 单曲
    Song,
    /// 歌单
    Songlist,
    /// 专辑
    Album,
    /// 歌手
    Singer,
}

impl SearchKind {
    /// 获取该搜索类型对应的整数值
    #[must_use]
    pub fn as_u32(&self) -> u32 {
        match self {
            Self::Song => 0,
            Self::Songlist => 2,
            Self::Album => 8,
            Self::Singer => 9,
        }
    }
}

/// 代表 QQ 音乐封面支持的常见分辨率。
///
/// 并非所有专辑都支持所有尺寸。
#[derive(Debug, Clone, Copy)]
pub enum QQMusicCoverSize {
    /// 150x150 像素。
    Size150,
    /// 300x300 像素，通用尺寸。
    Size300,
    /// 500x500 像素，高清尺寸。
    Size500,
    /// 800x800 像素，超高清尺寸，可能接近原图。
    Size800,
}

impl QQMusicCoverSize {
    /// 将给定封面尺寸变体的像素大小以 `u32` 形式返回。
    #[must_use]
    pub fn as_u32(&self) -> u32 {
        match self {
            Self::Size150 => 150,
            Self::Size300 => 300,
            Self::Size500 => 500,
            Self::Size800 => 800,
        }
    }
}

/// 只包含名字的演唱者条目。
#[derive(Debug, Deserialize, Clone)]
pub struct NamedSinger {
    /// 演唱者姓名。
    pub name: String,
}

// =================================================================
// 搜索接口 ( search ) 的模型
// =================================================================

/// 单曲搜索结果 (`type=0`)。
#[derive(Debug, Deserialize, Clone)]
pub struct SearchSong {
    /// 歌曲的数字 ID。
    #[serde(deserialize_with = "deserialize_id")]
    pub songid: String,
    /// 歌曲的媒体 ID。
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub songmid: Option<String>,
    /// 歌曲名。
    pub songname: String,
    /// 演唱者列表。
    #[serde(default)]
    pub singer: Vec<NamedSinger>,
    /// 专辑名。
    pub albumname: Option<String>,
    /// 专辑的数字 ID。
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub albumid: Option<String>,
    /// 专辑的媒体 ID。
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub albummid: Option<String>,
    /// 时长，单位为秒。
    pub interval: Option<u64>,
}

/// 专辑搜索结果 (`type=8`)。
#[derive(Debug, Deserialize, Clone)]
pub struct SearchAlbum {
    /// 专辑的数字 ID。
    #[serde(deserialize_with = "deserialize_id")]
    pub albumid: String,
    /// 专辑的媒体 ID。
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub albummid: Option<String>,
    /// 专辑名。
    pub albumname: String,
    /// 歌手名。
    #[serde(default)]
    pub singername: String,
    /// 歌手的数字 ID。
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub singerid: Option<String>,
    /// 专辑简介。
    pub desc: Option<String>,
}

/// 歌手搜索结果 (`type=9`)。
#[derive(Debug, Deserialize, Clone)]
pub struct SearchSinger {
    /// 歌手的数字 ID。
    #[serde(deserialize_with = "deserialize_id")]
    pub singerid: String,
    /// 歌手的媒体 ID。
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub singermid: Option<String>,
    /// 歌手名。
    pub singername: String,
    /// 歌曲数量。
    pub songnum: Option<u64>,
}

/// 歌单搜索结果 (`type=2`)。
#[derive(Debug, Deserialize, Clone)]
pub struct SearchSonglist {
    /// 歌单 ID。
    #[serde(deserialize_with = "deserialize_id")]
    pub dissid: String,
    /// 歌单名。
    pub dissname: String,
    /// 封面 URL。
    pub imgurl: Option<String>,
    /// 创建者。
    pub creator: Option<NamedSinger>,
    /// 播放量。
    pub listennum: Option<u64>,
    /// 创建时间。
    pub createtime: Option<Value>,
}

// =================================================================
// 播放链接接口 ( songUrl ) 的模型
// =================================================================

/// 播放链接接口的数据部分。
#[derive(Debug, Deserialize)]
pub struct SongUrlData {
    /// 可播放的链接，VIP 歌曲可能为空。
    pub url: Option<String>,
}

// =================================================================
// 歌词接口 ( lyric ) 的模型
// =================================================================

/// 歌词接口的数据部分。
#[derive(Debug, Deserialize)]
pub struct LyricData {
    /// 原文 LRC 歌词，可能经过 Base64 编码。
    pub lyric: Option<String>,
    /// 翻译 LRC 歌词，可能经过 Base64 编码。
    pub tlyric: Option<String>,
}

// =================================================================
// 专辑详情 ( albumDetail ) 与单曲详情 ( songDetail ) 的模型
// =================================================================

/// 专辑详情接口中的歌曲所属专辑。
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct DetailAlbum {
    /// 专辑名。
    pub name: Option<String>,
    /// 专辑的数字 ID。
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub id: Option<String>,
    /// 专辑的媒体 ID。
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub mid: Option<String>,
    /// 封面 URL。
    pub pic_url: Option<String>,
}

/// 专辑详情与单曲详情接口中的歌曲。
#[derive(Debug, Deserialize, Clone)]
pub struct DetailSong {
    /// 歌曲的数字 ID。
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// 歌曲的媒体 ID。
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub mid: Option<String>,
    /// 歌曲名。
    pub name: String,
    /// 演唱者列表。
    #[serde(default)]
    pub singer: Vec<NamedSinger>,
    /// 所属专辑。
    #[serde(default)]
    pub album: DetailAlbum,
    /// 时长，单位为秒。
    pub interval: Option<u64>,
}

/// 专辑详情接口的数据部分。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumDetail {
    /// 专辑 ID。
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// 专辑名。
    pub name: String,
    /// 歌手名。
    pub singer: Option<String>,
    /// 歌手 ID。
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub singer_id: Option<String>,
    /// 封面 URL。
    pub pic_url: Option<String>,
    /// 专辑简介。
    pub desc: Option<String>,
    /// 发行时间。
    pub publish_time: Option<String>,
    /// 本页歌曲。
    #[serde(default)]
    pub songs: Vec<DetailSong>,
}

// =================================================================
// 歌单 ( playlistDetail ) 与排行榜 ( topListDetail ) 的模型
// =================================================================

/// 歌单、排行榜接口中的歌曲所属专辑。
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChartAlbum {
    /// 专辑名。
    pub name: Option<String>,
    /// 专辑的数字 ID。
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub id: Option<String>,
    /// 专辑的媒体 ID。
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub mid: Option<String>,
    /// 封面 URL。
    pub pic_url: Option<String>,
}

/// 歌单、排行榜接口中的歌曲。
#[derive(Debug, Deserialize, Clone)]
pub struct ChartSong {
    /// 歌曲的数字 ID。
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// 歌曲的媒体 ID。
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub mid: Option<String>,
    /// 歌曲名。
    pub name: String,
    /// 演唱者列表。
    #[serde(default)]
    pub ar: Vec<NamedSinger>,
    /// 所属专辑。
    #[serde(default)]
    pub al: ChartAlbum,
    /// 时长，单位为毫秒。
    pub dt: Option<u64>,
}

/// 歌单创建者。
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistCreator {
    /// 昵称。
    pub nickname: Option<String>,
    /// 用户 ID。
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub user_id: Option<String>,
}

/// 歌单详情接口的数据部分。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistDetail {
    /// 歌单 ID。
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// 歌单名。
    pub name: String,
    /// 创建者。
    #[serde(default)]
    pub creator: PlaylistCreator,
    /// 封面 URL。
    pub cover_img_url: Option<String>,
    /// 播放量。
    pub play_count: Option<u64>,
    /// 歌曲总数。
    pub track_count: Option<u64>,
    /// 创建时间。
    pub create_time: Option<Value>,
    /// 歌单描述。
    pub description: Option<String>,
    /// 本页歌曲。
    #[serde(default)]
    pub tracks: Vec<ChartSong>,
}

/// 排行榜分组中的单个榜单。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopListBrief {
    /// 榜单 ID。
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// 榜单名。
    pub name: String,
    /// 封面 URL。
    pub pic_url: Option<String>,
    /// 更新频率。
    pub update_frequency: Option<String>,
}

/// 排行榜分组 ( topListCategories )。
#[derive(Debug, Deserialize)]
pub struct TopListCategory {
    /// 分组名。
    pub name: String,
    /// 分组内的榜单。
    #[serde(default)]
    pub list: Vec<TopListBrief>,
}

/// 排行榜详情接口的数据部分。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopListDetail {
    /// 榜单 ID。
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// 榜单名。
    pub name: String,
    /// 封面 URL。
    pub pic_url: Option<String>,
    /// 更新时间。
    pub update_time: Option<String>,
    /// 更新频率。
    pub update_frequency: Option<String>,
    /// 榜单简介。
    pub description: Option<String>,
    /// 本页歌曲。
    #[serde(default)]
    pub songs: Vec<ChartSong>,
}
