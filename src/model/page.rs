//! 分页结果、搜索类型与音质等插件调用参数。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::{Display, EnumString, IntoStaticStr};

use crate::model::generic::{Album, Artist, Sheet, Track};

/// 未指定时使用的每页条目数。
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// 根据从 1 开始的页码计算偏移量。页码 0 视为第 1 页。
pub fn page_offset(page: u32, page_size: u32) -> u32 {
    page.saturating_sub(1).saturating_mul(page_size)
}

/// 一页结果。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// 是否已经是最后一页。
    pub is_end: bool,
    /// 本页数据。
    pub data: Vec<T>,
}

impl<T> Page<T> {
    /// 由一批结果构造分页，条目数少于 `page_size` 时视为最后一页。
    pub fn from_batch(data: Vec<T>, page_size: u32) -> Self {
        Self {
            is_end: data.len() < page_size as usize,
            data,
        }
    }

    /// 不分页的完整结果。
    pub fn single(data: Vec<T>) -> Self {
        Self { is_end: true, data }
    }

    /// 空的最后一页，用于出错或不支持的情形。
    pub fn end() -> Self {
        Self {
            is_end: true,
            data: Vec::new(),
        }
    }

    /// 对本页每个条目做转换，保留 `is_end`。
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            is_end: self.is_end,
            data: self.data.into_iter().map(f).collect(),
        }
    }
}

/// 专辑、歌单、排行榜详情的一页。
///
/// `item` 是被查看对象自身的详细信息。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailPage<T> {
    /// 是否已经是最后一页。
    pub is_end: bool,
    /// 本页的歌曲。
    pub music_list: Vec<Track>,
    /// 被查看对象的详细信息。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<T>,
}

impl<T> DetailPage<T> {
    /// 由一批歌曲构造详情页，条目数少于 `page_size` 时视为最后一页。
    pub fn from_batch(music_list: Vec<Track>, page_size: u32, item: Option<T>) -> Self {
        Self {
            is_end: music_list.len() < page_size as usize,
            music_list,
            item,
        }
    }

    /// 空的最后一页。
    pub fn end() -> Self {
        Self {
            is_end: true,
            music_list: Vec::new(),
            item: None,
        }
    }
}

impl<T: Serialize> DetailPage<T> {
    /// 转换为宿主期望的 JSON，`item` 放在 `item_key` 下，
    /// 例如 `albumItem`、`sheetItem`、`topListItem`。
    pub fn to_host_value(&self, item_key: &str) -> serde_json::Result<Value> {
        let mut object = Map::new();
        object.insert("isEnd".to_string(), Value::Bool(self.is_end));
        object.insert("musicList".to_string(), serde_json::to_value(&self.music_list)?);
        if let Some(item) = &self.item {
            object.insert(item_key.to_string(), serde_json::to_value(item)?);
        }
        Ok(Value::Object(object))
    }
}

/// 搜索的资源类型。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SearchType {
    /// 单曲
    Music,
    /// 专辑
    Album,
    /// 歌手
    Artist,
    /// 歌单
    Sheet,
}

/// 一条搜索结果，类型与请求的 [`SearchType`] 一致。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchItem {
    /// 单曲
    Music(Track),
    /// 专辑
    Album(Album),
    /// 歌手
    Artist(Artist),
    /// 歌单
    Sheet(Sheet),
}

impl SearchItem {
    /// 若是单曲则返回其引用。
    pub fn as_track(&self) -> Option<&Track> {
        match self {
            Self::Music(track) => Some(track),
            _ => None,
        }
    }
}

/// 播放音质。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Quality {
    /// 128kbps
    Low,
    /// 192kbps
    #[default]
    Standard,
    /// 320kbps
    High,
    /// 无损
    Super,
}

impl Quality {
    /// 解析宿主传入的音质字符串，无法识别时回退到 [`Quality::Standard`]。
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    /// 该音质对应的码率标识。
    #[must_use]
    pub fn bitrate(&self) -> u32 {
        match self {
            Self::Low => 128,
            Self::Standard => 192,
            Self::High => 320,
            Self::Super => 999,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_is_end_when_batch_short() {
        let page = Page::from_batch(vec![1; 19], 20);
        assert!(page.is_end);

        let page = Page::from_batch(vec![1; 20], 20);
        assert!(!page.is_end);

        let page: Page<u8> = Page::from_batch(vec![], 20);
        assert!(page.is_end);
    }

    #[test]
    fn test_page_offset_is_one_based() {
        assert_eq!(page_offset(1, 20), 0);
        assert_eq!(page_offset(3, 20), 40);
        assert_eq!(page_offset(0, 20), 0);
    }

    #[test]
    fn test_detail_page_serializes_without_missing_item() {
        let page: DetailPage<Album> = DetailPage::end();
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value, serde_json::json!({ "isEnd": true, "musicList": [] }));
    }

    #[test]
    fn test_detail_page_host_value_uses_item_key() {
        let album = Album {
            id: "8220".into(),
            title: "叶惠美".into(),
            ..Default::default()
        };
        let page = DetailPage::from_batch(vec![], 20, Some(album));

        let value = page.to_host_value("albumItem").unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "isEnd": true,
                "musicList": [],
                "albumItem": { "id": "8220", "title": "叶惠美", "artist": "" }
            })
        );

        let value = DetailPage::<Album>::end().to_host_value("albumItem").unwrap();
        assert!(value.get("albumItem").is_none());
    }

    #[test]
    fn test_search_type_parses_host_strings() {
        assert_eq!("music".parse::<SearchType>().unwrap(), SearchType::Music);
        assert_eq!("sheet".parse::<SearchType>().unwrap(), SearchType::Sheet);
        assert!("lyric".parse::<SearchType>().is_err());
        assert_eq!(SearchType::Artist.to_string(), "artist");
    }

    #[test]
    fn test_quality_bitrate_and_fallback() {
        assert_eq!(Quality::parse_lenient("low").bitrate(), 128);
        assert_eq!(Quality::parse_lenient("standard").bitrate(), 192);
        assert_eq!(Quality::parse_lenient("high").bitrate(), 320);
        assert_eq!(Quality::parse_lenient("super").bitrate(), 999);
        assert_eq!(Quality::parse_lenient("lossless"), Quality::Standard);
        assert_eq!(Quality::default().bitrate(), 192);
    }
}
