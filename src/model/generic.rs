//! 定义了整个库通用的、与具体平台无关的核心数据模型。
//!
//! 这些结构体（如 `Track`, `Album`, `Sheet`）是所有插件在获取到
//! 各自平台的数据后，需要转换成的目标标准格式。序列化后的字段名与宿主约定的
//! JSON 形状保持一致（驼峰命名）。

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// 代表一首歌曲的通用模型。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// 歌曲在其平台上的 ID。
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// 歌曲的媒体 ID (部分平台区分数字 ID 与 mid)。
    #[serde(
        default,
        deserialize_with = "deserialize_opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub mid: Option<String>,
    /// 歌曲名。
    pub title: String,
    /// 演唱者，多位演唱者以 `/` 连接。
    pub artist: String,
    /// 所属专辑名。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    /// 所属专辑 ID。
    #[serde(
        default,
        deserialize_with = "deserialize_opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub album_id: Option<String>,
    /// 所属专辑的媒体 ID。
    #[serde(
        default,
        deserialize_with = "deserialize_opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub album_mid: Option<String>,
    /// 封面图片 URL。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork: Option<String>,
    /// 时长，单位为毫秒。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    /// 平台特有的附加字段，原样保留。
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// 代表一张专辑的通用模型。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    /// 专辑 ID。
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// 专辑的媒体 ID。
    #[serde(
        default,
        deserialize_with = "deserialize_opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub mid: Option<String>,
    /// 专辑名。
    pub title: String,
    /// 专辑艺术家。
    #[serde(default)]
    pub artist: String,
    /// 专辑艺术家 ID。
    #[serde(
        default,
        deserialize_with = "deserialize_opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub artist_id: Option<String>,
    /// 封面图片 URL。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork: Option<String>,
    /// 专辑描述。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 发行时间。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_time: Option<String>,
}

/// 代表一位艺术家的通用模型。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    /// 艺术家 ID。
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// 艺术家的媒体 ID。
    #[serde(
        default,
        deserialize_with = "deserialize_opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub mid: Option<String>,
    /// 艺术家姓名。
    pub name: String,
    /// 头像 URL。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// 作品数量。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub works_num: Option<u64>,
}

/// 代表一个歌单的通用模型。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    /// 歌单 ID。
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// 歌单名。
    pub title: String,
    /// 封面图片 URL。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork: Option<String>,
    /// 创建者昵称。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    /// 创建者 ID。
    #[serde(
        default,
        deserialize_with = "deserialize_opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub creator_id: Option<String>,
    /// 播放量。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_count: Option<u64>,
    /// 歌曲数量。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_count: Option<u64>,
    /// 创建时间，保留平台返回的原始形式。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<Value>,
    /// 歌单描述。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// 一组排行榜，例如“官方榜”、“特色榜”。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopListGroup {
    /// 分组标题。
    pub title: String,
    /// 分组内的排行榜。
    pub data: Vec<TopListItem>,
}

/// 代表一个排行榜的通用模型。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopListItem {
    /// 排行榜 ID。
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// 排行榜标题。
    pub title: String,
    /// 封面图片 URL。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork: Option<String>,
    /// 更新频率的描述，例如“每日更新”。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_frequency: Option<String>,
    /// 最近一次更新时间。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
    /// 排行榜简介。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// 一首歌曲可播放的音源。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSource {
    /// 可直接播放的链接。
    pub url: String,
    /// 播放时需要携带的请求头。
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// 播放时需要使用的 User-Agent。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl MediaSource {
    /// 只有链接、无需额外请求头的音源。
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

/// 歌词，内容均为 LRC 文本。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lyric {
    /// 原文歌词。
    pub raw_lrc: String,
    /// 翻译歌词。
    pub translation: String,
}

/// 将多位演唱者的名字以 `/` 连接。
pub fn join_artists<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names.into_iter().collect::<Vec<_>>().join("/")
}

/// 接受字符串或数字形式的 ID，统一转换为 `String`。
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "ID 必须是字符串或数字，实际为: {other}"
        ))),
    }
}

/// 与 [`deserialize_id`] 相同，但允许字段为 `null`。空字符串视为缺失。
pub fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "ID 必须是字符串或数字，实际为: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_track_accepts_numeric_ids() {
        let track: Track = serde_json::from_value(json!({
            "id": 97773,
            "mid": "0039MnYb0qxYhV",
            "title": "晴天",
            "artist": "周杰伦",
            "albumId": 8220,
            "duration": 269000
        }))
        .unwrap();

        assert_eq!(track.id, "97773");
        assert_eq!(track.album_id.as_deref(), Some("8220"));
        assert_eq!(track.duration, Some(269_000));
        assert!(track.extra.is_empty());
    }

    #[test]
    fn test_track_keeps_unknown_fields_in_extra() {
        let track: Track = serde_json::from_value(json!({
            "id": "abc",
            "title": "t",
            "artist": "a",
            "preview_url": "https://p.scdn.co/mp3-preview/x"
        }))
        .unwrap();

        assert_eq!(
            track.extra.get("preview_url"),
            Some(&json!("https://p.scdn.co/mp3-preview/x"))
        );

        let back = serde_json::to_value(&track).unwrap();
        assert_eq!(back["preview_url"], "https://p.scdn.co/mp3-preview/x");
        assert!(back.get("album").is_none(), "None 字段不应被序列化");
    }

    #[test]
    fn test_serialized_keys_are_camel_case() {
        let sheet = Sheet {
            id: "1".into(),
            title: "歌单".into(),
            play_count: Some(5),
            ..Default::default()
        };
        let value = serde_json::to_value(&sheet).unwrap();
        assert_eq!(value["playCount"], 5);

        let lyric = Lyric::default();
        let value = serde_json::to_value(&lyric).unwrap();
        assert_eq!(value, json!({ "rawLrc": "", "translation": "" }));
    }

    #[test]
    fn test_opt_id_treats_empty_string_as_none() {
        let album: Album = serde_json::from_value(json!({
            "id": "1",
            "mid": "",
            "title": "x"
        }))
        .unwrap();
        assert_eq!(album.mid, None);
    }

    #[test]
    fn test_join_artists() {
        assert_eq!(join_artists(["A", "B", "C"]), "A/B/C");
        assert_eq!(join_artists(Vec::<&str>::new()), "");
    }
}
