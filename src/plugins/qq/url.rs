//! 从 QQ 音乐分享链接中提取资源 ID。

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{MusicSourceError, Result};

static SONG_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:songDetail|song)/(\w+)").unwrap());

static PLAYLIST_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"playlist/(\w+)").unwrap());

/// 从单曲链接中提取歌曲 ID，例如
/// `https://y.qq.com/n/ryqq/songDetail/004Z8Ihr0JIu5s` -> `004Z8Ihr0JIu5s`。
///
/// 不是链接时，输入本身被当作 ID。
pub fn extract_song_id(url_like: &str) -> Result<String> {
    extract_with(&SONG_ID_RE, url_like)
}

/// 从歌单链接中提取歌单 ID，例如
/// `https://y.qq.com/n/ryqq/playlist/8223335694` -> `8223335694`。
///
/// 不是链接时，输入本身被当作 ID。
pub fn extract_playlist_id(url_like: &str) -> Result<String> {
    extract_with(&PLAYLIST_ID_RE, url_like)
}

fn extract_with(re: &Regex, url_like: &str) -> Result<String> {
    let trimmed = url_like.trim();
    if trimmed.is_empty() {
        return Err(MusicSourceError::InvalidUrl(url_like.to_string()));
    }

    let id = re
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map_or(trimmed, |m| m.as_str());

    Ok(id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_song_id_from_share_link() {
        assert_eq!(
            extract_song_id("https://y.qq.com/n/ryqq/songDetail/004Z8Ihr0JIu5s").unwrap(),
            "004Z8Ihr0JIu5s"
        );
        assert_eq!(
            extract_song_id("https://i.y.qq.com/v8/playsong.html?x=1#/song/0039MnYb0qxYhV?a=b")
                .unwrap(),
            "0039MnYb0qxYhV"
        );
    }

    #[test]
    fn test_extract_song_id_falls_back_to_input() {
        assert_eq!(extract_song_id(" 97773 ").unwrap(), "97773");
    }

    #[test]
    fn test_extract_playlist_id() {
        assert_eq!(
            extract_playlist_id("https://y.qq.com/n/ryqq/playlist/8223335694").unwrap(),
            "8223335694"
        );
        assert_eq!(extract_playlist_id("8223335694").unwrap(), "8223335694");
    }

    #[test]
    fn test_empty_input_is_invalid() {
        assert!(matches!(
            extract_song_id("   "),
            Err(MusicSourceError::InvalidUrl(_))
        ));
        assert!(matches!(
            extract_playlist_id(""),
            Err(MusicSourceError::InvalidUrl(_))
        ));
    }
}
