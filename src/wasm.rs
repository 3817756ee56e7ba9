//! 供 JavaScript 宿主调用的 wasm-bindgen 接口。
//!
//! 所有参数与返回值都使用宿主的 JSON 结构（camelCase）。

use serde::{Serialize, de::DeserializeOwned};
use wasm_bindgen::prelude::*;

use crate::{
    MusicSources, PluginConfig, PluginContext,
    error::MusicSourceError,
    model::{
        generic::{Album, Sheet, TopListItem, Track},
        page::{DetailPage, Page, Quality, SearchItem, SearchType},
    },
    plugins::Plugin,
};

/// 模块加载时安装 panic 钩子，并把 tracing 日志输出到浏览器控制台。
#[wasm_bindgen(start)]
pub fn main_js() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    Ok(())
}

fn to_js_error(e: MusicSourceError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    Ok(value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?)
}

fn detail_to_js<T: Serialize>(detail: &DetailPage<T>, item_key: &str) -> Result<JsValue, JsValue> {
    let value = detail
        .to_host_value(item_key)
        .map_err(|e| to_js_error(e.into()))?;
    to_js(&value)
}

fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    Ok(serde_wasm_bindgen::from_value(value)?)
}

/// 单个插件在 JavaScript 侧的句柄。
#[wasm_bindgen]
pub struct WasmPlugin {
    sources: MusicSources,
    name: String,
}

#[wasm_bindgen]
impl WasmPlugin {
    /// 按名称创建插件，`config_js` 为空时使用默认配置。
    #[wasm_bindgen(constructor)]
    pub fn new(name: String, config_js: JsValue) -> Result<WasmPlugin, JsValue> {
        let config: PluginConfig = if config_js.is_undefined() || config_js.is_null() {
            PluginConfig::default()
        } else {
            from_js(config_js)?
        };
        let ctx = PluginContext::new(config).map_err(to_js_error)?;
        let sources = MusicSources::new(ctx);

        if sources.plugin(&name).is_none() {
            return Err(JsValue::from_str(&format!("未知的插件: {name}")));
        }
        Ok(Self { sources, name })
    }

    fn plugin(&self) -> Result<&dyn Plugin, JsValue> {
        self.sources
            .plugin(&self.name)
            .ok_or_else(|| JsValue::from_str(&format!("未知的插件: {}", self.name)))
    }

    /// 插件元信息。
    #[wasm_bindgen(getter)]
    pub fn platform(&self) -> Result<String, JsValue> {
        Ok(self.plugin()?.info().platform.to_string())
    }

    /// 插件实现了的操作名称，例如 `["search", "getMediaSource"]`。
    #[wasm_bindgen(js_name = supportedMethods)]
    pub fn supported_methods(&self) -> Result<Vec<String>, JsValue> {
        Ok(self
            .plugin()?
            .operations()
            .iter()
            .map(ToString::to_string)
            .collect())
    }

    /// 搜索。无法识别的类型返回空的最后一页。
    pub async fn search(
        &self,
        query: String,
        page: u32,
        search_type: String,
    ) -> Result<JsValue, JsValue> {
        let Ok(search_type) = search_type.parse::<SearchType>() else {
            return to_js(&Page::<SearchItem>::end());
        };
        let result = self
            .plugin()?
            .search(&query, page, search_type)
            .await
            .map_err(to_js_error)?;
        to_js(&result)
    }

    /// 获取歌曲的播放源，`quality` 无法识别时按 `standard` 处理。
    #[wasm_bindgen(js_name = getMediaSource)]
    pub async fn get_media_source(
        &self,
        track_js: JsValue,
        quality: String,
    ) -> Result<JsValue, JsValue> {
        let track: Track = from_js(track_js)?;
        let source = self
            .plugin()?
            .get_media_source(&track, Quality::parse_lenient(&quality))
            .await
            .map_err(to_js_error)?;
        to_js(&source)
    }

    /// 获取歌曲的歌词。
    #[wasm_bindgen(js_name = getLyric)]
    pub async fn get_lyric(&self, track_js: JsValue) -> Result<JsValue, JsValue> {
        let track: Track = from_js(track_js)?;
        let lyric = self.plugin()?.get_lyric(&track).await.map_err(to_js_error)?;
        to_js(&lyric)
    }

    /// 获取专辑详情的一页，第一页的 `albumItem` 携带专辑信息。
    #[wasm_bindgen(js_name = getAlbumInfo)]
    pub async fn get_album_info(&self, album_js: JsValue, page: u32) -> Result<JsValue, JsValue> {
        let album: Album = from_js(album_js)?;
        let detail = self
            .plugin()?
            .get_album_info(&album, page)
            .await
            .map_err(to_js_error)?;
        detail_to_js(&detail, "albumItem")
    }

    /// 获取歌单详情的一页，第一页的 `sheetItem` 携带歌单信息。
    #[wasm_bindgen(js_name = getMusicSheetInfo)]
    pub async fn get_music_sheet_info(
        &self,
        sheet_js: JsValue,
        page: u32,
    ) -> Result<JsValue, JsValue> {
        let sheet: Sheet = from_js(sheet_js)?;
        let detail = self
            .plugin()?
            .get_music_sheet_info(&sheet, page)
            .await
            .map_err(to_js_error)?;
        detail_to_js(&detail, "sheetItem")
    }

    /// 从分享链接或 ID 导入单曲。
    #[wasm_bindgen(js_name = importMusicItem)]
    pub async fn import_music_item(&self, url_like: String) -> Result<JsValue, JsValue> {
        let track = self
            .plugin()?
            .import_music_item(&url_like)
            .await
            .map_err(to_js_error)?;
        to_js(&track)
    }

    /// 从分享链接或 ID 导入歌单中的全部歌曲。
    #[wasm_bindgen(js_name = importMusicSheet)]
    pub async fn import_music_sheet(&self, url_like: String) -> Result<JsValue, JsValue> {
        let tracks = self
            .plugin()?
            .import_music_sheet(&url_like)
            .await
            .map_err(to_js_error)?;
        to_js(&tracks)
    }

    /// 获取排行榜分组。
    #[wasm_bindgen(js_name = getTopLists)]
    pub async fn get_top_lists(&self) -> Result<JsValue, JsValue> {
        let groups = self.plugin()?.get_top_lists().await.map_err(to_js_error)?;
        to_js(&groups)
    }

    /// 获取排行榜详情的一页。
    #[wasm_bindgen(js_name = getTopListDetail)]
    pub async fn get_top_list_detail(
        &self,
        top_list_js: JsValue,
        page: u32,
    ) -> Result<JsValue, JsValue> {
        let top_list: TopListItem = from_js(top_list_js)?;
        let detail = self
            .plugin()?
            .get_top_list_detail(&top_list, page)
            .await
            .map_err(to_js_error)?;
        detail_to_js(&detail, "topListItem")
    }
}
