use js_sys::{Uint8Array, JSON};
use wasm_bindgen::prelude::{wasm_bindgen, JsCast, JsValue};

use anyhow::{anyhow, bail, Result};
use wasm_bindgen_futures::JsFuture;

use super::AssetReader;
use web_sys::Response;

/// Represents the global object in the JavaScript context
#[wasm_bindgen]
extern "C" {
    /// The [Global](https://developer.mozilla.org/en-US/docs/Glossary/Global_object) object.
    type Global;

    /// The [window](https://developer.mozilla.org/en-US/docs/Web/API/Window) global object.
    #[wasm_bindgen(method, getter, js_name = Window)]
    fn window(this: &Global) -> JsValue;

    /// The [WorkerGlobalScope](https://developer.mozilla.org/en-US/docs/Web/API/WorkerGlobalScope) global object.
    #[wasm_bindgen(method, getter, js_name = WorkerGlobalScope)]
    fn worker(this: &Global) -> JsValue;
}

fn js_value_to_err(context: &str) -> impl FnOnce(JsValue) -> anyhow::Error + '_ {
    move |value| match JSON::stringify(&value) {
        Ok(js_str) => anyhow!("Failed to {context}: {js_str}"),
        Err(_) => anyhow!("Failed to {context} and also failed to stringify the JSValue of the error"),
    }
}

/// Fetches sheets over HTTP, addresses are URLs appended to the root
pub struct WebAssetReader {
    root: String,
}

impl WebAssetReader {
    pub fn new(root: &str) -> Self {
        Self {
            root: root.to_string(),
        }
    }
}

impl AssetReader for WebAssetReader {
    fn get_full_address(&self, address: &str) -> String {
        format!("{}{}", self.root, address)
    }

    async fn read<'a>(&'a self, address: &'a str) -> Result<Vec<u8>> {
        let url = self.get_full_address(address);
        // The JS global scope includes a self-reference via a specialising name, which can be used to determine the type of global context available.
        let global: Global = js_sys::global().unchecked_into();
        let promise = if !global.window().is_undefined() {
            let window: web_sys::Window = global.unchecked_into();
            window.fetch_with_str(&url)
        } else if !global.worker().is_undefined() {
            let worker: web_sys::WorkerGlobalScope = global.unchecked_into();
            worker.fetch_with_str(&url)
        } else {
            bail!("Unsupported JavaScript global context");
        };
        let resp_value = JsFuture::from(promise)
            .await
            .map_err(js_value_to_err("fetch url"))?;
        let resp = resp_value
            .dyn_into::<Response>()
            .map_err(js_value_to_err("convert fetch to Response"))?;
        match resp.status() {
            200 => {
                let buffer = resp
                    .array_buffer()
                    .map_err(js_value_to_err("read response body"))?;
                let data = JsFuture::from(buffer)
                    .await
                    .map_err(js_value_to_err("read response body"))?;
                Ok(Uint8Array::new(&data).to_vec())
            }
            404 => bail!("Not Found {url}"),
            status => bail!("HTTP Error {status}"),
        }
    }
}
