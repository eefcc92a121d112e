use wasm_bindgen::prelude::*;

use crate::model::Compilation;

#[wasm_bindgen]
pub fn render_pdf(json: &str) -> Result<Vec<u8>, JsValue> {
    crate::render_json(json)
        .map(|document| document.bytes)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render from a JS object shaped like `{ laws, config }`.
#[wasm_bindgen]
pub fn render_pdf_value(value: JsValue) -> Result<Vec<u8>, JsValue> {
    let compilation: Compilation = serde_wasm_bindgen::from_value(value)?;
    crate::render(&compilation.laws, &compilation.config)
        .map(|document| document.bytes)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Suggested file name for a title.
#[wasm_bindgen]
pub fn export_file_name(title: &str) -> String {
    crate::metadata::export_file_name(title)
}
