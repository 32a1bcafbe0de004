//! Hand a generated file to the user.
//!
//! In the browser the bytes become a Blob behind a temporary object URL that a
//! synthetic `<a download>` click saves. Natively the file is written to the
//! user's download directory.

#[cfg(target_arch = "wasm32")]
pub fn offer_download(file_name: &str, mime: &str, bytes: &[u8]) -> Result<(), String> {
    use wasm_bindgen::JsCast;
    use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

    let describe = |e: wasm_bindgen::JsValue| format!("{e:?}");

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes).into());
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(describe)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(describe)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("no document")?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(describe)?
        .dyn_into()
        .map_err(|_| "not an anchor element".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    Url::revoke_object_url(&url).map_err(describe)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn offer_download(file_name: &str, _mime: &str, bytes: &[u8]) -> Result<(), String> {
    let dir = dirs::download_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
    let path = dir.join(file_name);
    std::fs::write(&path, bytes).map_err(|e| format!("{}: {e}", path.display()))?;
    tracing::info!(path = %path.display(), "saved download");
    Ok(())
}
