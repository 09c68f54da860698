use base64::Engine;
use wasm_bindgen::JsCast;

/// Decodes the `pdf_data` field of a note-PDF response.
pub fn decode_pdf_payload(base64_data: &str) -> Result<Vec<u8>, String> {
    base64::engine::general_purpose::STANDARD
        .decode(base64_data.trim())
        .map_err(|_| "Failed to decode PDF payload".to_string())
}

/// Hands a binary payload to the browser as a file download.
pub fn trigger_blob_download(
    filename: &str,
    content_type: &str,
    bytes: &[u8],
) -> Result<(), String> {
    let data = js_sys::Uint8Array::from(bytes);
    let array = js_sys::Array::new();
    array.push(&data);
    let props = web_sys::BlobPropertyBag::new();
    props.set_type(content_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&array, &props)
        .map_err(|_| "Failed to create blob".to_string())?;

    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| "Failed to create object URL".to_string())?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("No document")?;
    let element = document
        .create_element("a")
        .map_err(|_| "Failed to create link".to_string())?;
    let a = element
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "Failed to cast anchor".to_string())?;
    a.set_href(&url);
    a.set_download(filename);
    a.style().set_property("display", "none").ok();
    document
        .body()
        .ok_or("No body")?
        .append_child(&a)
        .map_err(|_| "Append failed".to_string())?;
    a.click();
    a.remove();
    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

/// Decodes and downloads a note exported as PDF.
pub fn trigger_pdf_download(
    filename: &str,
    content_type: &str,
    base64_data: &str,
) -> Result<(), String> {
    let bytes = decode_pdf_payload(base64_data)?;
    trigger_blob_download(filename, content_type, &bytes)
}
