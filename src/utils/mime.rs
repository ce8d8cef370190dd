//! MIME type detection for uploaded file parts

/// Guess MIME by inspecting bytes (magic numbers)
pub fn guess_mime_from_bytes(bytes: &[u8]) -> Option<String> {
    infer::get(bytes).map(|k| k.mime_type().to_string())
}

/// Guess MIME by file name or path (extension-based)
pub fn guess_mime_from_name(file_name: &str) -> Option<String> {
    mime_guess::from_path(file_name)
        .first_raw()
        .map(|s| s.to_string())
}

/// Combined guess: prefer bytes, fall back to extension, otherwise octet-stream
pub fn guess_mime(bytes: Option<&[u8]>, file_name: Option<&str>) -> String {
    if let Some(b) = bytes
        && let Some(m) = guess_mime_from_bytes(b)
    {
        return m;
    }
    if let Some(name) = file_name
        && let Some(m) = guess_mime_from_name(name)
    {
        return m;
    }
    "application/octet-stream".to_string()
}
