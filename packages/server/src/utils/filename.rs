/// Fallback extension for uploads whose name has no usable one.
pub const DEFAULT_EXTENSION: &str = "bin";

/// Longest extension kept from an upload name.
const MAX_EXTENSION_LEN: usize = 8;

/// Extension used for the stored object: the text after the last `.` of
/// the original name, lowercased, if it is 1-8 ASCII alphanumerics.
/// Anything else yields [`DEFAULT_EXTENSION`].
pub fn storage_extension(filename: &str) -> String {
    let Some((stem, ext)) = filename.trim().rsplit_once('.') else {
        return DEFAULT_EXTENSION.to_string();
    };
    let ext = ext.to_ascii_lowercase();
    let valid = !stem.is_empty()
        && (1..=MAX_EXTENSION_LEN).contains(&ext.len())
        && ext.chars().all(|c| c.is_ascii_alphanumeric());
    if valid { ext } else { DEFAULT_EXTENSION.to_string() }
}

/// Reduce a client-supplied filename to something safe to store and echo
/// back: last path component only, control characters removed, capped at
/// 255 characters. Returns `None` when nothing is left.
pub fn display_filename(raw: &str) -> Option<String> {
    let last = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = last
        .chars()
        .filter(|c| !c.is_control())
        .take(255)
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Content type for an upload: the declared one when present, otherwise a
/// guess from the filename, otherwise `application/octet-stream`.
pub fn content_type_for(declared: Option<&str>, filename: &str) -> String {
    match declared.map(str::trim) {
        Some(ct) if !ct.is_empty() => ct.to_string(),
        _ => mime_guess::from_path(filename)
            .first_or_octet_stream()
            .essence_str()
            .to_string(),
    }
}
