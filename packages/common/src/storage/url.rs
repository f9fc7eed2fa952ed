/// Marker segment that precedes `{bucket}/{path}` in public object URLs.
const PUBLIC_MARKER: &str = "/object/public/";

/// Build the public URL of an object: `{base}/object/public/{bucket}/{path}`.
pub fn object_url(base: &str, bucket: &str, path: &str) -> String {
    format!(
        "{}{}{}/{}",
        base.trim_end_matches('/'),
        PUBLIC_MARKER,
        bucket,
        path.trim_start_matches('/')
    )
}

/// Recover `(bucket, path)` from a public object URL.
///
/// Returns `None` when the URL does not contain `/object/public/{bucket}/{path}`.
/// Query strings and fragments are ignored.
pub fn parse_public_url(url: &str) -> Option<(String, String)> {
    let start = url.find(PUBLIC_MARKER)? + PUBLIC_MARKER.len();
    let rest = &url[start..];
    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    let (bucket, path) = rest.split_once('/')?;
    let path = path.trim_matches('/');
    if bucket.is_empty() || path.is_empty() {
        return None;
    }
    Some((bucket.to_string(), path.to_string()))
}
