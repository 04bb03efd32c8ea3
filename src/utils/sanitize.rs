//! Filename sanitization utilities

/// Sanitize a track label for use as a filename
///
/// Path separators are replaced with `-`. Every other character is kept
/// as-is, so the existence check and the download destination always agree
/// on the same name.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' => '-',
            _ => c,
        })
        .collect()
}
