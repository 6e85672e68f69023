//! Trigger-marker detection on the plain-text body.

/// First-line tokens that request Markdown rendering.
pub const MARKERS: [&str; 3] = ["!m", "!md", "!markdown"];

/// Check the first line of `text` for a render marker.
///
/// Returns the body with the marker line removed when one is present.
/// The match is exact (case-sensitive) after trimming trailing
/// whitespace, so `!markdown-extended` or an indented marker do not
/// trigger.
pub fn strip_marker(text: &str) -> Option<&str> {
    let (first, rest) = match text.split_once('\n') {
        Some((first, rest)) => (first, rest),
        None => (text, ""),
    };
    if MARKERS.contains(&first.trim_end()) {
        Some(rest)
    } else {
        None
    }
}
