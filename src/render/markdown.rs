//! Markdown-to-HTML conversion (GitHub Flavored Markdown).

use crate::config::RenderConfig;
use crate::error::{FilterError, Result};

/// Standard mail signature separator, as a line of its own.
/// RFC 5322 bodies carry CRLF line endings; decoded text may carry
/// bare LF, so both forms are recognized.
const SIGNATURE_SEPARATOR_CRLF: &str = "\r\n-- \r\n";
const SIGNATURE_SEPARATOR: &str = "\n-- \n";

/// Render Markdown source to an HTML fragment.
///
/// A trailing `-- ` signature is kept out of the Markdown rendering and
/// appended as a small `<pre>` block, so signatures survive verbatim.
/// A configured stylesheet is prepended as a `<style>` element; an
/// unreadable stylesheet is skipped with a warning, never fatal.
pub fn render(source: &str, config: &RenderConfig) -> Result<String> {
    let mut html = match split_signature(source) {
        Some((body, signature)) if config.signature_block => {
            let mut html = to_html(body, config)?;
            html.push_str("\n<pre class=\"signature\" style=\"font-size: small\">-- \n");
            html.push_str(signature);
            html.push_str("</pre>");
            html
        }
        _ => to_html(source, config)?,
    };

    if let Some(ref path) = config.style_path {
        match std::fs::read_to_string(path) {
            Ok(css) => html = format!("<style>{css}</style>{html}"),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to read stylesheet, skipping"
                );
            }
        }
    }

    Ok(html)
}

/// Split body from signature at the first `-- ` separator line.
fn split_signature(source: &str) -> Option<(&str, &str)> {
    source
        .split_once(SIGNATURE_SEPARATOR_CRLF)
        .or_else(|| source.split_once(SIGNATURE_SEPARATOR))
}

/// Convert one Markdown fragment with GFM extensions.
fn to_html(source: &str, config: &RenderConfig) -> Result<String> {
    let options = markdown::Options {
        parse: markdown::ParseOptions::gfm(),
        compile: markdown::CompileOptions {
            allow_dangerous_html: config.allow_raw_html,
            allow_dangerous_protocol: config.allow_raw_html,
            ..markdown::CompileOptions::gfm()
        },
    };
    markdown::to_html_with_options(source, &options)
        .map_err(|e| FilterError::Render(e.to_string()))
}
