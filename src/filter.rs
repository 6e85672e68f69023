//! The message transformation pipeline.

use crate::compose;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::parser;
use crate::render::{marker, markdown, rewrite};

/// Result of one filter invocation.
#[derive(Debug)]
pub enum Outcome {
    /// No render marker: the caller forwards the input byte-for-byte.
    Unchanged,
    /// The message was converted; these are the new raw bytes.
    Converted(Vec<u8>),
}

/// Run the full transformation over one raw message.
///
/// Messages without a plain-text body or without a render marker pass
/// through as [`Outcome::Unchanged`]. Any error aborts the invocation
/// before output exists, so a failed run never emits a partial message.
pub fn process_message(raw: &[u8], config: &RenderConfig) -> Result<Outcome> {
    let mut message = parser::parse_message(raw)?;

    let Some(text) = message.body_text.clone() else {
        return Ok(Outcome::Unchanged);
    };
    let Some(source) = marker::strip_marker(&text) else {
        return Ok(Outcome::Unchanged);
    };

    tracing::debug!(
        attachments = message.attachments.len(),
        "Render marker found, converting message"
    );

    let html = markdown::render(source, config)?;
    let html = rewrite::rewrite_inline_refs(&html, &mut message.attachments, config.rewrite_links);
    let bytes = compose::compose(&message, source, &html)?;
    Ok(Outcome::Converted(bytes))
}
