//! Assembly of the outgoing multipart message.

use mail_builder::headers::raw::Raw;
use mail_builder::mime::MimePart;
use mail_builder::MessageBuilder;

use crate::error::{FilterError, Result};
use crate::model::MailMessage;

/// Build the raw bytes of the converted message.
///
/// The result is a `multipart/alternative` of the marker-stripped plain
/// text and the rendered HTML; when the source message carried
/// attachments, that alternative becomes the first child of a
/// `multipart/mixed` root with each attachment as a sibling part.
/// Referenced attachments are emitted inline with their `Content-ID`,
/// the rest keep an ordinary attachment disposition.
///
/// All non-structural headers of the source are copied verbatim, in
/// their original order.
pub fn compose(message: &MailMessage, plain_body: &str, html_body: &str) -> Result<Vec<u8>> {
    let mut builder = MessageBuilder::new();
    for (name, value) in message.passthrough_headers() {
        builder = builder.header(name.to_string(), Raw::new(value.to_string()));
    }

    let alternative = MimePart::new(
        "multipart/alternative",
        vec![
            MimePart::new("text/plain", plain_body),
            MimePart::new("text/html", html_body),
        ],
    );

    let root = if message.attachments.is_empty() {
        alternative
    } else {
        let mut parts = Vec::with_capacity(message.attachments.len() + 1);
        parts.push(alternative);
        for att in &message.attachments {
            let part = MimePart::new(att.content_type.as_str(), &att.contents[..]);
            let part = match (&att.content_id, att.inline) {
                (Some(cid), true) => part.cid(cid.as_str()).inline(),
                (Some(cid), false) => part.cid(cid.as_str()).attachment(att.filename.as_str()),
                (None, true) => part.inline(),
                (None, false) => part.attachment(att.filename.as_str()),
            };
            parts.push(part);
        }
        MimePart::new("multipart/mixed", parts)
    };

    builder
        .body(root)
        .write_to_vec()
        .map_err(FilterError::Compose)
}
