//! Attachment parts carried through the filter.

/// A non-text child part of the message, with its decoded payload.
///
/// Exactly one message is processed per invocation, so payloads are
/// held in memory for the lifetime of the filter run.
#[derive(Debug, Clone)]
pub struct AttachmentPart {
    /// Filename from the `Content-Disposition` (or `Content-Type` name)
    /// parameter. Empty when the part carries no name; such parts are
    /// never matched by reference rewriting.
    pub filename: String,

    /// MIME content type (e.g. `"image/png"`, `"application/pdf"`).
    pub content_type: String,

    /// Decoded binary payload.
    pub contents: Vec<u8>,

    /// Content-ID, once assigned by reference rewriting (or carried
    /// over from the source message).
    pub content_id: Option<String>,

    /// `true` once the part is referenced from the HTML body and must
    /// be emitted with an inline disposition.
    pub inline: bool,
}
