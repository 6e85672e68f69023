//! The parsed message as the filter sees it.

use super::attachment::AttachmentPart;

/// Flattened view of the source message.
///
/// Headers keep their original order, case and raw values so that the
/// rebuilt message carries them verbatim. The body is the first
/// `text/plain` part; attachments appear in original part order.
#[derive(Debug, Clone)]
pub struct MailMessage {
    /// All top-level headers as `(name, raw value)`, in original order.
    /// Names may repeat (e.g. `Received`).
    pub headers: Vec<(String, String)>,

    /// Decoded body of the canonical `text/plain` part, if any.
    pub body_text: Option<String>,

    /// Attachment parts in original order.
    pub attachments: Vec<AttachmentPart>,
}

impl MailMessage {
    /// Headers to copy onto the rebuilt message: everything except
    /// MIME-structural headers (replaced by the new multipart
    /// structure) and `Bcc` (mutt injects a fake one).
    pub fn passthrough_headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .filter(|(name, _)| !is_structural_header(name) && !name.eq_ignore_ascii_case("bcc"))
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// Whether a header describes the MIME structure of the message body
/// rather than the message itself.
pub fn is_structural_header(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.starts_with("content-") || lower.starts_with("mime-")
}
