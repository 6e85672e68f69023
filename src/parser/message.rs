//! Parse a raw RFC 5322 message into the filter's working model.
//!
//! Body and attachment decoding is delegated to `mail-parser`; the
//! top-level headers are scanned by hand from the raw bytes so the
//! rebuilt message can carry them verbatim (original order, original
//! case, repeated names intact).
//!
//! Parsing is all-or-nothing: a message that cannot be understood
//! aborts the invocation so the pipeline never forwards a
//! half-understood message in rewritten form.

use mail_parser::{MessageParser, MimeHeaders};

use crate::error::{FilterError, Result};
use crate::model::{AttachmentPart, MailMessage};

/// Parse a complete raw message (headers + body + attachments).
pub fn parse_message(raw: &[u8]) -> Result<MailMessage> {
    let parsed = MessageParser::default()
        .parse(raw)
        .ok_or_else(|| FilterError::Parse("not a MIME message".into()))?;

    let headers = raw_headers(raw);
    let body_text = parsed.body_text(0).map(|s| s.into_owned());

    let attachments = parsed
        .attachments()
        .map(|part| {
            let content_type = part
                .content_type()
                .map(|ct| match ct.subtype() {
                    Some(sub) => format!("{}/{sub}", ct.ctype()),
                    None => ct.ctype().to_string(),
                })
                .unwrap_or_else(|| "application/octet-stream".to_string());

            // `inline` is owned by the reference rewriter: only parts
            // actually referenced from the HTML are emitted with an
            // inline disposition. Unreferenced parts keep an ordinary
            // attachment disposition with their filename, whatever
            // their source disposition was.
            AttachmentPart {
                filename: part.attachment_name().unwrap_or_default().to_string(),
                content_type,
                contents: part.contents().to_vec(),
                content_id: part.content_id().map(String::from),
                inline: false,
            }
        })
        .collect();

    Ok(MailMessage {
        headers,
        body_text,
        attachments,
    })
}

/// Extract the top-level headers as `(name, value)` pairs in original
/// order, unfolding continuation lines.
///
/// Values stay verbatim apart from unfolding; encoded words are NOT
/// decoded, since these headers are copied straight onto the rebuilt
/// message.
fn raw_headers(raw: &[u8]) -> Vec<(String, String)> {
    let header_block = &raw[..find_header_end(raw).unwrap_or(raw.len())];
    let text = String::from_utf8_lossy(header_block);

    let mut result: Vec<(String, String)> = Vec::new();
    for line in text.lines() {
        if line.starts_with(' ') || line.starts_with('\t') {
            // Continuation line
            if let Some(last) = result.last_mut() {
                last.1.push(' ');
                last.1.push_str(line.trim());
            }
        } else if let Some(colon_pos) = line.find(':') {
            let name = line[..colon_pos].trim().to_string();
            let value = line[colon_pos + 1..].trim().to_string();
            result.push((name, value));
        }
    }
    result
}

/// Find the byte offset where headers end (position of the first blank line).
fn find_header_end(data: &[u8]) -> Option<usize> {
    for i in 0..data.len().saturating_sub(1) {
        if data[i] == b'\n' && data[i + 1] == b'\n' {
            return Some(i);
        }
        if i + 3 < data.len()
            && data[i] == b'\r'
            && data[i + 1] == b'\n'
            && data[i + 2] == b'\r'
            && data[i + 3] == b'\n'
        {
            return Some(i);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE: &str = "From: Alice <alice@example.com>\r\n\
        To: bob@example.com\r\n\
        Subject: Greetings\r\n\
        Message-ID: <m1@example.com>\r\n\
        Content-Type: text/plain; charset=utf-8\r\n\
        \r\n\
        Hello there\r\n";

    const WITH_ATTACHMENT: &str = "From: alice@example.com\r\n\
        Subject: Picture\r\n\
        MIME-Version: 1.0\r\n\
        Content-Type: multipart/mixed; boundary=\"XYZ\"\r\n\
        \r\n\
        --XYZ\r\n\
        Content-Type: text/plain; charset=utf-8\r\n\
        \r\n\
        See attached.\r\n\
        --XYZ\r\n\
        Content-Type: image/png\r\n\
        Content-Disposition: attachment; filename=\"a.png\"\r\n\
        Content-Transfer-Encoding: base64\r\n\
        \r\n\
        iVBORw0KGgo=\r\n\
        --XYZ--\r\n";

    #[test]
    fn test_parse_simple_message() {
        let msg = parse_message(SIMPLE.as_bytes()).unwrap();
        assert_eq!(msg.body_text.as_deref().map(str::trim), Some("Hello there"));
        assert!(msg.attachments.is_empty());

        let names: Vec<&str> = msg.headers.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec!["From", "To", "Subject", "Message-ID", "Content-Type"]
        );
        assert_eq!(msg.headers[2].1, "Greetings");
    }

    #[test]
    fn test_parse_attachment() {
        let msg = parse_message(WITH_ATTACHMENT.as_bytes()).unwrap();
        assert_eq!(msg.attachments.len(), 1);
        let att = &msg.attachments[0];
        assert_eq!(att.filename, "a.png");
        assert_eq!(att.content_type, "image/png");
        // base64 "iVBORw0KGgo=" decodes to the 8-byte PNG signature
        assert_eq!(att.contents, b"\x89PNG\r\n\x1a\n");
        assert!(att.content_id.is_none());
        assert!(!att.inline);
    }

    #[test]
    fn test_source_inline_disposition_not_carried() {
        let raw = "From: alice@example.com\r\n\
            Subject: Inline\r\n\
            MIME-Version: 1.0\r\n\
            Content-Type: multipart/mixed; boundary=\"XYZ\"\r\n\
            \r\n\
            --XYZ\r\n\
            Content-Type: text/plain; charset=utf-8\r\n\
            \r\n\
            Hello.\r\n\
            --XYZ\r\n\
            Content-Type: image/png\r\n\
            Content-Disposition: inline; filename=\"x.png\"\r\n\
            Content-Transfer-Encoding: base64\r\n\
            \r\n\
            iVBORw0KGgo=\r\n\
            --XYZ--\r\n";
        let msg = parse_message(raw.as_bytes()).unwrap();
        assert_eq!(msg.attachments.len(), 1);
        assert_eq!(msg.attachments[0].filename, "x.png");
        // Inline is assigned by the rewriter, never inherited.
        assert!(!msg.attachments[0].inline);
    }

    #[test]
    fn test_folded_header_unfolds() {
        let raw = b"Subject: a very\r\n long subject\r\nFrom: a@b.c\r\n\r\nbody\r\n";
        let headers = raw_headers(raw);
        assert_eq!(
            headers[0],
            ("Subject".to_string(), "a very long subject".to_string())
        );
        assert_eq!(headers[1].0, "From");
    }

    #[test]
    fn test_repeated_headers_kept() {
        let raw = b"Received: one\r\nReceived: two\r\nFrom: a@b.c\r\n\r\nbody\r\n";
        let headers = raw_headers(raw);
        let received: Vec<_> = headers.iter().filter(|(n, _)| n == "Received").collect();
        assert_eq!(received.len(), 2);
    }

    #[test]
    fn test_encoded_words_left_verbatim() {
        let raw = b"Subject: =?UTF-8?Q?Caf=C3=A9?=\r\n\r\nbody\r\n";
        let headers = raw_headers(raw);
        assert_eq!(headers[0].1, "=?UTF-8?Q?Caf=C3=A9?=");
    }
}
