//! Rewrite local image and link references to `cid:` URLs.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::model::AttachmentPart;

static IMG_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(<img\b[^>]*?\bsrc=")([^"]*)(")"#).expect("valid regex")
});

static LINK_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(<a\b[^>]*?\bhref=")([^"]*)(")"#).expect("valid regex")
});

/// Rewrite `<img src>` attributes naming a local attachment to `cid:`
/// references, marking the matched attachments inline and assigning
/// them `Content-ID`s. With `rewrite_links`, `<a href>` attributes get
/// the same treatment (works in Gmail, spotty elsewhere).
///
/// URLs with a scheme and `#` fragment anchors are left alone, as are
/// names with no matching attachment — the client then shows a broken
/// image, which is the accepted degraded mode.
pub fn rewrite_inline_refs(
    html: &str,
    attachments: &mut [AttachmentPart],
    rewrite_links: bool,
) -> String {
    let mut cids = CidAllocator::seed(attachments);

    let html = IMG_SRC.replace_all(html, |caps: &Captures| {
        substitute(caps, attachments, &mut cids)
    });

    if !rewrite_links {
        return html.into_owned();
    }

    LINK_HREF
        .replace_all(&html, |caps: &Captures| {
            substitute(caps, attachments, &mut cids)
        })
        .into_owned()
}

/// Rebuild one matched attribute, substituting the URL when it resolves
/// to an attachment.
fn substitute(
    caps: &Captures<'_>,
    attachments: &mut [AttachmentPart],
    cids: &mut CidAllocator,
) -> String {
    match resolve(&caps[2], attachments, cids) {
        Some(cid_url) => format!("{}{}{}", &caps[1], cid_url, &caps[3]),
        None => caps[0].to_string(),
    }
}

/// Resolve a reference URL to a `cid:` URL, if it names an attachment.
fn resolve(
    url: &str,
    attachments: &mut [AttachmentPart],
    cids: &mut CidAllocator,
) -> Option<String> {
    if url.is_empty() || url.starts_with('#') || url.contains(':') {
        return None;
    }

    // First part in message order wins when filenames repeat.
    let Some(part) = attachments.iter_mut().find(|a| a.filename == url) else {
        tracing::warn!(reference = url, "No attachment matches reference, leaving it unresolved");
        return None;
    };

    let cid = match &part.content_id {
        Some(cid) => cid.clone(),
        None => {
            let cid = cids.allocate(url);
            part.content_id = Some(cid.clone());
            cid
        }
    };
    part.inline = true;
    Some(format!("cid:{cid}"))
}

/// Generates content-ids unique within the message.
///
/// Ids are derived from the filename so repeated runs over the same
/// input produce identical output.
struct CidAllocator {
    used: HashSet<String>,
}

impl CidAllocator {
    /// Seed the used-id set with any ids already present on the message.
    fn seed(attachments: &[AttachmentPart]) -> Self {
        Self {
            used: attachments
                .iter()
                .filter_map(|a| a.content_id.clone())
                .collect(),
        }
    }

    fn allocate(&mut self, filename: &str) -> String {
        let base: String = filename
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        let mut cid = format!("{base}@attached");
        let mut n = 1;
        while !self.used.insert(cid.clone()) {
            cid = format!("{base}.{n}@attached");
            n += 1;
        }
        cid
    }
}
