//! `mdmail` — a sendmail-pipeline filter that renders Markdown email.
//!
//! The filter reads one complete RFC 5322 message. If the first line of
//! the plain-text body is `!m`, `!md` or `!markdown`, the message is
//! re-emitted as a multipart message carrying the original text plus an
//! HTML rendering, with local image references converted into inline
//! `cid:` parts. Any other message passes through byte-for-byte.

pub mod compose;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod parser;
pub mod render;
