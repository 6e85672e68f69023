//! Markdown rendering: marker detection, HTML conversion, inline
//! reference rewriting.

pub mod marker;
pub mod markdown;
pub mod rewrite;
