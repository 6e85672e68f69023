//! Working model of the message being filtered.

pub mod attachment;
pub mod message;

pub use attachment::AttachmentPart;
pub use message::MailMessage;
