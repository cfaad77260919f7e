mod message_stats;
mod source_message;
mod static_message;
mod translation;

pub use message_stats::MessageStats;
pub use source_message::SourceMessage;
pub use static_message::{StaticMessage, StaticMessageQuery};
pub use translation::Translation;
