pub mod classification;
pub mod conversation;
pub mod transcript;

pub use classification::{ClassificationRecord, ClassificationType};
pub use conversation::{
    CallMetadata, ConversationEndedPayload, ConversationRow, ConversationStatus, NewConversation,
    NewMessage,
};
pub use transcript::TranscriptTurn;
