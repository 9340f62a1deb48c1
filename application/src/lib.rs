//! Application layer for seismic-chat
//!
//! This crate contains the turn pipeline use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
pub use use_cases::chat_session::ChatSession;
pub use use_cases::dispatch::Dispatcher;
pub use use_cases::process_turn::{ProcessTurnUseCase, TurnReply};
