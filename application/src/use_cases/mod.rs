//! Use cases for the application layer

pub mod chat_session;
pub mod dispatch;
pub mod process_turn;
