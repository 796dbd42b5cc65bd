//! Application use cases

pub mod chat_turn;

pub use chat_turn::{ChatTurnError, ChatTurnInput, ChatTurnOutput, ChatTurnUseCase};
