use thiserror::Error;

use super::session::SessionState;

/// Misuse of a [`QuizSession`](super::QuizSession) by the code driving it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },

    #[error("answer {0:?} is not one of the current options")]
    UnknownOption(String),
}
