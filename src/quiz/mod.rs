//! Text-to-quiz engine.
//!
//! Given one article, [`QuizEngine`] produces five multiple-choice questions
//! whose answers are sentences lifted from the article body. A
//! [`QuizSession`] then walks a user through them and keeps score.
//!
//! The engine does no I/O. Sentence splitting and randomness are injected
//! through [`segmenter::SentenceSegmenter`] and [`random::RandomSource`] so
//! callers (and tests) decide how text is split and how options are drawn.

pub mod engine;
pub mod error;
pub mod random;
pub mod segmenter;
pub mod session;

use serde::Serialize;

pub use engine::QuizEngine;
pub use random::RngSource;
pub use segmenter::SegmenterKind;
pub use session::{FinalScore, QuizSession, SessionState, SubmitOutcome};

/// A single multiple-choice question.
///
/// `options` always holds four entries and always contains
/// `correct_answer`. Entries may repeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub prompt: String,
    pub correct_answer: String,
    pub options: Vec<String>,
}
