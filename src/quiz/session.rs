//! Answer/advance/reset state machine for one quiz run.
//!
//! ```text
//! AwaitingAnswer(i) --submit--> AwaitingNext(i) --advance--> AwaitingAnswer(i + 1)
//!                                               \--advance (last)--> Complete
//! any state --reset--> AwaitingAnswer(0)
//! ```
//!
//! Calls made in the wrong state return [`QuizError::InvalidState`] and leave
//! the session untouched.

use std::fmt;

use tracing::debug;

use super::Question;
use super::engine::QuizEngine;
use super::error::QuizError;
use super::random::RandomSource;
use super::segmenter::SentenceSegmenter;
use crate::models::Article;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingAnswer(usize),
    AwaitingNext(usize),
    Complete,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::AwaitingAnswer(i) => write!(f, "awaiting an answer to question {}", i + 1),
            SessionState::AwaitingNext(i) => write!(f, "question {} is already answered", i + 1),
            SessionState::Complete => f.write_str("the quiz is complete"),
        }
    }
}

/// Result of [`QuizSession::submit_answer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was selected; the session is unchanged.
    MustSelect,
    Correct,
    Incorrect { correct_answer: String },
}

/// Result of [`QuizSession::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Advance {
    /// Moved on to the question at this index.
    Question(usize),
    Complete(FinalScore),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinalScore {
    pub score: usize,
    pub total: usize,
}

impl FinalScore {
    /// `100 * score / total`, rounded to two decimals.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let raw = 100.0 * self.score as f64 / self.total as f64;
        (raw * 100.0).round() / 100.0
    }

    /// Percentage formatted with exactly two decimals, e.g. `"60.00"`.
    pub fn percentage_label(&self) -> String {
        format!("{:.2}", self.percentage())
    }
}

/// One user's progress through one generated quiz.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    state: SessionState,
    score: usize,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>) -> Self {
        let state = Self::initial_state(&questions);
        Self {
            questions,
            state,
            score: 0,
        }
    }

    /// Generate questions for `article` and start a fresh session on them.
    pub fn start<S, R>(engine: &QuizEngine<S>, article: &Article, random: &mut R) -> Self
    where
        S: SentenceSegmenter,
        R: RandomSource + ?Sized,
    {
        Self::new(engine.generate_questions(article, random))
    }

    fn initial_state(questions: &[Question]) -> SessionState {
        if questions.is_empty() {
            SessionState::Complete
        } else {
            SessionState::AwaitingAnswer(0)
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Index of the current question, or `total()` once complete.
    pub fn position(&self) -> usize {
        match self.state {
            SessionState::AwaitingAnswer(i) | SessionState::AwaitingNext(i) => i,
            SessionState::Complete => self.questions.len(),
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            SessionState::AwaitingAnswer(i) | SessionState::AwaitingNext(i) => self.questions.get(i),
            SessionState::Complete => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Complete
    }

    pub fn final_score(&self) -> Option<FinalScore> {
        self.is_complete().then(|| FinalScore {
            score: self.score,
            total: self.questions.len(),
        })
    }

    /// Grade `selected` against the current question.
    ///
    /// `None` means the user has not picked anything yet and yields
    /// [`SubmitOutcome::MustSelect`] without changing state. Comparison with
    /// the correct answer is exact string equality.
    pub fn submit_answer(&mut self, selected: Option<&str>) -> Result<SubmitOutcome, QuizError> {
        let SessionState::AwaitingAnswer(i) = self.state else {
            return Err(QuizError::InvalidState {
                operation: "submit an answer",
                state: self.state,
            });
        };
        let Some(selected) = selected else {
            return Ok(SubmitOutcome::MustSelect);
        };

        let question = &self.questions[i];
        if !question.options.iter().any(|option| option == selected) {
            return Err(QuizError::UnknownOption(selected.to_string()));
        }

        let outcome = if selected == question.correct_answer {
            self.score += 1;
            SubmitOutcome::Correct
        } else {
            SubmitOutcome::Incorrect {
                correct_answer: question.correct_answer.clone(),
            }
        };
        self.state = SessionState::AwaitingNext(i);
        debug!(question = i, score = self.score, ?outcome, "Answer submitted");
        Ok(outcome)
    }

    /// Submit the option at `index` of the current question, `None` meaning
    /// no selection.
    pub fn submit_option(&mut self, index: Option<usize>) -> Result<SubmitOutcome, QuizError> {
        let selected = match (index, self.current_question()) {
            (Some(index), Some(question)) => match question.options.get(index) {
                Some(option) => Some(option.clone()),
                None => return Err(QuizError::UnknownOption(format!("#{}", index + 1))),
            },
            _ => None,
        };
        self.submit_answer(selected.as_deref())
    }

    pub fn advance(&mut self) -> Result<Advance, QuizError> {
        let SessionState::AwaitingNext(i) = self.state else {
            return Err(QuizError::InvalidState {
                operation: "advance",
                state: self.state,
            });
        };

        let next = i + 1;
        let advance = if next < self.questions.len() {
            self.state = SessionState::AwaitingAnswer(next);
            Advance::Question(next)
        } else {
            self.state = SessionState::Complete;
            Advance::Complete(FinalScore {
                score: self.score,
                total: self.questions.len(),
            })
        };
        debug!(from = i, ?advance, "Advanced");
        Ok(advance)
    }

    /// Back to the first question with a zero score. Valid in any state.
    pub fn reset(&mut self) {
        self.state = Self::initial_state(&self.questions);
        self.score = 0;
        debug!("Session reset");
    }
}
