//! Turns one article into a fixed set of multiple-choice questions.
//!
//! Every quiz has [`QUESTION_COUNT`] questions built from a static list of
//! prompt templates. Question `i` is answered by sentence `i` of the body
//! (falling back to the first sentence), and its three distractors are
//! sampled with replacement from all sentences of the same body. Options
//! are neither trimmed nor deduplicated.

use itertools::Itertools;
use tracing::{debug, instrument};

use super::Question;
use super::random::{RandomSource, shuffle};
use super::segmenter::{NaiveSegmenter, SentenceSegmenter};
use crate::models::Article;

pub const QUESTION_COUNT: usize = 5;
pub const OPTION_COUNT: usize = 4;
const DISTRACTOR_COUNT: usize = OPTION_COUNT - 1;
const SUBJECT_WORDS: usize = 3;

/// Used as a distractor when the segmenter produced no sentences at all.
pub const PLACEHOLDER_OPTION: &str = "Alternative option based on context";

struct QuestionTemplate {
    prompt: &'static str,
    fill: fn(&'static str, &str) -> String,
}

static TEMPLATES: [QuestionTemplate; QUESTION_COUNT] = [
    QuestionTemplate {
        prompt: "According to the article, what is {subject}?",
        fill: fill_subject,
    },
    QuestionTemplate {
        prompt: "What was the main impact or consequence mentioned in the article?",
        fill: fixed,
    },
    QuestionTemplate {
        prompt: "Which of the following statements is true according to the article?",
        fill: fixed,
    },
    QuestionTemplate {
        prompt: "What was the key finding or announcement mentioned in the article?",
        fill: fixed,
    },
    QuestionTemplate {
        prompt: "Based on the article, what was the primary reason for this event/situation?",
        fill: fixed,
    },
];

fn fill_subject(prompt: &'static str, title: &str) -> String {
    prompt.replace("{subject}", &main_subject(title))
}

fn fixed(prompt: &'static str, _title: &str) -> String {
    prompt.to_string()
}

/// First three space-separated words of the title.
pub fn main_subject(title: &str) -> String {
    title.split(' ').take(SUBJECT_WORDS).join(" ")
}

/// Generates questions for an article using a pluggable segmenter.
#[derive(Debug, Clone, Default)]
pub struct QuizEngine<S = NaiveSegmenter> {
    segmenter: S,
}

#[cfg(test)]
impl QuizEngine {
    pub fn naive() -> Self {
        Self::new(NaiveSegmenter)
    }
}

impl<S: SentenceSegmenter> QuizEngine<S> {
    pub fn new(segmenter: S) -> Self {
        Self { segmenter }
    }

    /// Build the [`QUESTION_COUNT`] questions for `article`.
    ///
    /// Randomness is drawn in a fixed order per question: three distractor
    /// picks, then the shuffle of the four options.
    #[instrument(level = "debug", skip_all, fields(title = %article.title))]
    pub fn generate_questions<R>(&self, article: &Article, random: &mut R) -> Vec<Question>
    where
        R: RandomSource + ?Sized,
    {
        let sentences = self.segmenter.segment(article.body());
        debug!(sentences = sentences.len(), "Segmented article body");

        TEMPLATES
            .iter()
            .enumerate()
            .map(|(i, template)| {
                let correct_answer = correct_answer(&sentences, i);
                let mut options = Vec::with_capacity(OPTION_COUNT);
                options.push(correct_answer.clone());
                for _ in 0..DISTRACTOR_COUNT {
                    options.push(distractor(&sentences, random));
                }
                shuffle(&mut options, random);

                Question {
                    prompt: (template.fill)(template.prompt, &article.title),
                    correct_answer,
                    options,
                }
            })
            .collect()
    }
}

/// Sentence `index`, or the first sentence when that slot is missing or
/// empty, or the empty string when there are no sentences.
fn correct_answer(sentences: &[String], index: usize) -> String {
    sentences
        .get(index)
        .filter(|s| !s.is_empty())
        .or_else(|| sentences.first())
        .cloned()
        .unwrap_or_default()
}

fn distractor<R>(sentences: &[String], random: &mut R) -> String
where
    R: RandomSource + ?Sized,
{
    if sentences.is_empty() {
        return PLACEHOLDER_OPTION.to_string();
    }
    sentences[random.below(sentences.len())].clone()
}
