//! Terminal presentation: article cards, article detail, summaries and the
//! interactive quiz loop.
//!
//! Everything writes to a caller-supplied `Write` and reads from a
//! `BufRead`, so `main` hands in stdin/stdout and tests hand in in-memory
//! buffers.

use std::error::Error;
use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::models::Article;
use crate::quiz::{FinalScore, QuizSession, SessionState, SubmitOutcome};
use crate::summarize::{Summary, SummarySource};
use crate::utils::format_published_date;

const QUIT: &str = "q";
const RETRY: &str = "r";

pub fn render_headlines<W: Write>(out: &mut W, articles: &[Article]) -> io::Result<()> {
    if articles.is_empty() {
        return writeln!(out, "No articles found for this category.");
    }
    for (i, article) in articles.iter().enumerate() {
        writeln!(out, "{:>2}. {}", i + 1, article.title)?;
        if let Some(description) = article.description.as_deref().filter(|d| !d.is_empty()) {
            writeln!(out, "    {description}")?;
        }
        writeln!(
            out,
            "    {} | {}",
            article.source_name(),
            format_published_date(article.published_at.as_deref())
        )?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn render_article<W: Write>(out: &mut W, article: &Article) -> io::Result<()> {
    writeln!(out, "{}", article.title)?;
    writeln!(out, "{}", "=".repeat(article.title.chars().count()))?;
    writeln!(
        out,
        "{} | {}",
        article.source_name(),
        format_published_date(article.published_at.as_deref())
    )?;
    writeln!(out)?;
    writeln!(out, "{}", article.description.as_deref().unwrap_or(""))?;
    let content = article
        .content
        .as_deref()
        .filter(|c| !c.is_empty())
        .unwrap_or("Full content not available.");
    writeln!(out, "{content}")?;
    if let Some(url) = article.url.as_deref() {
        writeln!(out)?;
        writeln!(out, "Read original article at source: {url}")?;
    }
    Ok(())
}

pub fn render_summary<W: Write>(out: &mut W, summary: &Summary) -> io::Result<()> {
    writeln!(out, "Article Summary")?;
    writeln!(out, "---------------")?;
    writeln!(out, "{}", summary.text)?;
    let origin = match summary.source {
        SummarySource::Model => "generated by the summarization model",
        SummarySource::Extractive => "first sentences of the article",
    };
    writeln!(out, "({origin})")
}

fn render_question<W: Write>(out: &mut W, session: &QuizSession, index: usize) -> io::Result<()> {
    let question = &session.questions()[index];
    writeln!(out)?;
    writeln!(out, "Question {} of {}", index + 1, session.total())?;
    writeln!(out, "{}", question.prompt)?;
    for (n, option) in question.options.iter().enumerate() {
        let label = if option.trim().is_empty() { "(no text)" } else { option.trim() };
        writeln!(out, "  {}) {}", n + 1, label)?;
    }
    Ok(())
}

fn render_final_score<W: Write>(out: &mut W, score: &FinalScore) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Quiz Complete!")?;
    writeln!(out, "Final Score: {}/{}", score.score, score.total)?;
    writeln!(out, "Percentage: {}%", score.percentage_label())
}

/// Print `text` and read one trimmed line; `None` on end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, text: &str) -> io::Result<Option<String>> {
    write!(out, "{text}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Drive `session` from user input until the user quits or input ends.
///
/// Returns the score of the last completed run, if any. The session is
/// reset before returning.
pub fn run_quiz<R, W>(session: &mut QuizSession, input: &mut R, out: &mut W) -> Result<Option<FinalScore>, Box<dyn Error>>
where
    R: BufRead,
    W: Write,
{
    let mut last_score = None;

    'session: loop {
        match session.state() {
            SessionState::AwaitingAnswer(i) => {
                render_question(out, session, i)?;
                let option_count = session.questions()[i].options.len();
                loop {
                    let Some(line) = prompt(input, out, &format!("Your answer (1-{option_count}, q to quit): "))? else {
                        break 'session;
                    };
                    if line == QUIT {
                        break 'session;
                    }
                    let choice = if line.is_empty() {
                        None
                    } else {
                        match line.parse::<usize>() {
                            Ok(n) if (1..=option_count).contains(&n) => Some(n - 1),
                            _ => {
                                writeln!(out, "Please enter a number between 1 and {option_count}")?;
                                continue;
                            }
                        }
                    };
                    match session.submit_option(choice)? {
                        SubmitOutcome::MustSelect => {
                            writeln!(out, "Please select an answer")?;
                            continue;
                        }
                        SubmitOutcome::Correct => writeln!(out, "Correct!")?,
                        SubmitOutcome::Incorrect { correct_answer } => {
                            writeln!(out, "Incorrect. The correct answer was: {}", correct_answer.trim())?
                        }
                    }
                    break;
                }
            }
            SessionState::AwaitingNext(_) => {
                match prompt(input, out, "Press Enter for the next question (q to quit): ")? {
                    Some(line) if line != QUIT => {
                        session.advance()?;
                    }
                    _ => break 'session,
                }
            }
            SessionState::Complete => {
                let Some(score) = session.final_score() else {
                    break 'session;
                };
                render_final_score(out, &score)?;
                info!(score = score.score, total = score.total, percentage = %score.percentage_label(), "Quiz completed");
                last_score = Some(score);
                loop {
                    match prompt(input, out, "[r] try again, [q] quit: ")?.as_deref() {
                        Some(RETRY) => {
                            session.reset();
                            continue 'session;
                        }
                        Some(QUIT) | None => break 'session,
                        Some(_) => continue,
                    }
                }
            }
        }
    }

    debug!(position = session.position(), score = session.score(), "Closing quiz");
    session.reset();
    Ok(last_score)
}
