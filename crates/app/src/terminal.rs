//! Line-oriented renderer for quiz sessions.

use std::io::{self, BufRead, Write};

use quiz_core::model::AttemptSummary;
use services::{QuizSession, QuizSessionService, SessionError, SessionStatus, SessionStep};
use storage::QuizListItem;

/// A command typed by the user at the quiz prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Zero-based option index (typed 1-based).
    Select(usize),
    Next,
    Previous,
    Hint,
    Retry,
    Quit,
}

impl Input {
    /// Parse one line of user input. Blank lines mean "next".
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        match line.to_ascii_lowercase().as_str() {
            "" | "n" | "next" => Some(Self::Next),
            "p" | "prev" | "previous" | "b" | "back" => Some(Self::Previous),
            "h" | "hint" => Some(Self::Hint),
            "r" | "retry" => Some(Self::Retry),
            "q" | "quit" | "exit" => Some(Self::Quit),
            other => other
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .map(Self::Select),
        }
    }
}

pub fn print_catalog(out: &mut impl Write, items: &[QuizListItem]) -> io::Result<()> {
    if items.is_empty() {
        return writeln!(out, "No quizzes available.");
    }
    for item in items {
        writeln!(
            out,
            "{:>3}  {:<28} {:<13} {:>2} questions  {:>4} pts  {:>3} min",
            item.id,
            item.title,
            item.difficulty,
            item.question_count,
            item.point_value,
            item.time_limit_secs.div_ceil(60),
        )?;
    }
    Ok(())
}

fn render_question(out: &mut impl Write, session: &QuizSession) -> io::Result<()> {
    let Some(question) = session.current_question() else {
        return Ok(());
    };
    writeln!(out)?;
    writeln!(
        out,
        "[{}/{}] {}",
        question.index + 1,
        question.question_count,
        question.prompt
    )?;
    for (i, option) in question.options.iter().enumerate() {
        let marker = if question.selected_answer == Some(i) { '*' } else { ' ' };
        writeln!(out, "  {marker} {}) {option}", i + 1)?;
    }

    let snap = session.snapshot();
    let mut actions = Vec::new();
    if snap.can_go_previous {
        actions.push("p: back");
    }
    if snap.can_go_next {
        actions.push(if snap.is_last_question() { "n: finish" } else { "n: next" });
    }
    if question.hint.is_some() {
        actions.push("h: hint");
    }
    actions.push("q: quit");
    writeln!(out, "({})", actions.join(", "))?;
    if session.is_over_time() {
        writeln!(out, "Time limit passed; you can still finish.")?;
    }
    Ok(())
}

fn render_results(out: &mut impl Write, session: &QuizSession) -> io::Result<()> {
    let Some(summary) = session.summary() else {
        return Ok(());
    };
    let score = summary.score();
    writeln!(out)?;
    writeln!(out, "{} complete", session.quiz().title())?;
    writeln!(
        out,
        "Score: {}% ({} correct, {} incorrect) in {}s",
        summary.percent(),
        score.correct_count(),
        score.incorrect_count(),
        summary.duration_secs(),
    )?;
    for item in session.review_items() {
        let mark = if item.is_correct { "ok" } else { "x " };
        writeln!(out, " {mark} {}. {}", item.question_index + 1, item.prompt)?;
        if !item.is_correct {
            writeln!(
                out,
                "      your answer: {}",
                item.chosen_text().unwrap_or("(none)")
            )?;
            writeln!(out, "      correct:     {}", item.correct_text().unwrap_or("?"))?;
        }
        if let Some(explanation) = &item.explanation {
            writeln!(out, "      {explanation}")?;
        }
    }
    writeln!(out, "(r: retry, q: back to catalog)")
}

/// Drive `session` from `input` until the user quits or input ends.
///
/// Returns the summary of the last completed attempt, if any.
///
/// # Errors
///
/// Returns I/O errors from reading input or writing output.
pub fn run_session(
    service: &QuizSessionService,
    mut session: QuizSession,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<Option<AttemptSummary>> {
    render_question(out, &session)?;

    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let Some(command) = Input::parse(&line) else {
            writeln!(out, "Unrecognized input: {}", line.trim())?;
            continue;
        };

        let step = match command {
            Input::Quit => break,
            Input::Select(option) => match session.select_answer(option) {
                Ok(step) => step,
                Err(SessionError::InvalidOption { option_count, .. }) => {
                    writeln!(out, "Pick an option between 1 and {option_count}.")?;
                    continue;
                }
                Err(err) => {
                    writeln!(out, "{err}")?;
                    continue;
                }
            },
            Input::Next => session.next(),
            Input::Previous => session.previous(),
            Input::Retry => service.retry(&mut session),
            Input::Hint => {
                let hint = session.current_question().and_then(|q| q.hint);
                writeln!(out, "Hint: {}", hint.unwrap_or("none for this question"))?;
                continue;
            }
        };

        match (step, session.status()) {
            (SessionStep::Completed, _) => render_results(out, &session)?,
            (SessionStep::Unchanged, SessionStatus::InProgress) if command == Input::Next => {
                writeln!(out, "Choose an answer first.")?;
            }
            (SessionStep::Unchanged, _) => {}
            (_, SessionStatus::InProgress) => render_question(out, &session)?,
            _ => {}
        }
    }

    Ok(service.exit(session))
}
