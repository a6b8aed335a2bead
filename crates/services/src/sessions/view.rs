use quiz_core::model::{QuizDefinition, QuizScore};
use serde::Serialize;

/// The question currently on screen, borrowed from the session.
///
/// Presentation-agnostic: option labels, numbering and hint toggles are the
/// renderer's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrentQuestion<'a> {
    pub index: usize,
    pub question_count: usize,
    pub prompt: &'a str,
    pub options: &'a [String],
    pub hint: Option<&'a str>,
    pub selected_answer: Option<usize>,
}

/// One row of the post-quiz review screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewItem {
    pub question_index: usize,
    pub prompt: String,
    pub options: Vec<String>,
    pub chosen_option_index: Option<usize>,
    pub correct_option_index: usize,
    pub is_correct: bool,
    pub explanation: Option<String>,
}

impl ReviewItem {
    /// Join per-question results with the question text they refer to.
    #[must_use]
    pub fn collect(quiz: &QuizDefinition, score: &QuizScore) -> Vec<Self> {
        score
            .results()
            .iter()
            .filter_map(|result| {
                let question = quiz.bank().get(result.question_index)?;
                Some(Self {
                    question_index: result.question_index,
                    prompt: question.prompt().to_owned(),
                    options: question.options().to_vec(),
                    chosen_option_index: result.chosen_option_index,
                    correct_option_index: result.correct_option_index,
                    is_correct: result.is_correct,
                    explanation: question.explanation().map(str::to_owned),
                })
            })
            .collect()
    }

    /// Text of the chosen option, if any.
    #[must_use]
    pub fn chosen_text(&self) -> Option<&str> {
        self.chosen_option_index
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
    }

    #[must_use]
    pub fn correct_text(&self) -> Option<&str> {
        self.options
            .get(self.correct_option_index)
            .map(String::as_str)
    }
}
