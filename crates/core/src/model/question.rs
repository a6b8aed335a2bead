use thiserror::Error;

use crate::model::ids::QuestionId;

/// Minimum number of answer choices a question must offer.
pub const MIN_OPTIONS: usize = 2;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question needs at least 2 options, got {count}")]
    TooFewOptions { count: usize },

    #[error("option {index} is empty")]
    EmptyOption { index: usize },

    #[error("correct option index {index} is out of range for {count} options")]
    CorrectOptionOutOfRange { index: usize, count: usize },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question.
///
/// The position of an option in `options` is its canonical answer encoding,
/// so options are never reordered after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: Vec<String>,
    correct_option_index: usize,
    explanation: Option<String>,
    hint: Option<String>,
}

impl Question {
    /// Creates a validated question.
    ///
    /// Prompt and options are trimmed.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt or an option is blank, fewer than
    /// two options are given, or `correct_option_index` does not point at an option.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_option_index: usize,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into().trim().to_owned();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.len() < MIN_OPTIONS {
            return Err(QuestionError::TooFewOptions {
                count: options.len(),
            });
        }

        let mut trimmed = Vec::with_capacity(options.len());
        for (index, option) in options.into_iter().enumerate() {
            let option = option.trim().to_owned();
            if option.is_empty() {
                return Err(QuestionError::EmptyOption { index });
            }
            trimmed.push(option);
        }

        if correct_option_index >= trimmed.len() {
            return Err(QuestionError::CorrectOptionOutOfRange {
                index: correct_option_index,
                count: trimmed.len(),
            });
        }

        Ok(Self {
            id,
            prompt,
            options: trimmed,
            correct_option_index,
            explanation: None,
            hint: None,
        })
    }

    /// Attach an explanation shown after the quiz. Blank text clears it.
    #[must_use]
    pub fn with_explanation(mut self, explanation: Option<String>) -> Self {
        self.explanation = normalize_optional(explanation);
        self
    }

    /// Attach a hint shown on request. Blank text clears it.
    #[must_use]
    pub fn with_hint(mut self, hint: Option<String>) -> Self {
        self.hint = normalize_optional(hint);
        self
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn correct_option_index(&self) -> usize {
        self.correct_option_index
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Returns true if `option_index` names a valid choice for this question.
    #[must_use]
    pub fn accepts(&self, option_index: usize) -> bool {
        option_index < self.options.len()
    }

    /// Returns true if `option_index` is the correct choice.
    #[must_use]
    pub fn is_correct(&self, option_index: usize) -> bool {
        option_index == self.correct_option_index
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
