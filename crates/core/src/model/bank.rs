use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::question::Question;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionBankError {
    #[error("question bank cannot be empty")]
    Empty,

    #[error("duplicate question id {0} in bank")]
    DuplicateId(QuestionId),
}

/// Ordered, immutable sequence of questions.
///
/// Cloning shares the underlying questions; there is no way to mutate them
/// once the bank is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Arc<[Question]>,
}

impl QuestionBank {
    /// Build a bank from questions in presentation order.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError::Empty` for no questions and
    /// `QuestionBankError::DuplicateId` if two questions share an id.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionBankError> {
        if questions.is_empty() {
            return Err(QuestionBankError::Empty);
        }

        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(QuestionBankError::DuplicateId(question.id()));
            }
        }

        Ok(Self {
            questions: questions.into(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a constructed bank; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: u64) -> Question {
        Question::new(
            QuestionId::new(id),
            format!("Q{id}"),
            vec!["yes".into(), "no".into()],
            0,
        )
        .unwrap()
    }

    #[test]
    fn empty_bank_is_rejected() {
        assert_eq!(QuestionBank::new(Vec::new()).unwrap_err(), QuestionBankError::Empty);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = QuestionBank::new(vec![question(1), question(2), question(1)]).unwrap_err();
        assert_eq!(err, QuestionBankError::DuplicateId(QuestionId::new(1)));
    }

    #[test]
    fn bank_preserves_order() {
        let bank = QuestionBank::new(vec![question(3), question(1), question(2)]).unwrap();
        let ids: Vec<u64> = bank.iter().map(|q| q.id().value()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(bank.len(), 3);
        assert!(!bank.is_empty());
    }

    #[test]
    fn clones_share_questions() {
        let bank = QuestionBank::new(vec![question(1)]).unwrap();
        let copy = bank.clone();
        assert!(Arc::ptr_eq(&bank.questions, &copy.questions));
    }
}
