use quiz_core::model::{Difficulty, QuizDefinition, QuizId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Errors surfaced by catalog sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid catalog entry: {0}")]
    Invalid(#[from] quiz_core::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Lightweight listing row for catalog screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizListItem {
    pub id: QuizId,
    pub title: String,
    pub difficulty: Difficulty,
    pub point_value: u32,
    pub time_limit_secs: u32,
    pub question_count: usize,
}

impl QuizListItem {
    #[must_use]
    pub fn from_quiz(quiz: &QuizDefinition) -> Self {
        Self {
            id: quiz.id(),
            title: quiz.title().to_owned(),
            difficulty: quiz.difficulty(),
            point_value: quiz.point_value(),
            time_limit_secs: quiz.time_limit_secs(),
            question_count: quiz.question_count(),
        }
    }
}

/// Read-only source of quiz definitions.
///
/// Lookups are synchronous; definitions are handed out behind `Arc` so a
/// running session can never observe a change to its bank.
pub trait QuizCatalog: Send + Sync {
    /// Fetch a quiz by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    fn get_quiz(&self, id: QuizId) -> Result<Arc<QuizDefinition>, StorageError>;

    /// List every quiz in the catalog, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be read.
    fn list_quizzes(&self) -> Result<Vec<QuizListItem>, StorageError>;
}

/// In-memory catalog, the default backing for the static quiz data.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    quizzes: Arc<RwLock<HashMap<QuizId, Arc<QuizDefinition>>>>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a list of quizzes.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if two quizzes share an id.
    pub fn from_quizzes(
        quizzes: impl IntoIterator<Item = QuizDefinition>,
    ) -> Result<Self, StorageError> {
        let mut map = HashMap::new();
        for quiz in quizzes {
            let id = quiz.id();
            if map.insert(id, Arc::new(quiz)).is_some() {
                return Err(StorageError::Conflict(format!("duplicate quiz id {id}")));
            }
        }
        Ok(Self {
            quizzes: Arc::new(RwLock::new(map)),
        })
    }

    /// Insert or replace a quiz.
    ///
    /// Sessions already holding the previous definition keep it unchanged.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn upsert_quiz(&self, quiz: QuizDefinition) -> Result<(), StorageError> {
        let mut guard = self
            .quizzes
            .write()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(quiz.id(), Arc::new(quiz));
        Ok(())
    }

    /// Snapshot of every definition, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn all_quizzes(&self) -> Result<Vec<Arc<QuizDefinition>>, StorageError> {
        let guard = self
            .quizzes
            .read()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut all: Vec<_> = guard.values().cloned().collect();
        all.sort_by_key(|q| q.id());
        Ok(all)
    }
}

impl QuizCatalog for InMemoryCatalog {
    fn get_quiz(&self, id: QuizId) -> Result<Arc<QuizDefinition>, StorageError> {
        let guard = self
            .quizzes
            .read()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.get(&id).cloned().ok_or(StorageError::NotFound)
    }

    fn list_quizzes(&self) -> Result<Vec<QuizListItem>, StorageError> {
        Ok(self
            .all_quizzes()?
            .iter()
            .map(|q| QuizListItem::from_quiz(q))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Question, QuestionBank, QuestionId};

    fn build_quiz(id: u64, title: &str) -> QuizDefinition {
        let question = Question::new(
            QuestionId::new(1),
            "What is the size of `int` on most 64-bit platforms?",
            vec!["2 bytes".into(), "4 bytes".into(), "8 bytes".into()],
            1,
        )
        .unwrap();
        QuizDefinition::new(
            QuizId::new(id),
            title,
            Difficulty::Beginner,
            10,
            60,
            QuestionBank::new(vec![question]).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn get_missing_quiz_is_not_found() {
        let catalog = InMemoryCatalog::new();
        let err = catalog.get_quiz(QuizId::new(1)).unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[test]
    fn upsert_replaces_without_touching_handed_out_definitions() {
        let catalog = InMemoryCatalog::new();
        catalog.upsert_quiz(build_quiz(1, "Old")).unwrap();
        let held = catalog.get_quiz(QuizId::new(1)).unwrap();

        catalog.upsert_quiz(build_quiz(1, "New")).unwrap();

        assert_eq!(held.title(), "Old");
        assert_eq!(catalog.get_quiz(QuizId::new(1)).unwrap().title(), "New");
    }

    #[test]
    fn list_is_ordered_by_id() {
        let catalog =
            InMemoryCatalog::from_quizzes([build_quiz(3, "C"), build_quiz(1, "A"), build_quiz(2, "B")])
                .unwrap();
        let items = catalog.list_quizzes().unwrap();
        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
        assert_eq!(items[0].question_count, 1);
    }

    #[test]
    fn duplicate_ids_conflict() {
        let err = InMemoryCatalog::from_quizzes([build_quiz(1, "A"), build_quiz(1, "B")])
            .err()
            .unwrap();
        assert!(matches!(err, StorageError::Conflict(_)));
    }
}
