#![forbid(unsafe_code)]

pub mod catalog_file;
pub mod repository;
pub mod seed;

pub use catalog_file::{CatalogFile, QuestionRecord, QuizRecord, load_catalog};
pub use repository::{InMemoryCatalog, QuizCatalog, QuizListItem, StorageError};
pub use seed::{builtin_catalog, builtin_quizzes};
