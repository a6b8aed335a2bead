//! Quizzes shipped with the app as static data.

use quiz_core::model::{Difficulty, Question, QuestionBank, QuestionId, QuizDefinition, QuizId};

use crate::repository::{InMemoryCatalog, StorageError};

struct SeedQuestion {
    prompt: &'static str,
    options: &'static [&'static str],
    correct: usize,
    explanation: &'static str,
    hint: Option<&'static str>,
}

struct SeedQuiz {
    id: u64,
    title: &'static str,
    description: &'static str,
    difficulty: Difficulty,
    point_value: u32,
    time_limit_secs: u32,
    questions: &'static [SeedQuestion],
}

const C_BASICS: SeedQuiz = SeedQuiz {
    id: 1,
    title: "C Language Basics",
    description: "Types, operators and the standard library entry points.",
    difficulty: Difficulty::Beginner,
    point_value: 100,
    time_limit_secs: 600,
    questions: &[
        SeedQuestion {
            prompt: "Which function is the entry point of a hosted C program?",
            options: &["start()", "main()", "init()", "entry()"],
            correct: 1,
            explanation: "A hosted C implementation calls `main` at program startup.",
            hint: None,
        },
        SeedQuestion {
            prompt: "What is the value of `sizeof(char)`?",
            options: &["0", "1", "2", "Implementation defined"],
            correct: 1,
            explanation: "`sizeof(char)` is 1 by definition, whatever the width of a byte.",
            hint: Some("The standard defines it, not the platform."),
        },
        SeedQuestion {
            prompt: "Which header declares `printf`?",
            options: &["<stdlib.h>", "<string.h>", "<stdio.h>", "<print.h>"],
            correct: 2,
            explanation: "`printf` and the rest of formatted I/O live in <stdio.h>.",
            hint: None,
        },
        SeedQuestion {
            prompt: "What does `7 / 2` evaluate to in C?",
            options: &["3.5", "4", "3", "Compilation error"],
            correct: 2,
            explanation: "Integer division truncates toward zero, so the result is 3.",
            hint: Some("Both operands are integers."),
        },
        SeedQuestion {
            prompt: "Which format specifier prints an `unsigned long`?",
            options: &["%d", "%lu", "%ul", "%ld"],
            correct: 1,
            explanation: "`l` is the length modifier and `u` the conversion: `%lu`.",
            hint: None,
        },
    ],
};

const POINTERS: SeedQuiz = SeedQuiz {
    id: 2,
    title: "Pointers and Memory",
    description: "Addresses, dereferencing and dynamic allocation.",
    difficulty: Difficulty::Intermediate,
    point_value: 150,
    time_limit_secs: 900,
    questions: &[
        SeedQuestion {
            prompt: "Given `int x = 5; int *p = &x;`, what does `*p` yield?",
            options: &["The address of x", "5", "The address of p", "Undefined"],
            correct: 1,
            explanation: "Dereferencing `p` reads the object it points to, which is `x`.",
            hint: None,
        },
        SeedQuestion {
            prompt: "What must follow every successful `malloc` once the memory is no longer needed?",
            options: &["delete", "release", "free", "Nothing"],
            correct: 2,
            explanation: "Memory from `malloc` is returned with `free`; skipping it leaks.",
            hint: Some("C has no destructors."),
        },
        SeedQuestion {
            prompt: "If `int *p` points at `a[0]`, where does `p + 1` point?",
            options: &["One byte after a[0]", "a[1]", "a[0] + 1", "Undefined"],
            correct: 1,
            explanation: "Pointer arithmetic scales by the size of the pointed-to type.",
            hint: None,
        },
        SeedQuestion {
            prompt: "What is dereferencing a null pointer?",
            options: &["Returns 0", "Undefined behavior", "A compile error", "Returns NULL"],
            correct: 1,
            explanation: "The standard leaves it undefined; in practice it usually crashes.",
            hint: None,
        },
    ],
};

const CPP_CLASSES: SeedQuiz = SeedQuiz {
    id: 3,
    title: "C++ Classes and RAII",
    description: "Constructors, destructors and resource ownership.",
    difficulty: Difficulty::Advanced,
    point_value: 200,
    time_limit_secs: 1200,
    questions: &[
        SeedQuestion {
            prompt: "When does a local object's destructor run?",
            options: &[
                "When the program exits",
                "When it goes out of scope",
                "When the garbage collector runs",
                "Only when `delete` is called",
            ],
            correct: 1,
            explanation: "Automatic objects are destroyed at the end of their scope.",
            hint: None,
        },
        SeedQuestion {
            prompt: "Which smart pointer expresses sole ownership?",
            options: &["std::shared_ptr", "std::weak_ptr", "std::unique_ptr", "std::auto_ptr"],
            correct: 2,
            explanation: "`unique_ptr` is move-only and owns its object exclusively.",
            hint: Some("It cannot be copied."),
        },
        SeedQuestion {
            prompt: "A base class used polymorphically should declare its destructor as...",
            options: &["static", "virtual", "inline", "explicit"],
            correct: 1,
            explanation: "Deleting through a base pointer needs a virtual destructor.",
            hint: None,
        },
        SeedQuestion {
            prompt: "What does the rule of three cover?",
            options: &[
                "Constructor, destructor, operator=",
                "Destructor, copy constructor, copy assignment",
                "Move constructor, move assignment, destructor",
                "new, delete, sizeof",
            ],
            correct: 1,
            explanation: "A class that manages a resource usually needs all three.",
            hint: None,
        },
        SeedQuestion {
            prompt: "Which keyword prevents implicit conversions through a constructor?",
            options: &["explicit", "const", "final", "delete"],
            correct: 0,
            explanation: "`explicit` constructors are skipped by implicit conversions.",
            hint: None,
        },
    ],
};

const SEED: &[SeedQuiz] = &[C_BASICS, POINTERS, CPP_CLASSES];

fn build(seed: &SeedQuiz) -> Result<QuizDefinition, quiz_core::Error> {
    let questions = seed
        .questions
        .iter()
        .zip(1_u64..)
        .map(|(q, id)| {
            Question::new(
                QuestionId::new(id),
                q.prompt,
                q.options.iter().map(|o| (*o).to_owned()).collect(),
                q.correct,
            )
            .map(|question| {
                question
                    .with_explanation(Some(q.explanation.to_owned()))
                    .with_hint(q.hint.map(str::to_owned))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(QuizDefinition::new(
        QuizId::new(seed.id),
        seed.title,
        seed.difficulty,
        seed.point_value,
        seed.time_limit_secs,
        QuestionBank::new(questions)?,
    )?
    .with_description(Some(seed.description.to_owned())))
}

/// Every built-in quiz, ordered by id.
///
/// # Errors
///
/// Returns `quiz_core::Error` if a built-in quiz fails validation.
pub fn builtin_quizzes() -> Result<Vec<QuizDefinition>, quiz_core::Error> {
    SEED.iter().map(build).collect()
}

/// Catalog holding the built-in quizzes.
///
/// # Errors
///
/// Returns `StorageError` if the built-in data fails validation.
pub fn builtin_catalog() -> Result<InMemoryCatalog, StorageError> {
    InMemoryCatalog::from_quizzes(builtin_quizzes()?)
}
