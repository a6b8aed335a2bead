use std::fmt;
use std::path::PathBuf;

use quiz_core::model::QuizId;
use storage::{CatalogFile, builtin_quizzes};

#[derive(Debug, Clone)]
struct Args {
    out: Option<PathBuf>,
    only: Option<QuizId>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidQuizId { raw: String },
    InvalidOut { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidQuizId { raw } => write!(f, "invalid --quiz-id value: {raw}"),
            ArgsError::InvalidOut { raw } => write!(f, "invalid --out value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut out = std::env::var("QUIZ_CATALOG_PATH").ok().map(PathBuf::from);
        let mut only = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--out" => {
                    let value = require_value(&mut args, "--out")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidOut { raw: value });
                    }
                    out = Some(PathBuf::from(value));
                }
                "--stdout" => out = None,
                "--quiz-id" => {
                    let value = require_value(&mut args, "--quiz-id")?;
                    let parsed: QuizId = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidQuizId { raw: value.clone() })?;
                    only = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { out, only })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Writes the built-in quiz catalog as JSON.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --out <path>              Write to a file instead of stdout");
    eprintln!("  --stdout                  Force stdout even if QUIZ_CATALOG_PATH is set");
    eprintln!("  --quiz-id <id>            Export a single quiz");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_CATALOG_PATH (default for --out)");
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let quizzes: Vec<_> = builtin_quizzes()?
        .into_iter()
        .filter(|q| args.only.is_none_or(|id| q.id() == id))
        .collect();
    if quizzes.is_empty() {
        return Err(format!("no built-in quiz matches {:?}", args.only).into());
    }

    let json = CatalogFile::from_quizzes(&quizzes).to_json()?;

    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, json)?;
            eprintln!("Wrote {} quizzes to {}", quizzes.len(), path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
