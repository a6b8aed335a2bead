use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use quiz_core::model::QuizId;
use services::{Clock, QuizSessionService};
use storage::{InMemoryCatalog, builtin_catalog, load_catalog};
use tracing_subscriber::EnvFilter;

mod terminal;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidQuizId { raw: String },
    InvalidQuizIdEnv { raw: String },
    InvalidCatalogPath { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidQuizId { raw } => write!(f, "invalid --quiz-id value: {raw}"),
            ArgsError::InvalidQuizIdEnv { raw } => write!(f, "invalid QUIZ_ID value: {raw}"),
            ArgsError::InvalidCatalogPath { raw } => write!(f, "invalid --catalog value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

/// Read `QUIZ_ID`. Unset or blank means "ask interactively".
fn quiz_id_from_env(raw: Option<String>) -> Result<Option<QuizId>, ArgsError> {
    match raw {
        Some(value) if !value.trim().is_empty() => value
            .parse::<QuizId>()
            .map(Some)
            .map_err(|_| ArgsError::InvalidQuizIdEnv { raw: value }),
        _ => Ok(None),
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct Args {
    catalog: Option<PathBuf>,
    quiz_id: Option<QuizId>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- play [--catalog <file.json>] [--quiz-id <id>]");
    eprintln!("  cargo run -p app -- list [--catalog <file.json>]");
    eprintln!();
    eprintln!("Without --catalog the built-in quizzes are used.");
    eprintln!("Without --quiz-id play asks which quiz to take.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_CATALOG_PATH, QUIZ_ID, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    List,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "list" => Some(Self::List),
            _ => None,
        }
    }
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut catalog = std::env::var("QUIZ_CATALOG_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let mut quiz_id = quiz_id_from_env(std::env::var("QUIZ_ID").ok())?;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--catalog" => {
                    let value = require_value(args, "--catalog")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidCatalogPath { raw: value });
                    }
                    catalog = Some(PathBuf::from(value));
                }
                "--quiz-id" => {
                    let value = require_value(args, "--quiz-id")?;
                    let parsed: QuizId = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidQuizId { raw: value.clone() })?;
                    quiz_id = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { catalog, quiz_id })
    }

    fn open_catalog(&self) -> Result<InMemoryCatalog, storage::StorageError> {
        match &self.catalog {
            Some(path) => load_catalog(path),
            None => {
                tracing::debug!("no catalog path given, using built-in quizzes");
                builtin_catalog()
            }
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Ask for a quiz id until the user picks a known one or quits.
fn choose_quiz(
    service: &QuizSessionService,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<Option<QuizId>, Box<dyn std::error::Error>> {
    let items = service.list_quizzes()?;
    terminal::print_catalog(out, &items)?;

    let mut line = String::new();
    loop {
        write!(out, "quiz id (q to quit)> ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let choice = line.trim();
        if matches!(choice, "q" | "quit" | "exit") {
            return Ok(None);
        }
        match choice.parse::<QuizId>() {
            Ok(id) if items.iter().any(|item| item.id == id) => return Ok(Some(id)),
            _ => writeln!(out, "No quiz with id {choice}.")?,
        }
    }
}

fn play(
    service: &QuizSessionService,
    preselected: Option<QuizId>,
) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();

    if let Some(quiz_id) = preselected {
        let session = service.start(quiz_id)?;
        terminal::run_session(service, session, &mut input, &mut out)?;
        return Ok(());
    }

    while let Some(quiz_id) = choose_quiz(service, &mut input, &mut out)? {
        let session = service.start(quiz_id)?;
        terminal::run_session(service, session, &mut input, &mut out)?;
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand means play.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Play,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Play,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            io::Error::new(io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    init_tracing();

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    tracing::debug!(
        command = ?cmd,
        catalog = ?parsed.catalog,
        quiz_id = ?parsed.quiz_id,
        "parsed arguments"
    );

    let catalog = parsed.open_catalog()?;
    let service = QuizSessionService::new(Clock::default(), Arc::new(catalog));

    match cmd {
        Command::List => {
            let items = service.list_quizzes()?;
            terminal::print_catalog(&mut io::stdout().lock(), &items)?;
            Ok(())
        }
        Command::Play => play(&service, parsed.quiz_id),
    }
}

fn main() {
    if let Err(err) = run() {
        tracing::debug!(error = ?err, "exiting with failure");
        eprintln!("{err}");
        std::process::exit(2);
    }
}
