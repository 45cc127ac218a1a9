use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;

use msstyle::logging::{init_logging, LogFormat};
use msstyle::{RuleBook, StyleEngine};

/// Source label for text read from stdin.
const STDIN_LABEL: &str = "input.md";

#[derive(Parser)]
#[command(
    name = "msstyle",
    about = "Rewrite or audit prose against the Microsoft style rulebook",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Rulebook file (.json, .yaml or .yml) to use instead of the built-in rules
    #[arg(long, global = true, env = "MSSTYLE_RULES")]
    rules: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Human, global = true)]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Command {
    /// Rewrite text into Microsoft style
    Transform(Inputs),
    /// Replace discouraged terms with their preferred forms
    Standardize(Inputs),
    /// Report style violations and a compliance score
    Check(ScoredInputs),
    /// Report discouraged terminology
    Terms(Inputs),
    /// Report acronyms used without their expansion
    Acronyms(Inputs),
    /// Run every audit and print the standardized text
    Review(ScoredInputs),
    /// Print the active rulebook
    Rules,
}

#[derive(Args)]
struct Inputs {
    /// File paths to process (reads stdin if none provided)
    files: Vec<PathBuf>,
}

#[derive(Args)]
struct ScoredInputs {
    #[command(flatten)]
    inputs: Inputs,

    /// Exit with status 1 when any style score is below this value
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    fail_under: Option<u8>,
}

struct Document {
    label: String,
    text: String,
}

fn read_documents(inputs: &Inputs) -> Result<Vec<Document>> {
    if inputs.files.is_empty() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Ok(vec![Document {
            label: STDIN_LABEL.to_string(),
            text,
        }]);
    }
    inputs
        .files
        .iter()
        .map(|path| {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok(Document {
                label: path.display().to_string(),
                text,
            })
        })
        .collect()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Append a newline unless the text already ends with one.
fn terminated(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

fn load_engine(rules: Option<&PathBuf>) -> Result<StyleEngine> {
    let book = match rules {
        Some(path) => RuleBook::from_path(path)
            .with_context(|| format!("failed to load rulebook {}", path.display()))?,
        None => RuleBook::builtin(),
    };
    Ok(StyleEngine::new(book)?)
}

fn below_threshold(score: u8, fail_under: Option<u8>) -> bool {
    fail_under.is_some_and(|min| score < min)
}

fn run(cli: Cli) -> Result<ExitCode> {
    let engine = load_engine(cli.rules.as_ref())?;
    let mut failed = false;

    match &cli.command {
        Command::Transform(inputs) => {
            for doc in read_documents(inputs)? {
                print!("{}", terminated(engine.transform(&doc.text)));
            }
        }
        Command::Standardize(inputs) => {
            for doc in read_documents(inputs)? {
                print!("{}", terminated(engine.standardize(&doc.text)));
            }
        }
        Command::Check(scored) => {
            for doc in read_documents(&scored.inputs)? {
                let result = engine.check(&doc.text, Some(&doc.label));
                failed |= below_threshold(result.score, scored.fail_under);
                print_json(&result)?;
            }
        }
        Command::Terms(inputs) => {
            for doc in read_documents(inputs)? {
                print_json(&engine.validate_terms(&doc.text))?;
            }
        }
        Command::Acronyms(inputs) => {
            for doc in read_documents(inputs)? {
                print_json(&engine.check_acronyms(&doc.text))?;
            }
        }
        Command::Review(scored) => {
            for doc in read_documents(&scored.inputs)? {
                let review = engine.review(&doc.text, Some(&doc.label));
                failed |= below_threshold(review.style.score, scored.fail_under);
                print_json(&review)?;
            }
        }
        Command::Rules => print_json(engine.rulebook())?,
    }

    if failed {
        tracing::warn!("style score below threshold");
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
