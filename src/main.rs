use std::{path::PathBuf, process::ExitCode};

use clap::{Args, Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use characterfile::{
    DEFAULT_CHARACTER_PATH, DEFAULT_SCHEMA_PATH, config::SamplerConfig, error::CharacterError,
    sample_character, validate_file,
};

/// Character file tools
///
/// `sample` prints a random excerpt of a character: a few bio and lore lines,
/// some example conversations with the `{{userN}}` participants given names, and
/// style directions. `validate` checks a character file against a JSON schema.
///
/// Logs go to stderr and are controlled with RUST_LOG (default `warn`).
#[derive(Parser, Debug)]
#[command(name = "characterfile", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a random excerpt of a character file.
    Sample(SampleArgs),
    /// Validate a JSON document against a JSON schema.
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
struct SampleArgs {
    /// Character file to read.
    #[arg(long, default_value = DEFAULT_CHARACTER_PATH)]
    character: PathBuf,

    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 3)]
    bio_count: usize,

    #[arg(long, default_value_t = 3)]
    lore_count: usize,

    #[arg(long, default_value_t = 3)]
    conversation_count: usize,

    /// Lines shown from each of style.all, style.chat and style.post.
    #[arg(long, default_value_t = 3)]
    style_count: usize,
}

impl From<&SampleArgs> for SamplerConfig {
    fn from(args: &SampleArgs) -> Self {
        SamplerConfig {
            bio_count: args.bio_count,
            lore_count: args.lore_count,
            conversation_count: args.conversation_count,
            style_count: args.style_count,
            seed: args.seed,
        }
    }
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Document to validate.
    #[arg(long, default_value = DEFAULT_CHARACTER_PATH)]
    document: PathBuf,

    /// JSON schema to validate against.
    #[arg(long, default_value = DEFAULT_SCHEMA_PATH)]
    schema: PathBuf,
}

fn run(cli: Cli) -> Result<(), CharacterError> {
    match cli.command {
        Commands::Sample(args) => {
            let report = sample_character(&args.character, &SamplerConfig::from(&args))?;
            println!("{report}");
        }
        Commands::Validate(args) => {
            // an invalid document is reported, not fatal
            let outcome = validate_file(&args.document, &args.schema)?;
            println!("{outcome}");
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) if e.is_fatal() => {
            error!(error = %e, "Command failed");
            Err(e.into())
        }
        Err(e) => {
            eprintln!("{e}");
            Ok(ExitCode::SUCCESS)
        }
    }
}
