//! Command-line interface for labparse
//! Scans and parses lab-language source files and prints the scanner and parser output.
//!
//! Usage:
//!   labparse check `<path>` [--language `<language>`] [--format `<format>`] [--config `<file>`] [--no-tokens]
//!   labparse tokens `<path>` [--language `<language>`]
//!   labparse list-languages
//!
//! Exit status: 0 when the source is accepted, 1 when diagnostics were reported, 2 when the
//! file, the configuration, or the source text itself could not be processed.

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use labparse::labparse::config::{LabparseConfig, Loader};
use labparse::labparse::formats::{self, FormatError, OutputFormat};
use labparse::labparse::language::Language;
use labparse::labparse::lexing::LineCounting;
use labparse::labparse::LexError;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// User configuration picked up from the working directory when `--config` is absent.
const LOCAL_CONFIG: &str = "labparse.toml";

#[derive(Debug, Error)]
enum AppError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();

    let result = match matches.subcommand() {
        Some(("check", check_matches)) => handle_check_command(check_matches),
        Some(("tokens", tokens_matches)) => handle_tokens_command(tokens_matches),
        Some(("list-languages", _)) => {
            handle_list_languages_command();
            Ok(ExitCode::SUCCESS)
        }
        _ => unreachable!(),
    };

    result.unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(2)
    })
}

fn cli() -> Command {
    let path_arg = Arg::new("path")
        .help("Path to the source file")
        .required(true)
        .index(1)
        .value_parser(value_parser!(PathBuf));
    let language_arg = Arg::new("language")
        .long("language")
        .short('l')
        .help("Language of the source file (defaults to the configured language)")
        .value_parser(value_parser!(Language));
    let config_arg = Arg::new("config")
        .long("config")
        .short('c')
        .help("Configuration file layered over the defaults")
        .value_parser(value_parser!(PathBuf));
    let line_counting_arg = Arg::new("line-counting")
        .long("line-counting")
        .help("How line numbers are counted")
        .value_parser(value_parser!(LineCounting));

    Command::new("labparse")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Scanner and error-tolerant parser for the lab languages")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("check")
                .about("Scan and parse a file, reporting tokens and diagnostics")
                .arg(path_arg.clone())
                .arg(language_arg.clone())
                .arg(config_arg.clone())
                .arg(line_counting_arg.clone())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(value_parser!(OutputFormat)),
                )
                .arg(
                    Arg::new("no-tokens")
                        .long("no-tokens")
                        .help("Omit the scanner output")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the token stream, one token per line")
                .arg(path_arg)
                .arg(language_arg)
                .arg(config_arg)
                .arg(line_counting_arg),
        )
        .subcommand(Command::new("list-languages").about("List the supported languages"))
}

/// Layer the configuration file and command-line flags over the defaults.
fn load_config(matches: &ArgMatches) -> Result<LabparseConfig, AppError> {
    let mut loader = match matches.get_one::<PathBuf>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(LOCAL_CONFIG),
    };
    if let Some(language) = matches.get_one::<Language>("language") {
        loader = loader.set_override("analysis.language", language.name())?;
    }
    if let Some(counting) = matches.get_one::<LineCounting>("line-counting") {
        loader = loader.set_override("analysis.line_counting", counting.name())?;
    }
    if let Ok(Some(format)) = matches.try_get_one::<OutputFormat>("format") {
        loader = loader.set_override("output.format", format.name())?;
    }
    if matches.try_get_one::<bool>("no-tokens").ok().flatten() == Some(&true) {
        loader = loader.set_override("output.show_tokens", false)?;
    }
    Ok(loader.build()?)
}

fn read_source(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Handle the check command
fn handle_check_command(matches: &ArgMatches) -> Result<ExitCode, AppError> {
    let config = load_config(matches)?;
    let path = matches.get_one::<PathBuf>("path").unwrap();
    let source = read_source(path)?;

    tracing::debug!(path = %path.display(), language = %config.analysis.language, "checking");
    let analysis = config
        .analysis
        .language
        .analyze(&source, config.analysis.line_counting)?;
    let output = formats::render(&analysis, config.output.format, config.output.show_tokens)?;
    print!("{}", output);

    Ok(if analysis.is_accepted() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Handle the tokens command
fn handle_tokens_command(matches: &ArgMatches) -> Result<ExitCode, AppError> {
    let config = load_config(matches)?;
    let path = matches.get_one::<PathBuf>("path").unwrap();
    let source = read_source(path)?;

    let tokens = config
        .analysis
        .language
        .tokenize_with(&source, config.analysis.line_counting)?;
    for token in tokens {
        println!("{}:{}\t{}", token.line, token.column, token);
    }
    Ok(ExitCode::SUCCESS)
}

/// Handle the list-languages command
fn handle_list_languages_command() {
    println!("Available languages:\n");
    for language in Language::ALL {
        println!("  {}", language);
        println!("    {}", language.description());
    }
}
