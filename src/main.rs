use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;

use patlex::{grammar, DiagnosticError, LexError, Scanner, Source, TokenStream};

#[derive(Parser)]
#[command(name = "patlex")]
#[command(author, version, about = "Tokenize a file with the built-in pattern table", long_about = None)]
struct Cli {
    /// File to scan
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Let the first matching pattern win instead of the longest
    #[arg(long)]
    first_match: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// One token per line
    #[value(name = "text")]
    Text,
    /// JSON array of tokens
    #[value(name = "json")]
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger(cli.verbose).init();

    if let Err(e) = run(&cli) {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

/// `RUST_LOG` with an `info` default; `--verbose` forces `debug`
fn logger(verbose: bool) -> env_logger::Builder {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder
}

fn run(cli: &Cli) -> Result<()> {
    let source = Source::open(&cli.input)
        .with_context(|| format!("Failed to read input file: {:?}", cli.input))?;

    let table = if cli.first_match {
        grammar::first_match_table()
    } else {
        grammar::default_table()
    };

    let tokens = match Scanner::new(table).scan_source(&source) {
        Ok(tokens) => tokens,
        Err(e) => {
            let error = LexError::from(e);
            report_error(&source, &error)?;
            anyhow::bail!("Scanning {} failed", source.name());
        }
    };

    log::info!("Scanned {} tokens from {}", tokens.len(), source.name());
    print_tokens(&tokens, cli.format)
}

fn report_error(source: &Source, error: &LexError) -> Result<()> {
    let mut files = SimpleFiles::new();
    let file_id = files.add(source.name(), source.text());

    let diagnostic = DiagnosticError::new(error, file_id).to_diagnostic();
    let writer = StandardStream::stderr(ColorChoice::Auto);
    let config = codespan_reporting::term::Config::default();
    codespan_reporting::term::emit(&mut writer.lock(), &config, &files, &diagnostic)?;
    Ok(())
}

fn print_tokens(tokens: &TokenStream<'_>, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Text => write!(out, "{}", tokens)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, tokens)?;
            writeln!(out)?;
        }
    }

    Ok(())
}
