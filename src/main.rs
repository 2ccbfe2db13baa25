//! mamushi CLI - tokenize a source file and dump the token stream

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// mamushi - token stream inspector for the language
#[derive(Parser, Debug)]
#[command(name = "mamushi")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tokenize a source file and dump the token stream", long_about = None)]
struct Cli {
    /// Input source file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Emit the token stream as JSON
    #[arg(long)]
    json: bool,

    /// Check only (don't print tokens)
    #[arg(short, long)]
    check: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let source = std::fs::read_to_string(&cli.input)?;

    let tokens = match mamushi::tokenize(&source) {
        Ok(tokens) => tokens,
        Err(err) => {
            eprintln!("{}: {err}", cli.input.display());
            std::process::exit(1);
        }
    };

    if cli.check {
        println!("✅ Lexed {} tokens", tokens.len());
        return Ok(());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
    } else {
        for token in &tokens {
            println!("{token}");
        }
    }

    Ok(())
}
