use std::process::ExitCode;

use clap::Parser;
use doctext::doc::DocReader;

/// Extract plain text from a legacy Word 97-2003 (.doc) binary document.
#[derive(Parser)]
#[command(name = "doctext", version)]
struct Cli {
    /// Path to the .doc file to read.
    document: std::path::PathBuf,

    /// Suppress the trailing newline after the extracted text.
    #[arg(long)]
    no_newline: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut reader = match DocReader::open(&cli.document) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("doctext: {e}");
            return ExitCode::FAILURE;
        }
    };

    match reader.read_text() {
        Ok(text) => {
            if cli.no_newline {
                print!("{text}");
            } else {
                println!("{text}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("doctext: {e}");
            ExitCode::FAILURE
        }
    }
}
