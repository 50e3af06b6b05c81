use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the CNF grammar
    pub file: PathBuf,

    /// Strings to test; with none given, prompts interactively
    #[arg(value_name = "STRING")]
    pub inputs: Vec<String>,

    /// Start symbol (default: first in the file)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<String>,

    /// Don't print the grammar before testing
    #[arg(short, long)]
    pub quiet: bool
}
