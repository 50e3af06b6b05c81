mod cli;
mod error_handling;
mod grammar;
mod parser;
mod recognizer;

use std::process::ExitCode;

use clap::Parser;

use grammar::Grammar;

fn verdict(grammar: &Grammar, input: &str) -> bool {
    let accepted = recognizer::recognize(grammar, input);
    if accepted {
        println!("\"{}\" fits the grammar", input);
    } else {
        println!("\"{}\" doesn't fit the grammar", input);
    }
    return accepted;
}

// Prompt for candidate strings until EOF or interrupt
fn interact(grammar: &Grammar) -> ExitCode {
    let mut editor = match rustyline::DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Could not open prompt: {}", e);
            return ExitCode::FAILURE;
        }
    };

    while let Ok(line) = editor.readline("string> ") {
        let _ = editor.add_history_entry(&line);
        verdict(grammar, &line);
    }
    return ExitCode::SUCCESS;
}

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let grammar = match parser::parse_file(&cli.file, cli.start.as_deref()) {
        Ok(grammar) => grammar,
        Err(errors) => {
            for error in errors {
                eprintln!("{}", error);
            }
            return ExitCode::FAILURE;
        }
    };

    if !cli.quiet {
        print!("{}", grammar);
        println!();
    }

    if cli.inputs.is_empty() {
        return interact(&grammar);
    }

    // One-shot mode: test every string, then fail if any was rejected
    let verdicts: Vec<bool> = cli.inputs.iter()
        .map(|input| verdict(&grammar, input))
        .collect();
    if verdicts.into_iter().all(|accepted| accepted) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
