/*
    This module parses CNF grammar files
*/

use std::fmt::Display;
use std::fs::File;
use std::io::BufRead;
use std::path::Path;

use crate::grammar::*;
use crate::error_handling::*;
use itertools::Itertools;

#[derive(Debug)]
pub enum LoadErrorType {
    // A declaration line has no colon
    MissingColon,
    // Nothing stands before the colon
    MissingNonterminal,
    // The right-hand side is neither one terminal character nor two
    // comma-separated nonterminal names
    MalformedRhs(String),
    // The productions parsed fine but do not form a valid grammar
    BadGrammar(ConstructionError),
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for LoadErrorType {}

impl PartialEq for LoadErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (LoadErrorType::FileError(a), LoadErrorType::FileError(b)) =>
                a.kind() == b.kind(),
            (LoadErrorType::BadGrammar(a), LoadErrorType::BadGrammar(b)) =>
                a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other)
        }
    }
}

impl Display for LoadErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadErrorType::MissingColon => write!(f, "Expected `:` after the nonterminal"),
            LoadErrorType::MissingNonterminal => write!(f, "Missing nonterminal before `:`"),
            LoadErrorType::MalformedRhs(rhs) => write!(f, "`{}` is neither a terminal character nor two nonterminals", rhs),
            LoadErrorType::BadGrammar(e) => write!(f, "{}", e),
            LoadErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type LoadError = Error<LoadErrorType>;
pub type LoadErrors = Errors<LoadErrorType>;

fn io_error(error: std::io::Error, file: &Path) -> LoadError {
    LoadError {
        location: Location::whole_file(file.to_path_buf()),
        error: LoadErrorType::FileError(error)
    }
}

pub type Result<T> = std::result::Result<T, LoadErrorType>;
pub type LineResult<T> = std::result::Result<T, LoadError>;
pub type FileResult<T> = std::result::Result<T, LoadErrors>;

// One parsed `LHS:RHS` line
#[derive(PartialEq, Debug)]
struct Declaration {
    lhs: Symbol,
    rhs: Rhs
}

#[derive(PartialEq, Debug)]
enum Rhs {
    Terminal(char),
    Binary(Symbol, Symbol)
}

fn parse_rhs(text: &str) -> Result<Rhs> {
    if let Some((first, second)) = text.split_once(',') {
        let (first, second) = (first.trim(), second.trim());
        if first.is_empty() || second.is_empty() || second.contains(',') {
            return Err(LoadErrorType::MalformedRhs(text.to_string()));
        }
        return Ok(Rhs::Binary(Symbol::new(first), Symbol::new(second)));
    }

    // No comma: a terminal declaration, which must be a single character.
    // Anything longer is reported rather than guessed at.
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Rhs::Terminal(c)),
        _ => Err(LoadErrorType::MalformedRhs(text.to_string()))
    }
}

fn parse_line(line: &str) -> Result<Declaration> {
    let (lhs, rhs) = line.split_once(':').ok_or(LoadErrorType::MissingColon)?;

    let lhs = lhs.trim();
    if lhs.is_empty() {
        return Err(LoadErrorType::MissingNonterminal);
    }

    return Ok(Declaration {
        lhs: Symbol::new(lhs),
        rhs: parse_rhs(rhs.trim())?
    });
}

fn is_declaration_line(line: &String) -> bool {
    let line = line.trim();
    !line.is_empty() && !line.starts_with('#')
}

// Returns an iterator over the declaration lines of a file, with the io
// errors wrapped in LoadError and true line numbers attached
fn file_line_nums<'a>(file: File, path: &'a Path) -> impl Iterator<Item = (usize, LineResult<String>)> + 'a {
    std::io::BufReader::new(file)
        .lines()
        .map(move |line| line.map_err(|e| io_error(e, path)))
        .enumerate()
        .filter(|(_, line)| line.as_ref().is_ok_and(is_declaration_line) || line.is_err())
        .map(|(num, line)| (num + 1, line))
}

fn grammar_from_declarations(
    declarations: Vec<Declaration>,
    start: Option<&str>,
    path: &Path
) -> FileResult<Grammar> {
    // The first declaration names the start symbol unless the caller
    // overrides it
    let start = match start {
        Some(name) => Symbol::new(name),
        None => match declarations.first() {
            Some(declaration) => declaration.lhs.clone(),
            None => Symbol::new("")
        }
    };

    let mut terminals = Vec::new();
    let mut binaries = Vec::new();
    for declaration in declarations {
        match declaration.rhs {
            Rhs::Terminal(terminal) =>
                terminals.push(TerminalProduction { lhs: declaration.lhs, terminal }),
            Rhs::Binary(rhs1, rhs2) =>
                binaries.push(BinaryProduction { lhs: declaration.lhs, rhs: (rhs1, rhs2) }),
        }
    }

    // Referential validation happens in the grammar itself; the file as a
    // whole is the location since no single line is to blame
    return Grammar::new(terminals, binaries, start).map_err(|error| vec![LoadError {
        location: Location::whole_file(path.to_path_buf()),
        error: LoadErrorType::BadGrammar(error)
    }]);
}

pub fn parse_file(path: &Path, start: Option<&str>) -> FileResult<Grammar> {
    let file = File::open(path).map_err(|e| vec![io_error(e, path)])?;
    let lines = file_line_nums(file, path);

    let parsed_lines = lines.map(|(num, line_res)| {
        line_res.and_then(|line| parse_line(&line).map_err(|error| LoadError {
            location: Location {
                file: path.to_path_buf(),
                line: num
            },
            error
        }))
    });

    let (declarations, errors): (Vec<_>, Vec<_>) = parsed_lines.partition(LineResult::is_ok);
    if !errors.is_empty() {
        return Err(errors.into_iter().map(LineResult::unwrap_err).collect_vec());
    }
    let declarations_unwrapped = declarations.into_iter().map(LineResult::unwrap).collect_vec();

    return grammar_from_declarations(declarations_unwrapped, start, path);
}
