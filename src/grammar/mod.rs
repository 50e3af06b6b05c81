/*
    This module is for storing CNF grammars
*/

use std::collections::{HashMap, HashSet};
use std::fmt::Display;

use itertools::Itertools;

use crate::error_handling::ErrorType;

// A nonterminal, compared by name only. Terminals are not symbols here;
// they appear as plain chars on the right of terminal productions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Symbol(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// A -> c
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalProduction {
    pub lhs: Symbol,
    pub terminal: char
}

// A -> B C
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryProduction {
    pub lhs: Symbol,
    pub rhs: (Symbol, Symbol)
}

#[derive(Debug, PartialEq)]
pub enum ConstructionError {
    // A right-hand side (or the start symbol) names a nonterminal that has
    // no production of its own, so derivations through it can never bottom out
    UndefinedSymbol(String),
    // Neither terminal nor binary productions were given
    EmptyGrammar,
}

impl ErrorType for ConstructionError {}

impl Display for ConstructionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstructionError::UndefinedSymbol(name) => write!(f, "No production for nonterminal `{}`", name),
            ConstructionError::EmptyGrammar => write!(f, "Grammar contains no productions"),
        }
    }
}

// A validated CNF grammar. Immutable after construction; one grammar is
// meant to serve any number of recognition calls.
#[derive(Debug, PartialEq)]
pub struct Grammar {
    start: Symbol,
    terminals: Vec<TerminalProduction>,
    binaries: Vec<BinaryProduction>,
    // LHS -> indices into the production lists, for the per-symbol lookups
    terminals_by_lhs: HashMap<Symbol, Vec<usize>>,
    binaries_by_lhs: HashMap<Symbol, Vec<usize>>
}

impl Grammar {
    pub fn new(
        terminals: Vec<TerminalProduction>,
        binaries: Vec<BinaryProduction>,
        start: Symbol
    ) -> Result<Grammar, ConstructionError> {
        if terminals.is_empty() && binaries.is_empty() {
            return Err(ConstructionError::EmptyGrammar);
        }

        let defined: HashSet<&Symbol> = terminals.iter().map(|p| &p.lhs)
            .chain(binaries.iter().map(|p| &p.lhs))
            .collect();

        for production in &binaries {
            for symbol in [&production.rhs.0, &production.rhs.1] {
                if !defined.contains(symbol) {
                    return Err(ConstructionError::UndefinedSymbol(symbol.name().to_owned()));
                }
            }
        }
        if !defined.contains(&start) {
            return Err(ConstructionError::UndefinedSymbol(start.name().to_owned()));
        }

        let mut terminals_by_lhs: HashMap<Symbol, Vec<usize>> = HashMap::new();
        for (index, production) in terminals.iter().enumerate() {
            terminals_by_lhs.entry(production.lhs.clone()).or_default().push(index);
        }
        let mut binaries_by_lhs: HashMap<Symbol, Vec<usize>> = HashMap::new();
        for (index, production) in binaries.iter().enumerate() {
            binaries_by_lhs.entry(production.lhs.clone()).or_default().push(index);
        }

        return Ok(Grammar {
            start,
            terminals,
            binaries,
            terminals_by_lhs,
            binaries_by_lhs
        });
    }

    pub fn start_symbol(&self) -> &Symbol {
        &self.start
    }

    pub fn terminal_productions(&self) -> &[TerminalProduction] {
        &self.terminals
    }

    pub fn binary_productions(&self) -> &[BinaryProduction] {
        &self.binaries
    }

    // Every terminal character the given nonterminal derives directly
    pub fn terminal_productions_for<'g>(&'g self, symbol: &Symbol) -> impl Iterator<Item = char> + 'g {
        self.terminals_by_lhs.get(symbol).into_iter()
            .flatten()
            .map(|&index| self.terminals[index].terminal)
    }

    // Every (rhs1, rhs2) pair the given nonterminal expands to. Alternation
    // shows up as multiple pairs.
    pub fn binary_productions_for<'g>(&'g self, symbol: &Symbol) -> impl Iterator<Item = &'g (Symbol, Symbol)> + 'g {
        self.binaries_by_lhs.get(symbol).into_iter()
            .flatten()
            .map(|&index| &self.binaries[index].rhs)
    }
}

// Prints the grammar back in its file syntax: binary productions first,
// grouped by LHS in order of first declaration
impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for lhs in self.binaries.iter().map(|p| &p.lhs).unique() {
            for (rhs1, rhs2) in self.binary_productions_for(lhs) {
                writeln!(f, "{}: {},{}", lhs, rhs1, rhs2)?;
            }
        }
        for lhs in self.terminals.iter().map(|p| &p.lhs).unique() {
            for terminal in self.terminal_productions_for(lhs) {
                writeln!(f, "{}: {}", lhs, terminal)?;
            }
        }
        Ok(())
    }
}
