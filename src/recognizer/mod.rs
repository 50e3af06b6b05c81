/*
    This module decides grammar membership with the CYK algorithm
*/

use std::collections::HashSet;

use crate::grammar::{Grammar, Symbol};

// Cell (i, j) holds the nonterminals deriving exactly input[i..=j]. Only
// the upper triangle (i <= j) is ever touched. A table belongs to a single
// recognition call and dies with it.
struct Table<'g> {
    length: usize,
    cells: Vec<HashSet<&'g Symbol>>
}

impl<'g> Table<'g> {
    fn new(length: usize) -> Self {
        Table {
            length,
            cells: (0..length * length).map(|_| HashSet::new()).collect()
        }
    }

    fn cell(&self, i: usize, j: usize) -> &HashSet<&'g Symbol> {
        &self.cells[i * self.length + j]
    }

    fn insert(&mut self, i: usize, j: usize, symbol: &'g Symbol) {
        self.cells[i * self.length + j].insert(symbol);
    }
}

// Decides whether the grammar derives the input string. Recognition never
// fails: a character outside the grammar's alphabet just leaves its diagonal
// cell empty, the emptiness propagates up, and the answer comes out false.
pub fn recognize(grammar: &Grammar, input: &str) -> bool {
    let chars: Vec<char> = input.chars().collect();

    // CNF has no way to produce the empty string
    if chars.is_empty() {
        return false;
    }

    let table = fill_table(grammar, &chars);
    return table.cell(0, chars.len() - 1).contains(grammar.start_symbol());
}

fn fill_table<'g>(grammar: &'g Grammar, chars: &[char]) -> Table<'g> {
    let length = chars.len();
    let mut table = Table::new(length);

    // Base case: cell (i, i) collects every nonterminal with a terminal
    // production for chars[i]
    for (i, &c) in chars.iter().enumerate() {
        for production in grammar.terminal_productions() {
            if production.terminal == c {
                table.insert(i, i, &production.lhs);
            }
        }
    }

    // Induction over span length. A derivation of chars[i..=j] through
    // A -> B C must split at some k; trying every split point and every
    // binary production finds exactly the nonterminals deriving the span.
    // Spans of length l only depend on cells for shorter spans, which are
    // complete by the time l comes up.
    for l in 2..=length {
        for i in 0..=(length - l) {
            let j = i + l - 1;
            for k in i..j {
                for production in grammar.binary_productions() {
                    if table.cell(i, k).contains(&production.rhs.0)
                        && table.cell(k + 1, j).contains(&production.rhs.1) {
                        table.insert(i, j, &production.lhs);
                    }
                }
            }
        }
    }

    return table;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{BinaryProduction, TerminalProduction};

    fn sym(name: &str) -> Symbol {
        Symbol::new(name)
    }

    fn term(lhs: &str, terminal: char) -> TerminalProduction {
        TerminalProduction { lhs: sym(lhs), terminal }
    }

    fn bin(lhs: &str, rhs1: &str, rhs2: &str) -> BinaryProduction {
        BinaryProduction { lhs: sym(lhs), rhs: (sym(rhs1), sym(rhs2)) }
    }

    // S -> A B, A -> a, B -> b (accepts exactly "ab")
    fn ab_grammar() -> Grammar {
        Grammar::new(
            vec![term("A", 'a'), term("B", 'b')],
            vec![bin("S", "A", "B")],
            sym("S")
        ).unwrap()
    }

    // S -> Z Y | Z O, Y -> S O, Z -> 0, O -> 1 (accepts 0^n 1^n)
    fn balanced_grammar() -> Grammar {
        Grammar::new(
            vec![term("Z", '0'), term("O", '1')],
            vec![
                bin("S", "Z", "Y"),
                bin("S", "Z", "O"),
                bin("Y", "S", "O")
            ],
            sym("S")
        ).unwrap()
    }

    #[test]
    fn accept_and_reject_ab() {
        let grammar = ab_grammar();
        assert!(recognize(&grammar, "ab"));
        assert!(!recognize(&grammar, "ba"));
        assert!(!recognize(&grammar, "a"));
        assert!(!recognize(&grammar, ""));
    }

    #[test]
    fn empty_input_always_rejected() {
        assert!(!recognize(&ab_grammar(), ""));
        assert!(!recognize(&balanced_grammar(), ""));
    }

    #[test]
    fn single_char_uses_terminal_productions_only() {
        // S itself derives a terminal, so length-1 membership is exactly
        // "does the start symbol have a matching terminal production"
        let grammar = Grammar::new(
            vec![term("S", 'x'), term("A", 'a')],
            vec![],
            sym("S")
        ).unwrap();

        assert!(recognize(&grammar, "x"));
        assert!(!recognize(&grammar, "a"));
        assert!(!recognize(&grammar, "y"));
    }

    #[test]
    fn unknown_character_rejects() {
        let grammar = ab_grammar();
        assert!(!recognize(&grammar, "az"));
        assert!(!recognize(&grammar, "zb"));
        assert!(!recognize(&grammar, "z"));
    }

    #[test]
    fn alternation_accepts_through_either_alternative() {
        // S -> A B | C D, A -> a, B -> b, C -> a, D -> a
        let grammar = Grammar::new(
            vec![term("A", 'a'), term("B", 'b'), term("C", 'a'), term("D", 'a')],
            vec![bin("S", "A", "B"), bin("S", "C", "D")],
            sym("S")
        ).unwrap();

        assert!(recognize(&grammar, "ab"));
        assert!(recognize(&grammar, "aa"));
        assert!(!recognize(&grammar, "bb"));
    }

    #[test]
    fn balanced_strings() {
        let grammar = balanced_grammar();
        assert!(recognize(&grammar, "01"));
        assert!(recognize(&grammar, "0011"));
        assert!(recognize(&grammar, "000111"));
        assert!(!recognize(&grammar, "0"));
        assert!(!recognize(&grammar, "10"));
        assert!(!recognize(&grammar, "0101"));
        assert!(!recognize(&grammar, "00111"));
    }

    #[test]
    fn reject_only_at_full_span() {
        // Both halves of "abab" are accepted on their own, but nothing
        // combines two S's, so the top cell stays empty
        let grammar = ab_grammar();
        assert!(recognize(&grammar, "ab"));
        assert!(!recognize(&grammar, "abab"));
    }

    #[test]
    fn repeated_calls_are_deterministic() {
        let grammar = balanced_grammar();
        for _ in 0..5 {
            assert!(recognize(&grammar, "0011"));
            assert!(!recognize(&grammar, "0110"));
        }
    }
}
