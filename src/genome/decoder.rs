//! Genome → derivation tree decoding, per spec §4.2.
//!
//! Deterministic given `(genome, grammar, max_genes)`: the same triple always yields
//! the same tree, bit-for-bit (spec §8 property 2).
use super::tree::DerivationNode;
use super::Genome;
use crate::grammar::{is_non_terminal, Grammar, Production};

pub struct Decoder<'a> {
    grammar: &'a Grammar,
    genome: &'a Genome,
    max_genes: usize,
    offset: i64,
}

impl<'a> Decoder<'a> {
    pub fn new(grammar: &'a Grammar, genome: &'a Genome, max_genes: usize) -> Self {
        Self {
            grammar,
            genome,
            max_genes,
            offset: -1,
        }
    }

    /// Decodes the grammar's start symbol into a derivation tree.
    pub fn decode(mut self) -> DerivationNode {
        let start = self
            .grammar
            .start_symbol()
            .expect("grammar has no start symbol")
            .to_string();
        self.expand(&start)
    }

    fn expand(&mut self, token: &str) -> DerivationNode {
        let Some(rule) = self.grammar.rule(token) else {
            // Grammar lookup miss: treat token as terminal (§4.8).
            return DerivationNode::Leaf {
                token: token.to_string(),
            };
        };

        let production = if self.offset >= self.max_genes as i64 {
            terminating_production(rule.productions.as_slice(), &rule.name)
        } else {
            self.offset += 1;
            let gene = self.genome.bytes[self.offset as usize % self.genome.bytes.len()];
            &rule.productions[gene as usize % rule.productions.len()]
        };

        let children = production
            .elements
            .iter()
            .map(|element| self.expand(element))
            .collect();

        DerivationNode::NonTerminal {
            rule: rule.name.clone(),
            children,
        }
    }
}

/// The production with the fewest self-recursive references to `rule_name`; ties
/// broken by fewest total non-terminal elements; ties broken by lowest index.
fn terminating_production<'a>(productions: &'a [Production], rule_name: &str) -> &'a Production {
    productions
        .iter()
        .enumerate()
        .min_by_key(|(idx, p)| {
            (
                p.self_recursive_count(rule_name),
                p.non_terminal_count(),
                *idx,
            )
        })
        .map(|(_, p)| p)
        .expect("rule has no productions")
}

/// Convenience: decode and return just the terminal yield string.
pub fn decode_to_string(grammar: &Grammar, genome: &Genome, max_genes: usize) -> String {
    Decoder::new(grammar, genome, max_genes).decode().yield_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::parser::parse;
    use std::io::Cursor;

    fn lecture_example() -> Grammar {
        let text = "\
<expr> ::= <expr> <op> <expr> | <var>
<op> ::= + | - | * | /
<var> ::= <prc> | <input>
<input> ::= a | b
<prc> ::= 0.0 | 0.1 | 0.2 | 0.3 | 0.4 | 0.5
";
        parse(Cursor::new(text.as_bytes().to_vec())).unwrap()
    }

    #[test]
    fn decodes_lecture_example_genome_to_expected_yield() {
        let grammar = lecture_example();
        let genome = Genome::from_bytes(vec![220, 149, 147, 220, 144, 55, 36, 170]);
        let yielded = decode_to_string(&grammar, &genome, 100);
        assert_eq!(yielded, "a + 0.2");
    }

    #[test]
    fn decoder_is_deterministic() {
        let grammar = lecture_example();
        let genome = Genome::from_bytes(vec![3, 77, 201, 5, 250, 1, 64, 9, 200]);
        let a = decode_to_string(&grammar, &genome, 50);
        let b = decode_to_string(&grammar, &genome, 50);
        assert_eq!(a, b);
    }

    #[test]
    fn terminates_on_left_recursive_grammar_with_small_gene_budget() {
        // <expr> is directly left-recursive; max_genes=0 must still terminate.
        let grammar = lecture_example();
        let genome = Genome::from_bytes(vec![0, 0, 0, 0]);
        let yielded = decode_to_string(&grammar, &genome, 0);
        assert!(!yielded.is_empty());
    }
}
