//! A BNF-like grammar: an ordered sequence of [`Rule`]s, each with an ordered
//! sequence of [`Production`]s.
//!
//! See [`parser`] for reading a grammar from text and [`Grammar::validate`] for the
//! separate well-formedness check spec'd apart from parsing.
pub mod parser;

use crate::error::GeError;
use std::collections::HashMap;
use std::fmt;

/// A single context-free production: an ordered sequence of tokens. A token is a
/// non-terminal iff it is wrapped in `<...>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    pub elements: Vec<String>,
}

impl Production {
    pub fn new(elements: Vec<String>) -> Self {
        Self { elements }
    }

    /// Number of elements in this production that are non-terminal tokens.
    pub fn non_terminal_count(&self) -> usize {
        self.elements.iter().filter(|e| is_non_terminal(e)).count()
    }

    /// Number of elements that reference `rule_name` specifically (used to pick the
    /// terminating production on gene-budget exhaustion: fewest self-recursive
    /// references wins).
    pub fn self_recursive_count(&self, rule_name: &str) -> usize {
        self.elements.iter().filter(|e| *e == rule_name).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    pub productions: Vec<Production>,
}

/// An ordered sequence of rules plus a name -> index lookup built once for
/// constant-time expansion during decoding.
#[derive(Debug, Clone)]
pub struct Grammar {
    pub rules: Vec<Rule>,
    index: HashMap<String, usize>,
}

pub fn is_non_terminal(token: &str) -> bool {
    token.len() >= 2 && token.starts_with('<') && token.ends_with('>')
}

impl Grammar {
    pub fn new(rules: Vec<Rule>) -> Self {
        let index = rules
            .iter()
            .enumerate()
            .map(|(i, r)| (r.name.clone(), i))
            .collect();
        Self { rules, index }
    }

    /// The start symbol is the first rule's name.
    pub fn start_symbol(&self) -> Option<&str> {
        self.rules.first().map(|r| r.name.as_str())
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.index.get(name).map(|&i| &self.rules[i])
    }

    /// A grammar is well-formed iff (a) rule names are unique, (b) every rule name is
    /// a non-terminal token, (c) every non-terminal on any right-hand side names some
    /// rule. Kept separate from parsing, per spec.
    pub fn validate(&self) -> Result<(), GeError> {
        let mut seen = HashMap::new();
        for rule in &self.rules {
            if seen.insert(rule.name.clone(), ()).is_some() {
                return Err(GeError::Grammar(format!("duplicate rule name: {}", rule.name)));
            }
            if !is_non_terminal(&rule.name) {
                return Err(GeError::Grammar(format!(
                    "rule name is not a non-terminal token: {}",
                    rule.name
                )));
            }
        }
        for rule in &self.rules {
            for production in &rule.productions {
                for element in &production.elements {
                    if is_non_terminal(element) && !seen.contains_key(element) {
                        return Err(GeError::Grammar(format!(
                            "rule {} references undefined non-terminal {}",
                            rule.name, element
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(
                f,
                "{} ::= {}",
                rule.name,
                rule.productions
                    .iter()
                    .map(|p| p.elements.join(" "))
                    .collect::<Vec<_>>()
                    .join(" | ")
            )?;
        }
        Ok(())
    }
}
