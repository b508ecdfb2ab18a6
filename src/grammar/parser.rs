//! Reads a BNF-like text stream into a [`Grammar`](super::Grammar).
//!
//! Each non-empty line has the form `<name> ::= rhs1 | rhs2 | ...`. Each `rhsK` is a
//! space-separated sequence of tokens. A token matching `N..M` (two decimal integers)
//! expands into `M-N` single-element productions, one per integer in `[N, M)`. All
//! other tokens are taken verbatim. Malformed lines (missing `::=`) abort parsing.
//!
//! This does not validate well-formedness — see [`Grammar::validate`](super::Grammar::validate).

use super::{Grammar, Production, Rule};
use crate::error::GeError;
use std::io::BufRead;

pub fn parse<R: BufRead>(reader: R) -> Result<Grammar, GeError> {
    let mut rules = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| GeError::Grammar(format!("line {}: {}", lineno + 1, e)))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        rules.push(
            parse_line(line).map_err(|e| GeError::Grammar(format!("line {}: {}", lineno + 1, e)))?,
        );
    }
    Ok(Grammar::new(rules))
}

pub fn parse_line(line: &str) -> Result<Rule, String> {
    let (left, right) = line
        .split_once("::=")
        .ok_or_else(|| format!("missing '::=' in line: {}", line))?;
    let name = left.trim().to_string();
    let productions = right.split('|').flat_map(expand_rhs).collect();
    Ok(Rule { name, productions })
}

/// Expands a right-hand side into one or more productions. A right-hand side that is
/// a single `N..M` range token expands into `M-N` single-element productions (one per
/// integer); anything else becomes one production of its space-separated tokens.
fn expand_rhs(rhs: &str) -> Vec<Production> {
    let tokens: Vec<&str> = rhs.split_whitespace().collect();
    if let [single] = tokens.as_slice() {
        if let Some((n, m)) = parse_range(single) {
            return (n..m)
                .map(|i| Production::new(vec![i.to_string()]))
                .collect();
        }
    }
    vec![Production::new(
        tokens.iter().map(|t| t.to_string()).collect(),
    )]
}

fn parse_range(token: &str) -> Option<(i64, i64)> {
    let (n, m) = token.split_once("..")?;
    Some((n.parse().ok()?, m.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const LECTURE_EXAMPLE: &str = "\
<expr> ::= <expr> <op> <expr> | <var>
<op> ::= + | - | * | /
<var> ::= <prc> | <input>
<input> ::= a | b
<prc> ::= 0.0 | 0.1 | 0.2 | 0.3 | 0.4 | 0.5
";

    fn parse_str(s: &str) -> Grammar {
        parse(Cursor::new(s.as_bytes().to_vec())).unwrap()
    }

    #[test]
    fn parses_lecture_example_into_five_rules() {
        let grammar = parse_str(LECTURE_EXAMPLE);
        assert_eq!(grammar.rules.len(), 5);
        assert_eq!(grammar.rule("<op>").unwrap().productions.len(), 4);
        assert_eq!(grammar.rule("<prc>").unwrap().productions.len(), 6);
    }

    #[test]
    fn rejects_missing_delimiter() {
        let reader = Cursor::new(b"<broken> -> a | b\n".to_vec());
        assert!(parse(reader).is_err());
    }

    #[test]
    fn expands_integer_range_token() {
        let grammar = parse_str("<digit> ::= 0..10\n");
        assert_eq!(grammar.rule("<digit>").unwrap().productions.len(), 10);
        assert_eq!(
            grammar.rule("<digit>").unwrap().productions[3].elements,
            vec!["3".to_string()]
        );
    }

    #[test]
    fn validate_catches_undefined_non_terminal() {
        let grammar = parse_str("<a> ::= <b>\n");
        assert!(grammar.validate().is_err());
    }

    #[test]
    fn validate_accepts_lecture_example() {
        let grammar = parse_str(LECTURE_EXAMPLE);
        assert!(grammar.validate().is_ok());
    }
}
