//! The derivation tree: a tagged sum type, per spec §9's redesign note — exhaustive
//! matching in [`DerivationNode::yield_string`] catches missing cases at compile time,
//! which a class hierarchy would not.
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerivationNode {
    NonTerminal {
        rule: String,
        children: Vec<DerivationNode>,
    },
    Leaf {
        token: String,
    },
}

impl DerivationNode {
    /// Space-separated concatenation of terminal leaves, left to right.
    pub fn yield_string(&self) -> String {
        let mut tokens = Vec::new();
        self.collect_leaves(&mut tokens);
        tokens.join(" ")
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            DerivationNode::Leaf { token } => out.push(token),
            DerivationNode::NonTerminal { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }
}

impl fmt::Display for DerivationNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.yield_string())
    }
}
