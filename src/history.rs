//! Market history JSON export (spec §6). Grounded on `discosultan-juno` and
//! `noahbclarkson-krypto`, both of which serialize run data with `serde`.
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::Write;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct GenerationSnapshot {
    pub generation: usize,
    pub final_price: f64,
    pub buy_orders: u64,
    pub sell_orders: u64,
    pub avg_fitness: f64,
    pub best_fitness: f64,
    pub worst_fitness: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct History {
    pub timestamps: Vec<i64>,
    pub prices: Vec<f64>,
    pub volumes: Vec<u64>,
    pub generations: Vec<GenerationSnapshot>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes the two-space-indented JSON shape from spec §6.
    pub fn write_to(&self, writer: impl Write) -> Result<(), serde_json::Error> {
        let formatter = PrettyFormatter::with_indent(b"  ");
        let mut serializer = Serializer::with_formatter(writer, formatter);
        serde::Serialize::serialize(self, &mut serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_two_space_indented_json() {
        let mut history = History::new();
        history.generations.push(GenerationSnapshot {
            generation: 1,
            final_price: 101.5,
            buy_orders: 4,
            sell_orders: 2,
            avg_fitness: 10.0,
            best_fitness: 20.0,
            worst_fitness: -5.0,
        });

        let mut buf = Vec::new();
        history.write_to(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\n  \"Timestamps\""));
        assert!(text.contains("\"Generation\": 1"));
    }
}
