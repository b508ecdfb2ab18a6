//! Variable bindings for a single evaluation (spec §4.4): `$`-prefixed names resolve
//! to the indicator/price readings computed for the current round.
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct Environment {
    values: HashMap<String, f64>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn bind(&mut self, name: impl Into<String>, value: f64) -> &mut Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }
}
