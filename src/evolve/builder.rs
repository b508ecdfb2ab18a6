//! Builder for [`super::Evolve`], validated by `TryFrom` into a small
//! `&'static str` error, matching the teacher's `strategy::evolve::builder` pattern.
use super::config::EvolveConfig;
use super::Evolve;
use crate::error::TryFromBuilderError;
use crate::grammar::Grammar;
use crate::market::MarketConfig;

#[derive(Debug, Clone, Default)]
pub struct Builder {
    pub grammar: Option<Grammar>,
    pub market_config: MarketConfig,
    pub config: EvolveConfig,
    pub seed: u64,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grammar(mut self, grammar: Grammar) -> Self {
        self.grammar = Some(grammar);
        self
    }

    pub fn with_market_config(mut self, market_config: MarketConfig) -> Self {
        self.market_config = market_config;
        self
    }

    pub fn with_config(mut self, config: EvolveConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Result<Evolve, TryFromBuilderError> {
        self.try_into()
    }
}

impl TryFrom<Builder> for Evolve {
    type Error = TryFromBuilderError;

    fn try_from(builder: Builder) -> Result<Self, Self::Error> {
        if builder.grammar.is_none() {
            Err(TryFromBuilderError("Evolve requires a Grammar"))
        } else if builder.config.population_size == 0 {
            Err(TryFromBuilderError("Evolve requires a population_size > 0"))
        } else if builder.config.gene_length == 0 {
            Err(TryFromBuilderError("Evolve requires a gene_length > 0"))
        } else if builder.config.elite_count >= builder.config.population_size {
            Err(TryFromBuilderError(
                "Evolve requires elite_count < population_size",
            ))
        } else if builder.config.tournament_size == 0 {
            Err(TryFromBuilderError("Evolve requires a tournament_size > 0"))
        } else {
            Ok(Evolve::new(
                builder.grammar.unwrap(),
                builder.market_config,
                builder.config,
                builder.seed,
            ))
        }
    }
}
