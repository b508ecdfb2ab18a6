//! Grammatical evolution of symbolic trading strategies over an agent-based market
//! simulator: a population of fixed-length byte genomes is decoded through a BNF
//! grammar into conditional expressions, each evaluated as a trader across several
//! stochastic market episodes, with a generational genetic algorithm driving
//! selection, crossover, mutation, and elitism over the resulting fitness.
pub mod config;
pub mod error;
pub mod evolve;
pub mod expr;
pub mod fitness;
pub mod genome;
pub mod grammar;
pub mod history;
pub mod market;
pub mod population;
pub mod rng;
pub mod select;

pub use error::GeError;
pub use evolve::Evolve;
pub use grammar::Grammar;
pub use population::Population;
