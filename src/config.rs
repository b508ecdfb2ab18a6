//! YAML-loadable run configuration (spec §6 Configuration surface). Grounded on
//! `noahbclarkson-krypto`'s `serde_yaml` config loading, since the teacher is a
//! library with no config file of its own.
use crate::evolve::config::{EvolveConfig, Selector};
use crate::market::MarketConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid config yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct PopulationConfig {
    pub size: usize,
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    pub elite_count: usize,
    pub tournament_size: usize,
    pub gene_length: usize,
    pub cache_boolean: bool,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: 100,
            mutation_rate: 0.05,
            crossover_rate: 0.7,
            elite_count: 2,
            tournament_size: 3,
            gene_length: 64,
            cache_boolean: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    pub bnf_file_path: String,
    pub max_genes: usize,
    pub generations: usize,
    pub population: PopulationConfig,
    pub market: MarketConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bnf_file_path: "data/lecture.bnf".to_string(),
            max_genes: 100,
            generations: 100,
            population: PopulationConfig::default(),
            market: MarketConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&text)?;
        Ok(config)
    }

    pub fn to_evolve_config(&self) -> EvolveConfig {
        EvolveConfig {
            population_size: self.population.size,
            generations: self.generations,
            gene_length: self.population.gene_length,
            max_genes: self.max_genes,
            mutation_rate: self.population.mutation_rate,
            crossover_rate: self.population.crossover_rate,
            elite_count: self.population.elite_count,
            tournament_size: self.population.tournament_size,
            selector: Selector::Tournament,
            cache_enabled: self.population.cache_boolean,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_yaml() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
