//! The generational genetic-algorithm loop (spec §4.7), grounded on the teacher's
//! `strategy::evolve::Evolve` config/state/builder split and `report_round` logging
//! shape, specialized down from the teacher's many-pluggable-genotype design to this
//! crate's one concrete byte genome.
pub mod builder;
pub mod config;

pub use builder::Builder;
pub use config::{EvolveConfig, Selector};

use crate::fitness::Cache;
use crate::genome::attributes::Attributes;
use crate::genome::crossover::{Crossover, SinglePointCrossover};
use crate::genome::decoder::decode_to_string;
use crate::genome::mutate::{Mutate, PerGeneMutate};
use crate::genome::{self, Genome};
use crate::grammar::Grammar;
use crate::history::{GenerationSnapshot, History};
use crate::market::{self, GenerationReport, MarketConfig};
use crate::population::Population;
use crate::rng::derive_seed;
use crate::select::{Roulette, Select, Tournament};
use itertools::Itertools;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
pub struct EvolveState {
    pub current_generation: usize,
    pub best_generation: usize,
    pub best_genome: Option<Genome>,
    pub best_fitness: f64,
    pub generation_durations: Vec<Duration>,
}

impl EvolveState {
    fn new() -> Self {
        Self {
            best_fitness: f64::NEG_INFINITY,
            ..Default::default()
        }
    }
}

pub struct Evolve {
    pub grammar: Grammar,
    pub market_config: MarketConfig,
    pub config: EvolveConfig,
    pub state: EvolveState,
    pub cache: Cache,
    pub history: History,
    seed: u64,
    rng: ChaCha8Rng,
    next_id: i64,
}

impl Evolve {
    pub fn builder() -> Builder {
        Builder::new()
    }

    pub(crate) fn new(grammar: Grammar, market_config: MarketConfig, config: EvolveConfig, seed: u64) -> Self {
        Self {
            grammar,
            market_config,
            config,
            state: EvolveState::new(),
            cache: Cache::new(),
            history: History::new(),
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_id: 0,
        }
    }

    fn population_factory(&mut self) -> Population {
        let defaults = Attributes::new();
        let genomes = (0..self.config.population_size)
            .map(|_| {
                let id = self.next_id;
                self.next_id += 1;
                genome::create(self.config.gene_length, id, &defaults, &mut self.rng)
            })
            .collect();
        Population::new(genomes)
    }

    /// Runs the full loop to completion (spec §4.7's fixed `Generations` count from
    /// spec §6's Configuration surface rather than the teacher's open-ended
    /// stale/target conditions).
    pub fn call(&mut self) {
        let mut population = self.population_factory();

        for _ in 0..self.config.generations {
            let start = Instant::now();
            self.state.current_generation += 1;

            let report = self.run_market(&population);
            population.evaluate(&self.cache, |i, _genome| report.results[i].active_return);

            self.update_best(&population);
            self.record_history(&report, &population);

            let elite_indices = population.elite_indices(self.config.elite_count);
            let elites: Vec<Genome> = elite_indices.iter().map(|&i| population.genomes[i].clone()).collect();
            let elite_bytes: Vec<Vec<u8>> = elites.iter().map(|g| g.bytes.clone()).collect();

            let parent_indices = self.select(&population.fitness);
            let mut offspring = self.reproduce(&population, &parent_indices);

            let len = offspring.len();
            let elite_count = elites.len().min(len);
            for (i, elite) in elites.into_iter().enumerate().take(elite_count) {
                offspring[len - elite_count + i] = elite;
            }

            population = Population::new(offspring);

            if self.config.cache_enabled {
                let keep: Vec<Vec<u8>> = elite_bytes
                    .into_iter()
                    .chain(self.state.best_genome.as_ref().map(|g| g.bytes.clone()))
                    .collect();
                self.cache.retain_only(&keep);
            } else {
                self.cache.retain_only(&[]);
            }

            self.state.generation_durations.push(start.elapsed());
            self.report_round(&population);
        }
    }

    fn run_market(&self, population: &Population) -> GenerationReport {
        let strategies: Vec<String> = population
            .genomes
            .iter()
            .map(|g| decode_to_string(&self.grammar, g, self.config.max_genes))
            .collect();
        let seed = derive_seed(self.seed, self.state.current_generation);
        market::run_generation(&strategies, &self.market_config, seed)
    }

    /// Records this generation's market and fitness summary (spec §2 per-generation
    /// statistics/history, spec §6 history export).
    fn record_history(&mut self, report: &GenerationReport, population: &Population) {
        let finite: Vec<f64> = population.fitness.iter().copied().filter(|f| f.is_finite()).collect();
        let avg_fitness = if finite.is_empty() {
            f64::NEG_INFINITY
        } else {
            finite.iter().sum::<f64>() / finite.len() as f64
        };
        let best_fitness = population.fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let worst_fitness = population.fitness.iter().copied().fold(f64::INFINITY, f64::min);

        self.history.timestamps.push(self.state.current_generation as i64);
        self.history.prices.push(report.final_price);
        self.history.volumes.push(report.buy_orders + report.sell_orders);
        self.history.generations.push(GenerationSnapshot {
            generation: self.state.current_generation,
            final_price: report.final_price,
            buy_orders: report.buy_orders,
            sell_orders: report.sell_orders,
            avg_fitness,
            best_fitness,
            worst_fitness,
        });
    }

    fn select(&mut self, fitness: &[f64]) -> Vec<usize> {
        match self.config.selector {
            Selector::Tournament => Tournament::new(self.config.tournament_size).call(fitness, fitness.len(), &mut self.rng),
            Selector::Roulette => Roulette.call(fitness, fitness.len(), &mut self.rng),
        }
    }

    /// Offspring construction (spec §4.7 step 5): crossover is unconditional
    /// (spec §9 Open Question), each child then independently mutated.
    fn reproduce(&mut self, population: &Population, parent_indices: &[usize]) -> Vec<Genome> {
        let crossover = SinglePointCrossover;
        let mutate = PerGeneMutate::new(self.config.mutation_rate);

        let mut offspring = Vec::with_capacity(parent_indices.len());
        for (i, j) in parent_indices.iter().copied().tuples() {
            let a = &population.genomes[i];
            let b = &population.genomes[j];
            let (c1, c2) = crossover.call(a, b, &mut self.rng);
            offspring.push(mutate.call(&c1, &mut self.rng));
            offspring.push(mutate.call(&c2, &mut self.rng));
        }
        for genome in offspring.iter_mut() {
            let id = self.next_id;
            self.next_id += 1;
            genome.set_id(id);
        }
        offspring.truncate(population.len());
        while offspring.len() < population.len() {
            let id = self.next_id;
            self.next_id += 1;
            let defaults = Attributes::new();
            offspring.push(genome::create(self.config.gene_length, id, &defaults, &mut self.rng));
        }
        offspring
    }

    fn update_best(&mut self, population: &Population) {
        if let Some((genome, fitness)) = population.best() {
            if fitness > self.state.best_fitness {
                self.state.best_fitness = fitness;
                self.state.best_genome = Some(genome.clone());
                self.state.best_generation = self.state.current_generation;
            }
        }
    }

    fn report_round(&self, population: &Population) {
        let mean = population.fitness.iter().filter(|f| f.is_finite()).sum::<f64>()
            / population.fitness.iter().filter(|f| f.is_finite()).count().max(1) as f64;
        log::debug!(
            "generation (current/best): {}/{}, fitness (best/mean): {:.2}/{:.2}, cache size: {}",
            self.state.current_generation,
            self.state.best_generation,
            self.state.best_fitness,
            mean,
            self.cache.len(),
        );
        log::trace!(
            "best genome bytes: {:?}",
            self.state.best_genome.as_ref().map(|g| g.bytes.clone())
        );
    }

    /// Total and average time spent per generation (supplemented feature, spec §9
    /// "Run timing summary").
    pub fn timing_summary(&self) -> (Duration, Duration) {
        let total: Duration = self.state.generation_durations.iter().sum();
        let count = self.state.generation_durations.len().max(1) as u32;
        (total, total / count)
    }
}
