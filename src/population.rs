//! Parallel genome/fitness vectors plus the fitness cache (spec §3 Population).
use crate::fitness::Cache;
use crate::genome::Genome;
use rayon::prelude::*;

/// Parallel vectors of genomes and their cached fitnesses, always the same length
/// (spec §3 invariant: "the fitness vector has no gaps").
#[derive(Debug, Clone)]
pub struct Population {
    pub genomes: Vec<Genome>,
    pub fitness: Vec<f64>,
}

impl Population {
    pub fn new(genomes: Vec<Genome>) -> Self {
        let fitness = vec![f64::NEG_INFINITY; genomes.len()];
        Self { genomes, fitness }
    }

    pub fn len(&self) -> usize {
        self.genomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }

    /// Populates `self.fitness`, consulting and updating `cache` (spec §4.7 step 2).
    /// `compute` produces the fitness for a cache miss, given the genome's position
    /// (its index into `self.genomes`, which callers use to look up the matching
    /// simulator result) and the genome itself. Runs across `rayon`'s global pool,
    /// each item consulting the cache under its reader-preferring guard and
    /// inserting under an exclusive guard on miss (spec §4.7 step 2, §5).
    pub fn evaluate(&mut self, cache: &Cache, compute: impl Fn(usize, &Genome) -> f64 + Sync) {
        self.fitness = self
            .genomes
            .par_iter()
            .enumerate()
            .map(|(i, genome)| match cache.get(&genome.bytes) {
                Some(cached) => cached,
                None => {
                    let value = compute(i, genome);
                    cache.insert(genome.bytes.clone(), value);
                    value
                }
            })
            .collect();
    }

    /// `(genome, fitness)` with the highest finite fitness; ties by lowest index
    /// (spec §4.7 "Best query").
    pub fn best(&self) -> Option<(&Genome, f64)> {
        self.fitness
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_finite())
            .max_by(|(ia, a), (ib, b)| {
                a.partial_cmp(b)
                    .unwrap()
                    .then_with(|| ib.cmp(ia))
            })
            .map(|(i, &f)| (&self.genomes[i], f))
    }

    /// Indices of the top `count` individuals by fitness, used for elitism (spec
    /// §4.7 step 6).
    pub fn elite_indices(&self, count: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.len()).collect();
        indices.sort_by(|&a, &b| self.fitness[b].partial_cmp(&self.fitness[a]).unwrap());
        indices.truncate(count);
        indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::attributes::Attributes;

    fn genome(bytes: &[u8]) -> Genome {
        let mut g = Genome::from_bytes(bytes.to_vec());
        g.attributes = Attributes::new();
        g
    }

    #[test]
    fn evaluate_uses_cache_across_generations() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let cache = Cache::new();
        let calls = AtomicUsize::new(0);
        let compute = |_: usize, _: &Genome| {
            calls.fetch_add(1, Ordering::SeqCst);
            7.0
        };

        let mut first = Population::new(vec![genome(&[1, 2])]);
        first.evaluate(&cache, &compute);
        assert_eq!(first.fitness, vec![7.0]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let mut second = Population::new(vec![genome(&[1, 2])]);
        second.evaluate(&cache, &compute);
        assert_eq!(second.fitness, vec![7.0]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn best_picks_highest_finite_fitness_lowest_index_on_tie() {
        let mut population = Population::new(vec![genome(&[1]), genome(&[2]), genome(&[3])]);
        population.fitness = vec![5.0, 5.0, f64::NEG_INFINITY];
        let (genome, fitness) = population.best().unwrap();
        assert_eq!(genome.bytes, vec![1]);
        assert_eq!(fitness, 5.0);
    }

    #[test]
    fn elite_indices_sorts_descending_by_fitness() {
        let mut population = Population::new(vec![genome(&[1]), genome(&[2]), genome(&[3])]);
        population.fitness = vec![1.0, 3.0, 2.0];
        assert_eq!(population.elite_indices(2), vec![1, 2]);
    }
}
