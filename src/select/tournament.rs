//! Tournament-of-`k` selection (spec §4.7 step 4, §GLOSSARY "Tournament-of-k").
use super::Select;
use rand::Rng;

#[derive(Debug, Clone)]
pub struct Tournament {
    pub tournament_size: usize,
}

impl Tournament {
    pub fn new(tournament_size: usize) -> Self {
        Self { tournament_size }
    }
}

impl Select for Tournament {
    fn call<R: Rng>(&self, fitness: &[f64], count: usize, rng: &mut R) -> Vec<usize> {
        let tournament_size = self.tournament_size.min(fitness.len()).max(1);
        (0..count)
            .map(|_| {
                let mut winner = rng.gen_range(0..fitness.len());
                let mut winning_fitness = fitness[winner];
                for _ in 1..tournament_size {
                    let candidate = rng.gen_range(0..fitness.len());
                    if fitness[candidate] > winning_fitness {
                        winner = candidate;
                        winning_fitness = fitness[candidate];
                    }
                }
                winner
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn always_prefers_the_single_finite_candidate() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let fitness = vec![f64::NEG_INFINITY, 5.0, f64::NEG_INFINITY];
        let select = Tournament::new(3);
        let winners = select.call(&fitness, 10, &mut rng);
        assert!(winners.iter().all(|&i| i == 1));
    }

    #[test]
    fn returns_requested_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let fitness = vec![1.0, 2.0, 3.0, 4.0];
        let select = Tournament::new(2);
        assert_eq!(select.call(&fitness, 4, &mut rng).len(), 4);
    }
}
