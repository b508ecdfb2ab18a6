//! Fitness-proportionate ("roulette wheel") selection. A supplemented selector
//! (spec doesn't mandate it, §9's "Supplemented features"): ported from the Go
//! prototype's `ea.Roulette`, cleaned up so disqualified (`-inf`) genomes get zero
//! selection weight rather than the prototype's shifted-by-worst scaling.
use super::Select;
use rand::Rng;

#[derive(Debug, Clone, Default)]
pub struct Roulette;

impl Select for Roulette {
    fn call<R: Rng>(&self, fitness: &[f64], count: usize, rng: &mut R) -> Vec<usize> {
        let min_finite = fitness
            .iter()
            .copied()
            .filter(|f| f.is_finite())
            .fold(f64::INFINITY, f64::min);
        let floor = if min_finite.is_finite() { min_finite } else { 0.0 };

        let weights: Vec<f64> = fitness
            .iter()
            .map(|&f| if f.is_finite() { f - floor + 1.0 } else { 0.0 })
            .collect();
        let total: f64 = weights.iter().sum();

        if total <= 0.0 {
            return (0..count).map(|_| rng.gen_range(0..fitness.len())).collect();
        }

        (0..count)
            .map(|_| {
                let r = rng.gen_range(0.0..total);
                let mut acc = 0.0;
                for (idx, w) in weights.iter().enumerate() {
                    acc += w;
                    if acc >= r {
                        return idx;
                    }
                }
                weights.len() - 1
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
    fn never_selects_disqualified_genomes_when_alternatives_exist() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let fitness = vec![f64::NEG_INFINITY, 1.0, f64::NEG_INFINITY];
        let select = Roulette;
        let winners = select.call(&fitness, 50, &mut rng);
        assert!(winners.iter().all(|&i| i == 1));
    }

    #[test]
    fn falls_back_to_uniform_when_all_disqualified() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let fitness = vec![f64::NEG_INFINITY; 3];
        let select = Roulette;
        assert_eq!(select.call(&fitness, 5, &mut rng).len(), 5);
    }
}
