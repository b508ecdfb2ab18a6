//! Selection strategies (spec §4.7 step 4): pick `N` parent indices from a scored
//! population. Mirrors the teacher's `compete`/`Compete` trait shape (`compete/
//! tournament.rs`), renamed to `Select` since this repo picks parents rather than
//! survivors.
pub mod roulette;
pub mod tournament;

pub use roulette::Roulette;
pub use tournament::Tournament;

use rand::Rng;

/// Picks `count` parent indices into `fitness` (higher is better; `-inf` is never a
/// winner unless every candidate is `-inf`).
pub trait Select {
    fn call<R: Rng>(&self, fitness: &[f64], count: usize, rng: &mut R) -> Vec<usize>;
}
