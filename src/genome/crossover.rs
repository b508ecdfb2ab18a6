//! `Crossover` trait wrapper over [`super::crossover_single_point`], mirroring the
//! teacher's `crossover/single_point.rs` `Crossover` trait shape so the evolutionary
//! loop dispatches through a pluggable strategy object even though this crate only
//! ships one implementation.
use super::{crossover_single_point, Genome};
use rand::Rng;

pub trait Crossover {
    fn call<R: Rng>(&self, a: &Genome, b: &Genome, rng: &mut R) -> (Genome, Genome);
}

#[derive(Debug, Clone, Default)]
pub struct SinglePointCrossover;

impl Crossover for SinglePointCrossover {
    fn call<R: Rng>(&self, a: &Genome, b: &Genome, rng: &mut R) -> (Genome, Genome) {
        crossover_single_point(a, b, rng)
    }
}
