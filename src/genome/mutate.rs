//! `Mutate` trait wrapper over [`super::mutate_per_gene`], mirroring the teacher's
//! `mutate/single_gene.rs` `Mutate` trait shape.
use super::{mutate_per_gene, Genome};
use rand::Rng;

pub trait Mutate {
    fn call<R: Rng>(&self, genome: &Genome, rng: &mut R) -> Genome;
}

#[derive(Debug, Clone)]
pub struct PerGeneMutate {
    pub rate: f64,
}

impl PerGeneMutate {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }
}

impl Mutate for PerGeneMutate {
    fn call<R: Rng>(&self, genome: &Genome, rng: &mut R) -> Genome {
        mutate_per_gene(genome, self.rate, rng)
    }
}
