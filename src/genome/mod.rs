//! Fixed-length byte genomes, their attribute maps, and the genetic operators over
//! them (§3 Genome, §4.3).
pub mod attributes;
pub mod crossover;
pub mod decoder;
pub mod mutate;
pub mod tree;

use attributes::{AttributeValue, Attributes};
use rand::Rng;

/// A fixed-length sequence of bytes plus an attribute map. Length is constant across
/// a generation (spec §3 invariant); crossover/mutation return new genomes and never
/// mutate their parent.
#[derive(Debug, Clone)]
pub struct Genome {
    pub bytes: Vec<u8>,
    pub attributes: Attributes,
}

impl Genome {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            attributes: Attributes::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn set_id(&mut self, id: i64) {
        self.attributes.set("id", AttributeValue::Int(id));
    }

    pub fn id(&self) -> Option<i64> {
        self.attributes.get_int("id")
    }
}

/// Independently-uniform random bytes of `length`, with an attribute map seeded from
/// `defaults` plus a fresh `id` (spec §4.3 Create).
pub fn create<R: Rng>(length: usize, id: i64, defaults: &Attributes, rng: &mut R) -> Genome {
    let bytes = (0..length).map(|_| rng.gen::<u8>()).collect();
    let mut attributes = defaults.clone();
    attributes.set("id", AttributeValue::Int(id));
    Genome { bytes, attributes }
}

/// Single-point crossover (spec §4.3): `L = min(len(a), len(b))`, draw `p in [0, L)`,
/// produce `a[0:p] ++ b[p:L] ++ a[L:]` and `b[0:p] ++ a[p:L] ++ b[L:]`. Parents are not
/// mutated.
pub fn crossover_single_point<R: Rng>(a: &Genome, b: &Genome, rng: &mut R) -> (Genome, Genome) {
    let l = a.bytes.len().min(b.bytes.len());
    let p = if l == 0 { 0 } else { rng.gen_range(0..l) };

    let mut child_a = Vec::with_capacity(a.bytes.len());
    child_a.extend_from_slice(&a.bytes[..p]);
    child_a.extend_from_slice(&b.bytes[p..l]);
    child_a.extend_from_slice(&a.bytes[l..]);

    let mut child_b = Vec::with_capacity(b.bytes.len());
    child_b.extend_from_slice(&b.bytes[..p]);
    child_b.extend_from_slice(&a.bytes[p..l]);
    child_b.extend_from_slice(&b.bytes[l..]);

    (Genome::from_bytes(child_a), Genome::from_bytes(child_b))
}

/// Per-gene mutation (spec §4.3): each position is independently replaced by a fresh
/// uniform byte with probability `rate`. Returns a new genome.
pub fn mutate_per_gene<R: Rng>(genome: &Genome, rate: f64, rng: &mut R) -> Genome {
    let bytes = genome
        .bytes
        .iter()
        .map(|&b| if rng.gen_bool(rate) { rng.gen::<u8>() } else { b })
        .collect();
    Genome {
        bytes,
        attributes: genome.attributes.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sorted(bytes: &[u8]) -> Vec<u8> {
        let mut v = bytes.to_vec();
        v.sort_unstable();
        v
    }

    #[test]
    fn crossover_conserves_multiset_and_lengths() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let a = Genome::from_bytes(vec![1, 2, 3, 4, 5]);
        let b = Genome::from_bytes(vec![10, 20, 30]);
        let (c1, c2) = crossover_single_point(&a, &b, &mut rng);

        assert_eq!(c1.len(), a.len());
        assert_eq!(c2.len(), b.len());

        let mut combined_parents = a.bytes.clone();
        combined_parents.extend_from_slice(&b.bytes);
        let mut combined_children = c1.bytes.clone();
        combined_children.extend_from_slice(&c2.bytes);
        assert_eq!(sorted(&combined_parents), sorted(&combined_children));
    }

    #[test]
    fn mutation_at_rate_zero_is_identity() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let g = Genome::from_bytes(vec![9, 8, 7, 6]);
        let mutated = mutate_per_gene(&g, 0.0, &mut rng);
        assert_eq!(mutated.bytes, g.bytes);
    }
}
