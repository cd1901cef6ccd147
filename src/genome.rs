use ::rand::Rng;

/// One tick of control intent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Gene {
    pub accelerate: bool,
    pub decelerate: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

impl Gene {
    /// Pure forward drive.
    pub const ACCELERATE: Gene = Gene {
        accelerate: true,
        decelerate: false,
        turn_left: false,
        turn_right: false,
    };

    /// All four intents resampled independently.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            accelerate: rng.gen(),
            decelerate: rng.gen(),
            turn_left: rng.gen(),
            turn_right: rng.gen(),
        }
    }
}

/// Ordered sequence of genes, consumed one per tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Genome {
    pub genes: Vec<Gene>,
}

impl Genome {
    pub fn new(genes: Vec<Gene>) -> Self {
        Self { genes }
    }

    /// Random genome whose first gene is forced to pure acceleration so nobody stalls at tick 0.
    pub fn random(length: usize, rng: &mut impl Rng) -> Self {
        let mut genes: Vec<Gene> = (0..length).map(|_| Gene::random(rng)).collect();
        if let Some(first) = genes.first_mut() {
            *first = Gene::ACCELERATE;
        }
        Self { genes }
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Gene> {
        self.genes.get(index).copied()
    }

    /// Copy of the first `len` genes.
    pub fn truncated(&self, len: usize) -> Self {
        Self {
            genes: self.genes[..len.min(self.genes.len())].to_vec(),
        }
    }

    /// Extend with random genes up to `len`. Longer genomes are left as they are.
    pub fn pad_random(&mut self, len: usize, rng: &mut impl Rng) {
        while self.genes.len() < len {
            self.genes.push(Gene::random(rng));
        }
    }

    /// Mutate this genome, returning a new child genome.
    ///
    /// Positions before `preserved_len` mutate with `preserved_rate`, the rest with `rate`.
    /// A mutated position gets a fresh random gene rather than a bit flip.
    pub fn mutate(
        &self,
        preserved_len: usize,
        preserved_rate: f32,
        rate: f32,
        rng: &mut impl Rng,
    ) -> Self {
        let mut child = self.clone();
        for (i, gene) in child.genes.iter_mut().enumerate() {
            let p = if i < preserved_len { preserved_rate } else { rate };
            if rng.gen::<f32>() < p {
                *gene = Gene::random(rng);
            }
        }
        child
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn random_genome_starts_with_pure_acceleration() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let genome = Genome::random(50, &mut rng);
        assert_eq!(genome.len(), 50);
        assert_eq!(genome.get(0), Some(Gene::ACCELERATE));
        assert!(Genome::random(0, &mut rng).is_empty());
    }

    #[test]
    fn random_genes_cover_all_fields() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let genes: Vec<Gene> = (0..200).map(|_| Gene::random(&mut rng)).collect();
        assert!(genes.iter().any(|g| g.accelerate) && genes.iter().any(|g| !g.accelerate));
        assert!(genes.iter().any(|g| g.decelerate) && genes.iter().any(|g| !g.decelerate));
        assert!(genes.iter().any(|g| g.turn_left) && genes.iter().any(|g| !g.turn_left));
        assert!(genes.iter().any(|g| g.turn_right) && genes.iter().any(|g| !g.turn_right));
    }

    #[test]
    fn truncate_and_pad() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let genome = Genome::random(10, &mut rng);
        let mut short = genome.truncated(4);
        assert_eq!(short.genes[..], genome.genes[..4]);
        assert_eq!(genome.truncated(99).len(), 10);

        short.pad_random(12, &mut rng);
        assert_eq!(short.len(), 12);
        assert_eq!(short.genes[..4], genome.genes[..4]);
    }

    #[test]
    fn zero_rate_mutation_is_identity() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let genome = Genome::random(100, &mut rng);
        assert_eq!(genome.mutate(50, 0.0, 0.0, &mut rng), genome);
    }

    #[test]
    fn mutation_respects_preserved_prefix() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let genome = Genome::new(vec![Gene::default(); 400]);
        let child = genome.mutate(200, 0.0, 1.0, &mut rng);
        assert_eq!(child.genes[..200], genome.genes[..200]);
        // Every tail position was resampled, so roughly 15/16 differ from all-false.
        let changed = child.genes[200..]
            .iter()
            .filter(|g| **g != Gene::default())
            .count();
        assert!(changed > 150, "changed={changed}");
    }
}
