use rand::{SeedableRng, rngs::StdRng};

/// How much of each field the sampler shows, and whether the run is seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerConfig {
    pub bio_count: usize,
    pub lore_count: usize,
    pub conversation_count: usize,
    pub style_count: usize,
    /// Fixed seed for reproducible output. None seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            bio_count: 3,
            lore_count: 3,
            conversation_count: 3,
            style_count: 3,
            seed: None,
        }
    }
}

impl SamplerConfig {
    /// The rng a run with this config should use
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
