use crate::{
    hash::HashKind,
    probe::{ProbeSequencer, ProbeStrategy},
    stats::StatRange,
};

/// Experiment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabConfig {
    /// Number of slots
    pub size: usize,

    pub hash: HashKind,

    pub strategy: ProbeStrategy,

    /// Starting seed of the random probe generator
    pub seed: u32,

    /// Maximum number of keys read from the source
    pub limit: usize,

    /// Required key length in characters; longer lines are truncated
    pub key_len: usize,

    /// Insertion order blocks to report statistics for
    pub ranges: Vec<StatRange>,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            size: 100,
            hash: HashKind::default(),
            strategy: ProbeStrategy::default(),
            seed: ProbeSequencer::DEFAULT_SEED,
            limit: 75,
            key_len: 16,
            ranges: StatRange::defaults(),
        }
    }
}

impl LabConfig {
    #[must_use]
    pub fn size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn hash(mut self, hash: HashKind) -> Self {
        self.hash = hash;
        self
    }

    #[must_use]
    pub fn strategy(mut self, strategy: ProbeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn key_len(mut self, key_len: usize) -> Self {
        self.key_len = key_len;
        self
    }

    /// Replaces the reported ranges. An empty list keeps the defaults.
    #[must_use]
    pub fn ranges(mut self, ranges: Vec<StatRange>) -> Self {
        if !ranges.is_empty() {
            self.ranges = ranges;
        }
        self
    }
}
