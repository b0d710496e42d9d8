use std::{fmt, str::FromStr};

use crate::{Error, Result};

/// Modulus of the probe generator; seeds stay in `[0, 1024)`
const SEED_MODULUS: u32 = 1 << 10;

/// Collision resolution discipline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProbeStrategy {
    /// Next slot is `(current + 1) mod size`
    #[default]
    Linear,

    /// Next slot is drawn from a linear congruential generator, never
    /// revisiting a slot already tried for the current key
    Random,
}

impl ProbeStrategy {
    /// All strategies, in a stable order.
    pub const ALL: [Self; 2] = [Self::Linear, Self::Random];
}

impl fmt::Display for ProbeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Linear => "linear",
            Self::Random => "random",
        })
    }
}

impl FromStr for ProbeStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "random" => Ok(Self::Random),
            other => Err(Error::InvalidConfig(format!("unknown probing strategy: {other}"))),
        }
    }
}

/// Fixed-capacity set of slot indices
#[derive(Debug, Clone)]
pub struct UsedIndices {
    words: Vec<u64>,
}

impl UsedIndices {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(64)],
        }
    }

    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Marks `index` as used. Out of range indices are ignored.
    pub fn insert(&mut self, index: usize) {
        if let Some(word) = self.words.get_mut(index / 64) {
            *word |= 1u64 << (index % 64);
        }
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.words
            .get(index / 64)
            .is_some_and(|word| word & (1u64 << (index % 64)) != 0)
    }
}

/// Produces candidate slots for one insertion at a time.
///
/// The generator seed lives here and keeps advancing across insertions, so a
/// table fed the same keys from the same starting seed always probes the same
/// slots.
#[derive(Debug, Clone)]
pub struct ProbeSequencer {
    strategy: ProbeStrategy,
    size: usize,
    seed: u32,
    used: UsedIndices,
}

impl ProbeSequencer {
    /// Default starting seed of the random strategy
    pub const DEFAULT_SEED: u32 = 1;

    #[must_use]
    pub fn new(strategy: ProbeStrategy, size: usize, seed: u32) -> Self {
        Self {
            strategy,
            size,
            seed: seed % SEED_MODULUS,
            used: UsedIndices::new(size),
        }
    }

    #[must_use]
    pub fn strategy(&self) -> ProbeStrategy {
        self.strategy
    }

    /// Current generator state.
    #[must_use]
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Starts a new walk from the 0-based `initial` slot.
    pub fn begin(&mut self, initial: usize) {
        if self.strategy == ProbeStrategy::Random {
            self.used.clear();
            self.used.insert(initial);
        }
    }

    /// Returns the next 0-based slot to examine after `current`.
    ///
    /// Returns `None` when the random generator cannot produce a slot that
    /// was not already tried during this walk.
    pub fn next(&mut self, current: usize) -> Option<usize> {
        match self.strategy {
            ProbeStrategy::Linear => Some((current + 1) % self.size),
            ProbeStrategy::Random => self.next_random(),
        }
    }

    fn advance(&mut self) -> usize {
        self.seed = (5 * self.seed) % SEED_MODULUS;
        (self.seed as usize / 4) % self.size
    }

    fn next_random(&mut self) -> Option<usize> {
        // every generator state has been visited after SEED_MODULUS steps
        for _ in 0..SEED_MODULUS {
            let index = self.advance();
            if !self.used.contains(index) {
                self.used.insert(index);
                return Some(index);
            }
        }

        log::debug!("Random probe generator stalled at seed {}", self.seed);
        None
    }
}
