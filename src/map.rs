use rustc_hash::FxHashMap;

use crate::{
    hash::HashKind,
    probe::{ProbeSequencer, ProbeStrategy},
    stats::ProbeStats,
    Error, Result,
};

/// A placed key and how it got there. Indices are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,

    /// Bucket the hash function chose
    pub initial_index: usize,

    /// Slot the key ended up in
    pub resolved_index: usize,

    /// Slots examined, including the first
    pub probes: usize,

    /// Rank among successful insertions
    pub order: usize,
}

pub type Slot = Option<Entry>;

/// Fixed-capacity open-addressing table that records probe counts
#[derive(Debug, Clone)]
pub struct SlotTable {
    table: Vec<Slot>,
    hash: HashKind,
    probe: ProbeSequencer,
    positions: FxHashMap<String, usize>,
    inserted: usize,
}

impl SlotTable {
    /// Creates an empty table of `size` slots.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTableSize`] if `size` is 0.
    pub fn new(size: usize, hash: HashKind, strategy: ProbeStrategy) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidTableSize(size));
        }

        Ok(Self {
            table: vec![None; size],
            hash,
            probe: ProbeSequencer::new(strategy, size, ProbeSequencer::DEFAULT_SEED),
            positions: FxHashMap::default(),
            inserted: 0,
        })
    }

    /// Sets the starting seed of the random probe generator.
    #[must_use]
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.probe = ProbeSequencer::new(self.probe.strategy(), self.table.len(), seed);
        self
    }

    /// Places `key` into the table.
    ///
    /// Returns `Ok(false)` if the key is already present or no free slot was
    /// reached within `size` probes; the table is left untouched in both cases.
    ///
    /// Duplicates are caught before the collision walk starts, so under random
    /// probing a rejected duplicate does not advance the generator seed.
    ///
    /// # Errors
    ///
    /// Returns an error if the hash function rejects the key.
    pub fn insert(&mut self, key: &str) -> Result<bool> {
        let size = self.table.len();
        let initial = self.hash.hash(key, size)? - 1;

        if self.positions.contains_key(key) {
            log::debug!("Rejected {key:?}: already present");
            return Ok(false);
        }

        self.probe.begin(initial);

        let mut index = initial;
        let mut probes = 1;

        while let Some(entry) = &self.table[index] {
            if entry.key == key {
                log::debug!("Rejected {key:?}: already present at {}", index + 1);
                return Ok(false);
            }

            let Some(next) = self.probe.next(index) else {
                log::debug!("Rejected {key:?}: probe sequence exhausted after {probes} probes");
                return Ok(false);
            };
            index = next;
            probes += 1;

            if probes > size {
                log::debug!("Rejected {key:?}: no free slot within {size} probes");
                return Ok(false);
            }
        }

        self.inserted += 1;
        self.table[index] = Some(Entry {
            key: key.to_string(),
            initial_index: initial + 1,
            resolved_index: index + 1,
            probes,
            order: self.inserted,
        });
        self.positions.insert(key.to_string(), index);

        log::trace!(
            "Placed {key:?} at {} (initial {}, {probes} probes, order {})",
            index + 1,
            initial + 1,
            self.inserted,
        );

        Ok(true)
    }

    /// Every slot in index order, with its 1-based index.
    pub fn snapshot(&self) -> impl Iterator<Item = (usize, &Slot)> + '_ {
        self.table.iter().enumerate().map(|(i, slot)| (i + 1, slot))
    }

    /// Occupied slots in index order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.table.iter().flatten()
    }

    /// Occupied slots in insertion order.
    #[must_use]
    pub fn entries_by_order(&self) -> Vec<&Entry> {
        let mut entries = self.entries().collect::<Vec<_>>();
        entries.sort_unstable_by_key(|entry| entry.order);
        entries
    }

    /// Probe statistics over insertion orders `[start, start + count)`.
    #[must_use]
    pub fn range_stats(&self, start: usize, count: usize) -> ProbeStats {
        ProbeStats::collect(self.entries(), start, count)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.positions
            .get(key)
            .and_then(|index| self.table.get(*index))
            .and_then(Option::as_ref)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Number of placed keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inserted
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inserted == 0
    }

    /// Number of slots.
    #[must_use]
    pub fn size(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn load_factor(&self) -> f64 {
        self.inserted as f64 / self.table.len() as f64
    }

    #[must_use]
    pub fn hash_kind(&self) -> HashKind {
        self.hash
    }

    #[must_use]
    pub fn strategy(&self) -> ProbeStrategy {
        self.probe.strategy()
    }

    /// Current state of the random probe generator.
    #[must_use]
    pub fn seed(&self) -> u32 {
        self.probe.seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn linear() -> SlotTable {
        SlotTable::new(100, HashKind::Custom, ProbeStrategy::Linear).unwrap()
    }

    #[test]
    fn rejects_zero_size() {
        assert!(matches!(
            SlotTable::new(0, HashKind::Custom, ProbeStrategy::Linear),
            Err(Error::InvalidTableSize(0))
        ));
    }

    #[test]
    fn linear_collision_moves_to_next_slot() {
        let mut table = linear();
        assert!(table.insert("aaaaaaaaaaaaaaaa").unwrap());
        assert!(table.insert("aaaaaaaaakaaaaaa").unwrap());
        assert!(table.insert("aaaaMaaaaaaaaaaa").unwrap());

        let first = table.get("aaaaaaaaaaaaaaaa").unwrap();
        assert_eq!((77, 77, 1, 1), (first.initial_index, first.resolved_index, first.probes, first.order));

        let second = table.get("aaaaaaaaakaaaaaa").unwrap();
        assert_eq!((77, 78, 2, 2), (second.initial_index, second.resolved_index, second.probes, second.order));

        let third = table.get("aaaaMaaaaaaaaaaa").unwrap();
        assert_eq!((77, 79, 3, 3), (third.initial_index, third.resolved_index, third.probes, third.order));
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let mut table = linear();
        assert!(table.insert("aaaaaaaaaaaaaaaa").unwrap());
        assert!(table.insert("aaaaaaaaakaaaaaa").unwrap());

        let before = table.snapshot().map(|(i, slot)| (i, slot.clone())).collect::<Vec<_>>();

        assert!(!table.insert("aaaaaaaaakaaaaaa").unwrap());
        assert!(!table.insert("aaaaaaaaaaaaaaaa").unwrap());

        let after = table.snapshot().map(|(i, slot)| (i, slot.clone())).collect::<Vec<_>>();
        assert_eq!(before, after);
        assert_eq!(2, table.len());
    }

    #[test]
    fn duplicate_insert_keeps_random_seed() {
        let mut table = SlotTable::new(100, HashKind::Custom, ProbeStrategy::Random).unwrap();
        assert!(table.insert("aaaaaaaaaaaaaaaa").unwrap());
        assert!(table.insert("aaaaaaaaakaaaaaa").unwrap());
        assert_eq!(5, table.seed());

        assert!(!table.insert("aaaaaaaaakaaaaaa").unwrap());
        assert_eq!(5, table.seed());
        assert_eq!(2, table.len());
    }

    #[test]
    fn full_table_fails_after_size_probes() {
        let mut table = SlotTable::new(4, HashKind::Custom, ProbeStrategy::Linear).unwrap();
        for i in 0..4 {
            assert!(table.insert(&format!("key{i}")).unwrap());
        }
        assert!(!table.insert("overflow").unwrap());
        assert_eq!(4, table.len());
        assert!(!table.contains("overflow"));
    }

    #[test]
    fn snapshot_matches_positions() {
        let mut table = linear();
        for i in 0..60 {
            table.insert(&format!("word{i:012}")).unwrap();
        }

        for (index, slot) in table.snapshot() {
            if let Some(entry) = slot {
                assert_eq!(index, entry.resolved_index);
                assert!(entry.probes >= 1);
                assert!((1..=100).contains(&entry.initial_index));
            }
        }

        let orders = table.entries_by_order().iter().map(|e| e.order).collect::<Vec<_>>();
        assert_eq!((1..=table.len()).collect::<Vec<_>>(), orders);
    }

    #[test]
    fn hash_error_leaves_table_untouched() {
        let mut table = SlotTable::new(100, HashKind::Burris, ProbeStrategy::Linear).unwrap();
        assert!(matches!(table.insert("short"), Err(Error::KeyTooShort { .. })));
        assert!(table.is_empty());
    }

    #[test]
    fn range_stats_over_table() {
        let mut table = linear();
        table.insert("aaaaaaaaaaaaaaaa").unwrap();
        table.insert("aaaaaaaaakaaaaaa").unwrap();
        table.insert("aaaaMaaaaaaaaaaa").unwrap();

        let stats = table.range_stats(1, 3);
        assert_eq!(1, stats.min());
        assert_eq!(3, stats.max());
        assert!((stats.average() - 2.0).abs() < f64::EPSILON);

        let stats = table.range_stats(2, 1);
        assert_eq!((2, 2), (stats.min(), stats.max()));

        assert_eq!(ProbeStats::default(), table.range_stats(4, 10));
    }
}
