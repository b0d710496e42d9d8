use rayon::prelude::*;

use crate::{
    config::LabConfig,
    hash::HashKind,
    map::SlotTable,
    probe::ProbeStrategy,
    stats::{ProbeStats, StatRange},
    Result,
};

/// A populated table and its statistics
#[derive(Debug, Clone)]
pub struct Outcome {
    pub table: SlotTable,

    /// Keys that were not placed, either duplicates or out of probes
    pub rejected: usize,

    pub stats: Vec<(StatRange, ProbeStats)>,
}

/// Inserts `keys` in order into a fresh table built from `config`.
///
/// # Errors
///
/// Returns an error if the table cannot be built or the hash function
/// rejects a key. No further keys are inserted after an error.
pub fn run(config: &LabConfig, keys: &[String]) -> Result<Outcome> {
    let mut table =
        SlotTable::new(config.size, config.hash, config.strategy)?.with_seed(config.seed);

    let mut rejected = 0;
    for key in keys {
        if !table.insert(key)? {
            rejected += 1;
        }
    }

    if rejected > 0 {
        log::warn!(
            "{rejected} of {} keys were not placed ({} hash, {} probing)",
            keys.len(),
            config.hash,
            config.strategy
        );
    }
    log::info!(
        "Placed {} keys into {} slots ({} hash, {} probing)",
        table.len(),
        table.size(),
        config.hash,
        config.strategy
    );

    let stats = config
        .ranges
        .iter()
        .map(|range| (range.clone(), table.range_stats(range.start, range.count)))
        .collect();

    Ok(Outcome {
        table,
        rejected,
        stats,
    })
}

/// Runs every hash function against every probing strategy over the same
/// keys, one independent table each.
///
/// # Errors
///
/// Returns the first error of any combination.
pub fn compare(config: &LabConfig, keys: &[String]) -> Result<Vec<Outcome>> {
    let combinations = HashKind::ALL
        .into_iter()
        .flat_map(|hash| ProbeStrategy::ALL.into_iter().map(move |strategy| (hash, strategy)))
        .collect::<Vec<_>>();

    combinations
        .into_par_iter()
        .map(|(hash, strategy)| run(&config.clone().hash(hash).strategy(strategy), keys))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn words(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("word{i:012}")).collect()
    }

    #[test]
    fn run_counts_rejections() -> Result<()> {
        let mut keys = words(10);
        keys.push(keys[3].clone());

        let outcome = run(&LabConfig::default(), &keys)?;
        assert_eq!(10, outcome.table.len());
        assert_eq!(1, outcome.rejected);
        assert_eq!(3, outcome.stats.len());

        let (range, all) = &outcome.stats[2];
        assert_eq!(1, range.start);
        assert_eq!(10, all.count);

        let (_, last) = &outcome.stats[1];
        assert_eq!(ProbeStats::default(), *last);

        Ok(())
    }

    #[test]
    fn run_overfull_table() -> Result<()> {
        let config = LabConfig::default().size(10);
        let outcome = run(&config, &words(15))?;
        assert_eq!(10, outcome.table.len());
        assert_eq!(5, outcome.rejected);
        Ok(())
    }

    #[test]
    fn compare_covers_all_combinations() -> Result<()> {
        let keys = words(75);
        let outcomes = compare(&LabConfig::default(), &keys)?;
        assert_eq!(6, outcomes.len());

        for outcome in &outcomes {
            let single = run(
                &LabConfig::default()
                    .hash(outcome.table.hash_kind())
                    .strategy(outcome.table.strategy()),
                &keys,
            )?;
            assert_eq!(single.stats, outcome.stats);
        }

        Ok(())
    }
}
