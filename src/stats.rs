use std::{fmt, str::FromStr};

use crate::{map::Entry, Error, Result};

/// Probe count aggregate over a set of entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProbeStats {
    min: usize,
    max: usize,
    pub sum: usize,
    pub count: usize,
}

impl ProbeStats {
    #[inline]
    pub fn new(probes: usize) -> Self {
        Self {
            min: probes,
            max: probes,
            sum: probes,
            count: 1,
        }
    }

    #[inline]
    pub fn update(&mut self, other: &ProbeStats) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }
        self.min = usize::min(self.min, other.min);
        self.max = usize::max(self.max, other.max);
        self.sum += other.sum;
        self.count += other.count;
    }

    #[inline]
    pub fn update_single(&mut self, probes: usize) {
        self.update(&Self::new(probes));
    }

    /// Aggregates the entries whose insertion order falls in
    /// `[start, start + count)`.
    pub fn collect<'a>(
        entries: impl IntoIterator<Item = &'a Entry>,
        start: usize,
        count: usize,
    ) -> Self {
        let end = start.saturating_add(count);

        entries
            .into_iter()
            .filter(|entry| (start..end).contains(&entry.order))
            .fold(Self::default(), |mut stats, entry| {
                stats.update_single(entry.probes);
                stats
            })
    }

    /// Smallest probe count, or 0 if nothing matched.
    #[must_use]
    pub fn min(&self) -> usize {
        self.min
    }

    /// Largest probe count, or 0 if nothing matched.
    #[must_use]
    pub fn max(&self) -> usize {
        self.max
    }

    /// Mean probe count, or 0.0 if nothing matched.
    #[must_use]
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum as f64 / self.count as f64
        }
    }
}

/// A labelled block of insertion orders to aggregate over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRange {
    pub label: String,

    /// First insertion order, 1-based
    pub start: usize,

    pub count: usize,
}

impl StatRange {
    pub fn new(label: impl Into<String>, start: usize, count: usize) -> Self {
        Self {
            label: label.into(),
            start,
            count,
        }
    }

    /// First 25, last 25 (orders 51..=75) and all 75 keys.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("Average Probes - First 25 Keys", 1, 25),
            Self::new("Average Probes - Last 25 Keys", 51, 25),
            Self::new("Average Probes - All 75 Keys", 1, 75),
        ]
    }
}

impl fmt::Display for StatRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.start, self.count, self.label)
    }
}

/// Parses `START:COUNT[:LABEL]`.
impl FromStr for StatRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid =
            || Error::InvalidConfig(format!("invalid range {s:?}, expected START:COUNT[:LABEL]"));

        let mut parts = s.splitn(3, ':');
        let start = parts
            .next()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|start| *start > 0)
            .ok_or_else(invalid)?;
        let count = parts
            .next()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .ok_or_else(invalid)?;

        let label = match parts.next() {
            Some(label) if !label.trim().is_empty() => label.trim().to_string(),
            _ => format!(
                "Average Probes - Keys {start}-{}",
                start.saturating_add(count).saturating_sub(1)
            ),
        };

        Ok(Self::new(label, start, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn entry(order: usize, probes: usize) -> Entry {
        Entry {
            key: format!("key{order}"),
            initial_index: 1,
            resolved_index: order,
            probes,
            order,
        }
    }

    #[test]
    fn stats_track_extremes() {
        let mut stats = ProbeStats::default();
        assert_eq!(0.0, stats.average());

        stats.update_single(3);
        stats.update_single(1);
        stats.update_single(5);

        assert_eq!(1, stats.min());
        assert_eq!(5, stats.max());
        assert_eq!(9, stats.sum);
        assert_eq!(3, stats.count);
        assert!((stats.average() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stats_merge() {
        let mut a = ProbeStats::new(2);
        a.update(&ProbeStats::default());
        assert_eq!(ProbeStats::new(2), a);

        let mut b = ProbeStats::new(7);
        b.update_single(4);
        a.update(&b);
        assert_eq!(2, a.min());
        assert_eq!(7, a.max());
        assert_eq!(13, a.sum);
    }

    #[test]
    fn collect_by_order_range() {
        let entries = (1..=10).map(|i| entry(i, i * 2)).collect::<Vec<_>>();

        let stats = ProbeStats::collect(&entries, 3, 4);
        assert_eq!(4, stats.count);
        assert_eq!(6, stats.min());
        assert_eq!(12, stats.max());
        assert!((stats.average() - 9.0).abs() < f64::EPSILON);

        let all = ProbeStats::collect(&entries, 1, 10);
        assert_eq!(110, all.sum);
    }

    #[test]
    fn collect_empty_range() {
        let entries = (1..=10).map(|i| entry(i, 1)).collect::<Vec<_>>();
        let stats = ProbeStats::collect(&entries, 51, 25);
        assert_eq!(0, stats.min());
        assert_eq!(0, stats.max());
        assert_eq!(0.0, stats.average());
    }

    #[test]
    fn parse_range() {
        let range = "51:25".parse::<StatRange>().unwrap();
        assert_eq!(51, range.start);
        assert_eq!(25, range.count);
        assert_eq!("Average Probes - Keys 51-75", range.label);

        let range = "1:10:Warmup: first ten".parse::<StatRange>().unwrap();
        assert_eq!("Warmup: first ten", range.label);

        assert!("0:10".parse::<StatRange>().is_err());
        assert!("1".parse::<StatRange>().is_err());
        assert!("a:b".parse::<StatRange>().is_err());
    }
}
