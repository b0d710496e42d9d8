use std::fmt::Write;

use crate::{
    experiment::Outcome,
    map::SlotTable,
    stats::{ProbeStats, StatRange},
};

/// `numerator / denominator` to two decimals, ties rounded up. Rounds the
/// exact ratio, never an `f64`.
fn ratio2(numerator: usize, denominator: usize) -> String {
    if denominator == 0 {
        return "0.00".to_string();
    }
    let hundredths = (200 * numerator + denominator) / (2 * denominator);
    format!("{}.{:02}", hundredths / 100, hundredths % 100)
}

/// Renders every slot of the table as a fixed-width row.
pub fn render_table(table: &SlotTable) -> String {
    let mut out = String::from("Hash Table:\n");

    let _ = writeln!(
        out,
        "{:<5} {:<20} {:<15} {:<15} {:<7} {:<10}",
        "Index", "Key", "Initial Hash", "Resolved Hash", "Probes", "Order"
    );

    for (index, slot) in table.snapshot() {
        let _ = match slot {
            Some(entry) => writeln!(
                out,
                "{:<5} {:<20} {:<15} {:<15} {:<7} {:<10}",
                index,
                entry.key,
                entry.initial_index,
                entry.resolved_index,
                entry.probes,
                entry.order
            ),
            None => writeln!(
                out,
                "{:<5} {:<20} {:<15} {:<15} {:<7} {:<10}",
                index, "Empty", "-", "-", "-", "-"
            ),
        };
    }

    out
}

/// `<label>: <average> (Min: <min>, Max: <max>)`
pub fn render_summary(label: &str, stats: &ProbeStats) -> String {
    format!(
        "{label}: {} (Min: {}, Max: {})",
        ratio2(stats.sum, stats.count),
        stats.min(),
        stats.max()
    )
}

/// Table dump followed by one summary line per range.
pub fn render_report(table: &SlotTable, ranges: &[StatRange]) -> String {
    let mut out = render_table(table);
    for range in ranges {
        let stats = table.range_stats(range.start, range.count);
        out.push_str(&render_summary(&range.label, &stats));
        out.push('\n');
    }
    out
}

/// One block per hash function and probing strategy combination.
pub fn render_comparison(outcomes: &[Outcome]) -> String {
    let mut out = String::new();

    for outcome in outcomes {
        let table = &outcome.table;
        let _ = writeln!(
            out,
            "{} hash, {} probing: {} placed, {} rejected, load factor {}",
            table.hash_kind(),
            table.strategy(),
            table.len(),
            outcome.rejected,
            ratio2(table.len(), table.size()),
        );
        for (range, stats) in &outcome.stats {
            let _ = writeln!(out, "  {}", render_summary(&range.label, stats));
        }
    }

    out
}
