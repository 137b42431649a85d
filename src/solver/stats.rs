//! Per-solve search statistics and their tabular rendering.

use std::time::Duration;

use prettytable::{Cell, Row, Table};

/// Counters describing one strategy invocation, or one seeding run summed
/// over its inner searches.
///
/// `consistency_checks` is the before/after difference of the model's own
/// counter, so it reflects exactly the checks this invocation caused even
/// when the same model serves many solves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Search-tree nodes entered.
    pub nodes_visited: u64,
    /// Candidate values abandoned, whether they failed the consistency
    /// check, wiped out a domain, or led to a dead subtree.
    pub backtracks: u64,
    /// Consistency checks performed against the model.
    pub consistency_checks: u64,
    /// Wall-clock time of the invocation.
    pub elapsed: Duration,
}

impl SearchStats {
    /// Folds another run's counters into this one. Retrying callers such
    /// as the seeder use this to report totals across all their attempts.
    pub fn absorb(&mut self, other: &SearchStats) {
        self.nodes_visited += other.nodes_visited;
        self.backtracks += other.backtracks;
        self.consistency_checks += other.consistency_checks;
        self.elapsed += other.elapsed;
    }
}

/// Renders the statistics as a bordered table for terminal display.
pub fn render_stats_table(stats: &SearchStats) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Nodes"),
        Cell::new("Backtracks"),
        Cell::new("Consistency Checks"),
        Cell::new("Elapsed (ms)"),
    ]));
    table.add_row(Row::new(vec![
        Cell::new(&stats.nodes_visited.to_string()),
        Cell::new(&stats.backtracks.to_string()),
        Cell::new(&stats.consistency_checks.to_string()),
        Cell::new(&format!("{:.2}", stats.elapsed.as_secs_f64() * 1000.0)),
    ]));
    table.to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn absorb_sums_every_counter() {
        let mut total = SearchStats {
            nodes_visited: 10,
            backtracks: 2,
            consistency_checks: 50,
            elapsed: Duration::from_millis(5),
        };
        total.absorb(&SearchStats {
            nodes_visited: 3,
            backtracks: 1,
            consistency_checks: 7,
            elapsed: Duration::from_millis(2),
        });
        assert_eq!(
            total,
            SearchStats {
                nodes_visited: 13,
                backtracks: 3,
                consistency_checks: 57,
                elapsed: Duration::from_millis(7),
            }
        );
    }

    #[test]
    fn rendered_table_carries_the_counters() {
        let stats = SearchStats {
            nodes_visited: 42,
            backtracks: 6,
            consistency_checks: 180,
            elapsed: Duration::from_millis(3),
        };
        let table = render_stats_table(&stats);
        assert!(table.contains("42"));
        assert!(table.contains("180"));
        assert!(table.contains("Backtracks"));
    }
}
