//! Tenner Grid puzzles: the text format, solving and generation.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{Error, ParseError, Result},
    grid::layout::{Layout, TennerVariable},
    solver::{
        domain::{Assignment, Value},
        model::Model,
        seeder::Seeder,
        stats::SearchStats,
        strategy::StrategyKind,
    },
};

/// A Tenner Grid instance: some given digits and the column sums.
///
/// Blanks are `None`. Individual sums may be unknown too, in which case the
/// solver treats that column's sum target as a free variable and reports
/// whatever total the completion implies.
///
/// The text format is one comma-separated line per row with `_` for blanks,
/// closed by a final `=`-prefixed line of column sums:
///
/// ```text
/// 6,_,9,_,4,_,_,3,8,_
/// _,2,_,4,_,6,7,_,_,0
/// _,_,4,5,_,_,2,_,9,_
/// =18,9,16,14,9,12,11,11,19,16
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PuzzleData")]
pub struct Puzzle {
    layout: Layout,
    cells: Vec<Vec<Option<Value>>>,
    sums: Vec<Option<Value>>,
}

impl Puzzle {
    /// Builds a puzzle from explicit cell and sum data, validating shape
    /// and value ranges against the layout. Shape mistakes share the parse
    /// error vocabulary, whichever way the puzzle was put together.
    pub fn new(
        layout: Layout,
        cells: Vec<Vec<Option<Value>>>,
        sums: Vec<Option<Value>>,
    ) -> Result<Self> {
        if cells.len() != layout.rows() {
            return Err(ParseError::WrongNumberOfRows {
                found: cells.len(),
                expected: layout.rows(),
            }
            .into());
        }
        for (row, line) in cells.iter().enumerate() {
            if line.len() != layout.columns() {
                return Err(ParseError::WrongNumberOfCells {
                    row,
                    found: line.len(),
                    expected: layout.columns(),
                }
                .into());
            }
        }
        if sums.len() != layout.columns() {
            return Err(ParseError::WrongNumberOfSums {
                found: sums.len(),
                expected: layout.columns(),
            }
            .into());
        }
        for value in cells.iter().flatten().flatten() {
            if !(0..=9).contains(value) {
                return Err(ParseError::NumberOutOfRange(*value).into());
            }
        }
        for value in sums.iter().flatten() {
            if !(0..=layout.max_sum()).contains(value) {
                return Err(ParseError::NumberOutOfRange(*value).into());
            }
        }
        Ok(Self {
            layout,
            cells,
            sums,
        })
    }

    /// An entirely blank puzzle: no digits, no published sums.
    pub fn blank(layout: Layout) -> Self {
        Self {
            layout,
            cells: vec![vec![None; layout.columns()]; layout.rows()],
            sums: vec![None; layout.columns()],
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Value> {
        self.cells[row][col]
    }

    pub fn sum(&self, col: usize) -> Option<Value> {
        self.sums[col]
    }

    /// Whether every cell and every sum is filled in.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some) && self.sums.iter().all(Option::is_some)
    }

    /// The givens as a (typically partial) assignment over the grid's
    /// variables.
    pub fn assignment(&self) -> Assignment<TennerVariable> {
        let mut assignment = Assignment::new();
        for (row, line) in self.cells.iter().enumerate() {
            for (col, cell) in line.iter().enumerate() {
                if let Some(value) = cell {
                    assignment.insert(self.layout.cell(row, col), *value);
                }
            }
        }
        for (col, sum) in self.sums.iter().enumerate() {
            if let Some(value) = sum {
                assignment.insert(self.layout.target(col), *value);
            }
        }
        assignment
    }

    /// The model for this instance. Givens are pinned by narrowing their
    /// variables' domains to singletons, so a search both respects and
    /// re-validates them: contradictory givens simply yield no solution
    /// rather than an error.
    pub fn model(&self) -> Result<Model<TennerVariable>> {
        let mut model = self.layout.model()?;
        for (variable, value) in &self.assignment() {
            model.restrict_domain(variable, *value);
        }
        Ok(model)
    }

    /// Solves the puzzle with the chosen strategy. `None` means the givens
    /// admit no completion; the statistics describe the search either way.
    pub fn solve(&self, kind: StrategyKind) -> Result<(Option<Puzzle>, SearchStats)> {
        let model = self.model()?;
        let (solution, stats) = kind.build().solve(&model, Assignment::new());
        let solved = match solution {
            Some(assignment) => Some(Self::from_assignment(self.layout, &assignment)?),
            None => None,
        };
        Ok((solved, stats))
    }

    /// Whether `candidate` solves this puzzle: same layout, complete,
    /// preserving every given, and satisfying every grid constraint. The
    /// constraints are checked against a fresh full-domain model, so the
    /// givens' pins play no part in the verdict.
    pub fn verify(&self, candidate: &Puzzle) -> Result<bool> {
        if candidate.layout != self.layout || !candidate.is_complete() {
            return Ok(false);
        }
        let full = candidate.assignment();
        for (variable, value) in &self.assignment() {
            if full.get(variable) != Some(value) {
                return Ok(false);
            }
        }
        let model = self.layout.model()?;
        Ok(model.constraints().iter().all(|c| c.satisfied(&full)))
    }

    /// Generates a fresh solvable puzzle: the seeder probes the cells,
    /// forward checking extends the probes to a full grid, and the probed
    /// cells become the givens, with every column's implied sum published.
    pub fn generate<R: Rng>(layout: Layout, seeder: &mut Seeder<R>) -> Result<Puzzle> {
        let mut model = layout.model()?;
        let candidates: Vec<TennerVariable> = (0..layout.rows())
            .flat_map(|row| layout.row_cells(row))
            .collect();
        let seeded = seeder.seed(&mut model, &candidates);
        debug!(
            attempts = seeded.attempts,
            pre_filled = seeded.givens.len() - layout.columns(),
            "generated puzzle"
        );
        Self::from_assignment(layout, &seeded.givens)
    }

    fn from_assignment(layout: Layout, assignment: &Assignment<TennerVariable>) -> Result<Puzzle> {
        let cells: Vec<Vec<Option<Value>>> = (0..layout.rows())
            .map(|row| {
                (0..layout.columns())
                    .map(|col| assignment.get(&layout.cell(row, col)).copied())
                    .collect()
            })
            .collect();
        let sums: Vec<Option<Value>> = (0..layout.columns())
            .map(|col| assignment.get(&layout.target(col)).copied())
            .collect();
        Puzzle::new(layout, cells, sums)
    }
}

/// Wire-format mirror of [`Puzzle`]. Deserialized data passes through
/// [`Puzzle::new`], so a JSON body whose cells or sums disagree with its
/// declared layout is rejected instead of becoming a malformed puzzle.
#[derive(Deserialize)]
struct PuzzleData {
    layout: Layout,
    cells: Vec<Vec<Option<Value>>>,
    sums: Vec<Option<Value>>,
}

impl TryFrom<PuzzleData> for Puzzle {
    type Error = Error;

    fn try_from(data: PuzzleData) -> Result<Puzzle> {
        Puzzle::new(data.layout, data.cells, data.sums)
    }
}

impl FromStr for Puzzle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let Some((sum_line, cell_lines)) = lines.split_last() else {
            return Err(ParseError::MissingSumLine.into());
        };
        let Some(sum_line) = sum_line.strip_prefix('=') else {
            return Err(ParseError::MissingSumLine.into());
        };

        let cells = cell_lines
            .iter()
            .map(|line| parse_row(line))
            .collect::<Result<Vec<_>>>()?;
        let sums = parse_row(sum_line)?;

        let columns = cells.first().map_or(0, Vec::len);
        let layout = Layout::with_columns(cells.len(), columns)?;
        Puzzle::new(layout, cells, sums)
    }
}

fn parse_row(line: &str) -> Result<Vec<Option<Value>>> {
    line.split(',')
        .map(|token| {
            let token = token.trim();
            if token == "_" {
                return Ok(None);
            }
            token
                .parse::<Value>()
                .map(Some)
                .map_err(|_| ParseError::NumberFormat(token.to_string()).into())
        })
        .collect()
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn render(value: &Option<Value>) -> String {
            match value {
                Some(v) => v.to_string(),
                None => "_".to_string(),
            }
        }

        for line in &self.cells {
            let rendered: Vec<String> = line.iter().map(render).collect();
            writeln!(f, "{}", rendered.join(","))?;
        }
        let rendered: Vec<String> = self.sums.iter().map(render).collect();
        write!(f, "={}", rendered.join(","))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn init_logging() {
        let _ = tracing_subscriber::fmt::try_init();
    }

    /// A valid, fully solved 3x10 grid used as the base of most tests.
    /// Rows are shifts of 0..=9 by two, which keeps touching cells
    /// distinct, and the sums are the exact column totals.
    const SOLVED: &str = "\
        0,1,2,3,4,5,6,7,8,9\n\
        2,3,4,5,6,7,8,9,0,1\n\
        4,5,6,7,8,9,0,1,2,3\n\
        =6,9,12,15,18,21,14,17,10,13";

    fn solved_puzzle() -> Puzzle {
        SOLVED.parse().unwrap()
    }

    #[test]
    fn parse_and_display_round_trip() {
        let puzzle = solved_puzzle();
        assert_eq!(puzzle.to_string().parse::<Puzzle>().unwrap(), puzzle);
    }

    #[test]
    fn blanks_and_unknown_sums_parse_as_none() {
        let puzzle: Puzzle = "\
            _,1\n\
            3,_\n\
            =_,4"
            .parse()
            .unwrap();
        assert_eq!(puzzle.cell(0, 0), None);
        assert_eq!(puzzle.cell(0, 1), Some(1));
        assert_eq!(puzzle.cell(1, 1), None);
        assert_eq!(puzzle.sum(0), None);
        assert_eq!(puzzle.sum(1), Some(4));
        assert!(!puzzle.is_complete());
    }

    #[test]
    fn text_without_a_sum_line_is_rejected() {
        let err = "1,2\n3,4".parse::<Puzzle>().unwrap_err();
        assert_eq!(err, Error::Parse(ParseError::MissingSumLine));
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let err = "1,x\n=1,2".parse::<Puzzle>().unwrap_err();
        assert_eq!(
            err,
            Error::Parse(ParseError::NumberFormat("x".to_string()))
        );
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = "1,12\n=1,2".parse::<Puzzle>().unwrap_err();
        assert_eq!(err, Error::Parse(ParseError::NumberOutOfRange(12)));

        // 19 exceeds what a single-row column can sum to.
        let err = "1,2\n=1,19".parse::<Puzzle>().unwrap_err();
        assert_eq!(err, Error::Parse(ParseError::NumberOutOfRange(19)));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = "1,2,3\n4,5\n=1,2,3".parse::<Puzzle>().unwrap_err();
        assert_eq!(
            err,
            Error::Parse(ParseError::WrongNumberOfCells {
                row: 1,
                found: 2,
                expected: 3,
            })
        );
    }

    #[test]
    fn sum_line_must_match_the_column_count() {
        let err = "1,2\n=1,2,3".parse::<Puzzle>().unwrap_err();
        assert_eq!(
            err,
            Error::Parse(ParseError::WrongNumberOfSums {
                found: 3,
                expected: 2,
            })
        );
    }

    #[test]
    fn every_strategy_completes_a_forced_cell_identically() {
        init_logging();
        let mut puzzle = solved_puzzle();
        puzzle.cells[1][4] = None;

        for kind in StrategyKind::ALL {
            let (solution, stats) = puzzle.solve(kind).unwrap();
            let solved = solution.expect("one blank in a valid grid must be completable");
            // The second row already uses every digit but 6.
            assert_eq!(solved.cell(1, 4), Some(6), "strategy {kind}");
            assert_eq!(solved, solved_puzzle(), "strategy {kind}");
            assert!(puzzle.verify(&solved).unwrap());
            assert!(stats.nodes_visited > 0);
        }
    }

    #[test]
    fn contradictory_givens_yield_no_solution_not_an_error() {
        init_logging();
        let mut puzzle = solved_puzzle();
        // Duplicate the 1 already present in row 0.
        puzzle.cells[0][0] = Some(1);

        let (solution, _) = puzzle.solve(StrategyKind::ForwardCheckingMrv).unwrap();
        assert_eq!(solution, None);
    }

    #[test]
    fn unknown_sums_are_resolved_by_the_solver() {
        init_logging();
        let mut puzzle = solved_puzzle();
        puzzle.cells[0][0] = None;
        puzzle.sums[0] = None;

        let (solution, _) = puzzle.solve(StrategyKind::ForwardCheckingMrv).unwrap();
        let solved = solution.unwrap();
        assert_eq!(solved.cell(0, 0), Some(0));
        assert_eq!(solved.sum(0), Some(6));
        assert!(puzzle.verify(&solved).unwrap());
    }

    #[test]
    fn verify_rejects_incomplete_or_divergent_candidates() {
        let puzzle = solved_puzzle();

        // Incomplete candidates never verify.
        let mut blanked = puzzle.clone();
        blanked.cells[2][7] = None;
        assert!(!puzzle.verify(&blanked).unwrap());

        // Complete but contradicting a given.
        let mut divergent = puzzle.clone();
        divergent.cells[2][7] = Some(0);
        assert!(!puzzle.verify(&divergent).unwrap());

        // Against the blanked puzzle the changed cell is no longer a
        // given, but the duplicate 0 now breaks row 2's difference group.
        assert!(!blanked.verify(&divergent).unwrap());

        // The untouched solution verifies against both.
        assert!(puzzle.verify(&puzzle).unwrap());
        assert!(blanked.verify(&puzzle).unwrap());
    }

    #[test]
    fn a_blank_puzzle_accepts_any_valid_completion() {
        let blank = Puzzle::blank(Layout::new(3).unwrap());
        assert!(!blank.is_complete());
        assert_eq!(blank.cell(2, 9), None);
        assert_eq!(blank.sum(0), None);

        // No givens to preserve, so any valid grid completes it; an
        // incomplete candidate still never verifies.
        assert!(blank.verify(&solved_puzzle()).unwrap());
        assert!(!blank.verify(&blank).unwrap());
    }

    #[test]
    fn generated_puzzles_verify_against_their_own_solution() {
        init_logging();
        let layout = Layout::with_columns(3, 6).unwrap();
        let mut seeder = Seeder::from_seed(1234);
        let puzzle = Puzzle::generate(layout, &mut seeder).unwrap();

        assert_eq!(puzzle.layout(), layout);
        // Sums always come back published, even when few cells did.
        assert!((0..6).all(|col| puzzle.sum(col).is_some()));

        let (solution, _) = puzzle.solve(StrategyKind::ForwardCheckingMrv).unwrap();
        let solved = solution.expect("generated puzzles are solvable");
        assert!(puzzle.verify(&solved).unwrap());
    }

    #[test]
    fn seeding_a_small_grid_always_round_trips() {
        init_logging();
        let layout = Layout::with_columns(2, 4).unwrap();
        let candidates: Vec<TennerVariable> = (0..layout.rows())
            .flat_map(|row| layout.row_cells(row))
            .collect();

        for seed in 0..100u64 {
            let mut model = layout.model().unwrap();
            let mut seeder = Seeder::from_seed(seed);
            let seeded = seeder.seed(&mut model, &candidates);

            for constraint in model.constraints() {
                assert!(
                    constraint.satisfied(&seeded.givens),
                    "seed {seed} violated {constraint}"
                );
            }
            for col in 0..layout.columns() {
                assert!(seeded.givens.contains_key(&layout.target(col)));
            }
        }
    }

    #[test]
    fn serde_round_trip_preserves_the_puzzle() {
        let puzzle = solved_puzzle();
        let json = serde_json::to_string(&puzzle).unwrap();
        let back: Puzzle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, puzzle);
    }

    #[test]
    fn shape_inconsistent_json_is_rejected() {
        // Empty cells and sums against a 3x10 layout must not produce a
        // puzzle whose accessors would index out of bounds.
        let hollow = r#"{"layout":{"rows":3,"columns":10},"cells":[],"sums":[]}"#;
        assert!(serde_json::from_str::<Puzzle>(hollow).is_err());

        let ragged = r#"{"layout":{"rows":2,"columns":3},"cells":[[1,2,3],[4,5]],"sums":[1,2,3]}"#;
        assert!(serde_json::from_str::<Puzzle>(ragged).is_err());

        let out_of_range =
            r#"{"layout":{"rows":1,"columns":2},"cells":[[12,1]],"sums":[3,1]}"#;
        let err = serde_json::from_str::<Puzzle>(out_of_range).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    mod prop_tests {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            /// Blanking any subset of a solved grid leaves a solvable
            /// puzzle, and the completion must honour the surviving givens.
            #[test]
            fn any_blanking_of_a_valid_grid_stays_solvable(
                blanks in proptest::collection::hash_set((0..3usize, 0..10usize), 0..=12)
            ) {
                let mut puzzle = solved_puzzle();
                for &(row, col) in &blanks {
                    puzzle.cells[row][col] = None;
                }

                let (solution, _) = puzzle.solve(StrategyKind::ForwardCheckingMrv).unwrap();
                let solved = solution.expect("blanked grids keep their original completion");
                prop_assert!(puzzle.verify(&solved).unwrap());
            }
        }
    }
}
