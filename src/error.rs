//! Error types for model construction and puzzle parsing.
//!
//! Only configuration mistakes surface as errors: a model that references
//! variables it was never told about, impossible grid dimensions, or puzzle
//! text that does not scan. A search that exhausts its domains without
//! finding a solution is *not* an error; strategies report that outcome as
//! an ordinary `None` result.

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A model variable was declared without a domain entry.
    #[error("variable `{0}` has no domain entry")]
    MissingDomain(String),

    /// A constraint references a variable the model does not know about.
    #[error("constraint `{constraint}` references unknown variable `{variable}`")]
    UnknownVariable {
        constraint: String,
        variable: String,
    },

    /// Grid dimensions outside the supported range. A grid needs at least
    /// one row, and no row can hold more than the ten distinct digits.
    #[error("invalid grid dimensions: {rows} rows x {columns} columns")]
    InvalidDimensions { rows: usize, columns: usize },

    /// Puzzle text or puzzle data that does not describe a well-formed grid.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The final line of a puzzle must carry the column sums, prefixed
    /// with `=`. Unknown sums are written `_`, but the line itself is
    /// mandatory.
    #[error("puzzle text has no sum line (expected a final line starting with `=`)")]
    MissingSumLine,

    /// A token that is neither a blank (`_`) nor an integer.
    #[error("malformed number `{0}`")]
    NumberFormat(String),

    /// A cell outside `0..=9`, or a column sum outside what the column
    /// could possibly add up to.
    #[error("value {0} is out of range for this grid")]
    NumberOutOfRange(i64),

    #[error("grid has {found} rows, expected {expected}")]
    WrongNumberOfRows { found: usize, expected: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    WrongNumberOfCells {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("sum line has {found} entries, expected {expected}")]
    WrongNumberOfSums { found: usize, expected: usize },
}
