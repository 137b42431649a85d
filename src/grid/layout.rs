//! Grid geometry: dimensions, variable tokens and fresh domains.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    grid::generators,
    solver::{
        domain::{Domain, DomainMap, Value},
        model::Model,
    },
};

/// Width of a full Tenner Grid row: one cell per digit, `0` through `9`.
pub const COLUMNS: usize = 10;

/// One unknown of a Tenner Grid puzzle: a cell of the digit grid, or the
/// sum target sitting under one of its columns.
///
/// Formats as the conventional coordinate tokens, `"<row>,<col>"` for cells
/// and `"s<col>"` for sum targets, which is how variables appear in error
/// messages and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TennerVariable {
    Cell { row: usize, col: usize },
    Target { col: usize },
}

impl fmt::Display for TennerVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TennerVariable::Cell { row, col } => write!(f, "{row},{col}"),
            TennerVariable::Target { col } => write!(f, "s{col}"),
        }
    }
}

/// Grid dimensions. Everything downstream (variables, domains, constraint
/// generators, the text format) takes its shape from a `Layout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LayoutData")]
pub struct Layout {
    rows: usize,
    columns: usize,
}

impl Layout {
    /// A full-width grid with the given number of rows. Published puzzles
    /// use three to six rows, but any positive count is accepted.
    pub fn new(rows: usize) -> Result<Self> {
        Self::with_columns(rows, COLUMNS)
    }

    /// A grid narrower than the classic ten columns. Useful for practice
    /// grids and tests; more than [`COLUMNS`] columns is impossible, since
    /// a row cannot hold more than ten distinct digits.
    pub fn with_columns(rows: usize, columns: usize) -> Result<Self> {
        if rows == 0 || columns == 0 || columns > COLUMNS {
            return Err(Error::InvalidDimensions { rows, columns });
        }
        Ok(Self { rows, columns })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cell(&self, row: usize, col: usize) -> TennerVariable {
        debug_assert!(row < self.rows && col < self.columns);
        TennerVariable::Cell { row, col }
    }

    pub fn target(&self, col: usize) -> TennerVariable {
        debug_assert!(col < self.columns);
        TennerVariable::Target { col }
    }

    /// The largest total a column could reach, and therefore the upper end
    /// of every sum target's domain.
    pub fn max_sum(&self) -> Value {
        9 * self.rows as Value
    }

    /// All variables in model order: cells row-major, then the sum targets
    /// left to right. The static search order walks the grid like a reader
    /// and leaves the sums for last.
    pub fn variables(&self) -> Vec<TennerVariable> {
        let mut variables = Vec::with_capacity(self.rows * self.columns + self.columns);
        for row in 0..self.rows {
            for col in 0..self.columns {
                variables.push(self.cell(row, col));
            }
        }
        for col in 0..self.columns {
            variables.push(self.target(col));
        }
        variables
    }

    /// The cells of one row, left to right.
    pub fn row_cells(&self, row: usize) -> Vec<TennerVariable> {
        (0..self.columns).map(|col| self.cell(row, col)).collect()
    }

    /// The cells of one column, top to bottom.
    pub fn column_cells(&self, col: usize) -> Vec<TennerVariable> {
        (0..self.rows).map(|row| self.cell(row, col)).collect()
    }

    /// The cells touching `(row, col)` from the row below: straight down
    /// plus the two diagonals, clipped at the grid edges. Empty for the
    /// last row.
    pub fn neighbours_below(&self, row: usize, col: usize) -> Vec<TennerVariable> {
        if row + 1 >= self.rows {
            return Vec::new();
        }
        let mut neighbours = Vec::new();
        if col > 0 {
            neighbours.push(self.cell(row + 1, col - 1));
        }
        neighbours.push(self.cell(row + 1, col));
        if col + 1 < self.columns {
            neighbours.push(self.cell(row + 1, col + 1));
        }
        neighbours
    }

    /// Fresh, unnarrowed domains: each cell may hold any digit, each sum
    /// target anything from an all-zero column to an all-nine one.
    pub fn domains(&self) -> DomainMap<TennerVariable> {
        let mut domains = DomainMap::new();
        for row in 0..self.rows {
            for col in 0..self.columns {
                domains.insert(self.cell(row, col), Domain::range(0, 9));
            }
        }
        for col in 0..self.columns {
            domains.insert(self.target(col), Domain::range(0, self.max_sum()));
        }
        domains
    }

    /// A model of the blank grid: full domains with the difference and
    /// column-sum constraints registered.
    pub fn model(&self) -> Result<Model<TennerVariable>> {
        let mut model = Model::new(self.variables(), self.domains())?;
        for constraint in generators::difference_constraints(self) {
            model.register_constraint(constraint)?;
        }
        for constraint in generators::sum_constraints(self) {
            model.register_constraint(constraint)?;
        }
        Ok(model)
    }
}

/// Wire-format mirror of [`Layout`]. Deserialized dimensions pass through
/// [`Layout::with_columns`], so JSON input faces the same validation as
/// constructed layouts.
#[derive(Deserialize)]
struct LayoutData {
    rows: usize,
    columns: usize,
}

impl TryFrom<LayoutData> for Layout {
    type Error = Error;

    fn try_from(data: LayoutData) -> Result<Layout> {
        Layout::with_columns(data.rows, data.columns)
    }
}
