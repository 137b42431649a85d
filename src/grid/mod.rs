//! The Tenner Grid frontend: grid geometry, constraint generators, and the
//! puzzle type with its text format.
//!
//! A Tenner Grid is a digit grid, classically three to six rows of ten
//! columns. Every row uses distinct digits, vertically or diagonally
//! touching cells differ, and each column adds up to a published sum. The
//! modules here translate that into the engine's vocabulary: one variable
//! per cell, one per column sum, and [`AllDifferent`] /
//! [`ColumnSum`] constraints wiring them together.
//!
//! ```
//! use tenner::grid::puzzle::Puzzle;
//! use tenner::solver::strategy::StrategyKind;
//!
//! # fn main() -> tenner::error::Result<()> {
//! let puzzle: Puzzle = "\
//!     _,1,2,3,4,5,6,7,8,9\n\
//!     2,3,4,5,6,7,8,9,0,1\n\
//!     =2,4,6,8,10,12,14,16,8,10"
//!     .parse()?;
//!
//! let (solution, _stats) = puzzle.solve(StrategyKind::ForwardCheckingMrv)?;
//! let solved = solution.expect("this grid has a completion");
//! // The first row already uses 1..=9, so the blank can only be 0.
//! assert_eq!(solved.cell(0, 0), Some(0));
//! # Ok(())
//! # }
//! ```
//!
//! [`AllDifferent`]: crate::solver::constraints::all_different::AllDifferent
//! [`ColumnSum`]: crate::solver::constraints::column_sum::ColumnSum

pub mod generators;
pub mod layout;
pub mod puzzle;
