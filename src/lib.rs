//! Tenner is a finite-domain constraint-satisfaction (CSP) engine with a
//! Tenner Grid puzzle frontend built on top of it.
//!
//! The engine is problem-agnostic: it knows about variables, integer
//! domains, and two kinds of constraint, and it searches for assignments by
//! chronological backtracking or forward checking, each with a pluggable
//! variable-selection heuristic. The frontend translates Tenner Grid
//! puzzles (digit grids whose rows avoid repeats, whose touching cells
//! differ, and whose columns add up to published sums) into that vocabulary.
//!
//! # Core Concepts
//!
//! - **[`Model`](solver::model::Model)**: a problem instance, owning the
//!   variables, their candidate [`Domain`](solver::domain::Domain)s, and the
//!   registered [`Constraint`](solver::constraint::Constraint)s.
//! - **[`SearchStrategy`](solver::strategy::SearchStrategy)**: the shared
//!   contract of the four solvers; picked by name via
//!   [`StrategyKind`](solver::strategy::StrategyKind).
//! - **[`Seeder`](solver::seeder::Seeder)**: randomized construction of
//!   solvable pre-filled states, which is how fresh puzzles are generated.
//! - **[`Puzzle`](grid::puzzle::Puzzle)**: the Tenner Grid frontend, with a
//!   plain-text format, solving, verification and generation.
//!
//! # Example: A Simple 2-Variable Problem
//!
//! Solving `a != b` where `a` can be `1` or `2` and `b` can only be `1`:
//! the search must deduce that `a` is `2`.
//!
//! ```
//! use tenner::solver::constraint::Constraint;
//! use tenner::solver::constraints::all_different::AllDifferent;
//! use tenner::solver::domain::{Assignment, Domain, DomainMap};
//! use tenner::solver::model::Model;
//! use tenner::solver::strategy::{BacktrackingSearch, SearchStrategy};
//!
//! # fn main() -> tenner::error::Result<()> {
//! let domains = DomainMap::new()
//!     .update("a", Domain::range(1, 2))
//!     .update("b", Domain::singleton(1));
//! let mut model = Model::new(vec!["a", "b"], domains)?;
//! model.register_constraint(Constraint::AllDifferent(AllDifferent::new(vec!["a", "b"])))?;
//!
//! let (solution, _stats) = BacktrackingSearch::static_order().solve(&model, Assignment::new());
//! let solution = solution.expect("a != b over these domains is satisfiable");
//! assert_eq!(solution.get(&"a"), Some(&2));
//! assert_eq!(solution.get(&"b"), Some(&1));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod grid;
pub mod solver;
