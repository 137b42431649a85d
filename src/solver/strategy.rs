//! The search strategies and their shared contract.
//!
//! Two families, each available with either variable ordering:
//!
//! * [`BacktrackingSearch`]: chronological backtracking. Bind a variable,
//!   check the constraints it participates in, recurse, undo on failure.
//! * [`ForwardCheckingSearch`]: the same skeleton, but every successful
//!   binding also prunes the domains of its not-yet-assigned neighbours,
//!   abandoning the branch the moment some domain empties.
//!
//! Undo is free in both: assignments and pruned domains are persistent
//! maps, so each branch works on a cheap child copy and failure just drops
//! it.

use std::fmt;
use std::time::Instant;

use clap::ValueEnum;
use tracing::debug;

use crate::solver::{
    domain::{Assignment, DomainMap},
    heuristics::variable::{
        MinimumRemainingValuesHeuristic, SelectFirstHeuristic, VariableSelectionHeuristic,
    },
    model::Model,
    stats::SearchStats,
    variable::Variable,
};

/// Common contract of every search strategy.
///
/// `initial` may pre-bind any subset of the variables; the search extends
/// it and never rebinds. The result is a complete satisfying assignment,
/// or `None` when the domains admit no completion. Exhaustion is an answer
/// about the problem, not an error, which is why nothing here returns
/// `Result`. The only side effects of a solve are the model's consistency
/// counter and the returned [`SearchStats`].
pub trait SearchStrategy<V: Variable> {
    fn solve(
        &self,
        model: &Model<V>,
        initial: Assignment<V>,
    ) -> (Option<Assignment<V>>, SearchStats);
}

/// Chronological backtracking search.
///
/// Which variable is bound next is the pluggable part; candidate values
/// are always tried in stored domain order. Domains are read straight from
/// the model and never narrowed.
pub struct BacktrackingSearch<V: Variable> {
    variable_heuristic: Box<dyn VariableSelectionHeuristic<V>>,
}

impl<V: Variable> BacktrackingSearch<V> {
    pub fn new(variable_heuristic: Box<dyn VariableSelectionHeuristic<V>>) -> Self {
        Self { variable_heuristic }
    }

    /// Backtracking over the static model order.
    pub fn static_order() -> Self {
        Self::new(Box::new(SelectFirstHeuristic))
    }

    /// Backtracking with minimum-remaining-values selection.
    pub fn mrv() -> Self {
        Self::new(Box::new(MinimumRemainingValuesHeuristic))
    }

    fn search(
        &self,
        model: &Model<V>,
        assignment: Assignment<V>,
        stats: &mut SearchStats,
    ) -> Option<Assignment<V>> {
        stats.nodes_visited += 1;

        if model.is_complete(&assignment) {
            return Some(assignment);
        }

        let variable = self
            .variable_heuristic
            .select_variable(model, model.domains(), &assignment)?;
        let domain = model.domain(&variable).clone();

        for &value in domain.values() {
            let candidate = assignment.update(variable.clone(), value);
            if model.is_consistent(&variable, &candidate) {
                if let Some(solution) = self.search(model, candidate, stats) {
                    return Some(solution);
                }
            }
            stats.backtracks += 1;
        }

        None
    }
}

impl<V: Variable> SearchStrategy<V> for BacktrackingSearch<V> {
    fn solve(
        &self,
        model: &Model<V>,
        initial: Assignment<V>,
    ) -> (Option<Assignment<V>>, SearchStats) {
        let mut stats = SearchStats::default();
        let checks_before = model.consistency_checks();
        let start = Instant::now();

        let solution = self.search(model, initial, &mut stats);

        stats.elapsed = start.elapsed();
        stats.consistency_checks = model.consistency_checks() - checks_before;
        debug!(
            solved = solution.is_some(),
            nodes = stats.nodes_visited,
            backtracks = stats.backtracks,
            "backtracking search finished"
        );
        (solution, stats)
    }
}

/// Backtracking with forward checking.
///
/// After every consistent binding, each constraint that propagates from
/// the bound variable filters the domains of its unassigned variables down
/// to the values still compatible with the partial assignment. An emptied
/// domain kills the branch immediately, long before plain backtracking
/// would have walked down to the contradiction.
///
/// The narrowed domains are a local persistent-map copy threaded through
/// the recursion; the model's own domains are never touched, and the
/// variable heuristic sees the pruned view.
pub struct ForwardCheckingSearch<V: Variable> {
    variable_heuristic: Box<dyn VariableSelectionHeuristic<V>>,
}

impl<V: Variable> ForwardCheckingSearch<V> {
    pub fn new(variable_heuristic: Box<dyn VariableSelectionHeuristic<V>>) -> Self {
        Self { variable_heuristic }
    }

    /// Forward checking over the static model order.
    pub fn static_order() -> Self {
        Self::new(Box::new(SelectFirstHeuristic))
    }

    /// Forward checking with minimum-remaining-values selection.
    pub fn mrv() -> Self {
        Self::new(Box::new(MinimumRemainingValuesHeuristic))
    }

    fn search(
        &self,
        model: &Model<V>,
        assignment: Assignment<V>,
        domains: DomainMap<V>,
        stats: &mut SearchStats,
    ) -> Option<Assignment<V>> {
        stats.nodes_visited += 1;

        if model.is_complete(&assignment) {
            return Some(assignment);
        }

        let variable = self
            .variable_heuristic
            .select_variable(model, &domains, &assignment)?;
        let domain = domains.get(&variable).unwrap().clone();

        for &value in domain.values() {
            let candidate = assignment.update(variable.clone(), value);
            if model.is_consistent(&variable, &candidate) {
                if let Some(pruned) = forward_check(model, &variable, &candidate, domains.clone())
                {
                    if let Some(solution) = self.search(model, candidate, pruned, stats) {
                        return Some(solution);
                    }
                }
            }
            stats.backtracks += 1;
        }

        None
    }
}

impl<V: Variable> SearchStrategy<V> for ForwardCheckingSearch<V> {
    fn solve(
        &self,
        model: &Model<V>,
        initial: Assignment<V>,
    ) -> (Option<Assignment<V>>, SearchStats) {
        let mut stats = SearchStats::default();
        let checks_before = model.consistency_checks();
        let start = Instant::now();

        let solution = self.search(model, initial, model.domains().clone(), &mut stats);

        stats.elapsed = start.elapsed();
        stats.consistency_checks = model.consistency_checks() - checks_before;
        debug!(
            solved = solution.is_some(),
            nodes = stats.nodes_visited,
            backtracks = stats.backtracks,
            "forward checking search finished"
        );
        (solution, stats)
    }
}

/// Runs every constraint that propagates from the just-bound `variable`
/// over the local `domains`, failing fast on a wipeout.
fn forward_check<V: Variable>(
    model: &Model<V>,
    variable: &V,
    assignment: &Assignment<V>,
    mut domains: DomainMap<V>,
) -> Option<DomainMap<V>> {
    for constraint in model.constraints_for(variable) {
        if !constraint.propagates_from(variable) {
            continue;
        }
        domains = constraint.propagate(model, assignment, domains)?;
    }
    Some(domains)
}

/// Selects one of the four engine strategies by name, for configuration
/// surfaces such as the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyKind {
    /// Chronological backtracking, static variable order.
    Backtracking,
    /// Chronological backtracking with minimum-remaining-values selection.
    BacktrackingMrv,
    /// Forward checking, static variable order.
    ForwardChecking,
    /// Forward checking with minimum-remaining-values selection.
    ForwardCheckingMrv,
}

impl StrategyKind {
    /// All four kinds, handy for comparative runs.
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Backtracking,
        StrategyKind::BacktrackingMrv,
        StrategyKind::ForwardChecking,
        StrategyKind::ForwardCheckingMrv,
    ];

    /// Instantiates the strategy this kind names.
    pub fn build<V: Variable>(self) -> Box<dyn SearchStrategy<V>> {
        match self {
            StrategyKind::Backtracking => Box::new(BacktrackingSearch::static_order()),
            StrategyKind::BacktrackingMrv => Box::new(BacktrackingSearch::mrv()),
            StrategyKind::ForwardChecking => Box::new(ForwardCheckingSearch::static_order()),
            StrategyKind::ForwardCheckingMrv => Box::new(ForwardCheckingSearch::mrv()),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyKind::Backtracking => "backtracking",
            StrategyKind::BacktrackingMrv => "backtracking-mrv",
            StrategyKind::ForwardChecking => "forward-checking",
            StrategyKind::ForwardCheckingMrv => "forward-checking-mrv",
        };
        f.write_str(name)
    }
}
