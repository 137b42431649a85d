//! Heuristics for choosing which variable a search binds next.

use crate::solver::{
    domain::{Assignment, DomainMap},
    model::Model,
    variable::Variable,
};

/// A strategy for choosing the next unassigned variable to branch on.
///
/// `domains` is the view the caller is currently searching under: the
/// model's own domains for plain backtracking, or the locally pruned copy
/// under forward checking. A good choice here can shrink the search tree by
/// orders of magnitude without touching the search itself.
pub trait VariableSelectionHeuristic<V: Variable> {
    /// Selects the next variable to be assigned.
    ///
    /// Returns `None` only when every model variable already has a value in
    /// `assignment`.
    fn select_variable(
        &self,
        model: &Model<V>,
        domains: &DomainMap<V>,
        assignment: &Assignment<V>,
    ) -> Option<V>;
}

/// Selects the first unassigned variable in model order.
///
/// This is the static ordering: deterministic, oblivious to domain sizes,
/// and the baseline the informed heuristics are measured against.
pub struct SelectFirstHeuristic;

impl<V: Variable> VariableSelectionHeuristic<V> for SelectFirstHeuristic {
    fn select_variable(
        &self,
        model: &Model<V>,
        _domains: &DomainMap<V>,
        assignment: &Assignment<V>,
    ) -> Option<V> {
        model
            .variables()
            .iter()
            .find(|v| !assignment.contains_key(*v))
            .cloned()
    }
}

/// Minimum Remaining Values: selects the unassigned variable with the
/// fewest candidates left in `domains`.
///
/// A "fail-first" strategy. The tightest variable either collapses the
/// branch quickly or proves it dead early, so the search wastes the least
/// work on doomed subtrees. Ties go to whichever variable comes first in
/// model order, which keeps the choice deterministic.
pub struct MinimumRemainingValuesHeuristic;

impl<V: Variable> VariableSelectionHeuristic<V> for MinimumRemainingValuesHeuristic {
    fn select_variable(
        &self,
        model: &Model<V>,
        domains: &DomainMap<V>,
        assignment: &Assignment<V>,
    ) -> Option<V> {
        model
            .variables()
            .iter()
            .filter(|v| !assignment.contains_key(*v))
            // min_by_key keeps the first of equal keys, which is exactly
            // the model-order tie-break.
            .min_by_key(|v| domains.get(*v).unwrap().len())
            .cloned()
    }
}
