//! The constraint vocabulary understood by the engine.

use std::fmt;

use crate::solver::{
    constraints::{all_different::AllDifferent, column_sum::ColumnSum},
    domain::{Assignment, Domain, DomainMap},
    model::Model,
    variable::Variable,
};

/// A rule over a subset of the model's variables.
///
/// The engine knows exactly two kinds of rule, so they form a closed enum
/// and every dispatch site is a plain `match`. Adding a rule kind means
/// adding a variant here and extending those matches; the compiler points
/// at every site that needs to learn about it.
#[derive(Debug, Clone)]
pub enum Constraint<V: Variable> {
    /// See [`AllDifferent`].
    AllDifferent(AllDifferent<V>),
    /// See [`ColumnSum`].
    ColumnSum(ColumnSum<V>),
}

impl<V: Variable> Constraint<V> {
    /// The variables this constraint ranges over, in construction order.
    pub fn variables(&self) -> &[V] {
        match self {
            Constraint::AllDifferent(c) => c.variables(),
            Constraint::ColumnSum(c) => c.variables(),
        }
    }

    /// Whether `assignment` violates this constraint. Partial assignments
    /// are judged on their bound variables only; an unassigned variable
    /// never contributes a violation.
    pub fn satisfied(&self, assignment: &Assignment<V>) -> bool {
        match self {
            Constraint::AllDifferent(c) => c.satisfied(assignment),
            Constraint::ColumnSum(c) => c.satisfied(assignment),
        }
    }

    /// Whether binding `variable` should make this constraint propagate
    /// during forward checking. A difference group propagates only from its
    /// owner, so each group runs once per binding; a column sum propagates
    /// from every variable it touches, since any addend can tighten the
    /// rest of the column.
    pub fn propagates_from(&self, variable: &V) -> bool {
        match self {
            Constraint::AllDifferent(c) => c.owner() == Some(variable),
            Constraint::ColumnSum(_) => true,
        }
    }

    /// Forward-checking pruning after `assignment` gained a binding.
    ///
    /// Every still-unassigned variable of this constraint has its entry in
    /// `domains` filtered down to the values that stay consistent when
    /// tried against `assignment`. Each trial binding is a throwaway child
    /// of the persistent map, dropped as soon as the check returns. Returns
    /// `None` as soon as some variable is left without candidates.
    pub fn propagate(
        &self,
        model: &Model<V>,
        assignment: &Assignment<V>,
        mut domains: DomainMap<V>,
    ) -> Option<DomainMap<V>> {
        for neighbour in self.variables() {
            if assignment.contains_key(neighbour) {
                continue;
            }
            let domain = domains.get(neighbour).unwrap().clone();
            let survivors: Vec<_> = domain
                .values()
                .iter()
                .copied()
                .filter(|&value| {
                    let trial = assignment.update(neighbour.clone(), value);
                    model.is_consistent(neighbour, &trial)
                })
                .collect();
            if survivors.is_empty() {
                return None;
            }
            if survivors.len() < domain.len() {
                domains.insert(neighbour.clone(), Domain::new(survivors));
            }
        }
        Some(domains)
    }
}

impl<V: Variable> fmt::Display for Constraint<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::AllDifferent(c) => {
                let vars = c
                    .variables()
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "AllDifferent({vars})")
            }
            Constraint::ColumnSum(c) => {
                let addends = c
                    .addends()
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(" + ");
                write!(f, "ColumnSum({addends} = {})", c.target())
            }
        }
    }
}
