//! A pairwise-difference constraint over a group of variables.

use std::collections::HashSet;

use crate::solver::{domain::Assignment, variable::Variable};

/// Requires every pair of variables in the group to take distinct values.
///
/// Partial assignments are judged optimistically: a variable with no value
/// yet cannot conflict with anything, so the constraint only fails once two
/// group members are actually bound to the same value.
///
/// The first variable of the group is the group's *owner*. Forward checking
/// propagates each difference group at most once per binding, from the
/// owner, rather than once per member.
#[derive(Debug, Clone)]
pub struct AllDifferent<V: Variable> {
    vars: Vec<V>,
}

impl<V: Variable> AllDifferent<V> {
    pub fn new(vars: Vec<V>) -> Self {
        Self { vars }
    }

    pub fn variables(&self) -> &[V] {
        &self.vars
    }

    /// The propagation owner; `None` only for a degenerate empty group.
    pub fn owner(&self) -> Option<&V> {
        self.vars.first()
    }

    /// `false` iff two group members are bound to the same value.
    pub fn satisfied(&self, assignment: &Assignment<V>) -> bool {
        let mut seen = HashSet::new();
        for var in &self.vars {
            if let Some(&value) = assignment.get(var) {
                if !seen.insert(value) {
                    return false;
                }
            }
        }
        true
    }
}
