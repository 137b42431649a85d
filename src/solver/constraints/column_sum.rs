//! The column-sum constraint.

use crate::solver::{domain::Assignment, variable::Variable};

/// Ties a group of addend variables to a sum-target variable.
///
/// Evaluation against a partial assignment is asymmetric in the target: an
/// unassigned target never constrains the addends, while an assigned target
/// rejects a fully bound column with the wrong total and, before that, any
/// partially bound column whose running total has already overshot it.
/// Addend domains never contain negative values, so an overshoot can never
/// recover; rejecting it early is what lets forward checking prune a column
/// long before all of its cells are bound.
#[derive(Debug, Clone)]
pub struct ColumnSum<V: Variable> {
    // Addends in order, then the target as the final element.
    vars: Vec<V>,
}

impl<V: Variable> ColumnSum<V> {
    pub fn new(addends: Vec<V>, target: V) -> Self {
        let mut vars = addends;
        vars.push(target);
        Self { vars }
    }

    pub fn variables(&self) -> &[V] {
        &self.vars
    }

    pub fn addends(&self) -> &[V] {
        &self.vars[..self.vars.len() - 1]
    }

    pub fn target(&self) -> &V {
        self.vars.last().unwrap()
    }

    pub fn satisfied(&self, assignment: &Assignment<V>) -> bool {
        let Some(&target) = assignment.get(self.target()) else {
            return true;
        };

        let mut sum = 0;
        let mut bound = 0;
        for var in self.addends() {
            if let Some(&value) = assignment.get(var) {
                sum += value;
                bound += 1;
            }
        }

        if bound == self.addends().len() {
            return sum == target;
        }
        sum <= target
    }
}
