//! The problem instance handed to search strategies.

use std::cell::Cell;
use std::collections::HashMap;

use crate::{
    error::{Error, Result},
    solver::{
        constraint::Constraint,
        domain::{Assignment, Domain, DomainMap, Value},
        variable::Variable,
    },
};

/// Index of a constraint in its model's registration order.
pub type ConstraintId = usize;

/// A constraint-satisfaction problem: variables, their candidate domains,
/// and the constraints over them.
///
/// The model is the long-lived half of a solve. Strategies borrow it
/// immutably and never change its domains; the seeder narrows domains in
/// place between searches and restores them from a snapshot afterwards.
///
/// Every consistency check is counted on the model itself, through a
/// [`Cell`], so the count accumulates across however many searches the
/// model serves. That interior mutability means a model must stay on one
/// thread at a time; distinct models are fully independent.
#[derive(Debug)]
pub struct Model<V: Variable> {
    variables: Vec<V>,
    domains: DomainMap<V>,
    constraints: Vec<Constraint<V>>,
    by_variable: HashMap<V, Vec<ConstraintId>>,
    checks: Cell<u64>,
}

impl<V: Variable> Model<V> {
    /// Builds a model over `variables` with their starting `domains`.
    ///
    /// Every variable must come with a domain entry. A missing entry is a
    /// configuration mistake and is rejected here, not discovered halfway
    /// through a search.
    pub fn new(variables: Vec<V>, domains: DomainMap<V>) -> Result<Self> {
        for variable in &variables {
            if !domains.contains_key(variable) {
                return Err(Error::MissingDomain(variable.to_string()));
            }
        }
        let by_variable = variables
            .iter()
            .map(|v| (v.clone(), Vec::new()))
            .collect();
        Ok(Self {
            variables,
            domains,
            constraints: Vec::new(),
            by_variable,
            checks: Cell::new(0),
        })
    }

    /// Registers `constraint` and indexes it under every variable it
    /// touches. Rejects constraints over variables the model was never
    /// told about; nothing is registered in that case.
    pub fn register_constraint(&mut self, constraint: Constraint<V>) -> Result<()> {
        for variable in constraint.variables() {
            if !self.by_variable.contains_key(variable) {
                return Err(Error::UnknownVariable {
                    constraint: constraint.to_string(),
                    variable: variable.to_string(),
                });
            }
        }
        let id = self.constraints.len();
        for variable in constraint.variables() {
            self.by_variable.get_mut(variable).unwrap().push(id);
        }
        self.constraints.push(constraint);
        Ok(())
    }

    /// All variables, in declaration order. Strategies that walk variables
    /// "in model order" mean this order.
    pub fn variables(&self) -> &[V] {
        &self.variables
    }

    /// Whether `assignment` binds every variable of the model.
    pub fn is_complete(&self, assignment: &Assignment<V>) -> bool {
        assignment.len() == self.variables.len()
    }

    /// The model's current domains. Cloning the returned map is an O(1)
    /// snapshot, which is how the seeder checkpoints before narrowing.
    pub fn domains(&self) -> &DomainMap<V> {
        &self.domains
    }

    pub fn domain(&self, variable: &V) -> &Domain {
        self.domains.get(variable).unwrap()
    }

    /// Narrows `variable`'s domain to a single candidate, pinning it for
    /// every subsequent search until the domains are restored.
    pub fn restrict_domain(&mut self, variable: &V, value: Value) {
        debug_assert!(self.by_variable.contains_key(variable));
        self.domains.insert(variable.clone(), Domain::singleton(value));
    }

    /// Reinstates a domain snapshot taken via [`domains`](Self::domains).
    pub fn restore_domains(&mut self, snapshot: DomainMap<V>) {
        self.domains = snapshot;
    }

    pub fn constraints(&self) -> &[Constraint<V>] {
        &self.constraints
    }

    /// The constraints indexed under `variable`, in registration order.
    pub fn constraints_for<'a>(
        &'a self,
        variable: &V,
    ) -> impl Iterator<Item = &'a Constraint<V>> + 'a {
        self.by_variable
            .get(variable)
            .into_iter()
            .flatten()
            .map(|&id| &self.constraints[id])
    }

    /// Checks every constraint of `variable` against `assignment`, stopping
    /// at the first violation. Callers run this once per freshly bound
    /// variable rather than sweeping the whole constraint set; constraints
    /// not touching the new binding cannot have changed their verdict.
    ///
    /// Each call bumps the model's check counter, whatever the outcome.
    pub fn is_consistent(&self, variable: &V, assignment: &Assignment<V>) -> bool {
        self.checks.set(self.checks.get() + 1);
        self.constraints_for(variable)
            .all(|c| c.satisfied(assignment))
    }

    /// Total consistency checks performed through this model so far. The
    /// counter only grows; callers wanting per-solve numbers take a
    /// before/after difference, as the strategies do.
    pub fn consistency_checks(&self) -> u64 {
        self.checks.get()
    }
}
