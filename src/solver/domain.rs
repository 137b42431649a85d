//! Domains, assignments, and the value type they share.

use im::HashMap;

/// The value type every domain ranges over. Cells and column sums are both
/// plain integers, so the engine commits to one numeric value type rather
/// than carrying a generic value parameter around.
pub type Value = i64;

/// A partial or complete mapping from variables to chosen values.
///
/// Backed by a persistent map: [`update`](im::HashMap::update) returns a
/// child assignment sharing structure with its parent, which is what makes
/// copy-on-branch search and throwaway trial bindings cheap. Dropping the
/// child is all the undo a backtracking step needs.
pub type Assignment<V> = HashMap<V, Value>;

/// The candidate domains of every variable, keyed by variable.
///
/// Like [`Assignment`], a persistent map, so forward checking can thread a
/// locally pruned copy through its recursion without ever touching the
/// model's own copy.
pub type DomainMap<V> = HashMap<V, Domain>;

/// An ordered list of candidate values for one variable.
///
/// Order is meaningful: search strategies try values in stored order, and
/// the seeder shuffles a copy before probing. Construction does not sort or
/// deduplicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain(Vec<Value>);

impl Domain {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// The ascending run `lo..=hi`.
    pub fn range(lo: Value, hi: Value) -> Self {
        Self((lo..=hi).collect())
    }

    /// A domain already narrowed to a single candidate.
    pub fn singleton(value: Value) -> Self {
        Self(vec![value])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    pub fn contains(&self, value: Value) -> bool {
        self.0.contains(&value)
    }
}
