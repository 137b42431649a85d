//! The engine's notion of a variable.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Marker trait for the tokens naming a model's variables.
///
/// The engine never looks inside a token. It only clones, compares, hashes
/// and formats them, so any cheap identifier works: an integer, a string,
/// or a problem-specific enum such as
/// [`TennerVariable`](crate::grid::layout::TennerVariable).
///
/// This trait is blanket-implemented for every eligible type; there is
/// nothing to implement by hand.
pub trait Variable: Clone + Eq + Hash + Debug + Display + 'static {}

impl<T> Variable for T where T: Clone + Eq + Hash + Debug + Display + 'static {}
