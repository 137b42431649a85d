//! Concrete constraint implementations.

pub mod all_different;
pub mod column_sum;
