//! Pluggable heuristics used by the search strategies.

pub mod variable;
