//! The problem-agnostic constraint-satisfaction engine.

pub mod constraint;
pub mod constraints;
pub mod domain;
pub mod heuristics;
pub mod model;
pub mod seeder;
pub mod stats;
pub mod strategy;
pub mod variable;
