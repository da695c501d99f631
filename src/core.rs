//! Core data structures and logic algorithms

pub mod standardize;
pub mod stream;
pub mod substitution;
pub mod term;
