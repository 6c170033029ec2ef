//! Deterministic synthesis over agent outputs. No I/O, no completion calls.

pub mod relevance;
pub mod tenure;
pub mod verdict;

pub use relevance::RelevanceSynthesizer;
pub use verdict::VerdictSynthesizer;
