//! Value objects shared across layers

pub mod validation;

pub use validation::ValidationResult;
