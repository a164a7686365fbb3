//! Ports consumed by the invoker core

pub mod resolution;

pub use resolution::{ResolutionContext, ResolutionContextExt};
