//! # Domain Layer
//!
//! Core types for invoking methods whose parameters come from two sources: an
//! ordered list of explicit arguments and a [`ResolutionContext`] that produces
//! services by type.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`value`] | Runtime type descriptors and dynamic values |
//! | [`method`] | Method descriptors, return shapes and `Callable` adapters |
//! | [`ports`] | The resolution context port |
//! | [`value_objects`] | Validation results |
//! | [`error`] | Error taxonomy |

pub mod constants;
pub mod error;
pub mod method;
pub mod ports;
pub mod value;
pub mod value_objects;

pub use error::{Error, Result};
pub use method::{Callable, MethodDescriptor, Output, ReturnShape};
pub use ports::{ResolutionContext, ResolutionContextExt};
pub use value::{Type, TypeBuilder, Value, value_type_id};
pub use value_objects::ValidationResult;
