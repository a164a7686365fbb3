//! Collaborators built on the invoker factory
//!
//! Each collaborator offers two paths. The typed path dispatches on a
//! capability trait ([`Request`], [`MapInto`], [`Validate`]) that supplies the
//! method descriptor statically. The `*_value` path looks the method up in the
//! shared [`MethodTable`](crate::dispatch::MethodTable) at runtime, for types
//! that cannot implement the trait.

pub mod mapper;
pub mod mediator;
pub mod validator;

pub use mapper::{MapInto, Mapper};
pub use mediator::{Mediator, Request};
pub use validator::{Validate, Validator};
