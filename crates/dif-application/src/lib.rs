//! # Application Layer
//!
//! The invoker core and the collaborators built on top of it.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`invoker`] | Binding plans, the invoker factory and built invokers |
//! | [`dispatch`] | Invoker caches, method tables and the convention dispatcher |
//! | [`use_cases`] | Mediator, mapper and validator collaborators |

pub mod dispatch;
pub mod invoker;
pub mod use_cases;

pub use dispatch::{ConventionDispatcher, DispatchKey, InvokerCache, MethodTable};
pub use invoker::{Binding, BindingPlan, Invoker, InvokerFactory};
pub use use_cases::{MapInto, Mapper, Mediator, Request, Validate, Validator};
