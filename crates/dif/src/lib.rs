//! # dif
//!
//! Invoke methods whose parameters come from two places: an ordered list of
//! explicit arguments supplied per call, and services resolved by type from a
//! container. Request, validation and mapping collaborators are built on top
//! of the same invoker.
//!
//! ## Example
//!
//! ```ignore
//! use dif::infrastructure::{AppConfig, init_app};
//! use dif::samples::{CreateTodo, InMemoryTodoStore, register_todo_store};
//!
//! let context = init_app(AppConfig::default(), |services| {
//!     register_todo_store(services, InMemoryTodoStore::new());
//!     Ok(())
//! })?;
//! let todo = context.mediator()?.send(CreateTodo::new("Buy milk", 30)).await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - types, method descriptors, the resolution context port and errors
//! - `application` - invoker factory, dispatch machinery and collaborators
//! - `infrastructure` - service container, configuration, logging and bootstrap
//! - `samples` - calculator and todo samples used by the binary

pub use dif_application as application;
pub use dif_domain as domain;
pub use dif_infrastructure as infrastructure;

pub mod cli;
pub mod responses;
pub mod samples;

pub use application::{
    Invoker, InvokerFactory, MapInto, Mapper, Mediator, MethodTable, Request, Validate, Validator,
};
pub use domain::{
    Error, MethodDescriptor, Output, ResolutionContext, ResolutionContextExt, Result, Type,
    ValidationResult, Value,
};
pub use responses::ErrorResponse;
