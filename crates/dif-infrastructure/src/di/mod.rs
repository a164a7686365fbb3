//! Dependency injection
//!
//! [`ServiceCollection`] records how to build each service type; building it
//! yields a [`ServiceProvider`], the [`ResolutionContext`](dif_domain::ResolutionContext)
//! handed to invokers. [`bootstrap`] wires the collaborators on top of it.
//!
//! ```text
//! AppConfig → ServiceCollection → ServiceProvider → Mediator / Mapper / Validator
//!                                       ↑                      │
//!                                       └──── resolves ────────┘
//! ```

pub mod bootstrap;
pub mod registry;

pub use bootstrap::{AppContext, init_app, register_collaborators};
pub use registry::{ServiceCollection, ServiceProvider};
