//! Convention-based dispatch
//!
//! | Type | Role |
//! |------|------|
//! | [`InvokerCache`] | Concurrent key → invoker map, lazily filled |
//! | [`MethodTable`] | Runtime registry of conventional methods per type |
//! | [`ConventionDispatcher`] | Locate, build, cache and invoke a conventional method |

pub mod cache;
pub mod dispatcher;
pub mod method_table;

pub use cache::{DispatchKey, InvokerCache};
pub use dispatcher::ConventionDispatcher;
pub use method_table::MethodTable;
