//! Sample domain
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`calculator`] | A free function mixing explicit and resolved parameters |
//! | [`todo`] | Requests handled through the mediator, validator and mapper |

pub mod calculator;
pub mod todo;

pub use calculator::{Calculator, add_invoker};
pub use todo::{
    CreateTodo, GetTodos, InMemoryTodoStore, SharedTodoStore, Todo, TodoStore, register_todo_store,
};
