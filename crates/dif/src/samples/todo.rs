//! Todo sample
//!
//! `CreateTodo` carries all three conventions: `validate` checks the name,
//! `map` turns the request into a [`Todo`] and `handle` runs both through the
//! resolved [`Validator`] and [`Mapper`] before storing the result.

use async_trait::async_trait;
use dif_application::{MapInto, Mapper, Request, Validate, Validator};
use dif_domain::{MethodDescriptor, Result, ValidationResult};
use dif_infrastructure::ServiceCollection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// A stored todo item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub name: String,
    pub is_complete: bool,
}

/// Todo persistence port
#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Todo>>;

    async fn contains_name(&self, name: &str) -> Result<bool>;

    /// Store `todo` under a fresh id and return the stored copy
    async fn insert(&self, todo: Todo) -> Result<Todo>;
}

/// Shared todo store as registered in the container
pub type SharedTodoStore = Arc<dyn TodoStore>;

/// Todo store kept in memory for the life of the process
#[derive(Debug, Default)]
pub struct InMemoryTodoStore {
    todos: RwLock<Vec<Todo>>,
}

impl InMemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with incomplete todos named `names`
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let todos = names
            .into_iter()
            .zip(1..)
            .map(|(name, id)| Todo {
                id,
                name: name.into(),
                is_complete: false,
            })
            .collect();
        Self {
            todos: RwLock::new(todos),
        }
    }
}

#[async_trait]
impl TodoStore for InMemoryTodoStore {
    async fn list(&self) -> Result<Vec<Todo>> {
        Ok(self.todos.read().await.clone())
    }

    async fn contains_name(&self, name: &str) -> Result<bool> {
        Ok(self.todos.read().await.iter().any(|todo| todo.name == name))
    }

    async fn insert(&self, mut todo: Todo) -> Result<Todo> {
        let mut todos = self.todos.write().await;
        todo.id = todos.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        todos.push(todo.clone());
        Ok(todo)
    }
}

/// Register `store` as the [`SharedTodoStore`]
pub fn register_todo_store<S: TodoStore + 'static>(services: &mut ServiceCollection, store: S) {
    services.add_instance(Arc::new(store) as SharedTodoStore);
}

/// List every todo
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GetTodos;

impl GetTodos {
    pub async fn handle(self, store: SharedTodoStore) -> Result<Vec<Todo>> {
        store.list().await
    }
}

impl Request for GetTodos {
    type Response = Vec<Todo>;

    fn handler() -> Result<MethodDescriptor> {
        MethodDescriptor::async_method(GetTodos::handle).map(|m| m.named("GetTodos::handle"))
    }
}

/// Create a todo from a name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTodo {
    pub name: String,
    pub age: u32,
}

impl CreateTodo {
    pub fn new<S: Into<String>>(name: S, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }

    pub async fn validate(self, store: SharedTodoStore) -> Result<ValidationResult> {
        let mut result = ValidationResult::new();
        if self.name.trim().is_empty() {
            result.add("Name", "Name is required.");
        }
        if store.contains_name(&self.name).await? {
            result.add("Name", "Name already exists.");
        }
        Ok(result)
    }

    pub async fn map(self) -> Result<Todo> {
        Ok(Todo {
            id: 0,
            name: self.name,
            is_complete: false,
        })
    }

    pub async fn handle(
        self,
        store: SharedTodoStore,
        validator: Validator,
        mapper: Mapper,
    ) -> Result<Todo> {
        validator.ensure_valid(self.clone()).await?;
        let todo: Todo = mapper.map(self).await?;
        let todo = store.insert(todo).await?;
        debug!(id = todo.id, name = %todo.name, "Created todo");
        Ok(todo)
    }
}

impl Validate for CreateTodo {
    fn validator() -> Result<MethodDescriptor> {
        MethodDescriptor::async_method(CreateTodo::validate)
            .map(|m| m.named("CreateTodo::validate"))
    }
}

impl MapInto<Todo> for CreateTodo {
    fn mapper() -> Result<MethodDescriptor> {
        MethodDescriptor::async_method(CreateTodo::map).map(|m| m.named("CreateTodo::map"))
    }
}

impl Request for CreateTodo {
    type Response = Todo;

    fn handler() -> Result<MethodDescriptor> {
        MethodDescriptor::async_method(CreateTodo::handle).map(|m| m.named("CreateTodo::handle"))
    }
}
