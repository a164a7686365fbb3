//! Command line interface
//!
//! Every invocation builds a fresh application context, so todos only live
//! for one command; `--seed` pre-populates the in-memory store.

use crate::responses::{ErrorResponse, translate};
use crate::samples::{
    Calculator, CreateTodo, GetTodos, InMemoryTodoStore, add_invoker, register_todo_store,
};
use clap::{Parser, Subcommand};
use dif_domain::Result;
use dif_infrastructure::error_ext::ErrorContext;
use dif_infrastructure::{AppConfig, AppContext, init_app};
use serde::Serialize;
use std::path::PathBuf;

/// Command line interface for dif
#[derive(Parser, Debug)]
#[command(name = "dif")]
#[command(about = "Invoke methods with parameters filled from arguments and a service container")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add two numbers; the calculator is resolved from the container
    Add { a: i32, b: i32 },

    /// Todo sample handled through the mediator
    Todo {
        #[command(subcommand)]
        command: TodoCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum TodoCommand {
    /// Validate, map and store a new todo
    Add {
        name: String,

        #[arg(long, default_value_t = 0)]
        age: u32,

        /// Existing todo names
        #[arg(long = "seed")]
        seed: Vec<String>,
    },

    /// List todos
    List {
        /// Existing todo names
        #[arg(long = "seed")]
        seed: Vec<String>,
    },
}

/// What a command produced
#[derive(Debug)]
pub enum Reply {
    /// Successful output as JSON
    Ok(serde_json::Value),
    /// Input rejected by validation
    Rejected(ErrorResponse),
}

impl Reply {
    fn from_result<T: Serialize>(result: Result<T>) -> Result<Self> {
        match translate(result)? {
            Ok(value) => Ok(Self::Ok(
                serde_json::to_value(value).context("Failed to serialize reply")?,
            )),
            Err(response) => Ok(Self::Rejected(response)),
        }
    }

    /// Pretty JSON body for either variant
    pub fn to_json(&self) -> Result<String> {
        let rendered = match self {
            Self::Ok(value) => serde_json::to_string_pretty(value),
            Self::Rejected(response) => serde_json::to_string_pretty(response),
        };
        rendered.context("Failed to render reply")
    }
}

/// Run a parsed command against `config`
pub async fn run(command: Command, config: AppConfig) -> Result<Reply> {
    match command {
        Command::Add { a, b } => {
            let context = init_app(config, |services| {
                services.add_instance(Calculator);
                Ok(())
            })?;
            let invoker = add_invoker(&context.factory()?)?;
            let sum = crate::samples::calculator::add(&invoker, context.provider().as_ref(), a, b);
            Reply::from_result(sum)
        }
        Command::Todo { command } => run_todo(command, config).await,
    }
}

async fn run_todo(command: TodoCommand, config: AppConfig) -> Result<Reply> {
    match command {
        TodoCommand::Add { name, age, seed } => {
            let context = todo_context(config, seed)?;
            let created = context.mediator()?.send(CreateTodo::new(name, age)).await;
            Reply::from_result(created)
        }
        TodoCommand::List { seed } => {
            let context = todo_context(config, seed)?;
            Reply::from_result(context.mediator()?.send(GetTodos).await)
        }
    }
}

fn todo_context(config: AppConfig, seed: Vec<String>) -> Result<AppContext> {
    init_app(config, move |services| {
        register_todo_store(services, InMemoryTodoStore::with_names(seed));
        Ok(())
    })
}
