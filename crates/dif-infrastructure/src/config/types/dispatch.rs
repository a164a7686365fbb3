//! Dispatch configuration types

use dif_application::InvokerFactory;
use serde::{Deserialize, Serialize};

/// Invoker factory options shared by every collaborator
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DispatchConfig {
    /// Reject binding plans that leave explicit argument types unconsumed
    pub strict_arguments: bool,
}

impl DispatchConfig {
    /// Invoker factory configured with these options
    pub fn factory(&self) -> InvokerFactory {
        InvokerFactory::new().with_strict_arguments(self.strict_arguments)
    }
}
