//! Runtime method table
//!
//! The dynamic escape hatch for convention-based dispatch: types that cannot
//! implement a capability trait (foreign or plain-data types) register their
//! conventional methods here by name. Lookups that find nothing fail with
//! [`Error::MethodNotFound`].

use dashmap::DashMap;
use dif_domain::{Error, MethodDescriptor, Result};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug)]
struct TypeMethods {
    type_name: &'static str,
    methods: HashMap<&'static str, MethodDescriptor>,
}

/// Conventional methods registered per concrete type
#[derive(Debug, Default)]
pub struct MethodTable {
    types: DashMap<TypeId, TypeMethods>,
}

impl MethodTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `method` under `convention` for values of type `T`
    ///
    /// The descriptor must be an instance method whose receiver is `T`. Each
    /// convention can be registered once per type: dispatchers cache the
    /// invoker built from the first lookup, so a later registration is
    /// rejected with [`Error::UnsupportedMethodShape`] and the original method
    /// stays in place. Register methods before dispatching.
    pub fn register<T: Any>(
        &self,
        convention: &'static str,
        method: MethodDescriptor,
    ) -> Result<()> {
        let type_name = std::any::type_name::<T>();
        match method.receiver() {
            Some(receiver) if receiver.is::<T>() => {}
            Some(receiver) => {
                return Err(Error::unsupported_shape(
                    method.name(),
                    format!(
                        "receiver `{}` cannot serve convention `{convention}` for `{type_name}`",
                        receiver.name()
                    ),
                ));
            }
            None => {
                return Err(Error::unsupported_shape(
                    method.name(),
                    format!("convention `{convention}` requires an instance method"),
                ));
            }
        }

        let mut entry = self.types.entry(TypeId::of::<T>()).or_insert_with(|| TypeMethods {
            type_name,
            methods: HashMap::new(),
        });
        if entry.methods.contains_key(convention) {
            return Err(Error::unsupported_shape(
                method.name(),
                format!("convention `{convention}` is already registered for `{type_name}`"),
            ));
        }
        debug!(type_name, convention, method = method.name(), "Registered conventional method");
        entry.methods.insert(convention, method);
        Ok(())
    }

    /// Find the method registered under `convention` for the type `id`
    ///
    /// `type_name` is only used for the error message.
    pub fn find(&self, id: TypeId, type_name: &str, convention: &str) -> Result<MethodDescriptor> {
        self.types
            .get(&id)
            .and_then(|entry| entry.methods.get(convention).cloned())
            .ok_or_else(|| Error::method_not_found(type_name, convention))
    }

    /// Registered name for the type `id`, if any method was registered for it
    pub fn type_name(&self, id: TypeId) -> Option<&'static str> {
        self.types.get(&id).map(|entry| entry.type_name)
    }

    pub fn contains(&self, id: TypeId, convention: &str) -> bool {
        self.types
            .get(&id)
            .is_some_and(|entry| entry.methods.contains_key(convention))
    }
}
