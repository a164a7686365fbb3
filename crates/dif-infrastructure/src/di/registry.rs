//! Service registry
//!
//! A small type-keyed container. Singletons are built on first resolution and
//! cloned out on every request; transients are built on every request.
//! Factories run without any lock held, so a singleton factory may resolve
//! other services. Dependency cycles between factories are not detected.

use dif_domain::{Error, ResolutionContext, Result, Type, Value};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, Weak};
use tracing::debug;

type Shared = Box<dyn Any + Send + Sync>;
type SingletonFactory = Box<dyn Fn(&ServiceProvider) -> Result<Shared> + Send + Sync>;
type TransientFactory = Box<dyn Fn(&ServiceProvider) -> Result<Value> + Send + Sync>;

enum Lifetime {
    Singleton {
        factory: SingletonFactory,
        instance: OnceLock<Shared>,
        clone_out: fn(&Shared) -> Option<Value>,
    },
    Transient(TransientFactory),
}

struct Registration {
    type_name: &'static str,
    lifetime: Lifetime,
}

impl Registration {
    fn is_singleton(&self) -> bool {
        matches!(self.lifetime, Lifetime::Singleton { .. })
    }
}

fn clone_out<T: Any + Clone + Send>(shared: &Shared) -> Option<Value> {
    (**shared)
        .downcast_ref::<T>()
        .map(|service| Box::new(service.clone()) as Value)
}

/// Builder for a [`ServiceProvider`]
///
/// Registering a type twice replaces the earlier registration.
#[derive(Default)]
pub struct ServiceCollection {
    registrations: HashMap<TypeId, Registration>,
}

impl ServiceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a ready-made instance, cloned on every resolution
    pub fn add_instance<T>(&mut self, instance: T) -> &mut Self
    where
        T: Any + Clone + Send + Sync,
    {
        self.add_singleton(move |_| Ok(instance.clone()))
    }

    /// Register a service built once, on first resolution
    pub fn add_singleton<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Any + Clone + Send + Sync,
        F: Fn(&ServiceProvider) -> Result<T> + Send + Sync + 'static,
    {
        let factory: SingletonFactory =
            Box::new(move |provider: &ServiceProvider| {
                factory(provider).map(|service| Box::new(service) as Shared)
            });
        self.insert::<T>(Lifetime::Singleton {
            factory,
            instance: OnceLock::new(),
            clone_out: clone_out::<T>,
        })
    }

    /// Register a service built anew on every resolution
    pub fn add_transient<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Any + Send,
        F: Fn(&ServiceProvider) -> Result<T> + Send + Sync + 'static,
    {
        let factory: TransientFactory =
            Box::new(move |provider: &ServiceProvider| {
                factory(provider).map(|service| Box::new(service) as Value)
            });
        self.insert::<T>(Lifetime::Transient(factory))
    }

    pub fn contains<T: Any>(&self) -> bool {
        self.registrations.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Freeze the registrations into a provider
    pub fn build(self) -> Arc<ServiceProvider> {
        debug!(services = self.registrations.len(), "Building service provider");
        Arc::new_cyclic(|this| ServiceProvider {
            registrations: self.registrations,
            this: this.clone(),
        })
    }

    fn insert<T: Any>(&mut self, lifetime: Lifetime) -> &mut Self {
        let type_name = std::any::type_name::<T>();
        let registration = Registration {
            type_name,
            lifetime,
        };
        if self
            .registrations
            .insert(TypeId::of::<T>(), registration)
            .is_some()
        {
            debug!(type_name, "Replaced service registration");
        }
        self
    }
}

impl fmt::Debug for ServiceCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.registrations.values().map(|r| r.type_name))
            .finish()
    }
}

/// Resolves registered services by type
///
/// Always handed out as `Arc<ServiceProvider>`; [`shared`](Self::shared)
/// recovers that `Arc` from inside a factory.
pub struct ServiceProvider {
    registrations: HashMap<TypeId, Registration>,
    this: Weak<ServiceProvider>,
}

impl ServiceProvider {
    /// This provider as a shareable resolution context
    ///
    /// Services holding the returned `Arc` should be transient; a singleton
    /// holding it keeps the provider alive forever.
    pub fn shared(&self) -> Result<Arc<dyn ResolutionContext>> {
        self.this
            .upgrade()
            .map(|provider| provider as Arc<dyn ResolutionContext>)
            .ok_or_else(|| Error::internal("service provider is no longer alive"))
    }

    pub fn contains(&self, ty: &Type) -> bool {
        self.registrations.contains_key(&ty.id())
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Number of singletons built so far
    pub fn built_singletons(&self) -> usize {
        self.registrations
            .values()
            .filter(|r| match &r.lifetime {
                Lifetime::Singleton { instance, .. } => instance.get().is_some(),
                Lifetime::Transient(_) => false,
            })
            .count()
    }
}

impl ResolutionContext for ServiceProvider {
    fn resolve(&self, ty: &Type) -> Result<Value> {
        let registration = self
            .registrations
            .get(&ty.id())
            .ok_or_else(|| Error::unresolved(ty.name()))?;

        match &registration.lifetime {
            Lifetime::Transient(factory) => factory(self),
            Lifetime::Singleton {
                factory,
                instance,
                clone_out,
            } => {
                let shared = match instance.get() {
                    Some(shared) => shared,
                    // Concurrent first resolutions may both build; one instance is kept
                    None => {
                        let built = factory(self)?;
                        instance.get_or_init(|| built)
                    }
                };
                clone_out(shared)
                    .ok_or_else(|| Error::type_mismatch("resolve", "singleton", ty.name()))
            }
        }
    }
}

impl fmt::Debug for ServiceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let singletons = self.registrations.values().filter(|r| r.is_singleton()).count();
        f.debug_struct("ServiceProvider")
            .field("services", &self.registrations.len())
            .field("singletons", &singletons)
            .finish_non_exhaustive()
    }
}
