//! Composition root
//!
//! Registers the invoker factory, the shared method table and the three
//! collaborators, then lets the caller add its own services.
//!
//! ```rust,ignore
//! let context = init_app(AppConfig::default(), |services| {
//!     services.add_instance(Arc::new(InMemoryTodoStore::new()) as Arc<dyn TodoStore>);
//!     Ok(())
//! })?;
//! let todos = context.mediator()?.send(GetTodos).await?;
//! ```
//!
//! Collaborators are transient: each resolution yields a fresh handle holding
//! the provider, the shared method table and that collaborator's invoker cache.
//! Every handle of one collaborator kind shares one cache for the life of the
//! provider.

use super::registry::{ServiceCollection, ServiceProvider};
use crate::config::{AppConfig, DispatchConfig};
use dif_application::{
    DispatchKey, InvokerCache, InvokerFactory, Mapper, Mediator, MethodTable, Validator,
};
use dif_domain::{ResolutionContextExt, Result};
use std::sync::Arc;
use tracing::info;

type SharedCache = Arc<InvokerCache<DispatchKey>>;

/// Register the invoker factory, method table and collaborators
pub fn register_collaborators(services: &mut ServiceCollection, config: &DispatchConfig) {
    let factory = config.factory();
    let methods = Arc::new(MethodTable::new());

    services
        .add_instance(factory)
        .add_instance(Arc::clone(&methods));

    let cache = SharedCache::default();
    let table = Arc::clone(&methods);
    services.add_transient(move |provider: &ServiceProvider| {
        Ok(Mediator::with_parts(
            provider.shared()?,
            factory,
            Arc::clone(&table),
            Arc::clone(&cache),
        ))
    });

    let cache = SharedCache::default();
    let table = Arc::clone(&methods);
    services.add_transient(move |provider: &ServiceProvider| {
        Ok(Mapper::with_parts(
            provider.shared()?,
            factory,
            Arc::clone(&table),
            Arc::clone(&cache),
        ))
    });

    let cache = SharedCache::default();
    services.add_transient(move |provider: &ServiceProvider| {
        Ok(Validator::with_parts(
            provider.shared()?,
            factory,
            Arc::clone(&methods),
            Arc::clone(&cache),
        ))
    });
}

/// Application context: configuration plus the built service provider
#[derive(Debug, Clone)]
pub struct AppContext {
    config: AppConfig,
    provider: Arc<ServiceProvider>,
}

impl AppContext {
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn provider(&self) -> &Arc<ServiceProvider> {
        &self.provider
    }

    pub fn mediator(&self) -> Result<Mediator> {
        self.provider.get::<Mediator>()
    }

    pub fn mapper(&self) -> Result<Mapper> {
        self.provider.get::<Mapper>()
    }

    pub fn validator(&self) -> Result<Validator> {
        self.provider.get::<Validator>()
    }

    /// Method table shared by every collaborator
    pub fn methods(&self) -> Result<Arc<MethodTable>> {
        self.provider.get::<Arc<MethodTable>>()
    }

    pub fn factory(&self) -> Result<InvokerFactory> {
        self.provider.get::<InvokerFactory>()
    }
}

/// Build the application context
///
/// `configure` registers application services after the collaborators, so it
/// may also replace any of them.
pub fn init_app<F>(config: AppConfig, configure: F) -> Result<AppContext>
where
    F: FnOnce(&mut ServiceCollection) -> Result<()>,
{
    let mut services = ServiceCollection::new();
    services.add_instance(config.clone());
    register_collaborators(&mut services, &config.dispatch);
    configure(&mut services)?;

    let provider = services.build();
    info!(
        services = provider.len(),
        strict_arguments = config.dispatch.strict_arguments,
        "Application context initialized"
    );
    Ok(AppContext { config, provider })
}
