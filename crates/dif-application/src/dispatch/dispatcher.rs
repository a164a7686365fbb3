//! Convention dispatcher
//!
//! Shared machinery behind the mediator, mapper and validator: pick the
//! conventional method for a value's concrete type, build (or reuse) an invoker
//! with zero explicit arguments, invoke it with the value as receiver and await
//! the returned future.

use super::cache::{DispatchKey, InvokerCache};
use super::method_table::MethodTable;
use crate::invoker::{Invoker, InvokerFactory};
use dif_domain::{
    Error, MethodDescriptor, ResolutionContext, Result, ReturnShape, Type, Value, value_type_id,
};
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Dispatches values to the method registered under one convention name
///
/// Conventional methods are asynchronous instance methods whose future resolves
/// to `Result<T>`. Cloning shares the cache, method table and context.
#[derive(Clone)]
pub struct ConventionDispatcher {
    convention: &'static str,
    context: Arc<dyn ResolutionContext>,
    factory: InvokerFactory,
    methods: Arc<MethodTable>,
    cache: Arc<InvokerCache<DispatchKey>>,
}

impl ConventionDispatcher {
    /// Dispatcher with its own method table and cache
    pub fn new(convention: &'static str, context: Arc<dyn ResolutionContext>) -> Self {
        Self::with_parts(
            convention,
            context,
            InvokerFactory::new(),
            Arc::new(MethodTable::new()),
            Arc::new(InvokerCache::new()),
        )
    }

    /// Dispatcher sharing an explicitly supplied method table and cache
    pub fn with_parts(
        convention: &'static str,
        context: Arc<dyn ResolutionContext>,
        factory: InvokerFactory,
        methods: Arc<MethodTable>,
        cache: Arc<InvokerCache<DispatchKey>>,
    ) -> Self {
        Self {
            convention,
            context,
            factory,
            methods,
            cache,
        }
    }

    pub fn convention(&self) -> &'static str {
        self.convention
    }

    pub fn methods(&self) -> &Arc<MethodTable> {
        &self.methods
    }

    pub fn cache(&self) -> &Arc<InvokerCache<DispatchKey>> {
        &self.cache
    }

    /// Dispatch a value whose conventional method is known statically
    ///
    /// `locate` is only called on a cache miss.
    pub async fn dispatch_with<V, T, F>(&self, value: V, locate: F) -> Result<T>
    where
        V: Any + Send,
        T: Send + 'static,
        F: FnOnce() -> Result<MethodDescriptor>,
    {
        let key = DispatchKey::new(self.convention, TypeId::of::<V>(), TypeId::of::<T>());
        let invoker = self.invoker::<T, _>(key, locate)?;
        self.call(&invoker, Box::new(value)).await
    }

    /// Dispatch a value through the method table
    ///
    /// Fails with [`Error::MethodNotFound`] when no method was registered for
    /// the value's concrete type under this dispatcher's convention.
    pub async fn dispatch<V, T>(&self, value: V) -> Result<T>
    where
        V: Any + Send,
        T: Send + 'static,
    {
        let type_name = std::any::type_name::<V>();
        self.dispatch_with(value, || {
            self.methods
                .find(TypeId::of::<V>(), type_name, self.convention)
        })
        .await
    }

    /// Dispatch an already boxed value through the method table
    pub async fn dispatch_boxed<T>(&self, value: Value) -> Result<T>
    where
        T: Send + 'static,
    {
        let id = value_type_id(&value);
        let key = DispatchKey::new(self.convention, id, TypeId::of::<T>());
        let invoker = self.invoker::<T, _>(key, || {
            let type_name = self.methods.type_name(id).unwrap_or("<unregistered type>");
            self.methods.find(id, type_name, self.convention)
        })?;
        self.call(&invoker, value).await
    }

    fn invoker<T, F>(&self, key: DispatchKey, locate: F) -> Result<Invoker>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<MethodDescriptor>,
    {
        self.cache.get_or_try_insert_with(key, || {
            let method = locate()?;
            expect_async_result::<T>(&method)?;
            debug!(
                convention = self.convention,
                method = method.name(),
                "Building conventional invoker"
            );
            self.factory.build(&method, &[])
        })
    }

    async fn call<T: Send + 'static>(&self, invoker: &Invoker, receiver: Value) -> Result<T> {
        let future = invoker
            .invoke(self.context.as_ref(), Some(receiver), Vec::new())?
            .into_future::<Result<T>>()
            .map_err(|e| e.with_method_name(invoker.method().name()))?;
        future.await
    }
}

impl fmt::Debug for ConventionDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConventionDispatcher")
            .field("convention", &self.convention)
            .field("factory", &self.factory)
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

fn expect_async_result<T: Send + 'static>(method: &MethodDescriptor) -> Result<()> {
    let expected = Type::of::<Result<T>>();
    if !method.is_instance() {
        return Err(Error::unsupported_shape(
            method.name(),
            "conventional methods take the dispatched value as receiver",
        ));
    }
    match method.returns() {
        ReturnShape::Async(output) if *output == expected => Ok(()),
        other => Err(Error::unsupported_shape(
            method.name(),
            format!(
                "conventional methods must return a future of `{}`, found {other:?}",
                expected.name()
            ),
        )),
    }
}
