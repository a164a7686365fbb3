//! Object mapper

use crate::dispatch::{ConventionDispatcher, DispatchKey, InvokerCache, MethodTable};
use crate::invoker::InvokerFactory;
use dif_domain::constants::MAP_CONVENTION;
use dif_domain::{MethodDescriptor, ResolutionContext, Result};
use std::any::Any;
use std::sync::Arc;

/// A value that can be mapped into a `Target`
///
/// The mapping method is an async instance method resolving to
/// `Result<Target>`; its other parameters come from the context.
pub trait MapInto<Target>: Any + Send + Sized
where
    Target: Send + 'static,
{
    /// Descriptor of the mapping method
    fn mapper() -> Result<MethodDescriptor>;
}

/// Maps values into other types through their conventional `map` method
#[derive(Clone, Debug)]
pub struct Mapper {
    dispatcher: ConventionDispatcher,
}

impl Mapper {
    pub fn new(context: Arc<dyn ResolutionContext>) -> Self {
        Self {
            dispatcher: ConventionDispatcher::new(MAP_CONVENTION, context),
        }
    }

    pub fn with_parts(
        context: Arc<dyn ResolutionContext>,
        factory: InvokerFactory,
        methods: Arc<MethodTable>,
        cache: Arc<InvokerCache<DispatchKey>>,
    ) -> Self {
        Self {
            dispatcher: ConventionDispatcher::with_parts(
                MAP_CONVENTION,
                context,
                factory,
                methods,
                cache,
            ),
        }
    }

    pub async fn map<S, T>(&self, value: S) -> Result<T>
    where
        S: MapInto<T>,
        T: Send + 'static,
    {
        self.dispatcher
            .dispatch_with(value, <S as MapInto<T>>::mapper)
            .await
    }

    /// Map a value through the method registered under `map`
    pub async fn map_value<V, T>(&self, value: V) -> Result<T>
    where
        V: Any + Send,
        T: Send + 'static,
    {
        self.dispatcher.dispatch(value).await
    }

    pub fn dispatcher(&self) -> &ConventionDispatcher {
        &self.dispatcher
    }
}
