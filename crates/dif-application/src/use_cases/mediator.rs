//! Request mediator

use crate::dispatch::{ConventionDispatcher, DispatchKey, InvokerCache, MethodTable};
use crate::invoker::InvokerFactory;
use dif_domain::constants::HANDLE_CONVENTION;
use dif_domain::{MethodDescriptor, ResolutionContext, Result};
use std::any::Any;
use std::sync::Arc;

/// A request that knows its own handler
///
/// The handler is an async instance method taking the request as receiver;
/// every further parameter is resolved from the context.
///
/// ```ignore
/// impl Request for GetTodos {
///     type Response = Vec<Todo>;
///
///     fn handler() -> Result<MethodDescriptor> {
///         MethodDescriptor::async_method(GetTodos::handle).map(|m| m.named("GetTodos::handle"))
///     }
/// }
/// ```
pub trait Request: Any + Send + Sized {
    /// What the handler resolves to
    type Response: Send + 'static;

    /// Descriptor of the handler method
    fn handler() -> Result<MethodDescriptor>;
}

/// Sends requests to their handlers, filling handler services from the context
#[derive(Clone, Debug)]
pub struct Mediator {
    dispatcher: ConventionDispatcher,
}

impl Mediator {
    pub fn new(context: Arc<dyn ResolutionContext>) -> Self {
        Self {
            dispatcher: ConventionDispatcher::new(HANDLE_CONVENTION, context),
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
                HANDLE_CONVENTION,
                context,
                factory,
                methods,
                cache,
            ),
        }
    }

    /// Handle a request through its [`Request::handler`]
    pub async fn send<R: Request>(&self, request: R) -> Result<R::Response> {
        self.dispatcher.dispatch_with(request, R::handler).await
    }

    /// Handle a value through the method registered under `handle`
    pub async fn send_value<V, T>(&self, request: V) -> Result<T>
    where
        V: Any + Send,
        T: Send + 'static,
    {
        self.dispatcher.dispatch(request).await
    }

    pub fn dispatcher(&self) -> &ConventionDispatcher {
        &self.dispatcher
    }
}
