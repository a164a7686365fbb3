//! Invokers
//!
//! An [`Invoker`] is a prebuilt, immutable callable that assembles a method's
//! full argument list from explicit values and context-resolved services, then
//! calls the method. Invokers hold no mutable state and can be invoked
//! concurrently from any number of tasks.
//!
//! ```
//! use dif_application::invoker::InvokerFactory;
//! use dif_domain::{MethodDescriptor, ResolutionContext, Result, Type, Value};
//!
//! struct Empty;
//! impl ResolutionContext for Empty {
//!     fn resolve(&self, ty: &Type) -> Result<Value> {
//!         Err(dif_domain::Error::unresolved(ty.name()))
//!     }
//! }
//!
//! let add = MethodDescriptor::function(|a: i32, b: i32| a + b);
//! let invoker = InvokerFactory::new()
//!     .build(&add, &[Type::of::<i32>(), Type::of::<i32>()])
//!     .unwrap();
//! let sum = invoker
//!     .invoke(&Empty, None, vec![Box::new(10_i32) as Value, Box::new(20_i32) as Value])
//!     .unwrap()
//!     .into_value::<i32>()
//!     .unwrap();
//! assert_eq!(sum, 30);
//! ```

pub mod binding;
pub mod factory;

pub use binding::{Binding, BindingPlan};
pub use factory::InvokerFactory;

use dif_domain::{
    Error, MethodDescriptor, Output, ResolutionContext, Result, Value, value_type_id,
};
use std::fmt;
use std::sync::Arc;

pub(crate) type BoundTarget = Arc<dyn Fn() -> Value + Send + Sync>;

/// A reusable, prebuilt method call
///
/// Cloning shares the same build artifact.
#[derive(Clone)]
pub struct Invoker {
    inner: Arc<InvokerInner>,
}

struct InvokerInner {
    method: MethodDescriptor,
    plan: BindingPlan,
    target: Option<BoundTarget>,
}

impl Invoker {
    pub(crate) fn new(
        method: MethodDescriptor,
        plan: BindingPlan,
        target: Option<BoundTarget>,
    ) -> Self {
        Self {
            inner: Arc::new(InvokerInner {
                method,
                plan,
                target,
            }),
        }
    }

    pub fn method(&self) -> &MethodDescriptor {
        &self.inner.method
    }

    /// The binding decisions fixed at build time
    pub fn plan(&self) -> &BindingPlan {
        &self.inner.plan
    }

    pub fn is_bound(&self) -> bool {
        self.inner.target.is_some()
    }

    /// Assemble the arguments and call the method
    ///
    /// Every argument is converted or resolved before the method runs, so a
    /// failure never leaves the method half-executed. Resolution failures are
    /// returned exactly as the context reported them.
    pub fn invoke(
        &self,
        context: &dyn ResolutionContext,
        receiver: Option<Value>,
        arguments: Vec<Value>,
    ) -> Result<Output> {
        let method = &self.inner.method;
        let receiver = self.receiver(receiver)?;

        let provided = arguments.len();
        let mut explicit: Vec<Option<Value>> = arguments.into_iter().map(Some).collect();
        let mut assembled = Vec::with_capacity(method.parameters().len());

        for (index, (parameter, binding)) in method
            .parameters()
            .iter()
            .zip(self.inner.plan.bindings())
            .enumerate()
        {
            let value = match binding {
                Binding::Explicit { position, source } => {
                    let value = explicit
                        .get_mut(*position)
                        .and_then(Option::take)
                        .ok_or_else(|| Error::MissingArgument {
                            method: method.name().to_string(),
                            position: *position,
                            provided,
                        })?;
                    source.convert(value, parameter).map_err(|_| {
                        Error::type_mismatch(
                            method.name(),
                            format!("explicit argument {position} (parameter {index})"),
                            parameter.name(),
                        )
                    })?
                }
                Binding::Resolve => {
                    let value = context.resolve(parameter)?;
                    if value_type_id(&value) != parameter.id() {
                        return Err(Error::type_mismatch(
                            method.name(),
                            format!("resolved service (parameter {index})"),
                            parameter.name(),
                        ));
                    }
                    value
                }
            };
            assembled.push(value);
        }

        method.call(receiver, assembled)
    }

    fn receiver(&self, supplied: Option<Value>) -> Result<Option<Value>> {
        let method = &self.inner.method;
        let Some(expected) = method.receiver() else {
            return Ok(None);
        };

        let receiver = match &self.inner.target {
            Some(target) => target(),
            None => supplied.ok_or_else(|| Error::MissingReceiver {
                method: method.name().to_string(),
                receiver: expected.name().to_string(),
            })?,
        };

        if value_type_id(&receiver) != expected.id() {
            return Err(Error::type_mismatch(method.name(), "receiver", expected.name()));
        }
        Ok(Some(receiver))
    }
}

impl fmt::Debug for Invoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invoker")
            .field("method", &self.inner.method.name())
            .field("plan", &self.inner.plan)
            .field("bound", &self.is_bound())
            .finish()
    }
}
