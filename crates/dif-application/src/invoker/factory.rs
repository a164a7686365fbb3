//! Invoker factory

use super::binding::BindingPlan;
use super::{BoundTarget, Invoker};
use dif_domain::{Error, MethodDescriptor, Result, Type, Value};
use std::any::{Any, TypeId};
use std::sync::Arc;
use tracing::{debug, trace};

/// Builds [`Invoker`]s from method descriptors
///
/// Building inspects the parameter list once; the resulting invoker never
/// repeats the inspection. The factory holds no state besides its options and
/// can be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvokerFactory {
    strict_arguments: bool,
}

impl InvokerFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail builds that leave explicit argument types unconsumed
    #[must_use]
    pub fn with_strict_arguments(mut self, strict: bool) -> Self {
        self.strict_arguments = strict;
        self
    }

    pub fn strict_arguments(&self) -> bool {
        self.strict_arguments
    }

    /// Build an invoker for `method`, matching `explicit` against its parameters
    ///
    /// Instance methods take their receiver at call time.
    pub fn build(&self, method: &MethodDescriptor, explicit: &[Type]) -> Result<Invoker> {
        let plan = self.plan(method, explicit)?;
        Ok(Invoker::new(method.clone(), plan, None))
    }

    /// Build an invoker whose receiver is fixed to `target`
    ///
    /// Every call receives a clone of `target`; the call-time receiver is ignored.
    pub fn build_bound<T>(
        &self,
        method: &MethodDescriptor,
        target: T,
        explicit: &[Type],
    ) -> Result<Invoker>
    where
        T: Any + Clone + Send + Sync,
    {
        match method.receiver() {
            Some(receiver) if receiver.id() == TypeId::of::<T>() => {}
            Some(receiver) => {
                return Err(Error::unsupported_shape(
                    method.name(),
                    format!(
                        "bound target `{}` does not match receiver `{}`",
                        std::any::type_name::<T>(),
                        receiver.name()
                    ),
                ));
            }
            None => {
                return Err(Error::unsupported_shape(
                    method.name(),
                    "a bound target requires an instance method",
                ));
            }
        }

        let plan = self.plan(method, explicit)?;
        let target: BoundTarget = Arc::new(move || Box::new(target.clone()) as Value);
        Ok(Invoker::new(method.clone(), plan, Some(target)))
    }

    fn plan(&self, method: &MethodDescriptor, explicit: &[Type]) -> Result<BindingPlan> {
        let plan = BindingPlan::compute(method.parameters(), explicit);

        if !plan.unconsumed().is_empty() {
            let unconsumed: Vec<&str> = plan.unconsumed().iter().map(Type::name).collect();
            if self.strict_arguments {
                return Err(Error::unsupported_shape(
                    method.name(),
                    format!(
                        "explicit argument types not accepted by any parameter: {unconsumed:?}"
                    ),
                ));
            }
            debug!(
                method = method.name(),
                ?unconsumed,
                "Explicit argument types left unconsumed by binding plan"
            );
        }

        trace!(
            method = method.name(),
            explicit = plan.explicit_count(),
            resolved = plan.resolved_count(),
            "Built binding plan"
        );
        Ok(plan)
    }
}
