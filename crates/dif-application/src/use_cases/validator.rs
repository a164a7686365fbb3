//! Validator

use crate::dispatch::{ConventionDispatcher, DispatchKey, InvokerCache, MethodTable};
use crate::invoker::InvokerFactory;
use dif_domain::constants::VALIDATE_CONVENTION;
use dif_domain::{Error, MethodDescriptor, ResolutionContext, Result, ValidationResult};
use std::any::Any;
use std::sync::Arc;

/// A value that can validate itself
///
/// The validation method is an async instance method resolving to
/// `Result<ValidationResult>`; services it needs are resolved from the context.
pub trait Validate: Any + Send + Sized {
    /// Descriptor of the validation method
    fn validator() -> Result<MethodDescriptor>;
}

/// Runs conventional `validate` methods
#[derive(Clone, Debug)]
pub struct Validator {
    dispatcher: ConventionDispatcher,
}

impl Validator {
    pub fn new(context: Arc<dyn ResolutionContext>) -> Self {
        Self {
            dispatcher: ConventionDispatcher::new(VALIDATE_CONVENTION, context),
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
                VALIDATE_CONVENTION,
                context,
                factory,
                methods,
                cache,
            ),
        }
    }

    pub async fn validate<T: Validate>(&self, value: T) -> Result<ValidationResult> {
        self.dispatcher.dispatch_with(value, T::validator).await
    }

    /// Validate through the method registered under `validate`
    pub async fn validate_value<V: Any + Send>(&self, value: V) -> Result<ValidationResult> {
        self.dispatcher.dispatch(value).await
    }

    /// Validate and turn an invalid result into [`Error::ValidationFailed`]
    pub async fn ensure_valid<T: Validate>(&self, value: T) -> Result<()> {
        into_outcome(self.validate(value).await?)
    }

    /// [`ensure_valid`](Self::ensure_valid) through the method table
    pub async fn ensure_valid_value<V: Any + Send>(&self, value: V) -> Result<()> {
        into_outcome(self.validate_value(value).await?)
    }

    pub fn dispatcher(&self) -> &ConventionDispatcher {
        &self.dispatcher
    }
}

fn into_outcome(result: ValidationResult) -> Result<()> {
    if result.is_valid() {
        Ok(())
    } else {
        Err(Error::ValidationFailed(result))
    }
}
