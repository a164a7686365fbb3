//! Resolution context port
//!
//! The only capability the invoker core needs from a dependency container:
//! produce an instance for a requested type, or fail. Contexts are passed in at
//! call time and are never captured by an invoker.

use crate::error::{Error, Result};
use crate::value::{Type, Value};
use std::any::Any;
use std::sync::Arc;

/// Produces service instances by requested type
///
/// Implementations return [`Error::UnresolvedDependency`] when nothing is
/// registered for the type. Resolving may block or allocate; callers get no
/// timeout.
pub trait ResolutionContext: Send + Sync {
    /// Produce an instance of `ty`
    fn resolve(&self, ty: &Type) -> Result<Value>;
}

impl<C: ResolutionContext + ?Sized> ResolutionContext for Arc<C> {
    fn resolve(&self, ty: &Type) -> Result<Value> {
        (**self).resolve(ty)
    }
}

impl<C: ResolutionContext + ?Sized> ResolutionContext for &C {
    fn resolve(&self, ty: &Type) -> Result<Value> {
        (**self).resolve(ty)
    }
}

/// Typed convenience on top of [`ResolutionContext`]
pub trait ResolutionContextExt {
    /// Resolve a `T` and downcast it
    fn get<T: Any + Send>(&self) -> Result<T>;
}

impl<C: ResolutionContext + ?Sized> ResolutionContextExt for C {
    fn get<T: Any + Send>(&self) -> Result<T> {
        let ty = Type::of::<T>();
        let value = self.resolve(&ty)?;
        value
            .downcast::<T>()
            .map(|inner| *inner)
            .map_err(|_| Error::type_mismatch("resolve", "resolved service", ty.name()))
    }
}
