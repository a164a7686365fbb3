//! Runtime type descriptors and dynamic values
//!
//! Rust has no runtime reflection, so the invoker works with [`Type`]
//! descriptors built from `TypeId` plus a type name. Subtype and interface
//! compatibility are declared explicitly: a [`TypeBuilder`] records which other
//! types a value may be converted into, and how.
//!
//! ```
//! use dif_domain::value::Type;
//! use std::sync::Arc;
//!
//! trait Store: Send + Sync {}
//! struct Memory;
//! impl Store for Memory {}
//!
//! let memory = Type::builder::<Memory>()
//!     .assignable_to::<Arc<dyn Store>>(|m| Arc::new(m) as Arc<dyn Store>)
//!     .build();
//! assert!(memory.is_assignable_to(&Type::of::<Arc<dyn Store>>()));
//! ```

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

/// A dynamically typed value passed to or returned from an invoker
pub type Value = Box<dyn Any + Send>;

/// `TypeId` of the value inside the box, not of the box itself
pub fn value_type_id(value: &Value) -> TypeId {
    (**value).type_id()
}

type Conversion = Arc<dyn Fn(Value) -> Result<Value, Value> + Send + Sync>;

#[derive(Clone)]
struct Assignable {
    target: TypeId,
    convert: Conversion,
}

/// Descriptor of a Rust type as seen by the invoker
///
/// Equality and hashing only consider the `TypeId`; declared conversions do
/// not change identity.
#[derive(Clone)]
pub struct Type {
    id: TypeId,
    name: &'static str,
    assignable: Vec<Assignable>,
}

impl Type {
    /// Descriptor for `T` with no declared conversions
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            assignable: Vec::new(),
        }
    }

    /// Start a descriptor for `T` that declares conversions to other types
    pub fn builder<T: Any + Send>() -> TypeBuilder<T> {
        TypeBuilder {
            ty: Self::of::<T>(),
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this descriptor is exactly `T`
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// Whether a value of this type can be used where `target` is expected
    pub fn is_assignable_to(&self, target: &Type) -> bool {
        self.id == target.id || self.assignable.iter().any(|a| a.target == target.id)
    }

    /// Convert a value of this type into `target`
    ///
    /// Values already of type `target` pass through. On failure the original
    /// value is handed back.
    pub fn convert(&self, value: Value, target: &Type) -> Result<Value, Value> {
        if value_type_id(&value) == target.id {
            return Ok(value);
        }
        if value_type_id(&value) != self.id {
            return Err(value);
        }
        match self.assignable.iter().find(|a| a.target == target.id) {
            Some(assignable) => (assignable.convert)(value),
            None => Err(value),
        }
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Type")
            .field("name", &self.name)
            .field("assignable", &self.assignable.len())
            .finish()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Builder declaring which types a `T` may stand in for
pub struct TypeBuilder<T> {
    ty: Type,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Send> TypeBuilder<T> {
    /// Declare that a `T` can be used where a `U` is expected
    ///
    /// Called as `.assignable_to::<U>(conversion)`.
    pub fn assignable_to<U: Any + Send>(
        mut self,
        convert: impl Fn(T) -> U + Send + Sync + 'static,
    ) -> Self {
        let convert: Conversion = Arc::new(move |value: Value| {
            value
                .downcast::<T>()
                .map(|inner| Box::new(convert(*inner)) as Value)
        });
        self.ty.assignable.push(Assignable {
            target: TypeId::of::<U>(),
            convert,
        });
        self
    }

    pub fn build(self) -> Type {
        self.ty
    }
}

impl<T: Any + Send> From<TypeBuilder<T>> for Type {
    fn from(builder: TypeBuilder<T>) -> Self {
        builder.build()
    }
}
