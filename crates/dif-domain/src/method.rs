//! Method descriptors
//!
//! A [`MethodDescriptor`] is the formal shape of a callable unit: its ordered
//! parameter types, its receiver type (for instance methods) and its return
//! shape, together with a type-erased body that performs the actual call.
//!
//! Descriptors are produced from ordinary closures and fn items through the
//! [`Callable`] adapters, which are expanded for every arity up to
//! [`MAX_CALLABLE_ARITY`](crate::constants::MAX_CALLABLE_ARITY):
//!
//! ```
//! use dif_domain::method::{MethodDescriptor, Output};
//! use dif_domain::value::Value;
//!
//! let add = MethodDescriptor::function(|a: i32, b: i32| a + b).named("add");
//! let arguments: Vec<Value> = vec![Box::new(10_i32), Box::new(20_i32)];
//! let sum = add.call(None, arguments).unwrap().into_value::<i32>().unwrap();
//! assert_eq!(sum, 30);
//! ```

use crate::constants::ANONYMOUS_METHOD;
use crate::error::{Error, Result};
use crate::value::{Type, Value};
use futures::FutureExt;
use futures::future::BoxFuture;
use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Declared return shape of a method
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnShape {
    /// The method returns `()`
    Void,
    /// The method returns a value of the given type
    Value(Type),
    /// The method returns a future resolving to the given type
    Async(Type),
}

/// Result of invoking a method
pub enum Output {
    /// Sentinel for methods declared to return nothing
    Void,
    /// The method's return value, unchanged
    ///
    /// For asynchronous methods this is a `BoxFuture<'static, T>` handle.
    Value(Value),
}

impl Output {
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    /// Downcast a synchronous return value
    pub fn into_value<T: Any>(self) -> Result<T> {
        match self {
            Self::Value(value) => value.downcast::<T>().map(|inner| *inner).map_err(|_| {
                Error::type_mismatch(ANONYMOUS_METHOD, "return value", std::any::type_name::<T>())
            }),
            Self::Void => Err(Error::type_mismatch(
                ANONYMOUS_METHOD,
                "return value (method returned no value)",
                std::any::type_name::<T>(),
            )),
        }
    }

    /// Take the asynchronous handle returned by an async method
    ///
    /// The future is not polled; awaiting it is the caller's job.
    pub fn into_future<T: Send + 'static>(self) -> Result<BoxFuture<'static, T>> {
        self.into_value::<BoxFuture<'static, T>>().map_err(|_| {
            Error::type_mismatch(
                ANONYMOUS_METHOD,
                "asynchronous return value",
                std::any::type_name::<T>(),
            )
        })
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => f.write_str("Output::Void"),
            Self::Value(_) => f.write_str("Output::Value(..)"),
        }
    }
}

/// A closure or fn item whose parameters can be filled from dynamic values
///
/// `Args` is the tuple of parameter types; it only exists to let one closure
/// type implement the trait for exactly one arity.
pub trait Callable<Args>: Send + Sync + 'static {
    /// Return type of the closure
    type Output: Send + 'static;

    /// Parameter types in declaration order
    fn parameter_types() -> Vec<Type>;

    /// Call with already converted arguments, one per parameter
    fn call(&self, arguments: Vec<Value>) -> Result<Self::Output>;
}

fn take_argument<T: Any>(arguments: &mut std::vec::IntoIter<Value>, position: usize) -> Result<T> {
    let value = arguments.next().ok_or_else(|| Error::MissingArgument {
        method: ANONYMOUS_METHOD.to_string(),
        position,
        provided: position,
    })?;
    value.downcast::<T>().map(|inner| *inner).map_err(|_| {
        Error::type_mismatch(
            ANONYMOUS_METHOD,
            format!("parameter {position}"),
            std::any::type_name::<T>(),
        )
    })
}

macro_rules! impl_callable {
    ($($arg:ident),*) => {
        impl<F, R, $($arg,)*> Callable<($($arg,)*)> for F
        where
            F: Fn($($arg),*) -> R + Send + Sync + 'static,
            R: Send + 'static,
            $($arg: Any + Send,)*
        {
            type Output = R;

            fn parameter_types() -> Vec<Type> {
                vec![$(Type::of::<$arg>()),*]
            }

            #[allow(non_snake_case, unused_mut, unused_variables, unused_assignments)]
            fn call(&self, arguments: Vec<Value>) -> Result<R> {
                let mut arguments = arguments.into_iter();
                let mut position = 0usize;
                $(
                    let $arg = take_argument::<$arg>(&mut arguments, position)?;
                    position += 1;
                )*
                Ok(self($($arg),*))
            }
        }
    };
}

impl_callable!();
impl_callable!(A1);
impl_callable!(A1, A2);
impl_callable!(A1, A2, A3);
impl_callable!(A1, A2, A3, A4);
impl_callable!(A1, A2, A3, A4, A5);
impl_callable!(A1, A2, A3, A4, A5, A6);
impl_callable!(A1, A2, A3, A4, A5, A6, A7);
impl_callable!(A1, A2, A3, A4, A5, A6, A7, A8);

type Body = Arc<dyn Fn(Option<Value>, Vec<Value>) -> Result<Output> + Send + Sync>;

/// Formal shape of a callable unit plus the means to call it
///
/// Cloning is cheap; the body is shared.
#[derive(Clone)]
pub struct MethodDescriptor {
    name: Cow<'static, str>,
    receiver: Option<Type>,
    parameters: Vec<Type>,
    returns: ReturnShape,
    body: Body,
}

impl MethodDescriptor {
    /// Free function returning a value (or `()`)
    pub fn function<Args, F>(f: F) -> Self
    where
        F: Callable<Args>,
        Args: 'static,
    {
        let body: Body = Arc::new(move |_receiver: Option<Value>, arguments: Vec<Value>| {
            f.call(arguments).map(sync_output)
        });
        Self {
            name: Cow::Borrowed(ANONYMOUS_METHOD),
            receiver: None,
            parameters: F::parameter_types(),
            returns: sync_shape::<F::Output>(),
            body,
        }
    }

    /// Free function returning a future
    pub fn async_function<Args, F, T>(f: F) -> Self
    where
        F: Callable<Args>,
        F::Output: Future<Output = T>,
        T: Send + 'static,
        Args: 'static,
    {
        let body: Body = Arc::new(move |_receiver: Option<Value>, arguments: Vec<Value>| {
            f.call(arguments).map(async_output)
        });
        Self {
            name: Cow::Borrowed(ANONYMOUS_METHOD),
            receiver: None,
            parameters: F::parameter_types(),
            returns: ReturnShape::Async(Type::of::<T>()),
            body,
        }
    }

    /// Instance method; the first parameter of `f` is the receiver
    pub fn method<Args, F>(f: F) -> Result<Self>
    where
        F: Callable<Args>,
        Args: 'static,
    {
        let (receiver, parameters) = split_receiver(F::parameter_types())?;
        let receiver_name = receiver.name();
        let body: Body = Arc::new(move |target: Option<Value>, arguments: Vec<Value>| {
            let arguments = prepend_receiver(target, arguments, receiver_name)?;
            f.call(arguments).map(sync_output)
        });
        Ok(Self {
            name: Cow::Borrowed(ANONYMOUS_METHOD),
            receiver: Some(receiver),
            parameters,
            returns: sync_shape::<F::Output>(),
            body,
        })
    }

    /// Instance method returning a future; the first parameter of `f` is the receiver
    pub fn async_method<Args, F, T>(f: F) -> Result<Self>
    where
        F: Callable<Args>,
        F::Output: Future<Output = T>,
        T: Send + 'static,
        Args: 'static,
    {
        let (receiver, parameters) = split_receiver(F::parameter_types())?;
        let receiver_name = receiver.name();
        let body: Body = Arc::new(move |target: Option<Value>, arguments: Vec<Value>| {
            let arguments = prepend_receiver(target, arguments, receiver_name)?;
            f.call(arguments).map(async_output)
        });
        Ok(Self {
            name: Cow::Borrowed(ANONYMOUS_METHOD),
            receiver: Some(receiver),
            parameters,
            returns: ReturnShape::Async(Type::of::<T>()),
            body,
        })
    }

    /// Give the descriptor a name used in error messages and logs
    #[must_use]
    pub fn named<S: Into<Cow<'static, str>>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Receiver type for instance methods
    pub fn receiver(&self) -> Option<&Type> {
        self.receiver.as_ref()
    }

    /// Formal parameters in declaration order, receiver excluded
    pub fn parameters(&self) -> &[Type] {
        &self.parameters
    }

    pub fn returns(&self) -> &ReturnShape {
        &self.returns
    }

    pub fn is_instance(&self) -> bool {
        self.receiver.is_some()
    }

    /// Invoke the body with a complete, already converted argument list
    ///
    /// `arguments` must match [`parameters`](Self::parameters) exactly in count
    /// and type.
    pub fn call(&self, receiver: Option<Value>, arguments: Vec<Value>) -> Result<Output> {
        let expected = self.parameters.len();
        if arguments.len() < expected {
            return Err(Error::MissingArgument {
                method: self.name.to_string(),
                position: arguments.len(),
                provided: arguments.len(),
            });
        }
        if arguments.len() > expected {
            return Err(Error::unsupported_shape(
                self.name.as_ref(),
                format!("expected {expected} arguments, got {}", arguments.len()),
            ));
        }
        (self.body)(receiver, arguments).map_err(|e| e.with_method_name(&self.name))
    }
}

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("name", &self.name)
            .field("receiver", &self.receiver)
            .field("parameters", &self.parameters)
            .field("returns", &self.returns)
            .finish_non_exhaustive()
    }
}

fn sync_shape<R: Any>() -> ReturnShape {
    if TypeId::of::<R>() == TypeId::of::<()>() {
        ReturnShape::Void
    } else {
        ReturnShape::Value(Type::of::<R>())
    }
}

fn sync_output<R: Any + Send>(value: R) -> Output {
    if TypeId::of::<R>() == TypeId::of::<()>() {
        Output::Void
    } else {
        Output::Value(Box::new(value))
    }
}

fn async_output<Fut, T>(future: Fut) -> Output
where
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    Output::Value(Box::new(future.boxed()))
}

fn split_receiver(mut parameters: Vec<Type>) -> Result<(Type, Vec<Type>)> {
    if parameters.is_empty() {
        return Err(Error::unsupported_shape(
            ANONYMOUS_METHOD,
            "an instance method takes its receiver as the first parameter",
        ));
    }
    let receiver = parameters.remove(0);
    Ok((receiver, parameters))
}

fn prepend_receiver(
    target: Option<Value>,
    mut arguments: Vec<Value>,
    receiver: &'static str,
) -> Result<Vec<Value>> {
    let target = target.ok_or_else(|| Error::MissingReceiver {
        method: ANONYMOUS_METHOD.to_string(),
        receiver: receiver.to_string(),
    })?;
    arguments.insert(0, target);
    Ok(arguments)
}
