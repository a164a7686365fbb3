//! Calculator sample

use dif_application::{Invoker, InvokerFactory};
use dif_domain::{MethodDescriptor, ResolutionContext, Result, Type, Value};
use std::ops::Add;

/// Stateless service resolved from the container
#[derive(Debug, Clone, Copy, Default)]
pub struct Calculator;

impl Calculator {
    pub fn add<T: Add<Output = T>>(&self, a: T, b: T) -> T {
        a + b
    }
}

/// Invoker for `(a: i32, b: i32, calculator: Calculator) -> i32`
///
/// `a` and `b` are explicit; the calculator comes from the context.
pub fn add_invoker(factory: &InvokerFactory) -> Result<Invoker> {
    let method = MethodDescriptor::function(|a: i32, b: i32, calculator: Calculator| {
        calculator.add(a, b)
    })
    .named("Calculator::add");
    factory.build(&method, &[Type::of::<i32>(), Type::of::<i32>()])
}

/// Call an invoker built by [`add_invoker`]
pub fn add(invoker: &Invoker, context: &dyn ResolutionContext, a: i32, b: i32) -> Result<i32> {
    invoker
        .invoke(context, None, vec![Box::new(a) as Value, Box::new(b) as Value])?
        .into_value::<i32>()
}
