//! Invoker factory tests

use crate::test_utils::MapContext;
use dif_application::{Binding, InvokerFactory};
use dif_domain::{Error, MethodDescriptor, ResolutionContext, Type, Value};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

trait Database: Send + Sync {
    fn query(&self) -> Vec<String>;
}

#[derive(Clone)]
struct InMemoryDatabase {
    rows: Vec<String>,
}

impl Database for InMemoryDatabase {
    fn query(&self) -> Vec<String> {
        self.rows.clone()
    }
}

struct ListRows;

#[derive(Clone)]
struct Calculator;

impl Calculator {
    fn add(&self, a: i32, b: i32) -> i32 {
        a + b
    }
}

fn database() -> Arc<dyn Database> {
    Arc::new(InMemoryDatabase {
        rows: vec!["milk".to_string(), "eggs".to_string()],
    })
}

fn ints(values: &[i32]) -> Vec<Value> {
    values.iter().map(|v| Box::new(*v) as Value).collect()
}

#[test]
fn test_add_with_explicit_arguments() {
    let add = MethodDescriptor::function(|a: i32, b: i32| a + b).named("add");
    let invoker = InvokerFactory::new()
        .build(&add, &[Type::of::<i32>(), Type::of::<i32>()])
        .unwrap();

    let context = MapContext::new();
    let output = invoker.invoke(&context, None, ints(&[10, 20])).unwrap();

    assert_eq!(output.into_value::<i32>().unwrap(), 30);
    assert_eq!(context.resolutions(), 0);
}

#[test]
fn test_explicit_arguments_mixed_with_resolved_service() {
    let add = MethodDescriptor::function(|a: i32, b: i32, calculator: Calculator| {
        calculator.add(a, b)
    });
    let invoker = InvokerFactory::new()
        .build(&add, &[Type::of::<i32>(), Type::of::<i32>()])
        .unwrap();

    assert_eq!(invoker.plan().explicit_count(), 2);
    assert_eq!(invoker.plan().bindings()[2], Binding::Resolve);

    let context = MapContext::new().with(Calculator);
    let output = invoker.invoke(&context, None, ints(&[10, 20])).unwrap();
    assert_eq!(output.into_value::<i32>().unwrap(), 30);
    assert_eq!(context.resolutions(), 1);
}

#[test]
fn test_explicit_arguments_consumed_in_supplied_order() {
    let describe = MethodDescriptor::function(
        |label: String, calculator: Calculator, first: i32, second: i32| {
            format!("{label}:{}", calculator.add(first * 10, second))
        },
    );
    let invoker = InvokerFactory::new()
        .build(
            &describe,
            &[Type::of::<String>(), Type::of::<i32>(), Type::of::<i32>()],
        )
        .unwrap();

    let positions: Vec<Option<usize>> = invoker
        .plan()
        .bindings()
        .iter()
        .map(|b| match b {
            Binding::Explicit { position, .. } => Some(*position),
            Binding::Resolve => None,
        })
        .collect();
    assert_eq!(positions, [Some(0), None, Some(1), Some(2)]);

    let context = MapContext::new().with(Calculator);
    let arguments: Vec<Value> = vec![
        Box::new("sum".to_string()),
        Box::new(4_i32),
        Box::new(2_i32),
    ];
    let output = invoker.invoke(&context, None, arguments).unwrap();
    assert_eq!(output.into_value::<String>().unwrap(), "sum:42");
}

#[test]
fn test_receiver_method_resolves_database() {
    let handle = MethodDescriptor::method(|_request: ListRows, db: Arc<dyn Database>| db.query())
        .unwrap()
        .named("ListRows::handle");
    let invoker = InvokerFactory::new().build(&handle, &[]).unwrap();

    let context = MapContext::new().with(database());
    let output = invoker
        .invoke(&context, Some(Box::new(ListRows) as Value), Vec::new())
        .unwrap();

    assert_eq!(output.into_value::<Vec<String>>().unwrap(), ["milk", "eggs"]);
}

#[test]
fn test_unresolved_dependency_never_calls_method() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let handle = MethodDescriptor::method(move |_request: ListRows, db: Arc<dyn Database>| {
        counter.fetch_add(1, Ordering::SeqCst);
        db.query()
    })
    .unwrap();
    let invoker = InvokerFactory::new().build(&handle, &[]).unwrap();

    let error = invoker
        .invoke(&MapContext::new(), Some(Box::new(ListRows) as Value), Vec::new())
        .unwrap_err();

    assert!(matches!(error, Error::UnresolvedDependency { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_explicit_type_mismatch_never_calls_method() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let add = MethodDescriptor::function(move |a: i32, b: i32| {
        counter.fetch_add(1, Ordering::SeqCst);
        a + b
    })
    .named("add");
    let invoker = InvokerFactory::new()
        .build(&add, &[Type::of::<i32>(), Type::of::<i32>()])
        .unwrap();

    let arguments: Vec<Value> = vec![Box::new(10_i32), Box::new("twenty")];
    let error = invoker
        .invoke(&MapContext::new(), None, arguments)
        .unwrap_err();

    match error {
        Error::TypeMismatch {
            method, expected, ..
        } => {
            assert_eq!(method, "add");
            assert_eq!(expected, "i32");
        }
        other => panic!("Expected TypeMismatch, got {other:?}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_void_method_returns_sentinel() {
    let seen = Arc::new(AtomicUsize::new(0));
    let sink = Arc::clone(&seen);
    let record = MethodDescriptor::function(move |n: usize| {
        sink.store(n, Ordering::SeqCst);
    });
    let invoker = InvokerFactory::new()
        .build(&record, &[Type::of::<usize>()])
        .unwrap();

    let output = invoker
        .invoke(&MapContext::new(), None, vec![Box::new(7_usize) as Value])
        .unwrap();

    assert!(output.is_void());
    assert_eq!(seen.load(Ordering::SeqCst), 7);
}

#[test]
fn test_building_twice_yields_identical_plans() {
    let add = MethodDescriptor::function(|a: i32, calculator: Calculator, b: i32| {
        calculator.add(a, b)
    });
    let explicit = [Type::of::<i32>(), Type::of::<i32>()];
    let factory = InvokerFactory::new();

    let first = factory.build(&add, &explicit).unwrap();
    let second = factory.build(&add, &explicit).unwrap();
    assert_eq!(first.plan(), second.plan());

    let context = MapContext::new().with(Calculator);
    let a = first.invoke(&context, None, ints(&[1, 2])).unwrap();
    let b = second.invoke(&context, None, ints(&[1, 2])).unwrap();
    assert_eq!(a.into_value::<i32>().unwrap(), b.into_value::<i32>().unwrap());
}

#[test]
fn test_assignable_explicit_argument_is_converted() {
    let count = MethodDescriptor::function(|db: Arc<dyn Database>| db.query().len());
    let memory = Type::builder::<InMemoryDatabase>()
        .assignable_to::<Arc<dyn Database>>(|m| Arc::new(m) as Arc<dyn Database>)
        .build();
    let invoker = InvokerFactory::new().build(&count, &[memory]).unwrap();
    assert!(invoker.plan().bindings()[0].is_explicit());

    let argument: Value = Box::new(InMemoryDatabase {
        rows: vec!["a".to_string(); 3],
    });
    let output = invoker
        .invoke(&MapContext::new(), None, vec![argument])
        .unwrap();
    assert_eq!(output.into_value::<usize>().unwrap(), 3);
}

#[test]
fn test_greedy_matcher_prefers_earliest_assignable_parameter() {
    // Both parameters accept `String`; the first one wins the explicit argument.
    let greet = MethodDescriptor::function(|greeting: String, name: String| {
        format!("{greeting}, {name}")
    });
    let invoker = InvokerFactory::new()
        .build(&greet, &[Type::of::<String>()])
        .unwrap();

    assert_eq!(
        invoker.plan().bindings(),
        [
            Binding::Explicit {
                position: 0,
                source: Type::of::<String>()
            },
            Binding::Resolve
        ]
    );

    let context = MapContext::new().with("world".to_string());
    let output = invoker
        .invoke(&context, None, vec![Box::new("hello".to_string()) as Value])
        .unwrap();
    assert_eq!(output.into_value::<String>().unwrap(), "hello, world");
}

#[test]
fn test_missing_explicit_argument() {
    let add = MethodDescriptor::function(|a: i32, b: i32| a + b);
    let invoker = InvokerFactory::new()
        .build(&add, &[Type::of::<i32>(), Type::of::<i32>()])
        .unwrap();

    let error = invoker
        .invoke(&MapContext::new(), None, ints(&[1]))
        .unwrap_err();
    match error {
        Error::MissingArgument {
            position, provided, ..
        } => {
            assert_eq!(position, 1);
            assert_eq!(provided, 1);
        }
        other => panic!("Expected MissingArgument, got {other:?}"),
    }
}

#[test]
fn test_instance_method_requires_receiver() {
    let handle = MethodDescriptor::method(|_request: ListRows| 1_u8).unwrap();
    let invoker = InvokerFactory::new().build(&handle, &[]).unwrap();

    let missing = invoker.invoke(&MapContext::new(), None, Vec::new());
    assert!(matches!(missing, Err(Error::MissingReceiver { .. })));

    let wrong = invoker.invoke(&MapContext::new(), Some(Box::new(5_u8) as Value), Vec::new());
    assert!(matches!(wrong, Err(Error::TypeMismatch { .. })));
}

#[test]
fn test_resolved_value_of_wrong_type_is_rejected() {
    let use_calculator = MethodDescriptor::function(|calculator: Calculator| calculator.add(1, 1));
    let invoker = InvokerFactory::new().build(&use_calculator, &[]).unwrap();

    let context = MapContext::new().with_raw::<Calculator>(|| Box::new(0_u8) as Value);
    let error = invoker.invoke(&context, None, Vec::new()).unwrap_err();
    assert!(matches!(error, Error::TypeMismatch { .. }));
}

#[test]
fn test_bound_target_ignores_call_time_receiver() {
    let scale = MethodDescriptor::method(|factor: i64, value: i64| factor * value).unwrap();
    let invoker = InvokerFactory::new()
        .build_bound(&scale, 3_i64, &[Type::of::<i64>()])
        .unwrap();
    assert!(invoker.is_bound());

    let output = invoker
        .invoke(
            &MapContext::new(),
            Some(Box::new(100_i64) as Value),
            vec![Box::new(14_i64) as Value],
        )
        .unwrap();
    assert_eq!(output.into_value::<i64>().unwrap(), 42);
}

#[test]
fn test_bound_target_must_match_receiver() {
    let scale = MethodDescriptor::method(|factor: i64, value: i64| factor * value).unwrap();
    let error = InvokerFactory::new()
        .build_bound(&scale, 3_i32, &[Type::of::<i64>()])
        .unwrap_err();
    assert!(matches!(error, Error::UnsupportedMethodShape { .. }));

    let free = MethodDescriptor::function(|value: i64| value);
    let error = InvokerFactory::new()
        .build_bound(&free, 3_i64, &[])
        .unwrap_err();
    assert!(matches!(error, Error::UnsupportedMethodShape { .. }));
}

#[test]
fn test_unconsumed_explicit_types() {
    let negate = MethodDescriptor::function(|value: i32| -value);
    let explicit = [Type::of::<String>()];

    let lenient = InvokerFactory::new().build(&negate, &explicit).unwrap();
    assert_eq!(lenient.plan().unconsumed(), explicit);

    let strict = InvokerFactory::new()
        .with_strict_arguments(true)
        .build(&negate, &explicit);
    assert!(matches!(strict, Err(Error::UnsupportedMethodShape { .. })));
}

#[tokio::test]
async fn test_async_result_is_returned_as_handle() {
    let fetch = MethodDescriptor::async_function(|db: Arc<dyn Database>| async move {
        db.query().len()
    });
    let invoker = InvokerFactory::new().build(&fetch, &[]).unwrap();

    let context = MapContext::new().with(database());
    let output = invoker.invoke(&context, None, Vec::new()).unwrap();
    let handle = output.into_future::<usize>().unwrap();
    assert_eq!(handle.await, 2);
}

#[test]
fn test_concurrent_invocations_share_one_invoker() {
    let add = MethodDescriptor::function(|a: i32, b: i32, calculator: Calculator| {
        calculator.add(a, b)
    });
    let invoker = InvokerFactory::new()
        .build(&add, &[Type::of::<i32>(), Type::of::<i32>()])
        .unwrap();
    let context: Arc<dyn ResolutionContext> = Arc::new(MapContext::new().with(Calculator));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let invoker = invoker.clone();
            let context = Arc::clone(&context);
            std::thread::spawn(move || {
                invoker
                    .invoke(context.as_ref(), None, ints(&[i, i]))
                    .unwrap()
                    .into_value::<i32>()
                    .unwrap()
            })
        })
        .collect();

    let results: Vec<i32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, (0..8).map(|i| i * 2).collect::<Vec<_>>());
}
