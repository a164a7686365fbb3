//! Service registry tests

use dif_domain::{Error, ResolutionContext, ResolutionContextExt, Type};
use dif_infrastructure::di::{ServiceCollection, ServiceProvider};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

struct FixedClock(u64);

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Stamp(u64);

#[test]
fn test_instance_is_cloned_out() {
    let mut services = ServiceCollection::new();
    services.add_instance(Arc::new(FixedClock(7)) as Arc<dyn Clock>);
    let provider = services.build();

    let first = provider.get::<Arc<dyn Clock>>().unwrap();
    let second = provider.get::<Arc<dyn Clock>>().unwrap();
    assert_eq!(first.now(), 7);
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_singleton_factory_runs_once() {
    let builds = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&builds);

    let mut services = ServiceCollection::new();
    services.add_singleton(move |_: &ServiceProvider| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(FixedClock(1)) as Arc<dyn Clock>)
    });
    let provider = services.build();
    assert_eq!(provider.built_singletons(), 0);

    for _ in 0..3 {
        provider.get::<Arc<dyn Clock>>().unwrap();
    }
    assert_eq!(builds.load(Ordering::SeqCst), 1);
    assert_eq!(provider.built_singletons(), 1);
}

#[test]
fn test_transient_factory_resolves_dependencies() {
    let builds = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&builds);

    let mut services = ServiceCollection::new();
    services
        .add_instance(Arc::new(FixedClock(42)) as Arc<dyn Clock>)
        .add_transient(move |provider: &ServiceProvider| {
            counter.fetch_add(1, Ordering::SeqCst);
            let clock = provider.get::<Arc<dyn Clock>>()?;
            Ok(Stamp(clock.now()))
        });
    let provider = services.build();

    assert_eq!(provider.get::<Stamp>().unwrap().0, 42);
    assert_eq!(provider.get::<Stamp>().unwrap().0, 42);
    assert_eq!(builds.load(Ordering::SeqCst), 2);
}

#[test]
fn test_unregistered_type_is_unresolved() {
    let provider = ServiceCollection::new().build();

    match provider.resolve(&Type::of::<Stamp>()) {
        Err(Error::UnresolvedDependency { type_name, .. }) => {
            assert!(type_name.ends_with("Stamp"));
        }
        other => panic!("Expected UnresolvedDependency, got {:?}", other.err()),
    }
}

#[test]
fn test_factory_errors_propagate_unchanged() {
    let mut services = ServiceCollection::new();
    services.add_transient(|_: &ServiceProvider| -> dif_domain::Result<Stamp> {
        Err(Error::config("clock offline"))
    });
    let provider = services.build();

    let error = provider.get::<Stamp>().unwrap_err();
    assert!(matches!(
        error,
        Error::Configuration { ref message, .. } if message == "clock offline"
    ));
}

#[test]
fn test_later_registration_replaces_earlier() {
    let mut services = ServiceCollection::new();
    services.add_instance(Stamp(1)).add_instance(Stamp(2));
    assert_eq!(services.len(), 1);
    assert!(services.contains::<Stamp>());

    let provider = services.build();
    assert!(provider.contains(&Type::of::<Stamp>()));
    assert_eq!(provider.get::<Stamp>().unwrap().0, 2);
}

#[test]
fn test_shared_returns_the_same_provider() {
    let mut services = ServiceCollection::new();
    services.add_instance(Stamp(5));
    let provider = services.build();

    let shared = provider.shared().unwrap();
    assert_eq!(shared.get::<Stamp>().unwrap().0, 5);
}

#[test]
fn test_concurrent_singleton_resolution() {
    let mut services = ServiceCollection::new();
    services.add_singleton(|_: &ServiceProvider| Ok(Arc::new(AtomicUsize::new(0))));
    let provider = services.build();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let provider = Arc::clone(&provider);
            std::thread::spawn(move || {
                provider
                    .get::<Arc<AtomicUsize>>()
                    .unwrap()
                    .fetch_add(1, Ordering::SeqCst)
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(
        provider
            .get::<Arc<AtomicUsize>>()
            .unwrap()
            .load(Ordering::SeqCst),
        8
    );
}
