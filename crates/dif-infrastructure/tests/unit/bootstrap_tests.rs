//! Bootstrap tests

use dif_application::{Mediator, Request};
use dif_domain::constants::HANDLE_CONVENTION;
use dif_domain::{Error, MethodDescriptor, ResolutionContextExt, Result, Type};
use dif_infrastructure::config::{AppConfig, DispatchConfig};
use dif_infrastructure::di::init_app;
use std::sync::Arc;

#[derive(Clone)]
struct Prefix(&'static str);

struct Echo(String);

impl Echo {
    async fn handle(self, prefix: Prefix) -> Result<String> {
        Ok(format!("{}{}", prefix.0, self.0))
    }
}

impl Request for Echo {
    type Response = String;

    fn handler() -> Result<MethodDescriptor> {
        MethodDescriptor::async_method(Echo::handle).map(|m| m.named("Echo::handle"))
    }
}

struct Count(usize);

#[tokio::test]
async fn test_collaborators_resolve_from_provider() {
    let context = init_app(AppConfig::default(), |services| {
        services.add_instance(Prefix("> "));
        Ok(())
    })
    .unwrap();

    let reply = context
        .mediator()
        .unwrap()
        .send(Echo("hi".to_string()))
        .await
        .unwrap();
    assert_eq!(reply, "> hi");
}

#[tokio::test]
async fn test_mediator_handles_share_one_cache() {
    let context = init_app(AppConfig::default(), |services| {
        services.add_instance(Prefix(""));
        Ok(())
    })
    .unwrap();

    let first = context.mediator().unwrap();
    first.send(Echo("a".to_string())).await.unwrap();
    let second = context.mediator().unwrap();
    second.send(Echo("b".to_string())).await.unwrap();

    assert!(Arc::ptr_eq(
        first.dispatcher().cache(),
        second.dispatcher().cache()
    ));
    assert_eq!(second.dispatcher().cache().len(), 1);

    // Validator and mapper keep their own caches
    let validator = context.validator().unwrap();
    assert!(!Arc::ptr_eq(
        validator.dispatcher().cache(),
        first.dispatcher().cache()
    ));
}

#[tokio::test]
async fn test_method_table_is_shared_by_collaborators() {
    let context = init_app(AppConfig::default(), |_| Ok(())).unwrap();

    context
        .methods()
        .unwrap()
        .register::<Count>(
            HANDLE_CONVENTION,
            MethodDescriptor::async_method(|count: Count| async move {
                Ok::<_, Error>(count.0 * 2)
            })
            .unwrap(),
        )
        .unwrap();

    let doubled: usize = context.mediator().unwrap().send_value(Count(21)).await.unwrap();
    assert_eq!(doubled, 42);
    assert!(Arc::ptr_eq(
        context.mapper().unwrap().dispatcher().methods(),
        context.validator().unwrap().dispatcher().methods()
    ));
}

#[test]
fn test_dispatch_config_reaches_factory() {
    let config = AppConfig {
        dispatch: DispatchConfig {
            strict_arguments: true,
        },
        ..AppConfig::default()
    };
    let context = init_app(config, |_| Ok(())).unwrap();

    assert!(context.factory().unwrap().strict_arguments());
    assert!(context.config().dispatch.strict_arguments);
    assert_eq!(
        context.provider().get::<AppConfig>().unwrap(),
        *context.config()
    );
}

#[test]
fn test_configure_errors_abort_bootstrap() {
    let error = init_app(AppConfig::default(), |_| Err(Error::config("no store"))).unwrap_err();
    assert!(matches!(error, Error::Configuration { .. }));
}

#[test]
fn test_configure_may_replace_collaborators() {
    let context = init_app(AppConfig::default(), |services| {
        services.add_transient(|provider| Ok(Mediator::new(provider.shared()?)));
        Ok(())
    })
    .unwrap();

    // A standalone mediator owns its cache, so two resolutions no longer share one
    let first = context.mediator().unwrap();
    let second = context.mediator().unwrap();
    assert!(!Arc::ptr_eq(
        first.dispatcher().cache(),
        second.dispatcher().cache()
    ));
    assert!(context.provider().contains(&Type::of::<Mediator>()));
}
