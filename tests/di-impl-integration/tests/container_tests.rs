//! 容器集成测试：扫描、装配、单例语义与启动流程

use di_abstractions::{ApplicationContext, BeanClass, BeanFactory, Constructor, Stereotype};
use di_impl::{CatalogBeanScanner, DefaultListableBeanFactory, GenericApplicationContext};
use infrastructure_common::{BeanError, BeanErrorKind, TypeInfo};
use infrastructure_composition::{ContainerBootstrapper, SettingsLoader};
use std::collections::HashSet;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

mod billing {
    use std::sync::Arc;

    pub trait Service: Send + Sync {
        fn describe(&self) -> String;
    }

    pub struct ServiceImpl;

    impl Service for ServiceImpl {
        fn describe(&self) -> String {
            "billing".to_string()
        }
    }

    pub struct Consumer {
        pub service: Arc<dyn Service>,
    }

    pub struct Ledger;
}

mod web {
    use std::sync::Arc;

    pub struct InvoiceController {
        pub consumer: Arc<super::billing::Consumer>,
    }

    pub struct HealthController;
}

mod alternative {
    pub struct OtherServiceImpl;

    impl super::billing::Service for OtherServiceImpl {
        fn describe(&self) -> String {
            "other".to_string()
        }
    }
}

use billing::{Consumer, Ledger, Service, ServiceImpl};

fn service_impl() -> BeanClass {
    BeanClass::builder::<ServiceImpl>()
        .constructor(Constructor::no_args(|| ServiceImpl))
        .implements::<dyn Service, _>(|bean| bean)
        .stereotype(Stereotype::Service)
        .build()
}

fn other_service_impl() -> BeanClass {
    BeanClass::builder::<alternative::OtherServiceImpl>()
        .constructor(Constructor::no_args(|| alternative::OtherServiceImpl))
        .implements::<dyn Service, _>(|bean| bean)
        .build()
}

fn consumer() -> BeanClass {
    BeanClass::builder::<Consumer>()
        .constructor(
            Constructor::new(|args| {
                Ok(Consumer {
                    service: args.next::<dyn Service>()?,
                })
            })
            .with_parameter::<dyn Service>()
            .injectable(),
        )
        .build()
}

fn ledger() -> BeanClass {
    BeanClass::builder::<Ledger>()
        .constructor(Constructor::no_args(|| Ledger))
        .build()
}

fn invoice_controller() -> BeanClass {
    BeanClass::builder::<web::InvoiceController>()
        .constructor(
            Constructor::new(|args| {
                Ok(web::InvoiceController {
                    consumer: args.next::<Consumer>()?,
                })
            })
            .with_parameter::<Consumer>(),
        )
        .controller()
        .build()
}

fn health_controller() -> BeanClass {
    BeanClass::builder::<web::HealthController>()
        .constructor(Constructor::no_args(|| web::HealthController))
        .controller()
        .build()
}

fn factory(classes: Vec<BeanClass>) -> DefaultListableBeanFactory {
    DefaultListableBeanFactory::new(
        CatalogBeanScanner::new().register_all(classes),
        [module_path!()],
    )
}

fn package(name: &str) -> String {
    format!("{}::{}", module_path!(), name)
}

fn same_instance<A: ?Sized, B: ?Sized>(a: &Arc<A>, b: &Arc<B>) -> bool {
    Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>()
}

#[test]
fn test_service_consumer_scenario() {
    let factory = factory(vec![service_impl(), consumer()]);
    factory.initialize().unwrap();

    assert_eq!(factory.singleton_count(), 2);
    let consumer = factory.get_bean::<Consumer>().unwrap();
    let service = factory.get_bean::<dyn Service>().unwrap();
    assert!(same_instance(&consumer.service, &service));
    assert!(same_instance(
        &service,
        &factory.get_bean::<ServiceImpl>().unwrap()
    ));
    assert_eq!(consumer.service.describe(), "billing");
}

#[test]
fn test_repeated_lookup_returns_identical_instance() {
    let factory = factory(vec![service_impl(), consumer(), ledger()]);
    factory.initialize().unwrap();

    let first = factory.get_bean::<Ledger>().unwrap();
    let second = factory.get_bean::<Ledger>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let first = factory.get_bean::<dyn Service>().unwrap();
    let second = factory.get_bean::<dyn Service>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_zero_argument_bean_needs_no_other_bean() {
    let factory = factory(vec![ledger()]);
    factory.initialize().unwrap();

    assert_eq!(
        factory.get_bean_classes(),
        HashSet::from([TypeInfo::of::<Ledger>()])
    );
    assert!(factory.get_bean::<Ledger>().is_ok());
}

#[test]
fn test_missing_implementation_fails_initialize() {
    let factory = factory(vec![consumer(), ledger()]);
    let error = factory.initialize().unwrap_err();

    assert_eq!(error.kind(), BeanErrorKind::UnresolvedDependency);
    assert!(!factory.contains_singleton(&TypeInfo::of::<Consumer>()));

    assert!(matches!(
        factory.get_bean::<dyn Service>(),
        Err(BeanError::NoConcreteClass { .. })
    ));
}

#[test]
fn test_several_implementations_are_ambiguous() {
    let factory = factory(vec![service_impl(), other_service_impl(), consumer()]);
    let error = factory.initialize().unwrap_err();
    assert_eq!(error.kind(), BeanErrorKind::InstantiationFailure);
    assert!(!factory.contains_singleton(&TypeInfo::of::<Consumer>()));

    match factory.get_bean::<dyn Service>() {
        Err(BeanError::AmbiguousConcreteClass { candidates, .. }) => {
            assert_eq!(candidates.len(), 2);
        }
        other => panic!("期望歧义错误, 实际: {:?}", other.map(|_| ())),
    }

    // 具体类型仍然可以直接获取
    let other = factory.get_bean::<alternative::OtherServiceImpl>().unwrap();
    assert_eq!(other.describe(), "other");
}

#[test]
fn test_controllers_are_enumerated() {
    let factory = factory(vec![
        service_impl(),
        consumer(),
        ledger(),
        invoice_controller(),
        health_controller(),
    ]);
    factory.initialize().unwrap();

    let controllers = factory.get_controllers();
    let mut names: Vec<&str> = controllers.keys().map(TypeInfo::short_name).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["HealthController", "InvoiceController"]);

    let invoice = controllers[&TypeInfo::of::<web::InvoiceController>()]
        .clone()
        .downcast::<web::InvoiceController>()
        .unwrap();
    assert!(Arc::ptr_eq(
        &invoice.consumer,
        &factory.get_bean::<Consumer>().unwrap()
    ));

    let services = factory.get_beans_with_stereotype(Stereotype::Service);
    assert_eq!(services.len(), 1);
    assert!(services.contains_key(&TypeInfo::of::<ServiceImpl>()));
}

#[test]
fn test_clear_then_initialize_again() {
    let factory = factory(vec![service_impl(), consumer()]);
    factory.initialize().unwrap();
    let before = factory.get_bean::<Consumer>().unwrap();

    factory.clear();
    assert!(factory.get_bean_classes().is_empty());
    assert!(factory.get_controllers().is_empty());
    assert!(factory.get_bean::<Consumer>().is_err());

    factory.initialize().unwrap();
    let after = factory.get_bean::<Consumer>().unwrap();
    assert!(!Arc::ptr_eq(&before, &after));
}

#[test]
fn test_reinitialize_keeps_existing_singletons() {
    let factory = factory(vec![service_impl(), consumer()]);
    factory.initialize().unwrap();
    let before = factory.get_bean::<Consumer>().unwrap();

    factory.initialize().unwrap();
    let after = factory.get_bean::<Consumer>().unwrap();
    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(factory.singleton_count(), 2);
}

#[test]
fn test_scan_limited_to_base_packages() {
    let factory = DefaultListableBeanFactory::new(
        CatalogBeanScanner::new().register_all(vec![
            service_impl(),
            consumer(),
            health_controller(),
        ]),
        [package("web")],
    );
    assert_eq!(factory.base_packages(), [package("web")]);
    factory.initialize().unwrap();

    assert_eq!(
        factory.get_bean_classes(),
        HashSet::from([TypeInfo::of::<web::HealthController>()])
    );
    assert!(!factory.contains_bean_definition(&TypeInfo::of::<dyn Service>()));
}

#[test]
fn test_empty_package_list_yields_empty_container() {
    let factory = DefaultListableBeanFactory::new(
        CatalogBeanScanner::new().register(ledger()),
        Vec::<String>::new(),
    );
    factory.initialize().unwrap();

    assert!(factory.get_bean_classes().is_empty());
    assert!(factory.get_bean::<Ledger>().is_err());
}

#[test]
fn test_blank_bean_name_is_invalid() {
    let factory = factory(vec![ledger()]);
    factory.initialize().unwrap();

    assert_eq!(
        factory.get_bean_by_name("").unwrap_err().kind(),
        BeanErrorKind::InvalidArgument
    );
    assert!(factory.get_bean_by_name("Ledger").is_ok());
}

#[test]
fn test_context_facade() {
    let factory = factory(vec![service_impl(), consumer(), health_controller()]);
    factory.initialize().unwrap();
    let context = GenericApplicationContext::new(Arc::new(factory));

    assert_eq!(context.get_bean_classes().len(), 3);
    assert_eq!(context.get_controllers().len(), 1);
    let consumer = context.get_bean::<Consumer>().unwrap();
    assert!(same_instance(
        &consumer.service,
        &context.get_bean::<dyn Service>().unwrap()
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_lookup_creates_one_instance() {
    static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

    struct Slow;

    let slow = BeanClass::builder::<Slow>()
        .constructor(Constructor::no_args(|| {
            CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(20));
            Slow
        }))
        .build();
    let factory = Arc::new(factory(vec![slow]));
    factory.register_bean_definitions().unwrap();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let factory = Arc::clone(&factory);
            tokio::task::spawn_blocking(move || factory.get_bean::<Slow>())
        })
        .collect();

    let mut instances = Vec::new();
    for handle in handles {
        instances.push(handle.await.unwrap().unwrap());
    }

    assert_eq!(CONSTRUCTIONS.load(Ordering::SeqCst), 1);
    assert!(instances
        .windows(2)
        .all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
}

#[test]
fn test_bootstrap_from_settings_file() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        r#"
        [container]
        base_packages = ["{}", "{}"]
        eager_initialization = false
        "#,
        package("billing"),
        package("web"),
    )?;

    let settings = SettingsLoader::new()
        .with_file(file.path())
        .with_env_source([("INTERFACE21__CONTAINER__EXCLUDE_PACKAGES", package("web"))])
        .load()?;
    assert_eq!(settings.container.exclude_packages, vec![package("web")]);

    let context = ContainerBootstrapper::new(settings)
        .register_all(vec![
            service_impl(),
            consumer(),
            ledger(),
            health_controller(),
        ])
        .bootstrap()?;

    assert_eq!(context.get_bean_classes().len(), 3);
    assert_eq!(context.bean_factory().singleton_count(), 0);

    let consumer = context.get_bean::<Consumer>()?;
    assert_eq!(consumer.service.describe(), "billing");
    assert_eq!(context.bean_factory().singleton_count(), 2);
    assert!(context.bean_factory().stats().initialized_at.is_none());
    Ok(())
}
