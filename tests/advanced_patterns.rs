//! Integration tests for advanced usage patterns.
//!
//! Demonstrates real-world patterns for wiring an application through the
//! container: configuration objects, services depending on services, shared
//! infrastructure, and decorating definitions after the fact.

use service_container::{Container, Factory};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
struct AppConfig {
    database_url: String,
    max_connections: u32,
}

#[derive(Debug)]
struct DatabaseService {
    connection_string: String,
}

#[derive(Debug)]
struct ReportService {
    source: Arc<DatabaseService>,
}

#[test]
fn test_configuration_pattern() {
    // Common pattern: register application configuration once, resolve it
    // anywhere a factory needs it.
    let mut container = Container::new();

    container.set_service("config", |_| {
        Arc::new(AppConfig {
            database_url: "postgresql://localhost/mydb".to_string(),
            max_connections: 100,
        })
    });

    let config: Arc<AppConfig> = container.get("config").unwrap();
    assert_eq!(config.database_url, "postgresql://localhost/mydb");
    assert_eq!(config.max_connections, 100);
}

#[test]
fn test_services_wired_from_other_services() {
    let mut container = Container::new();

    container.set_service("config", |_| {
        Arc::new(AppConfig {
            database_url: "postgres://localhost".to_string(),
            max_connections: 10,
        })
    });

    container.set_service("database", |c: &Container| {
        let config: Arc<AppConfig> = c.get("config").unwrap();
        Arc::new(DatabaseService {
            connection_string: config.database_url.clone(),
        })
    });

    container.set_service("reports", |c: &Container| {
        let database: Arc<DatabaseService> = c.get("database").unwrap();
        Arc::new(ReportService { source: database })
    });

    let reports: Arc<ReportService> = container.get("reports").unwrap();
    assert_eq!(reports.source.connection_string, "postgres://localhost");
}

#[test]
fn test_shared_infrastructure_is_constructed_once() {
    let connections = Arc::new(AtomicUsize::new(0));
    let probe = connections.clone();

    let mut container = Container::new();

    container.set_service(
        "database",
        Container::share(move |_| {
            probe.fetch_add(1, Ordering::SeqCst);
            Arc::new(DatabaseService {
                connection_string: "postgres://localhost".to_string(),
            })
        }),
    );

    // Two dependents, one connection.
    container.set_service("reports", |c: &Container| {
        let database: Arc<DatabaseService> = c.get("database").unwrap();
        Arc::new(ReportService { source: database })
    });
    container.set_service("audit", |c: &Container| {
        let database: Arc<DatabaseService> = c.get("database").unwrap();
        Arc::new(ReportService { source: database })
    });

    let reports: Arc<ReportService> = container.get("reports").unwrap();
    let audit: Arc<ReportService> = container.get("audit").unwrap();

    assert!(Arc::ptr_eq(&reports.source, &audit.source));
    assert_eq!(connections.load(Ordering::SeqCst), 1);
}

#[test]
fn test_protect_stores_a_strategy_as_a_parameter() {
    // Pattern: store a callable the application invokes itself, not a
    // producer the container should run.
    let mut container = Container::new();

    container.set_service(
        "id-generator",
        Container::protect(|_| Arc::new(String::from("id-0001"))),
    );

    let generator = container
        .get_service("id-generator")
        .unwrap()
        .downcast::<Factory>()
        .unwrap();

    let first = generator(&container);
    let second = generator(&container);
    assert_eq!(
        first.downcast_ref::<String>(),
        second.downcast_ref::<String>()
    );
}

#[test]
fn test_decorating_an_installed_definition() {
    let mut container = Container::new();

    container.set_service("greeting", |_| Arc::new("hello".to_string()));

    // Later wiring stage decorates the definition in place.
    let decorated = container
        .extend("greeting", |origin, _| {
            let origin = origin.downcast_ref::<String>().unwrap().clone();
            Arc::new(format!("{origin}, world"))
        })
        .unwrap();
    container.set_service("greeting", decorated);

    let greeting: Arc<String> = container.get("greeting").unwrap();
    assert_eq!(&*greeting, "hello, world");
}

#[test]
fn test_share_composed_with_extend() {
    let builds = Arc::new(AtomicUsize::new(0));
    let probe = builds.clone();

    let mut container = Container::new();
    container.set_service("base", move |_| {
        probe.fetch_add(1, Ordering::SeqCst);
        Arc::new(1i32)
    });

    // Decorate the definition, then share the decorated result.
    let extended = container
        .extend("base", |origin, _| {
            let base = origin.downcast_ref::<i32>().copied().unwrap();
            Arc::new(base + 41)
        })
        .unwrap();
    container.set_service("base", Container::share(extended));

    let first: Arc<i32> = container.get("base").unwrap();
    let second: Arc<i32> = container.get("base").unwrap();

    assert_eq!(*first, 42);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(builds.load(Ordering::SeqCst), 1);
}

#[test]
fn test_rewrapping_a_raw_factory() {
    let mut container = Container::new();
    container.set_service("token", |_| Arc::new("secret".to_string()));

    // Fetch the definition without constructing, re-install it shared.
    let original = container.raw("token").unwrap();
    container.set_service(
        "token",
        Container::share(move |c: &Container| original(c)),
    );

    let first: Arc<String> = container.get("token").unwrap();
    let second: Arc<String> = container.get("token").unwrap();
    assert_eq!(&*first, "secret");
    assert!(Arc::ptr_eq(&first, &second));
}
