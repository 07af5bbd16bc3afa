//! Sharing, protecting and extending service definitions.
//!
//! Demonstrates:
//! - `Container::share` to construct expensive services once
//! - `Container::protect` to store a callable as a retrievable value
//! - `Container::extend` to decorate an installed definition
//! - The per-instance trace callback plus `tracing` log output
//!
//! Run with: `RUST_LOG=debug cargo run --example shared_services`

use service_container::{Container, Factory};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== service-container: Shared Services ===\n");

    let mut container = Container::new();
    container.set_trace_callback(|event| println!("   [trace] {}", event));

    // -------------------------------------------------------------------------
    // 1. Share: the connection is established once
    // -------------------------------------------------------------------------
    println!("1. Sharing an expensive service...");

    let connections = Arc::new(AtomicUsize::new(0));
    let probe = connections.clone();

    container.set_service(
        "database",
        Container::share(move |_| {
            probe.fetch_add(1, Ordering::SeqCst);
            println!("   (connecting to database...)");
            Arc::new("postgres://localhost/app".to_string())
        }),
    );

    let first: Arc<String> = container.get("database").unwrap();
    let second: Arc<String> = container.get("database").unwrap();

    println!("   resolved twice, connected {} time(s)", connections.load(Ordering::SeqCst));
    println!("   identical value: {}", Arc::ptr_eq(&first, &second));

    // -------------------------------------------------------------------------
    // 2. Protect: store a callable as a parameter
    // -------------------------------------------------------------------------
    println!("\n2. Protecting a callable...");

    container.set_service(
        "greeter",
        Container::protect(|_| Arc::new("Hello from the protected callable!".to_string())),
    );

    let greeter = container
        .get_service("greeter")
        .unwrap()
        .downcast::<Factory>()
        .unwrap();
    let greeting = greeter(&container);
    println!("   invoked by hand: {}", greeting.downcast_ref::<String>().unwrap());

    // -------------------------------------------------------------------------
    // 3. Extend: decorate the installed definition
    // -------------------------------------------------------------------------
    println!("\n3. Extending the database definition...");

    let extended = container
        .extend("database", |origin, _| {
            let url = origin.downcast_ref::<String>().unwrap().clone();
            Arc::new(format!("{url}?sslmode=require"))
        })
        .unwrap();
    container.set_service("database", extended);

    let secured: Arc<String> = container.get("database").unwrap();
    println!("   decorated url: {}", secured);

    println!("\n=== Done ===");
}
