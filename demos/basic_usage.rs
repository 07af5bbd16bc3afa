//! Basic usage example for service-container.
//!
//! Demonstrates:
//! - Registering factories under string identifiers
//! - Resolving services with `get()` (returns `Arc<T>`) and `get_service()`
//! - Checking registration status with `service_exists()`
//! - Removing definitions with `unset_service()`
//! - Listing identifiers with `keys()`
//!
//! Run with: `cargo run --example basic_usage`

use service_container::Container;
use std::sync::Arc;

// Custom struct to demonstrate complex types
#[derive(Debug, Clone, PartialEq)]
struct AppConfig {
    name: String,
    version: u32,
    debug_mode: bool,
}

fn main() {
    println!("=== service-container: Basic Usage ===\n");

    let mut container = Container::new();

    // -------------------------------------------------------------------------
    // 1. Register factories
    // -------------------------------------------------------------------------
    println!("1. Registering factories...");

    container.set_service("answer", |_| Arc::new(42i32));
    container.set_service("greeting", |_| Arc::new("Hello, service-container!".to_string()));
    container.set_service("config", |_| {
        Arc::new(AppConfig {
            name: "demo".to_string(),
            version: 1,
            debug_mode: true,
        })
    });

    println!("   Registered: answer, greeting, config");

    // -------------------------------------------------------------------------
    // 2. Resolve services
    // -------------------------------------------------------------------------
    println!("\n2. Resolving services...");

    let answer: Arc<i32> = container.get("answer").unwrap();
    let greeting: Arc<String> = container.get("greeting").unwrap();
    let config: Arc<AppConfig> = container.get("config").unwrap();

    println!("   answer   = {}", answer);
    println!("   greeting = {}", greeting);
    println!("   config   = {:?}", config);

    // -------------------------------------------------------------------------
    // 3. Factories see the container
    // -------------------------------------------------------------------------
    println!("\n3. Wiring a service from another service...");

    container.set_service("banner", |c: &Container| {
        let config: Arc<AppConfig> = c.get("config").unwrap();
        Arc::new(format!("{} v{}", config.name, config.version))
    });

    let banner: Arc<String> = container.get("banner").unwrap();
    println!("   banner   = {}", banner);

    // -------------------------------------------------------------------------
    // 4. Inspect and remove
    // -------------------------------------------------------------------------
    println!("\n4. Inspecting the registry...");

    println!("   service_exists(\"answer\") = {}", container.service_exists("answer"));
    let mut keys = container.keys();
    keys.sort();
    println!("   keys = {:?}", keys);

    container.unset_service("answer");
    println!("   after unset: service_exists(\"answer\") = {}", container.service_exists("answer"));

    println!("\n=== Done ===");
}
