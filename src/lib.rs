//! # Service Container
//!
//! A minimal service container: a string-keyed registry of lazily evaluated
//! factory callbacks, with combinators for sharing (singleton memoization),
//! protection (storing callables as plain values), and extension (decorating
//! an existing definition).
//!
//! Factories receive the container instance as an explicit parameter, so
//! service definitions can resolve their own dependencies without any global
//! state.
//!
//! ## Quick Start
//!
//! ```rust
//! use service_container::Container;
//! use std::sync::Arc;
//!
//! let mut container = Container::new();
//!
//! // Register a factory
//! container.set_service("greeting", |_| Arc::new("Hello, World!".to_string()));
//!
//! // Resolve the service
//! let greeting: Arc<String> = container.get("greeting").unwrap();
//! assert_eq!(&*greeting, "Hello, World!");
//! ```
//!
//! ## Features
//!
//! - **Lazy**: factories run only when a service is resolved
//! - **Dynamic**: values are type-erased behind `Arc<dyn Any>` and narrowed by
//!   the caller
//! - **Composable**: share, protect and extend build factories out of
//!   factories
//! - **Tracing support**: optional per-instance callback system for monitoring
//!   container operations
//!
//! ## Main Operations
//!
//! - [`Container::set_service`] - Register a factory under an identifier
//! - [`Container::get_service`] / [`Container::get`] - Resolve a service
//!   (untyped / typed)
//! - [`Container::service_exists`] - Check whether an identifier is registered
//! - [`Container::unset_service`] - Remove a registered identifier
//! - [`Container::raw`] - Fetch the stored factory without invoking it
//! - [`Container::share`] - Memoize a factory's first result
//! - [`Container::protect`] - Store a callable as a value instead of a producer
//! - [`Container::extend`] - Decorate an existing definition
//! - [`Container::keys`] - List registered identifiers

mod container;
mod container_error;
mod container_event;

// Re-export the main public API
pub use container::{Container, Factory, Service, TraceCallback};
pub use container_error::ContainerError;
pub use container_event::ContainerEvent;
