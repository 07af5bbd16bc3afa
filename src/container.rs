//! The service container: a string-keyed map of lazily evaluated factories.
//!
//! Factories receive the container instance as an explicit parameter, so a
//! factory can resolve the services it depends on without any ambient global
//! state. Values are type-erased behind [`Service`] and narrowed by the
//! caller.
//!
//! # Examples
//!
//! ```
//! use service_container::Container;
//! use std::sync::Arc;
//!
//! let mut container = Container::new();
//! container.set_service("greeting", |_| Arc::new("Hello, World!".to_string()));
//!
//! let greeting: Arc<String> = container.get("greeting").unwrap();
//! assert_eq!(&*greeting, "Hello, World!");
//! ```

use std::{
    any::Any,
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex},
};

use tracing::{debug, trace};

use crate::{ContainerError, ContainerEvent};

/// A type-erased service value, as produced by a [`Factory`].
///
/// Callers narrow a `Service` back to its concrete type with
/// `Arc::downcast` or `downcast_ref`, or use the typed
/// [`get`](Container::get) convenience.
pub type Service = Arc<dyn Any + Send + Sync>;

/// A stored service definition: a callback that produces a [`Service`] given
/// the container it was resolved through.
pub type Factory = Arc<dyn Fn(&Container) -> Service + Send + Sync>;

/// Type alias for the user-supplied tracing callback.
///
/// The callback receives a reference to a [`ContainerEvent`] every time the
/// container's registry is interacted with.
pub type TraceCallback = dyn Fn(&ContainerEvent) + Send + Sync + 'static;

/// A minimal service container.
///
/// Maps string identifiers to lazily evaluated [`Factory`] callbacks.
/// Registration goes through `&mut self`, resolution through `&self`; the
/// container itself holds no locks around its registry.
///
/// # Examples
///
/// ```
/// use service_container::Container;
/// use std::sync::Arc;
///
/// let mut container = Container::new();
///
/// container.set_service("answer", |_| Arc::new(42i32));
/// container.set_service("doubled", |c: &Container| {
///     let answer: Arc<i32> = c.get("answer").unwrap();
///     Arc::new(*answer * 2)
/// });
///
/// let doubled: Arc<i32> = container.get("doubled").unwrap();
/// assert_eq!(*doubled, 84);
/// ```
pub struct Container {
    values: HashMap<String, Factory>,
    trace: Option<Arc<TraceCallback>>,
}

impl Container {
    /// Creates a new, empty container.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            trace: None,
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Registry
    // -------------------------------------------------------------------------------------------------

    /// Registers a factory under an identifier.
    ///
    /// Silently overwrites any factory already stored under the same
    /// identifier. The factory is not invoked here; resolution is deferred to
    /// [`get_service`](Self::get_service).
    ///
    /// # Examples
    ///
    /// ```
    /// use service_container::Container;
    /// use std::sync::Arc;
    ///
    /// let mut container = Container::new();
    /// container.set_service("database_url", |_| {
    ///     Arc::new("postgres://localhost/mydb".to_string())
    /// });
    /// assert!(container.service_exists("database_url"));
    /// ```
    pub fn set_service<F>(&mut self, id: impl Into<String>, factory: F)
    where
        F: Fn(&Container) -> Service + Send + Sync + 'static,
    {
        let id = id.into();
        debug!(id = %id, "service factory registered");
        self.emit_event(&ContainerEvent::Set { id: id.clone() });
        self.values.insert(id, Arc::new(factory));
    }

    /// Resolves a service by invoking its registered factory.
    ///
    /// The factory is invoked on every call with this container as its
    /// argument; memoization is opt-in via [`share`](Self::share).
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::NotFound`] when no factory is registered
    /// under the identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use service_container::Container;
    /// use std::sync::Arc;
    ///
    /// let mut container = Container::new();
    /// container.set_service("answer", |_| Arc::new(42i32));
    ///
    /// let service = container.get_service("answer").unwrap();
    /// assert_eq!(service.downcast_ref::<i32>(), Some(&42));
    ///
    /// assert!(container.get_service("missing").is_err());
    /// ```
    pub fn get_service(&self, id: &str) -> Result<Service, ContainerError> {
        let factory = self.values.get(id).cloned();
        self.emit_event(&ContainerEvent::Get {
            id: id.to_owned(),
            found: factory.is_some(),
        });

        match factory {
            Some(factory) => {
                trace!(id = %id, "resolving service");
                Ok(factory(self))
            }
            None => Err(ContainerError::NotFound { id: id.to_owned() }),
        }
    }

    /// Resolves a service and downcasts it to `T`.
    ///
    /// Typed convenience over [`get_service`](Self::get_service); the untyped
    /// contract (one factory, one produced value, caller narrows) is
    /// unchanged.
    ///
    /// # Errors
    ///
    /// - [`ContainerError::NotFound`] when no factory is registered under the
    ///   identifier
    /// - [`ContainerError::TypeMismatch`] when the produced value is not a `T`
    ///
    /// # Examples
    ///
    /// ```
    /// use service_container::{Container, ContainerError};
    /// use std::sync::Arc;
    ///
    /// let mut container = Container::new();
    /// container.set_service("answer", |_| Arc::new(42i32));
    ///
    /// let answer: Arc<i32> = container.get("answer").unwrap();
    /// assert_eq!(*answer, 42);
    ///
    /// let wrong: Result<Arc<String>, _> = container.get("answer");
    /// assert!(matches!(wrong, Err(ContainerError::TypeMismatch { .. })));
    /// ```
    pub fn get<T>(&self, id: &str) -> Result<Arc<T>, ContainerError>
    where
        T: Send + Sync + 'static,
    {
        let service = self.get_service(id)?;
        service
            .downcast::<T>()
            .map_err(|_| ContainerError::TypeMismatch {
                id: id.to_owned(),
                expected: std::any::type_name::<T>(),
            })
    }

    /// Checks whether a factory is registered under an identifier.
    ///
    /// Pure membership test; never invokes the factory.
    pub fn service_exists(&self, id: &str) -> bool {
        let found = self.values.contains_key(id);
        self.emit_event(&ContainerEvent::Contains {
            id: id.to_owned(),
            found,
        });
        found
    }

    /// Removes the factory registered under an identifier.
    ///
    /// Idempotent: removing an unregistered identifier is a no-op. Returns
    /// whether an entry was actually removed.
    pub fn unset_service(&mut self, id: &str) -> bool {
        let removed = self.values.remove(id).is_some();
        if removed {
            debug!(id = %id, "service factory removed");
        }
        self.emit_event(&ContainerEvent::Unset {
            id: id.to_owned(),
            removed,
        });
        removed
    }

    /// Returns the stored factory itself, without invoking it.
    ///
    /// Useful to inspect or re-wrap a definition without triggering
    /// construction.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::NotFound`] when no factory is registered
    /// under the identifier.
    pub fn raw(&self, id: &str) -> Result<Factory, ContainerError> {
        let factory = self.values.get(id).cloned();
        self.emit_event(&ContainerEvent::Raw {
            id: id.to_owned(),
            found: factory.is_some(),
        });
        factory.ok_or_else(|| ContainerError::NotFound { id: id.to_owned() })
    }

    /// Returns all currently registered identifiers, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    // -------------------------------------------------------------------------------------------------
    // Factory combinators
    // -------------------------------------------------------------------------------------------------

    /// Wraps a factory so its result is computed once and then reused.
    ///
    /// The first invocation of the returned factory runs `factory` and caches
    /// the produced [`Service`]; every later invocation returns a clone of the
    /// same `Arc` without running `factory` again. The cache slot is an
    /// explicit `Option` behind its own lock, so the wrapped factory runs at
    /// most once even under concurrent callers and even when it produces a
    /// unit-like value.
    ///
    /// Memoization lives in the returned closure, not in the container: store
    /// the result under an identifier with [`set_service`](Self::set_service)
    /// for the sharing to be visible through
    /// [`get_service`](Self::get_service).
    ///
    /// The slot lock is held while `factory` runs. A shared factory that
    /// resolves its own identifier through the container deadlocks; recursive
    /// definitions are the caller's responsibility.
    ///
    /// # Examples
    ///
    /// ```
    /// use service_container::Container;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    /// use std::sync::Arc;
    ///
    /// let builds = Arc::new(AtomicUsize::new(0));
    /// let probe = builds.clone();
    ///
    /// let mut container = Container::new();
    /// container.set_service(
    ///     "config",
    ///     Container::share(move |_| {
    ///         probe.fetch_add(1, Ordering::SeqCst);
    ///         Arc::new("loaded".to_string())
    ///     }),
    /// );
    ///
    /// let first: Arc<String> = container.get("config").unwrap();
    /// let second: Arc<String> = container.get("config").unwrap();
    ///
    /// assert!(Arc::ptr_eq(&first, &second));
    /// assert_eq!(builds.load(Ordering::SeqCst), 1);
    /// ```
    pub fn share<F>(factory: F) -> impl Fn(&Container) -> Service + Send + Sync + 'static
    where
        F: Fn(&Container) -> Service + Send + Sync + 'static,
    {
        let slot: Mutex<Option<Service>> = Mutex::new(None);

        move |container: &Container| {
            // Lock poisoning only occurs if the wrapped factory panicked;
            // recover and let the retry populate the slot.
            let mut cached = slot.lock().unwrap_or_else(|p| p.into_inner());
            cached.get_or_insert_with(|| factory(container)).clone()
        }
    }

    /// Wraps a factory so the container yields the factory itself as a value.
    ///
    /// Invoking the returned wrapper produces the original factory (as a
    /// [`Service`] holding a [`Factory`]) instead of the factory's result.
    /// This lets a callable be stored and retrieved through
    /// [`get_service`](Self::get_service) without the container invoking it
    /// as a producer: downcast the retrieved value to [`Factory`] and call it
    /// yourself.
    ///
    /// # Examples
    ///
    /// ```
    /// use service_container::{Container, Factory};
    /// use std::sync::Arc;
    ///
    /// let mut container = Container::new();
    /// container.set_service(
    ///     "renderer",
    ///     Container::protect(|_| Arc::new("rendered".to_string())),
    /// );
    ///
    /// // The container hands back the callable, not its result.
    /// let stored = container.get_service("renderer").unwrap();
    /// let renderer = stored.downcast::<Factory>().unwrap();
    ///
    /// let output = renderer(&container);
    /// assert_eq!(output.downcast_ref::<String>().map(String::as_str), Some("rendered"));
    /// ```
    pub fn protect<F>(factory: F) -> impl Fn(&Container) -> Service + Send + Sync + 'static
    where
        F: Fn(&Container) -> Service + Send + Sync + 'static,
    {
        let protected: Factory = Arc::new(factory);
        move |_: &Container| Arc::new(protected.clone()) as Service
    }

    /// Builds a factory that decorates the one stored under `id`.
    ///
    /// The returned factory first invokes the stored factory to obtain the
    /// base value, then invokes `extend_factory` with that value and the
    /// container. The registry is not mutated: what
    /// [`get_service`](Self::get_service) returns for `id` is unchanged until
    /// the result is re-registered with [`set_service`](Self::set_service).
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::NotFound`] when no factory is registered
    /// under the identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use service_container::Container;
    /// use std::sync::Arc;
    ///
    /// let mut container = Container::new();
    /// container.set_service("greeting", |_| Arc::new("hello".to_string()));
    ///
    /// let extended = container
    ///     .extend("greeting", |base, _| {
    ///         let base = base.downcast_ref::<String>().unwrap().clone();
    ///         Arc::new(format!("{base}, world"))
    ///     })
    ///     .unwrap();
    ///
    /// container.set_service("greeting", extended);
    ///
    /// let greeting: Arc<String> = container.get("greeting").unwrap();
    /// assert_eq!(&*greeting, "hello, world");
    /// ```
    pub fn extend<E>(
        &self,
        id: &str,
        extend_factory: E,
    ) -> Result<impl Fn(&Container) -> Service + Send + Sync + 'static, ContainerError>
    where
        E: Fn(Service, &Container) -> Service + Send + Sync + 'static,
    {
        let factory = self.values.get(id).cloned();
        self.emit_event(&ContainerEvent::Extend {
            id: id.to_owned(),
            found: factory.is_some(),
        });
        let inner = factory.ok_or_else(|| ContainerError::NotFound { id: id.to_owned() })?;

        Ok(move |container: &Container| extend_factory(inner(container), container))
    }

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Sets a tracing callback invoked on every registry interaction.
    ///
    /// The callback receives a [`ContainerEvent`] for each set, get,
    /// contains, unset, raw and extend operation on this container instance.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use service_container::Container;
    ///
    /// let mut container = Container::new();
    /// container.set_trace_callback(|event| println!("[container-trace] {}", event));
    /// ```
    pub fn set_trace_callback(&mut self, callback: impl Fn(&ContainerEvent) + Send + Sync + 'static) {
        self.trace = Some(Arc::new(callback));
    }

    /// Clears the tracing callback (disables container tracing).
    ///
    /// Does not affect registered factories, only the tracing callback.
    pub fn clear_trace_callback(&mut self) {
        self.trace = None;
    }

    /// Convenience wrapper to emit a container event using the current callback.
    fn emit_event(&self, event: &ContainerEvent) {
        if let Some(callback) = self.trace.as_ref() {
            callback(event);
        }
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("services", &self.values.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
