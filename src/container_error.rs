use thiserror::Error;

/// Errors returned by container lookups.
///
/// Registration, removal, membership checks and the factory combinators never
/// fail; only operations that must find an existing entry (or narrow a
/// produced value) return this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    /// No factory is registered under the requested identifier.
    #[error("no service registered with id `{id}`")]
    NotFound {
        /// The identifier that was looked up.
        id: String,
    },

    /// The produced service could not be downcast to the requested type.
    ///
    /// Only returned by the typed [`get`](crate::Container::get) convenience;
    /// the untyped surface leaves narrowing to the caller.
    #[error("service `{id}` is not a `{expected}`")]
    TypeMismatch {
        /// The identifier whose service was resolved.
        id: String,
        /// The type name the caller requested.
        expected: &'static str,
    },
}
