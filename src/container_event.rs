/// Events emitted by the container during operations.
///
/// These events are passed to the tracing callback set via
/// [`set_trace_callback`](crate::Container::set_trace_callback). The `Clone`
/// derive allows callbacks to store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use service_container::ContainerEvent;
///
/// let event = ContainerEvent::Set { id: "database".to_string() };
/// println!("{:?}", event);
/// ```
#[derive(Debug, Clone)]
pub enum ContainerEvent {
    /// A factory was registered under an identifier.
    Set {
        /// The identifier the factory was stored under.
        id: String,
    },

    /// A service was resolved through the container.
    Get {
        /// The identifier that was requested.
        id: String,
        /// Whether a factory was registered under the identifier.
        found: bool,
    },

    /// A membership check was performed.
    Contains {
        /// The identifier that was checked.
        id: String,
        /// Whether a factory is registered under the identifier.
        found: bool,
    },

    /// An identifier was unregistered.
    Unset {
        /// The identifier that was removed.
        id: String,
        /// Whether an entry actually existed.
        removed: bool,
    },

    /// A stored factory was inspected without being invoked.
    Raw {
        /// The identifier that was requested.
        id: String,
        /// Whether a factory is registered under the identifier.
        found: bool,
    },

    /// An extended factory was built from a stored one.
    Extend {
        /// The identifier whose factory was wrapped.
        id: String,
        /// Whether a factory is registered under the identifier.
        found: bool,
    },
}

impl std::fmt::Display for ContainerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainerEvent::Set { id } => write!(f, "set {{ id: {} }}", id),
            ContainerEvent::Get { id, found } => {
                write!(f, "get {{ id: {}, found: {} }}", id, found)
            }
            ContainerEvent::Contains { id, found } => {
                write!(f, "contains {{ id: {}, found: {} }}", id, found)
            }
            ContainerEvent::Unset { id, removed } => {
                write!(f, "unset {{ id: {}, removed: {} }}", id, removed)
            }
            ContainerEvent::Raw { id, found } => {
                write!(f, "raw {{ id: {}, found: {} }}", id, found)
            }
            ContainerEvent::Extend { id, found } => {
                write!(f, "extend {{ id: {}, found: {} }}", id, found)
            }
        }
    }
}
