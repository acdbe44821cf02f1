use thiserror::Error;

/// A route that cannot be registered.
///
/// Raised while the route table is being built. A table that failed to build
/// must not serve traffic; see [`crate::dispatcher::Dispatcher::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteDeclarationError {
    #[error("invalid HTTP method {method:?}")]
    InvalidMethod { method: String },

    #[error("empty placeholder in route {template:?}")]
    EmptyPlaceholder { template: String },

    #[error("route {template:?} names unknown parameter type {type_name:?}")]
    UnknownType { template: String, type_name: String },

    #[error("route {template:?} has {placeholders} placeholders but the handler declares {declared} parameters")]
    ArityMismatch {
        template: String,
        placeholders: usize,
        declared: usize,
    },

    #[error("route {template:?} parameter {position} is {{{placeholder}}} but the handler declares {declared}")]
    TypeMismatch {
        template: String,
        position: usize,
        placeholder: String,
        declared: String,
    },
}
