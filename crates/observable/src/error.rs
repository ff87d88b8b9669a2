use std::error::Error as StdError;

use thiserror::Error;

/// Errors delivered to observers through `on_error`.
///
/// An error is always the last signal a subscription sees.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RxError {
    /// A constructor was given an argument it cannot honor, such as a negative `range` count.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending parameter.
        name: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// Opaque failure raised by a user supplied producer.
    #[error("producer failed: {0}")]
    Producer(#[source] Box<dyn StdError + Send + Sync>),

    /// A resource the producer depends on does not exist.
    #[error("resource not found: {resource}")]
    ResourceNotFound {
        /// Identifier of the missing resource, e.g. a file path.
        resource: String,
    },
}

impl RxError {
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        RxError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Wraps an arbitrary failure as [`RxError::Producer`].
    pub fn producer(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        RxError::Producer(err.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        RxError::ResourceNotFound {
            resource: resource.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use observable_primer::RxError;
    ///
    /// let err = RxError::invalid_argument("count", "must not be negative");
    /// assert_eq!(err.as_label(), "invalid_argument");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RxError::InvalidArgument { .. } => "invalid_argument",
            RxError::Producer(_) => "producer_error",
            RxError::ResourceNotFound { .. } => "resource_not_found",
        }
    }
}
