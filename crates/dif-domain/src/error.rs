//! Error handling types

use crate::constants::ANONYMOUS_METHOD;
use crate::value_objects::ValidationResult;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for dif
///
/// Build-time failures (`MethodNotFound`, `UnsupportedMethodShape`) and call-time
/// failures (`UnresolvedDependency`, `TypeMismatch`, `MissingArgument`,
/// `MissingReceiver`) indicate programming errors: a wrong method shape or a
/// missing registration. `ValidationFailed` is the only variant meant to be
/// translated into a client-facing response.
#[derive(Error, Debug)]
pub enum Error {
    /// A collaborator could not locate a conventionally named method on a type
    #[error("Method `{method}` not found for type `{type_name}`")]
    MethodNotFound {
        /// Name of the type that was searched
        type_name: String,
        /// Conventional method name
        method: String,
    },

    /// No binding plan can be built for the method signature
    #[error("Unsupported method shape for `{method}`: {message}")]
    UnsupportedMethodShape {
        /// Method name
        method: String,
        /// Why the shape is unsupported
        message: String,
    },

    /// The resolution context could not produce a value for a type
    #[error("Unresolved dependency: no service registered for `{type_name}`")]
    UnresolvedDependency {
        /// Requested type
        type_name: String,
        /// Failure reported by the context, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A runtime value did not match the type it was bound to
    #[error("Type mismatch in `{method}` at {slot}: expected `{expected}`")]
    TypeMismatch {
        /// Method name
        method: String,
        /// Where the mismatch happened (receiver, argument, parameter)
        slot: String,
        /// The declared type
        expected: String,
    },

    /// The explicit argument list is shorter than the binding plan requires
    #[error("Missing explicit argument {position} for `{method}` ({provided} provided)")]
    MissingArgument {
        /// Method name
        method: String,
        /// Position in the explicit argument list
        position: usize,
        /// Number of explicit arguments actually supplied
        provided: usize,
    },

    /// An instance method was invoked without a receiver
    #[error("Method `{method}` requires a receiver of type `{receiver}`")]
    MissingReceiver {
        /// Method name
        method: String,
        /// Declared receiver type
        receiver: String,
    },

    /// A validation step reported invalid input
    #[error("{0}")]
    ValidationFailed(ValidationResult),

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Infrastructure operation error
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Build-time error creation methods
impl Error {
    /// Create a method not found error
    pub fn method_not_found<T: Into<String>, M: Into<String>>(type_name: T, method: M) -> Self {
        Self::MethodNotFound {
            type_name: type_name.into(),
            method: method.into(),
        }
    }

    /// Create an unsupported method shape error
    pub fn unsupported_shape<M: Into<String>, S: Into<String>>(method: M, message: S) -> Self {
        Self::UnsupportedMethodShape {
            method: method.into(),
            message: message.into(),
        }
    }
}

// Call-time error creation methods
impl Error {
    /// Create an unresolved dependency error
    pub fn unresolved<S: Into<String>>(type_name: S) -> Self {
        Self::UnresolvedDependency {
            type_name: type_name.into(),
            source: None,
        }
    }

    /// Create an unresolved dependency error with the context's own failure
    pub fn unresolved_with_source<S, E>(type_name: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::UnresolvedDependency {
            type_name: type_name.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch<M, S, E>(method: M, slot: S, expected: E) -> Self
    where
        M: Into<String>,
        S: Into<String>,
        E: Into<String>,
    {
        Self::TypeMismatch {
            method: method.into(),
            slot: slot.into(),
            expected: expected.into(),
        }
    }
}

// Ambient error creation methods
impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl Error {
    /// Validation details when this is a `ValidationFailed` error
    pub fn validation(&self) -> Option<&ValidationResult> {
        match self {
            Self::ValidationFailed(result) => Some(result),
            _ => None,
        }
    }
}

impl Error {
    /// Attach a method name to call-time errors raised before the name was known
    #[must_use]
    pub fn with_method_name(self, name: &str) -> Self {
        match self {
            Self::TypeMismatch {
                method,
                slot,
                expected,
            } if method == ANONYMOUS_METHOD => Self::TypeMismatch {
                method: name.to_string(),
                slot,
                expected,
            },
            Self::MissingArgument {
                method,
                position,
                provided,
            } if method == ANONYMOUS_METHOD => Self::MissingArgument {
                method: name.to_string(),
                position,
                provided,
            },
            Self::MissingReceiver { method, receiver } if method == ANONYMOUS_METHOD => {
                Self::MissingReceiver {
                    method: name.to_string(),
                    receiver,
                }
            }
            other => other,
        }
    }
}

impl From<ValidationResult> for Error {
    fn from(result: ValidationResult) -> Self {
        Self::ValidationFailed(result)
    }
}
