//! Client-facing error translation
//!
//! Only validation failures become responses; every other error is a
//! programming or infrastructure fault and is handed back unchanged.

use dif_domain::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Status used for rejected input
pub const BAD_REQUEST: u16 = 400;

/// Problem-style body for rejected input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub title: String,
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ErrorResponse {
    /// Translate a validation failure; any other error is returned as is
    pub fn from_error(error: Error) -> std::result::Result<Self, Error> {
        match error {
            Error::ValidationFailed(result) => Ok(Self {
                status: BAD_REQUEST,
                title: "One or more validation errors occurred.".to_string(),
                errors: result.into_errors(),
            }),
            other => Err(other),
        }
    }
}

/// Split a result into a success, a client error response or a fault
pub fn translate<T>(result: Result<T>) -> Result<std::result::Result<T, ErrorResponse>> {
    match result {
        Ok(value) => Ok(Ok(value)),
        Err(error) => ErrorResponse::from_error(error).map(Err),
    }
}
