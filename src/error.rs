// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `cloudlamp` library.
//!
//! Gateway failures form a closed taxonomy of three kinds so callers can
//! decide between transient and permanent failure messages: [`Error::Timeout`]
//! and [`Error::Connection`] are retryable by the caller, [`Error::Api`] is a
//! well-formed rejection from the vendor cloud. Value validation failures are
//! kept separate in [`ValueError`].

use std::time::Duration;

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The request exceeded its deadline before a response arrived.
    ///
    /// The caller may retry; the library never retries timeouts on its own.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Transport-level failure (DNS, connection refused or reset) before any
    /// response was received.
    #[error("connection failed: {0}")]
    Connection(String),

    /// A well-formed response reporting failure.
    ///
    /// `title` and `message` are extracted from the response body, or filled
    /// with a generic fallback when the body carries neither.
    #[error("{title}: {message}")]
    Api {
        /// Short human-readable failure title from the gateway.
        title: String,
        /// Detail message from the gateway, or the raw body as fallback.
        message: String,
    },

    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),
}

impl Error {
    /// Builds an [`Error::Api`] with the generic fallback title.
    pub(crate) fn api(message: impl Into<String>) -> Self {
        Self::Api {
            title: "Error".to_string(),
            message: message.into(),
        }
    }

    /// Classifies a transport error from `reqwest` into the taxonomy.
    ///
    /// Timeouts map to [`Error::Timeout`]; everything else that failed before
    /// a usable response (DNS, refused, reset, malformed transfer) maps to
    /// [`Error::Connection`].
    pub(crate) fn transport(err: &reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else {
            Self::Connection(err.to_string())
        }
    }
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types
/// with invalid values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// An unrecognized scene preset name.
    #[error("unknown scene: {0}")]
    UnknownScene(String),

    /// An unrecognized work mode name.
    #[error("unknown work mode: {0}")]
    UnknownWorkMode(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::OutOfRange {
            min: 1,
            max: 100,
            actual: 150,
        };
        assert_eq!(err.to_string(), "value 150 is out of range [1, 100]");
    }

    #[test]
    fn api_error_display_matches_title_and_message() {
        let err = Error::Api {
            title: "Device unreachable".to_string(),
            message: "the lamp did not respond".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Device unreachable: the lamp did not respond"
        );
    }

    #[test]
    fn api_fallback_uses_generic_title() {
        let err = Error::api("something odd");
        assert!(matches!(err, Error::Api { ref title, .. } if title == "Error"));
    }

    #[test]
    fn error_from_value_error() {
        let value_err = ValueError::UnknownScene("disco".to_string());
        let err: Error = value_err.into();
        assert!(matches!(err, Error::Value(ValueError::UnknownScene(_))));
    }
}
