//! Error types for the merchant client library.
//!
//! Every variant renders as a human-readable message suitable for an error
//! banner. Backend and transport failures carry the message chosen by the
//! client's fallback rules, so callers never need to inspect the variant to
//! show something sensible.

/// Convenience alias used by every fallible operation in this crate.
pub type Result<T> = core::result::Result<T, MerchantError>;

/// All errors that can occur when using the merchant client.
#[derive(Debug, thiserror::Error)]
pub enum MerchantError {
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Api {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Message taken from the error body, or the operation's fallback.
        message: String,
    },

    /// The request never produced a response (connection refused, DNS,
    /// TLS, body read failure).
    #[error("{message}")]
    Transport {
        /// The operation's fallback message.
        message: String,
        /// Underlying transport error.
        #[source]
        source: Box<dyn core::error::Error + Send + Sync>,
    },

    /// A success response carried a body that could not be decoded.
    #[error("{message}")]
    Decode {
        /// The operation's fallback message.
        message: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A form failed its required-field check before any request was made.
    #[error("{message}")]
    InvalidForm {
        /// Wire name of the offending field.
        field: &'static str,
        /// Message naming the field.
        message: String,
    },

    /// The client could not be configured (bad base URL, HTTP client
    /// construction failure).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Writing a downloaded file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MerchantError {
    /// Returns the HTTP status of a backend rejection, if any.
    #[inline]
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match *self {
            Self::Api { status, .. } => Some(status),
            Self::Transport { .. }
            | Self::Decode { .. }
            | Self::InvalidForm { .. }
            | Self::Config(_)
            | Self::Io(_) => None,
        }
    }

    /// Returns `true` if the backend reported the target as missing.
    #[inline]
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_message_only() {
        let err = MerchantError::Api {
            status: 404,
            message: "not found".to_owned(),
        };
        assert_eq!(err.to_string(), "not found");
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());
    }

    #[test]
    fn transport_error_keeps_source() {
        let inner = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = MerchantError::Transport {
            message: "Failed to fetch merchants".to_owned(),
            source: Box::new(inner),
        };
        assert_eq!(err.to_string(), "Failed to fetch merchants");
        assert!(core::error::Error::source(&err).is_some());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn decode_error_displays_fallback() {
        let source = serde_json::from_str::<String>("not json").unwrap_err();
        let err = MerchantError::Decode {
            message: "Failed to fetch statistics".to_owned(),
            source,
        };
        assert_eq!(err.to_string(), "Failed to fetch statistics");
    }

    #[test]
    fn io_error_from() {
        let inner = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = MerchantError::from(inner);
        assert!(matches!(err, MerchantError::Io(_)));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MerchantError>();
    }
}
