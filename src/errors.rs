//! Error types for the CardioPredict client.
//!
//! Every failure of the prediction round-trip is a distinct variant so the
//! caller can tell a dead server from a rejected request from a garbled body.

use thiserror::Error;

/// Main error type for the prediction client and session flow
#[derive(Error, Debug)]
pub enum PredictError {
    /// Request did not settle within the configured timeout
    #[error("Prediction request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Network-level failure: DNS, connect, TLS, broken pipe
    #[error("Could not reach the prediction service: {0}")]
    Transport(String),

    /// Server answered with a non-success HTTP status
    #[error("Prediction service rejected the request (HTTP {code})")]
    Status { code: u16 },

    /// Response arrived but the body was not a valid prediction result
    #[error("Malformed response from prediction service: {0}")]
    MalformedResponse(String),

    /// State machine transition errors
    #[error("Invalid session transition from {from:?} on {event}")]
    InvalidTransition { from: String, event: String },

    /// I/O errors (report save, config file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Report layout or document assembly errors
    #[error("Report generation failed: {0}")]
    Report(String),
}

impl PredictError {
    /// Fold a reqwest failure into the taxonomy.
    ///
    /// reqwest reports timeouts as errors on the request future, so the
    /// configured timeout is threaded through for the message.
    pub fn from_request_error(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            PredictError::Timeout {
                seconds: timeout_secs,
            }
        } else if err.is_decode() {
            PredictError::MalformedResponse(err.to_string())
        } else {
            PredictError::Transport(err.to_string())
        }
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, PredictError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PredictError::Timeout { seconds: 30 };
        assert!(err.to_string().contains("30"));

        let err = PredictError::Status { code: 500 };
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_invalid_transition_display() {
        let err = PredictError::InvalidTransition {
            from: "Form".to_string(),
            event: "PredictionReady".to_string(),
        };
        assert!(err.to_string().contains("Form"));
        assert!(err.to_string().contains("PredictionReady"));
    }
}
