// ── Core error types ──
//
// User-facing errors from f5ltm-core. Consumers never see SOAP envelopes or
// HTTP status codes directly; the `From<f5ltm_api::Error>` impl translates
// transport-layer errors into these variants. Faults raised by the appliance
// are carried verbatim in `Device`.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to appliance at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request to the appliance timed out")]
    Timeout,

    // ── Session errors ───────────────────────────────────────────────
    /// The reported software version has no `major.minor.patch` part.
    #[error("Cannot parse appliance version '{raw}'")]
    VersionParse { raw: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// The appliance returned an enumeration token with no local mapping.
    #[error("Unknown {kind} value '{token}' returned by the appliance")]
    UnknownCode { kind: &'static str, token: String },

    // ── Remote errors ────────────────────────────────────────────────
    /// The appliance rejected the call.
    #[error("Appliance error: {message}")]
    Device { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<f5ltm_api::Error> for CoreError {
    fn from(err: f5ltm_api::Error) -> Self {
        match err {
            f5ltm_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            f5ltm_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                }
            }
            f5ltm_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            f5ltm_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            f5ltm_api::Error::HttpStatus { status, body } => CoreError::Device {
                message: format!("HTTP {status}: {}", body.trim()),
            },
            f5ltm_api::Error::Fault { message, .. } => CoreError::Device { message },
            f5ltm_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
            f5ltm_api::Error::Xml(message) => CoreError::Internal(format!("XML error: {message}")),
            f5ltm_api::Error::MissingField { method, field } => {
                CoreError::Internal(format!("{method} returned no '{field}'"))
            }
        }
    }
}
