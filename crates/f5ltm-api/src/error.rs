use thiserror::Error;

/// Top-level error type for the `f5ltm-api` crate.
///
/// Covers every failure mode of an iControl call: authentication,
/// transport, SOAP faults raised by the appliance, and envelope decoding.
/// `f5ltm-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The appliance rejected the supplied credentials (HTTP 401).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Non-success HTTP status that carried no SOAP fault.
    #[error("Unexpected HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    // ── Device ──────────────────────────────────────────────────────
    /// SOAP fault raised by the appliance. The message is passed through
    /// verbatim; callers never interpret it.
    #[error("iControl fault ({code}): {message}")]
    Fault { code: String, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// The response envelope could not be decoded, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// XML could not be written or tokenized.
    #[error("XML error: {0}")]
    Xml(String),

    /// A `return` value lacked a field the call contract requires.
    #[error("Response is missing field '{field}' in {method}")]
    MissingField { method: String, field: String },
}

impl Error {
    /// Returns `true` if this error indicates the credentials were rejected.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if the appliance itself rejected the operation.
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::Fault { .. })
    }

    /// Returns `true` if the request never reached the appliance or timed out.
    pub fn is_connectivity(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Self::Xml(err.to_string())
    }
}
