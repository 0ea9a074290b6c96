// iControl HTTP client
//
// Wraps `reqwest::Client` with the iControl portal URL, HTTP basic auth,
// and the SOAP envelope codec. Interface methods (System, LocalLB/*) are
// trait impls in `crate::interfaces`, one file per iControl interface.

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::soap::{self, Element, Value};
use crate::transport::TransportConfig;

/// Path of the iControl SOAP portal, relative to the appliance root.
const PORTAL_PATH: &str = "iControl/iControlPortal.cgi";

/// Raw SOAP client for one BIG-IP appliance.
///
/// Every call is a POST of a complete envelope to the portal; credentials
/// travel as HTTP basic auth on each request (iControl has no login step).
pub struct IControlClient {
    http: reqwest::Client,
    portal_url: Url,
    username: String,
    password: SecretString,
}

impl IControlClient {
    /// Create a client for the appliance rooted at `base_url`
    /// (e.g. `https://bigip.example.com:443/`).
    pub fn new(
        base_url: &Url,
        username: impl Into<String>,
        password: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, base_url, username, password)
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: &Url,
        username: impl Into<String>,
        password: SecretString,
    ) -> Result<Self, Error> {
        let portal_url = base_url.join(PORTAL_PATH)?;
        Ok(Self {
            http,
            portal_url,
            username: username.into(),
            password,
        })
    }

    /// Build the appliance root URL from a host (name, IPv4/IPv6 literal,
    /// or a full `https://` URL) and port.
    pub fn appliance_url(host: &str, port: u16) -> Result<Url, Error> {
        if host.contains("://") {
            return Ok(Url::parse(host)?);
        }
        let host = if host.contains(':') && !host.starts_with('[') {
            format!("[{host}]")
        } else {
            host.to_owned()
        };
        Ok(Url::parse(&format!("https://{host}:{port}/"))?)
    }

    /// The portal endpoint every call is posted to.
    pub fn portal_url(&self) -> &Url {
        &self.portal_url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Invoke `interface::method` and return its `<return>` element.
    pub async fn call(
        &self,
        interface: &str,
        method: &str,
        params: &[(&str, Value)],
    ) -> Result<Element, Error> {
        let envelope = soap::encode_request(interface, method, params)?;
        debug!(interface, method, "iControl call");
        trace!(%envelope, "request envelope");

        let resp = self
            .http
            .post(self.portal_url.clone())
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .header("SOAPAction", format!("\"{}\"", soap::urn(interface)))
            .header(reqwest::header::CONTENT_TYPE, "text/xml; charset=utf-8")
            .body(envelope)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: format!("credentials for '{}' were rejected", self.username),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        trace!(%body, "response envelope");

        if !status.is_success() {
            // Faults arrive as HTTP 500 with a SOAP body.
            if let Some(fault) = soap::find_fault(&body) {
                return Err(fault);
            }
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        soap::decode_response(method, &body)
    }
}
