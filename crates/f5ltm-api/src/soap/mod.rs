// SOAP 1.1 envelope codec for iControl
//
// Requests are written with quick-xml from a small `Value` tree; responses
// are parsed into an `Element` tree and unwrapped down to the `<return>`
// element of `{method}Response`. Faults become `Error::Fault`.

pub mod element;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

pub use element::Element;

use crate::error::Error;

const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
const SOAP_ENC_NS: &str = "http://schemas.xmlsoap.org/soap/encoding/";
const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// `urn:iControl:{interface}` -- the namespace and SOAPAction of an interface.
pub fn urn(interface: &str) -> String {
    format!("urn:iControl:{interface}")
}

// ── Request values ───────────────────────────────────────────────────

/// A request parameter value.
///
/// iControl encodes sequences as repeated `<item>` elements and structures
/// as child elements named after their fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Array(Vec<Value>),
    Struct(Vec<(&'static str, Value)>),
}

impl Value {
    /// A one-element array, the shape of every per-resource iControl argument.
    pub fn one(value: impl Into<Value>) -> Self {
        Self::Array(vec![value.into()])
    }

    /// An array of plain strings.
    pub fn strings<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Array(values.into_iter().map(|s| Self::Text(s.into())).collect())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::Text(n.to_string())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Text(n.to_string())
    }
}

impl From<u16> for Value {
    fn from(n: u16) -> Self {
        Self::Text(n.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(items)
    }
}

// ── Encoding ─────────────────────────────────────────────────────────

/// Serialize a call into a complete SOAP envelope.
pub fn encode_request(
    interface: &str,
    method: &str,
    params: &[(&str, Value)],
) -> Result<String, Error> {
    let mut writer = Writer::new(Vec::new());
    write_envelope(&mut writer, interface, method, params)?;
    String::from_utf8(writer.into_inner()).map_err(|e| Error::Xml(e.to_string()))
}

fn write_envelope(
    writer: &mut Writer<Vec<u8>>,
    interface: &str,
    method: &str,
    params: &[(&str, Value)],
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut envelope = BytesStart::new("SOAP-ENV:Envelope");
    envelope.push_attribute(("xmlns:SOAP-ENV", SOAP_ENV_NS));
    envelope.push_attribute(("xmlns:SOAP-ENC", SOAP_ENC_NS));
    envelope.push_attribute(("xmlns:xsd", XSD_NS));
    envelope.push_attribute(("xmlns:xsi", XSI_NS));
    envelope.push_attribute(("SOAP-ENV:encodingStyle", SOAP_ENC_NS));
    writer.write_event(Event::Start(envelope))?;
    writer.write_event(Event::Start(BytesStart::new("SOAP-ENV:Body")))?;

    let tag = format!("m:{method}");
    let namespace = urn(interface);
    let mut call = BytesStart::new(tag.as_str());
    call.push_attribute(("xmlns:m", namespace.as_str()));

    if params.is_empty() {
        writer.write_event(Event::Empty(call))?;
    } else {
        writer.write_event(Event::Start(call))?;
        for (name, value) in params {
            write_value(writer, name, value)?;
        }
        writer.write_event(Event::End(BytesEnd::new(tag.as_str())))?;
    }

    writer.write_event(Event::End(BytesEnd::new("SOAP-ENV:Body")))?;
    writer.write_event(Event::End(BytesEnd::new("SOAP-ENV:Envelope")))?;
    Ok(())
}

fn write_value(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    value: &Value,
) -> Result<(), quick_xml::Error> {
    match value {
        Value::Text(text) => {
            writer.write_event(Event::Start(BytesStart::new(name)))?;
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        Value::Array(items) => {
            writer.write_event(Event::Start(BytesStart::new(name)))?;
            for item in items {
                write_value(writer, "item", item)?;
            }
        }
        Value::Struct(fields) => {
            writer.write_event(Event::Start(BytesStart::new(name)))?;
            for (field, inner) in fields {
                write_value(writer, field, inner)?;
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

// ── Decoding ─────────────────────────────────────────────────────────

/// Unwrap a response envelope down to the `<return>` element of `method`.
///
/// Void methods have no `<return>`; an empty element is returned so callers
/// can ignore it uniformly.
pub fn decode_response(method: &str, body: &str) -> Result<Element, Error> {
    let root = element::parse(body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: body.to_owned(),
    })?;

    let soap_body = root
        .child("Body")
        .ok_or_else(|| Error::Deserialization {
            message: "envelope has no Body".into(),
            body: body.to_owned(),
        })?;

    if let Some(fault) = soap_body.child("Fault") {
        return Err(fault_error(fault));
    }

    let response_name = format!("{method}Response");
    let response = soap_body
        .child(&response_name)
        .ok_or_else(|| Error::Deserialization {
            message: format!("envelope has no {response_name}"),
            body: body.to_owned(),
        })?;

    Ok(response
        .child("return")
        .cloned()
        .unwrap_or_else(|| Element::new("return")))
}

/// Extract a fault from an envelope, if the body carries one.
pub fn find_fault(body: &str) -> Option<Error> {
    let root = element::parse(body).ok()?;
    root.child("Body")?.child("Fault").map(fault_error)
}

fn fault_error(fault: &Element) -> Error {
    Error::Fault {
        code: fault.field_text("faultcode").unwrap_or_default().trim().to_owned(),
        message: fault
            .field_text("faultstring")
            .unwrap_or_default()
            .trim()
            .to_owned(),
    }
}
