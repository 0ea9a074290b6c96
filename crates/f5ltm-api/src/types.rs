// iControl wire structures
//
// Mirrors of the Common.* and LocalLB.* structures the client exchanges.
// Enumerated fields stay as their iControl tokens (`LB_METHOD_ROUND_ROBIN`,
// `PROTOCOL_TCP`, ...); f5ltm-core owns the mapping to domain enums.

use crate::error::Error;
use crate::soap::{Element, Value};

// ── Fixed tokens ─────────────────────────────────────────────────────

/// Monitor rule requiring exactly the listed template(s).
pub const MONITOR_RULE_TYPE_SINGLE: &str = "MONITOR_RULE_TYPE_SINGLE";
/// Monitor rule meaning "no monitor association".
pub const MONITOR_RULE_TYPE_NONE: &str = "MONITOR_RULE_TYPE_NONE";
/// VLAN filter state: listed VLANs are allowed.
pub const STATE_ENABLED: &str = "STATE_ENABLED";
/// VLAN filter state: listed VLANs are excluded.
pub const STATE_DISABLED: &str = "STATE_DISABLED";
/// Virtual server forwarding to a pool.
pub const RESOURCE_TYPE_POOL: &str = "RESOURCE_TYPE_POOL";
/// Netmask of a host (single-address) virtual server.
pub const HOST_WILDMASK: &str = "255.255.255.255";

// ── Common.ULong64 ───────────────────────────────────────────────────

/// 64-bit counter split into two 32-bit halves on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ULong64 {
    pub high: u32,
    pub low: u32,
}

impl ULong64 {
    pub fn value(self) -> u64 {
        (u64::from(self.high) << 32) | u64::from(self.low)
    }

    pub(crate) fn decode(method: &str, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            high: parse_number(method, element, "high")?,
            low: parse_number(method, element, "low")?,
        })
    }

    pub(crate) fn encode(self) -> Value {
        Value::Struct(vec![("high", self.high.into()), ("low", self.low.into())])
    }
}

impl From<u64> for ULong64 {
    fn from(value: u64) -> Self {
        Self {
            high: u32::try_from(value >> 32).unwrap_or(u32::MAX),
            low: u32::try_from(value & u64::from(u32::MAX)).unwrap_or(u32::MAX),
        }
    }
}

// ── Common.IPPortDefinition ──────────────────────────────────────────

/// An address/port pair (pool member, virtual server destination).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpPortDefinition {
    pub address: String,
    pub port: u16,
}

impl IpPortDefinition {
    pub(crate) fn decode(method: &str, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            address: required_text(method, element, "address")?.to_owned(),
            port: parse_number(method, element, "port")?,
        })
    }

    pub(crate) fn encode(&self) -> Value {
        Value::Struct(vec![
            ("address", (&self.address).into()),
            ("port", self.port.into()),
        ])
    }
}

// ── LocalLB.MonitorRule / PoolMonitorAssociation ─────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorRule {
    /// `MONITOR_RULE_TYPE_*` token.
    pub rule_type: String,
    pub quorum: u32,
    pub monitor_templates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorAssociation {
    pub pool_name: String,
    pub monitor_rule: MonitorRule,
}

impl MonitorAssociation {
    pub(crate) fn decode(method: &str, element: &Element) -> Result<Self, Error> {
        let rule = element.child("monitor_rule").ok_or_else(|| Error::MissingField {
            method: method.to_owned(),
            field: "monitor_rule".into(),
        })?;
        Ok(Self {
            pool_name: required_text(method, element, "pool_name")?.to_owned(),
            monitor_rule: MonitorRule {
                rule_type: required_text(method, rule, "type")?.to_owned(),
                quorum: parse_number(method, rule, "quorum")?,
                monitor_templates: rule
                    .child("monitor_templates")
                    .map(texts)
                    .unwrap_or_default(),
            },
        })
    }

    pub(crate) fn encode(&self) -> Value {
        Value::Struct(vec![
            ("pool_name", (&self.pool_name).into()),
            (
                "monitor_rule",
                Value::Struct(vec![
                    ("type", (&self.monitor_rule.rule_type).into()),
                    ("quorum", self.monitor_rule.quorum.into()),
                    (
                        "monitor_templates",
                        Value::strings(self.monitor_rule.monitor_templates.iter().cloned()),
                    ),
                ]),
            ),
        ])
    }
}

// ── LocalLB.VirtualServer structures ─────────────────────────────────

/// Common.VirtualServerDefinition -- the creation identity of a virtual server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualServerDefinition {
    pub name: String,
    pub address: String,
    pub port: u16,
    /// `PROTOCOL_*` token.
    pub protocol: String,
}

impl VirtualServerDefinition {
    pub(crate) fn encode(&self) -> Value {
        Value::Struct(vec![
            ("name", (&self.name).into()),
            ("address", (&self.address).into()),
            ("port", self.port.into()),
            ("protocol", (&self.protocol).into()),
        ])
    }
}

/// LocalLB.VirtualServer.VirtualServerResource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualServerResource {
    /// `RESOURCE_TYPE_*` token.
    pub resource_type: String,
    pub port: u16,
    /// `PROTOCOL_*` token.
    pub protocol: String,
    pub default_pool_name: String,
}

impl VirtualServerResource {
    pub(crate) fn encode(&self) -> Value {
        Value::Struct(vec![
            ("type", (&self.resource_type).into()),
            ("port", self.port.into()),
            ("protocol", (&self.protocol).into()),
            ("default_pool_name", (&self.default_pool_name).into()),
        ])
    }
}

/// LocalLB.VirtualServer.VirtualServerProfile (write shape).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualServerProfile {
    /// `PROFILE_CONTEXT_TYPE_*` token.
    pub profile_context: String,
    pub profile_name: String,
}

impl VirtualServerProfile {
    pub(crate) fn encode(&self) -> Value {
        Value::Struct(vec![
            ("profile_context", (&self.profile_context).into()),
            ("profile_name", (&self.profile_name).into()),
        ])
    }
}

/// LocalLB.VirtualServer.VirtualServerProfileAttribute (read shape).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileAttribute {
    /// `PROFILE_TYPE_*` token.
    pub profile_type: String,
    /// `PROFILE_CONTEXT_TYPE_*` token.
    pub profile_context: String,
    pub profile_name: String,
}

impl ProfileAttribute {
    pub(crate) fn decode(method: &str, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            profile_type: element.field_text("profile_type").unwrap_or_default().to_owned(),
            profile_context: required_text(method, element, "profile_context")?.to_owned(),
            profile_name: required_text(method, element, "profile_name")?.to_owned(),
        })
    }
}

/// Common.VLANFilterList.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VlanFilterList {
    /// `STATE_ENABLED` (allow-list) or `STATE_DISABLED` (deny-list).
    pub state: String,
    pub vlans: Vec<String>,
}

impl VlanFilterList {
    pub(crate) fn decode(method: &str, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            state: required_text(method, element, "state")?.to_owned(),
            vlans: element.child("vlans").map(texts).unwrap_or_default(),
        })
    }

    pub(crate) fn encode(&self) -> Value {
        Value::Struct(vec![
            ("state", (&self.state).into()),
            ("vlans", Value::strings(self.vlans.iter().cloned())),
        ])
    }
}

// ── LocalLB.Rule / LocalLB.Monitor ───────────────────────────────────

/// LocalLB.RuleDefinition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDefinition {
    pub rule_name: String,
    pub rule_definition: String,
}

impl RuleDefinition {
    pub(crate) fn decode(method: &str, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            rule_name: required_text(method, element, "rule_name")?.to_owned(),
            rule_definition: element
                .field_text("rule_definition")
                .unwrap_or_default()
                .to_owned(),
        })
    }
}

/// LocalLB.Monitor.MonitorTemplate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorTemplate {
    pub template_name: String,
    /// `TTYPE_*` token.
    pub template_type: String,
}

impl MonitorTemplate {
    pub(crate) fn decode(method: &str, element: &Element) -> Result<Self, Error> {
        Ok(Self {
            template_name: required_text(method, element, "template_name")?.to_owned(),
            template_type: required_text(method, element, "template_type")?.to_owned(),
        })
    }
}

// ── Decoding helpers ─────────────────────────────────────────────────

/// Texts of every `<item>` of an array element.
pub(crate) fn texts(element: &Element) -> Vec<String> {
    element.items().map(|i| i.text().to_owned()).collect()
}

/// The first `<item>` of a per-resource result array.
pub(crate) fn first<'a>(method: &str, element: &'a Element) -> Result<&'a Element, Error> {
    element.items().next().ok_or_else(|| Error::MissingField {
        method: method.to_owned(),
        field: "return[0]".into(),
    })
}

pub(crate) fn required_text<'a>(
    method: &str,
    element: &'a Element,
    field: &str,
) -> Result<&'a str, Error> {
    element.field_text(field).ok_or_else(|| Error::MissingField {
        method: method.to_owned(),
        field: field.to_owned(),
    })
}

pub(crate) fn parse_number<T: std::str::FromStr>(
    method: &str,
    element: &Element,
    field: &str,
) -> Result<T, Error> {
    let raw = required_text(method, element, field)?.trim();
    raw.parse().map_err(|_| Error::Deserialization {
        message: format!("{method}: field '{field}' is not a valid number"),
        body: raw.to_owned(),
    })
}
