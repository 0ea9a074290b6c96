// ── Wire-to-domain conversions ──
//
// Every domain enumeration has exactly one bidirectional table of
// (variant, iControl integer code, iControl token). The tables are the only
// place tokens are spelled out; lookups in both directions go through them.
// Struct conversions between `f5ltm_api::types` and `crate::model` follow.

use f5ltm_api::types::{IpPortDefinition, MonitorTemplate, RuleDefinition};

use crate::error::CoreError;
use crate::model::{
    LoadBalancingMethod, Monitor, MonitorType, PoolMember, ProfileContext, Rule, SnatType,
    VirtualServerProtocol,
};

/// An enumeration carried on the wire as an iControl token.
pub trait WireEnum: Sized + Copy + PartialEq + 'static {
    /// Human-readable kind, used in `UnknownCode` errors.
    const KIND: &'static str;
    /// `(variant, code, token)` for every variant.
    const TABLE: &'static [(Self, i32, &'static str)];

    /// The iControl token of this variant.
    fn token(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(v, ..)| *v == self)
            .map_or("", |&(_, _, token)| token)
    }

    /// The iControl integer code of this variant.
    fn code(self) -> i32 {
        Self::TABLE
            .iter()
            .find(|(v, ..)| *v == self)
            .map_or(-1, |&(_, code, _)| code)
    }

    /// Look up a variant by iControl token.
    fn from_token(token: &str) -> Result<Self, CoreError> {
        let token = token.trim();
        Self::TABLE
            .iter()
            .find(|(_, _, t)| *t == token)
            .map(|(v, ..)| *v)
            .ok_or_else(|| CoreError::UnknownCode {
                kind: Self::KIND,
                token: token.to_owned(),
            })
    }

    /// Look up a variant by iControl integer code.
    fn from_code(code: i32) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(_, c, _)| *c == code)
            .map(|(v, ..)| *v)
    }
}

// ── Load-balancing methods ──────────────────────────────────────────

impl WireEnum for LoadBalancingMethod {
    const KIND: &'static str = "load-balancing method";
    const TABLE: &'static [(Self, i32, &'static str)] = &[
        (Self::RoundRobin, 0, "LB_METHOD_ROUND_ROBIN"),
        (Self::RatioMember, 1, "LB_METHOD_RATIO_MEMBER"),
        (Self::LeastConnectionMember, 2, "LB_METHOD_LEAST_CONNECTION_MEMBER"),
        (Self::ObservedMember, 3, "LB_METHOD_OBSERVED_MEMBER"),
        (Self::PredictiveMember, 4, "LB_METHOD_PREDICTIVE_MEMBER"),
        (Self::RatioNodeAddress, 5, "LB_METHOD_RATIO_NODE_ADDRESS"),
        (Self::LeastConnectionNodeAddress, 6, "LB_METHOD_LEAST_CONNECTION_NODE_ADDRESS"),
        (Self::FastestNodeAddress, 7, "LB_METHOD_FASTEST_NODE_ADDRESS"),
        (Self::ObservedNodeAddress, 8, "LB_METHOD_OBSERVED_NODE_ADDRESS"),
        (Self::PredictiveNodeAddress, 9, "LB_METHOD_PREDICTIVE_NODE_ADDRESS"),
        (Self::DynamicRatio, 10, "LB_METHOD_DYNAMIC_RATIO"),
        (Self::FastestAppResponse, 11, "LB_METHOD_FASTEST_APP_RESPONSE"),
        (Self::LeastSessions, 12, "LB_METHOD_LEAST_SESSIONS"),
        (Self::DynamicRatioMember, 13, "LB_METHOD_DYNAMIC_RATIO_MEMBER"),
        (Self::L3Addr, 14, "LB_METHOD_L3_ADDR"),
        (Self::Unknown, 15, "LB_METHOD_UNKNOWN"),
        (Self::WeightedLeastConnectionMember, 16, "LB_METHOD_WEIGHTED_LEAST_CONNECTION_MEMBER"),
        (
            Self::WeightedLeastConnectionNodeAddress,
            17,
            "LB_METHOD_WEIGHTED_LEAST_CONNECTION_NODE_ADDRESS",
        ),
        (Self::RatioSession, 18, "LB_METHOD_RATIO_SESSION"),
        (Self::RatioLeastConnectionMember, 19, "LB_METHOD_RATIO_LEAST_CONNECTION_MEMBER"),
        (
            Self::RatioLeastConnectionNodeAddress,
            20,
            "LB_METHOD_RATIO_LEAST_CONNECTION_NODE_ADDRESS",
        ),
    ];
}

// ── Monitor template types ──────────────────────────────────────────

impl WireEnum for MonitorType {
    const KIND: &'static str = "monitor template type";
    const TABLE: &'static [(Self, i32, &'static str)] = &[
        (Self::Unset, 0, "TTYPE_UNSET"),
        (Self::Icmp, 1, "TTYPE_ICMP"),
        (Self::Tcp, 2, "TTYPE_TCP"),
        (Self::TcpEcho, 3, "TTYPE_TCP_ECHO"),
        (Self::External, 4, "TTYPE_EXTERNAL"),
        (Self::Http, 5, "TTYPE_HTTP"),
        (Self::Https, 6, "TTYPE_HTTPS"),
        (Self::Nntp, 7, "TTYPE_NNTP"),
        (Self::Ftp, 8, "TTYPE_FTP"),
        (Self::Pop3, 9, "TTYPE_POP3"),
        (Self::Smtp, 10, "TTYPE_SMTP"),
        (Self::Mssql, 11, "TTYPE_MSSQL"),
        (Self::Gateway, 12, "TTYPE_GATEWAY"),
        (Self::Imap, 13, "TTYPE_IMAP"),
        (Self::Radius, 14, "TTYPE_RADIUS"),
        (Self::Ldap, 15, "TTYPE_LDAP"),
        (Self::Wmi, 16, "TTYPE_WMI"),
        (Self::SnmpDca, 17, "TTYPE_SNMP_DCA"),
        (Self::SnmpDcaBase, 18, "TTYPE_SNMP_DCA_BASE"),
        (Self::RealServer, 19, "TTYPE_REAL_SERVER"),
        (Self::Udp, 20, "TTYPE_UDP"),
        (Self::None, 21, "TTYPE_NONE"),
        (Self::Oracle, 22, "TTYPE_ORACLE"),
        (Self::Soap, 23, "TTYPE_SOAP"),
        (Self::GatewayIcmp, 24, "TTYPE_GATEWAY_ICMP"),
        (Self::Sip, 25, "TTYPE_SIP"),
        (Self::TcpHalfOpen, 26, "TTYPE_TCP_HALF_OPEN"),
        (Self::Scripted, 27, "TTYPE_SCRIPTED"),
        (Self::Wap, 28, "TTYPE_WAP"),
        (Self::Rpc, 29, "TTYPE_RPC"),
        (Self::Smb, 30, "TTYPE_SMB"),
        (Self::Sasp, 31, "TTYPE_SASP"),
        (Self::ModuleScore, 32, "TTYPE_MODULE_SCORE"),
        (Self::Firepass, 33, "TTYPE_FIREPASS"),
        (Self::Inband, 34, "TTYPE_INBAND"),
        (Self::RadiusAccounting, 35, "TTYPE_RADIUS_ACCOUNTING"),
        (Self::Diameter, 36, "TTYPE_DIAMETER"),
        (Self::VirtualLocation, 37, "TTYPE_VIRTUAL_LOCATION"),
        (Self::Mysql, 38, "TTYPE_MYSQL"),
        (Self::Postgresql, 39, "TTYPE_POSTGRESQL"),
        (Self::Dns, 40, "TTYPE_DNS"),
    ];
}

// ── Virtual server enumerations ─────────────────────────────────────

impl WireEnum for VirtualServerProtocol {
    const KIND: &'static str = "protocol";
    const TABLE: &'static [(Self, i32, &'static str)] = &[
        (Self::Tcp, 6, "PROTOCOL_TCP"),
        (Self::Udp, 7, "PROTOCOL_UDP"),
        (Self::Sctp, 11, "PROTOCOL_SCTP"),
    ];
}

impl WireEnum for ProfileContext {
    const KIND: &'static str = "profile context";
    const TABLE: &'static [(Self, i32, &'static str)] = &[
        (Self::All, 0, "PROFILE_CONTEXT_TYPE_ALL"),
        (Self::ClientSide, 1, "PROFILE_CONTEXT_TYPE_CLIENT"),
        (Self::ServerSide, 2, "PROFILE_CONTEXT_TYPE_SERVER"),
    ];
}

impl WireEnum for SnatType {
    const KIND: &'static str = "SNAT type";
    const TABLE: &'static [(Self, i32, &'static str)] = &[
        (Self::None, 0, "SNAT_TYPE_NONE"),
        (Self::TranslationAddress, 1, "SNAT_TYPE_TRANSLATION_ADDRESS"),
        (Self::Snatpool, 2, "SNAT_TYPE_SNATPOOL"),
        (Self::Automap, 3, "SNAT_TYPE_AUTOMAP"),
        (Self::Unknown, 4, "SNAT_TYPE_UNKNOWN"),
    ];
}

// ── Struct conversions ──────────────────────────────────────────────

impl From<IpPortDefinition> for PoolMember {
    fn from(d: IpPortDefinition) -> Self {
        Self {
            address: d.address,
            port: d.port,
        }
    }
}

impl From<&PoolMember> for IpPortDefinition {
    fn from(m: &PoolMember) -> Self {
        Self {
            address: m.address.clone(),
            port: m.port,
        }
    }
}

impl From<RuleDefinition> for Rule {
    fn from(r: RuleDefinition) -> Self {
        Self {
            name: r.rule_name,
            code: r.rule_definition.trim().to_owned(),
        }
    }
}

impl TryFrom<MonitorTemplate> for Monitor {
    type Error = CoreError;

    fn try_from(t: MonitorTemplate) -> Result<Self, Self::Error> {
        Ok(Self {
            monitor_type: MonitorType::from_token(&t.template_type)?,
            name: t.template_name,
        })
    }
}

/// `None` for empty or whitespace-only text.
pub(crate) fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}
