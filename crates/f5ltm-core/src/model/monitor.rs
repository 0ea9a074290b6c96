// ── Health monitor domain types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Template type of a health monitor (iControl `LocalLB.Monitor.TemplateType`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumIter, Display,
)]
pub enum MonitorType {
    Unset,
    Icmp,
    Tcp,
    TcpEcho,
    External,
    Http,
    Https,
    Nntp,
    Ftp,
    Pop3,
    Smtp,
    Mssql,
    Gateway,
    Imap,
    Radius,
    Ldap,
    Wmi,
    SnmpDca,
    SnmpDcaBase,
    RealServer,
    Udp,
    None,
    Oracle,
    Soap,
    GatewayIcmp,
    Sip,
    TcpHalfOpen,
    Scripted,
    Wap,
    Rpc,
    Smb,
    Sasp,
    ModuleScore,
    Firepass,
    Inband,
    RadiusAccounting,
    Diameter,
    VirtualLocation,
    Mysql,
    Postgresql,
    Dns,
}

/// A health-check template attachable to pools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Monitor {
    pub name: String,
    pub monitor_type: MonitorType,
}
