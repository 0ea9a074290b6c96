// ── Virtual server domain types ──

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Transport protocol of a virtual server.
///
/// Only the protocols a virtual server can listen on are modelled. Input
/// also accepts the long names (`TransmissionControlProtocol`, ...).
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    Display,
)]
pub enum VirtualServerProtocol {
    #[default]
    #[serde(rename = "TCP", alias = "TransmissionControlProtocol")]
    #[strum(serialize = "TCP")]
    Tcp,
    #[serde(rename = "UDP", alias = "UserDatagramProtocol")]
    #[strum(serialize = "UDP")]
    Udp,
    #[serde(rename = "SCTP", alias = "StreamControlTransmissionProtocol")]
    #[strum(serialize = "SCTP")]
    Sctp,
}

/// Side of the connection a profile applies to.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    Display,
)]
pub enum ProfileContext {
    #[default]
    All,
    ClientSide,
    ServerSide,
}

/// Source address translation mode of a virtual server.
///
/// All five modes are readable; only `None` and `Automap` can be applied.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    Display,
)]
pub enum SnatType {
    #[default]
    None,
    TranslationAddress,
    Snatpool,
    Automap,
    Unknown,
}

impl SnatType {
    /// Whether `apply` can configure this mode.
    pub fn is_applicable(self) -> bool {
        matches!(self, Self::None | Self::Automap)
    }
}

/// A profile attached to a virtual server.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VirtualServerProfile {
    pub name: String,
    #[serde(default, alias = "VirtualServerProfileContext")]
    pub context: ProfileContext,
}

/// A host virtual server forwarding to a default pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VirtualServer {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Destination address, verbatim (may carry a `%rd` route-domain suffix).
    pub address: String,
    /// Service port; 0 listens on all ports.
    #[serde(default)]
    pub port: u16,
    #[serde(default, alias = "VirtualServerProtocol")]
    pub protocol: VirtualServerProtocol,
    #[serde(default)]
    pub default_pool_name: String,
    #[serde(default)]
    pub profiles: BTreeSet<VirtualServerProfile>,
    /// VLANs the virtual server is enabled on; empty means all VLANs.
    #[serde(default)]
    pub vlans: BTreeSet<String>,
    #[serde(default)]
    pub snat_type: SnatType,
}
