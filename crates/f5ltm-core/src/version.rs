// ── Version gate ──
//
// The appliance reports a free-form software version such as
// `BIG-IP_v11.4.0`. Only the `major.minor.patch` triple matters: major 11
// introduced the name-keyed NodeAddressV2 interface, which changes how nodes
// are created. The gate runs once per session.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::CoreError;

#[allow(clippy::unwrap_used)]
static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\.(\d+)\.(\d+)").unwrap());

/// First major release with the NodeAddressV2 interface.
const NODE_V2_MAJOR: u32 = 11;

/// Parsed `major.minor.patch` of the appliance software.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ApplianceVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ApplianceVersion {
    /// Extract the first `N.N.N` triple from a raw version string.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let err = || CoreError::VersionParse {
            raw: raw.to_owned(),
        };
        let caps = VERSION_PATTERN.captures(raw).ok_or_else(err)?;
        let part = |i: usize| -> Result<u32, CoreError> {
            caps.get(i)
                .ok_or_else(err)?
                .as_str()
                .parse()
                .map_err(|_| err())
        };
        Ok(Self {
            major: part(1)?,
            minor: part(2)?,
            patch: part(3)?,
        })
    }

    /// The node creation strategy this version supports.
    pub fn node_creation(self) -> NodeCreation {
        if self.major >= NODE_V2_MAJOR {
            NodeCreation::V2
        } else {
            NodeCreation::Legacy
        }
    }
}

impl fmt::Display for ApplianceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Which iControl call family creates (and describes) nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
pub enum NodeCreation {
    /// `LocalLB.NodeAddress`: create by address, then set the screen name.
    Legacy,
    /// `LocalLB.NodeAddressV2`: create by name and address in one call.
    V2,
}
