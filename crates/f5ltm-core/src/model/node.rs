// ── Node ──

use serde::{Deserialize, Serialize};

/// A backend address usable by pool members.
///
/// Keyed by `address`; neither the address nor the name changes once the
/// node exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Node {
    pub name: String,
    pub address: String,
    /// Maximum concurrent connections; 0 is unlimited.
    #[serde(default)]
    pub connection_limit: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
