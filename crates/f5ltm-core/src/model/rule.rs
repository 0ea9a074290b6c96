// ── Rule ──

use serde::{Deserialize, Serialize};

/// An iRule and its TCL source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Rule {
    pub name: String,
    pub code: String,
}
