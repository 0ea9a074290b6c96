// ── Pool domain types ──

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Load-balancing strategy of a pool (iControl `LocalLB.LBMethod`).
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
pub enum LoadBalancingMethod {
    #[default]
    RoundRobin,
    RatioMember,
    LeastConnectionMember,
    ObservedMember,
    PredictiveMember,
    RatioNodeAddress,
    LeastConnectionNodeAddress,
    FastestNodeAddress,
    ObservedNodeAddress,
    PredictiveNodeAddress,
    DynamicRatio,
    FastestAppResponse,
    LeastSessions,
    DynamicRatioMember,
    L3Addr,
    Unknown,
    WeightedLeastConnectionMember,
    WeightedLeastConnectionNodeAddress,
    RatioSession,
    RatioLeastConnectionMember,
    RatioLeastConnectionNodeAddress,
}

/// One `address:port` backend of a pool.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PoolMember {
    pub address: String,
    pub port: u16,
}

/// A named group of members load-balanced together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Pool {
    pub name: String,
    #[serde(default)]
    pub load_balancing_method: LoadBalancingMethod,
    #[serde(default)]
    pub members: BTreeSet<PoolMember>,
    /// Monitor template names, e.g. `/Common/http`.
    #[serde(default)]
    pub monitors: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
