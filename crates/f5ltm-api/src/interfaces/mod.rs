// iControl interface traits
//
// One trait per iControl interface, each implemented for `IControlClient`.
// Methods address a single resource: the one-element arrays iControl expects
// are built here, and the first element of each result array is unwrapped.
// Method names carry an interface prefix so a type implementing every trait
// (see `Device`) never has ambiguous calls.

pub mod monitor;
pub mod node;
pub mod pool;
pub mod rule;
pub mod system;
pub mod virtual_server;

pub use monitor::MonitorApi;
pub use node::{NodeAddressApi, NodeAddressV2Api};
pub use pool::PoolApi;
pub use rule::RuleApi;
pub use system::SystemInfoApi;
pub use virtual_server::VirtualServerApi;

/// Interface path segments of `urn:iControl:{...}`.
pub mod names {
    pub const SYSTEM_INFO: &str = "System/SystemInfo";
    pub const NODE_ADDRESS: &str = "LocalLB/NodeAddress";
    pub const NODE_ADDRESS_V2: &str = "LocalLB/NodeAddressV2";
    pub const POOL: &str = "LocalLB/Pool";
    pub const VIRTUAL_SERVER: &str = "LocalLB/VirtualServer";
    pub const RULE: &str = "LocalLB/Rule";
    pub const MONITOR: &str = "LocalLB/Monitor";
}

/// Everything a management session needs from an appliance.
pub trait Device:
    SystemInfoApi
    + NodeAddressApi
    + NodeAddressV2Api
    + PoolApi
    + VirtualServerApi
    + RuleApi
    + MonitorApi
{
}

impl<T> Device for T where
    T: SystemInfoApi
        + NodeAddressApi
        + NodeAddressV2Api
        + PoolApi
        + VirtualServerApi
        + RuleApi
        + MonitorApi
{
}
