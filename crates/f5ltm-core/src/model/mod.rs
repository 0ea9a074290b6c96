// ── Domain model ──
//
// The canonical local representation of each LTM resource. These types are
// also the JSON interchange format used by `dump` and `apply`: PascalCase
// field names, enumerations as their variant names, sets sorted so dumps
// are stable.

pub mod monitor;
pub mod node;
pub mod pool;
pub mod rule;
pub mod virtual_server;

pub use monitor::{Monitor, MonitorType};
pub use node::Node;
pub use pool::{LoadBalancingMethod, Pool, PoolMember};
pub use rule::Rule;
pub use virtual_server::{
    ProfileContext, SnatType, VirtualServer, VirtualServerProfile, VirtualServerProtocol,
};
