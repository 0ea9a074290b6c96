// f5ltm-core: Resource mappers and version gate between f5ltm-api and the CLI.

pub mod config;
pub mod convert;
pub mod error;
pub mod mapper;
pub mod model;
pub mod session;
pub mod version;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{SessionConfig, TlsVerification};
pub use convert::WireEnum;
pub use error::CoreError;
pub use mapper::{MonitorReader, NodeMapper, PoolMapper, RuleReader, VirtualServerMapper};
pub use session::Session;
pub use version::{ApplianceVersion, NodeCreation};

pub use model::{
    LoadBalancingMethod, Monitor, MonitorType, Node, Pool, PoolMember, ProfileContext, Rule,
    SnatType, VirtualServer, VirtualServerProfile, VirtualServerProtocol,
};
