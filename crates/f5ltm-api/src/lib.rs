// f5ltm-api: Async Rust client for the BIG-IP iControl SOAP API (System + LocalLB)

pub mod client;
pub mod error;
pub mod interfaces;
pub mod soap;
pub mod transport;
pub mod types;

pub use client::IControlClient;
pub use error::Error;
pub use interfaces::{
    Device, MonitorApi, NodeAddressApi, NodeAddressV2Api, PoolApi, RuleApi, SystemInfoApi,
    VirtualServerApi,
};
pub use secrecy::SecretString;
pub use transport::{TlsMode, TransportConfig};
