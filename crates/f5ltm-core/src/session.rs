// ── Session ──
//
// The only shared state of a run: the device client, the parsed appliance
// version, and the node creation strategy derived from it. Built once and
// borrowed by every mapper; there are no globals.

use f5ltm_api::transport::{TlsMode, TransportConfig};
use f5ltm_api::{Device, IControlClient};
use tracing::{debug, info};

use crate::config::{SessionConfig, TlsVerification};
use crate::error::CoreError;
use crate::mapper::{MonitorReader, NodeMapper, PoolMapper, RuleReader, VirtualServerMapper};
use crate::version::{ApplianceVersion, NodeCreation};

/// An established management session with one appliance.
pub struct Session<D> {
    device: D,
    version: ApplianceVersion,
    node_creation: NodeCreation,
}

impl Session<IControlClient> {
    /// Connect to the appliance described by `config` and run the version gate.
    pub async fn connect(config: &SessionConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: tls_to_transport(&config.tls),
            timeout: config.timeout,
        };
        let client = IControlClient::new(
            &config.url,
            config.username.clone(),
            config.password.clone(),
            &transport,
        )?;
        debug!(portal = %client.portal_url(), "iControl client ready");
        Self::establish(client).await
    }
}

impl<D: Device> Session<D> {
    /// Query the appliance version and select the node creation strategy.
    ///
    /// A version string without a `major.minor.patch` part is fatal.
    pub async fn establish(device: D) -> Result<Self, CoreError> {
        let raw = device.system_get_version().await?;
        let version = ApplianceVersion::parse(&raw)?;
        let node_creation = version.node_creation();
        info!(%version, %node_creation, "session established");
        Ok(Self {
            device,
            version,
            node_creation,
        })
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn version(&self) -> ApplianceVersion {
        self.version
    }

    pub fn node_creation(&self) -> NodeCreation {
        self.node_creation
    }

    // ── Mappers ──────────────────────────────────────────────────────

    pub fn nodes(&self) -> NodeMapper<'_, D> {
        NodeMapper::new(&self.device, self.node_creation)
    }

    pub fn pools(&self) -> PoolMapper<'_, D> {
        PoolMapper::new(&self.device)
    }

    pub fn virtual_servers(&self) -> VirtualServerMapper<'_, D> {
        VirtualServerMapper::new(&self.device)
    }

    pub fn rules(&self) -> RuleReader<'_, D> {
        RuleReader::new(&self.device)
    }

    pub fn monitors(&self) -> MonitorReader<'_, D> {
        MonitorReader::new(&self.device)
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
