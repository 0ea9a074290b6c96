// Virtual server mapper
//
// Virtual servers are never updated in place: `apply` deletes an existing
// one and creates it again from the local definition.

use std::collections::BTreeSet;

use f5ltm_api::Device;
use f5ltm_api::types::{
    HOST_WILDMASK, RESOURCE_TYPE_POOL, STATE_ENABLED, VirtualServerDefinition,
    VirtualServerProfile as WireProfile, VirtualServerResource, VlanFilterList,
};
use tracing::{debug, info};

use crate::convert::{WireEnum, non_blank};
use crate::error::CoreError;
use crate::model::{
    ProfileContext, SnatType, VirtualServer, VirtualServerProfile, VirtualServerProtocol,
};

pub struct VirtualServerMapper<'a, D> {
    device: &'a D,
}

impl<'a, D: Device> VirtualServerMapper<'a, D> {
    pub fn new(device: &'a D) -> Self {
        Self { device }
    }

    pub async fn find(&self, name: &str) -> Result<Option<VirtualServer>, CoreError> {
        let names = self.device.virtual_server_get_list().await?;
        if !names.iter().any(|n| n == name) {
            debug!(name, "virtual server not found");
            return Ok(None);
        }

        let description = self.device.virtual_server_get_description(name).await?;
        let destination = self.device.virtual_server_get_destination(name).await?;
        let protocol = self.device.virtual_server_get_protocol(name).await?;
        let default_pool_name = self
            .device
            .virtual_server_get_default_pool_name(name)
            .await?;
        let profiles = self.device.virtual_server_get_profile(name).await?;
        let vlan_filter = self.device.virtual_server_get_vlan(name).await?;
        let snat_type = self.device.virtual_server_get_snat_type(name).await?;

        let profiles = profiles
            .into_iter()
            .map(|p| -> Result<VirtualServerProfile, CoreError> {
                Ok(VirtualServerProfile {
                    context: ProfileContext::from_token(&p.profile_context)?,
                    name: p.profile_name,
                })
            })
            .collect::<Result<_, _>>()?;

        let vlans = if vlan_filter.state == STATE_ENABLED {
            vlan_filter.vlans.into_iter().collect()
        } else {
            BTreeSet::new()
        };

        Ok(Some(VirtualServer {
            name: name.to_owned(),
            description: non_blank(Some(description.as_str())).map(str::to_owned),
            address: destination.address,
            port: destination.port,
            protocol: VirtualServerProtocol::from_token(&protocol)?,
            default_pool_name,
            profiles,
            vlans,
            snat_type: SnatType::from_token(&snat_type)?,
        }))
    }

    pub async fn find_all(&self) -> Result<Vec<VirtualServer>, CoreError> {
        let names = self.device.virtual_server_get_list().await?;
        let mut servers = Vec::with_capacity(names.len());
        for name in &names {
            if let Some(vs) = self.find(name).await? {
                servers.push(vs);
            }
        }
        Ok(servers)
    }

    /// Recreate the virtual server from `vs`.
    ///
    /// Only `None` and `Automap` SNAT can be applied; anything else is
    /// rejected before the appliance is contacted.
    pub async fn apply(&self, vs: &VirtualServer) -> Result<(), CoreError> {
        if !vs.snat_type.is_applicable() {
            return Err(CoreError::Validation {
                message: format!(
                    "SNAT type {} cannot be applied to {}; use None or Automap",
                    vs.snat_type, vs.name
                ),
            });
        }

        if self.find(&vs.name).await?.is_some() {
            info!(name = %vs.name, "deleting virtual server before recreate");
            self.device.virtual_server_delete(&vs.name).await?;
        }

        info!(name = %vs.name, address = %vs.address, port = vs.port, "creating virtual server");
        let protocol = vs.protocol.token().to_owned();
        let profiles: Vec<WireProfile> = vs
            .profiles
            .iter()
            .map(|p| WireProfile {
                profile_context: p.context.token().to_owned(),
                profile_name: p.name.clone(),
            })
            .collect();

        self.device
            .virtual_server_create(
                &VirtualServerDefinition {
                    name: vs.name.clone(),
                    address: vs.address.clone(),
                    port: vs.port,
                    protocol: protocol.clone(),
                },
                HOST_WILDMASK,
                &VirtualServerResource {
                    resource_type: RESOURCE_TYPE_POOL.to_owned(),
                    port: vs.port,
                    protocol,
                    default_pool_name: vs.default_pool_name.clone(),
                },
                &profiles,
            )
            .await?;

        if let Some(description) = non_blank(vs.description.as_deref()) {
            self.device
                .virtual_server_set_description(&vs.name, description)
                .await?;
        }

        // An empty set keeps the appliance default of all VLANs.
        if !vs.vlans.is_empty() {
            self.device
                .virtual_server_set_vlan(&vs.name, &VlanFilterList {
                    state: STATE_ENABLED.to_owned(),
                    vlans: vs.vlans.iter().cloned().collect(),
                })
                .await?;
        }

        if vs.snat_type == SnatType::Automap {
            self.device.virtual_server_set_snat_automap(&vs.name).await?;
        }
        Ok(())
    }

    /// Delete the virtual server. The appliance's error for a missing one is returned as-is.
    pub async fn delete(&self, name: &str) -> Result<(), CoreError> {
        info!(name, "deleting virtual server");
        self.device.virtual_server_delete(name).await?;
        Ok(())
    }
}
