// Node mapper
//
// Nodes are looked up by address through the legacy NodeAddress interface,
// which every supported version still serves. Creation and descriptions
// follow the session's `NodeCreation` strategy.

use f5ltm_api::Device;
use tracing::{debug, info};

use crate::convert::non_blank;
use crate::error::CoreError;
use crate::model::Node;
use crate::version::NodeCreation;

pub struct NodeMapper<'a, D> {
    device: &'a D,
    creation: NodeCreation,
}

impl<'a, D: Device> NodeMapper<'a, D> {
    pub fn new(device: &'a D, creation: NodeCreation) -> Self {
        Self { device, creation }
    }

    /// The node at `address`, or `None` if the appliance has no such node.
    pub async fn find(&self, address: &str) -> Result<Option<Node>, CoreError> {
        let addresses = self.device.node_get_list().await?;
        if !addresses.iter().any(|a| a == address) {
            debug!(address, "node not found");
            return Ok(None);
        }

        let name = self.device.node_get_screen_name(address).await?;
        let connection_limit = self.device.node_get_connection_limit(address).await?;
        let description = match self.creation {
            NodeCreation::V2 => {
                let text = self.device.node_v2_get_description(&name).await?;
                non_blank(Some(text.as_str())).map(str::to_owned)
            }
            NodeCreation::Legacy => None,
        };

        Ok(Some(Node {
            name,
            address: address.to_owned(),
            connection_limit,
            description,
        }))
    }

    pub async fn find_all(&self) -> Result<Vec<Node>, CoreError> {
        let addresses = self.device.node_get_list().await?;
        let mut nodes = Vec::with_capacity(addresses.len());
        for address in &addresses {
            if let Some(node) = self.find(address).await? {
                nodes.push(node);
            }
        }
        Ok(nodes)
    }

    /// Create the node if its address is unknown, otherwise update it.
    ///
    /// Updates touch only the connection limit (and, on V2, the
    /// description); name and address are immutable.
    pub async fn apply(&self, node: &Node) -> Result<(), CoreError> {
        match self.find(&node.address).await? {
            None => self.insert(node).await,
            Some(existing) => self.update(&existing, node).await,
        }
    }

    async fn insert(&self, node: &Node) -> Result<(), CoreError> {
        info!(name = %node.name, address = %node.address, strategy = %self.creation, "creating node");
        match self.creation {
            NodeCreation::Legacy => {
                self.device
                    .node_create(&node.address, node.connection_limit)
                    .await?;
                self.device
                    .node_set_screen_name(&node.address, &node.name)
                    .await?;
            }
            NodeCreation::V2 => {
                self.device
                    .node_v2_create(&node.name, &node.address, node.connection_limit)
                    .await?;
                if let Some(description) = non_blank(node.description.as_deref()) {
                    self.device
                        .node_v2_set_description(&node.name, description)
                        .await?;
                }
            }
        }
        Ok(())
    }

    async fn update(&self, existing: &Node, node: &Node) -> Result<(), CoreError> {
        info!(name = %existing.name, address = %node.address, "updating node");
        self.device
            .node_set_connection_limit(&node.address, node.connection_limit)
            .await?;
        if self.creation == NodeCreation::V2 {
            self.device
                .node_v2_set_description(&existing.name, node.description.as_deref().unwrap_or(""))
                .await?;
        }
        Ok(())
    }

    /// Delete the node at `address`. No existence check: the appliance's
    /// error for a missing node is returned as-is.
    pub async fn delete(&self, address: &str) -> Result<(), CoreError> {
        info!(address, "deleting node");
        self.device.node_delete(address).await?;
        Ok(())
    }
}
