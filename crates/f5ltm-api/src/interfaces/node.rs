// LocalLB.NodeAddress and LocalLB.NodeAddressV2
//
// The legacy interface keys nodes by address and carries a "screen name";
// V2 (BIG-IP 11+) keys nodes by name and carries a description.

use crate::client::IControlClient;
use crate::error::Error;
use crate::interfaces::names::{NODE_ADDRESS, NODE_ADDRESS_V2};
use crate::soap::Value;
use crate::types::{ULong64, first, texts};

#[allow(async_fn_in_trait)]
pub trait NodeAddressApi {
    /// Addresses of every node.
    async fn node_get_list(&self) -> Result<Vec<String>, Error>;
    async fn node_get_screen_name(&self, address: &str) -> Result<String, Error>;
    async fn node_get_connection_limit(&self, address: &str) -> Result<u64, Error>;
    async fn node_create(&self, address: &str, limit: u64) -> Result<(), Error>;
    async fn node_set_screen_name(&self, address: &str, name: &str) -> Result<(), Error>;
    async fn node_set_connection_limit(&self, address: &str, limit: u64) -> Result<(), Error>;
    async fn node_delete(&self, address: &str) -> Result<(), Error>;
}

#[allow(async_fn_in_trait)]
pub trait NodeAddressV2Api {
    async fn node_v2_create(&self, name: &str, address: &str, limit: u64) -> Result<(), Error>;
    async fn node_v2_get_description(&self, name: &str) -> Result<String, Error>;
    async fn node_v2_set_description(&self, name: &str, description: &str)
    -> Result<(), Error>;
}

impl NodeAddressApi for IControlClient {
    async fn node_get_list(&self) -> Result<Vec<String>, Error> {
        let ret = self.call(NODE_ADDRESS, "get_list", &[]).await?;
        Ok(texts(&ret))
    }

    async fn node_get_screen_name(&self, address: &str) -> Result<String, Error> {
        const METHOD: &str = "get_screen_name";
        let ret = self
            .call(NODE_ADDRESS, METHOD, &[("node_addresses", Value::one(address))])
            .await?;
        Ok(first(METHOD, &ret)?.text().to_owned())
    }

    async fn node_get_connection_limit(&self, address: &str) -> Result<u64, Error> {
        const METHOD: &str = "get_connection_limit";
        let ret = self
            .call(NODE_ADDRESS, METHOD, &[("node_addresses", Value::one(address))])
            .await?;
        Ok(ULong64::decode(METHOD, first(METHOD, &ret)?)?.value())
    }

    async fn node_create(&self, address: &str, limit: u64) -> Result<(), Error> {
        self.call(NODE_ADDRESS, "create", &[
            ("node_addresses", Value::one(address)),
            ("limits", Value::one(limit)),
        ])
        .await?;
        Ok(())
    }

    async fn node_set_screen_name(&self, address: &str, name: &str) -> Result<(), Error> {
        self.call(NODE_ADDRESS, "set_screen_name", &[
            ("node_addresses", Value::one(address)),
            ("names", Value::one(name)),
        ])
        .await?;
        Ok(())
    }

    async fn node_set_connection_limit(&self, address: &str, limit: u64) -> Result<(), Error> {
        self.call(NODE_ADDRESS, "set_connection_limit", &[
            ("node_addresses", Value::one(address)),
            ("limits", Value::one(ULong64::from(limit).encode())),
        ])
        .await?;
        Ok(())
    }

    async fn node_delete(&self, address: &str) -> Result<(), Error> {
        self.call(NODE_ADDRESS, "delete_node_address", &[(
            "node_addresses",
            Value::one(address),
        )])
        .await?;
        Ok(())
    }
}

impl NodeAddressV2Api for IControlClient {
    async fn node_v2_create(&self, name: &str, address: &str, limit: u64) -> Result<(), Error> {
        self.call(NODE_ADDRESS_V2, "create", &[
            ("nodes", Value::one(name)),
            ("addresses", Value::one(address)),
            ("limits", Value::one(limit)),
        ])
        .await?;
        Ok(())
    }

    async fn node_v2_get_description(&self, name: &str) -> Result<String, Error> {
        const METHOD: &str = "get_description";
        let ret = self
            .call(NODE_ADDRESS_V2, METHOD, &[("nodes", Value::one(name))])
            .await?;
        Ok(first(METHOD, &ret)?.text().to_owned())
    }

    async fn node_v2_set_description(
        &self,
        name: &str,
        description: &str,
    ) -> Result<(), Error> {
        self.call(NODE_ADDRESS_V2, "set_description", &[
            ("nodes", Value::one(name)),
            ("descriptions", Value::one(description)),
        ])
        .await?;
        Ok(())
    }
}
