// LocalLB.VirtualServer

use crate::client::IControlClient;
use crate::error::Error;
use crate::interfaces::names::VIRTUAL_SERVER;
use crate::soap::Value;
use crate::types::{
    IpPortDefinition, ProfileAttribute, VirtualServerDefinition, VirtualServerProfile,
    VirtualServerResource, VlanFilterList, first, texts,
};

#[allow(async_fn_in_trait)]
pub trait VirtualServerApi {
    async fn virtual_server_get_list(&self) -> Result<Vec<String>, Error>;
    async fn virtual_server_get_description(&self, name: &str) -> Result<String, Error>;
    async fn virtual_server_get_destination(&self, name: &str)
    -> Result<IpPortDefinition, Error>;
    /// `PROTOCOL_*` token.
    async fn virtual_server_get_protocol(&self, name: &str) -> Result<String, Error>;
    async fn virtual_server_get_default_pool_name(&self, name: &str) -> Result<String, Error>;
    async fn virtual_server_get_profile(&self, name: &str)
    -> Result<Vec<ProfileAttribute>, Error>;
    async fn virtual_server_get_vlan(&self, name: &str) -> Result<VlanFilterList, Error>;
    /// `SNAT_TYPE_*` token.
    async fn virtual_server_get_snat_type(&self, name: &str) -> Result<String, Error>;
    async fn virtual_server_create(
        &self,
        definition: &VirtualServerDefinition,
        wildmask: &str,
        resource: &VirtualServerResource,
        profiles: &[VirtualServerProfile],
    ) -> Result<(), Error>;
    async fn virtual_server_set_description(
        &self,
        name: &str,
        description: &str,
    ) -> Result<(), Error>;
    async fn virtual_server_set_vlan(&self, name: &str, vlans: &VlanFilterList)
    -> Result<(), Error>;
    async fn virtual_server_set_snat_automap(&self, name: &str) -> Result<(), Error>;
    async fn virtual_server_delete(&self, name: &str) -> Result<(), Error>;
}

impl IControlClient {
    async fn virtual_server_read(&self, method: &str, name: &str) -> Result<String, Error> {
        let ret = self
            .call(VIRTUAL_SERVER, method, &[("virtual_servers", Value::one(name))])
            .await?;
        Ok(first(method, &ret)?.text().to_owned())
    }
}

impl VirtualServerApi for IControlClient {
    async fn virtual_server_get_list(&self) -> Result<Vec<String>, Error> {
        let ret = self.call(VIRTUAL_SERVER, "get_list", &[]).await?;
        Ok(texts(&ret))
    }

    async fn virtual_server_get_description(&self, name: &str) -> Result<String, Error> {
        self.virtual_server_read("get_description", name).await
    }

    async fn virtual_server_get_destination(
        &self,
        name: &str,
    ) -> Result<IpPortDefinition, Error> {
        const METHOD: &str = "get_destination";
        let ret = self
            .call(VIRTUAL_SERVER, METHOD, &[("virtual_servers", Value::one(name))])
            .await?;
        IpPortDefinition::decode(METHOD, first(METHOD, &ret)?)
    }

    async fn virtual_server_get_protocol(&self, name: &str) -> Result<String, Error> {
        Ok(self
            .virtual_server_read("get_protocol", name)
            .await?
            .trim()
            .to_owned())
    }

    async fn virtual_server_get_default_pool_name(&self, name: &str) -> Result<String, Error> {
        self.virtual_server_read("get_default_pool_name", name).await
    }

    async fn virtual_server_get_profile(
        &self,
        name: &str,
    ) -> Result<Vec<ProfileAttribute>, Error> {
        const METHOD: &str = "get_profile";
        let ret = self
            .call(VIRTUAL_SERVER, METHOD, &[("virtual_servers", Value::one(name))])
            .await?;
        first(METHOD, &ret)?
            .items()
            .map(|item| ProfileAttribute::decode(METHOD, item))
            .collect()
    }

    async fn virtual_server_get_vlan(&self, name: &str) -> Result<VlanFilterList, Error> {
        const METHOD: &str = "get_vlan";
        let ret = self
            .call(VIRTUAL_SERVER, METHOD, &[("virtual_servers", Value::one(name))])
            .await?;
        VlanFilterList::decode(METHOD, first(METHOD, &ret)?)
    }

    async fn virtual_server_get_snat_type(&self, name: &str) -> Result<String, Error> {
        Ok(self
            .virtual_server_read("get_snat_type", name)
            .await?
            .trim()
            .to_owned())
    }

    async fn virtual_server_create(
        &self,
        definition: &VirtualServerDefinition,
        wildmask: &str,
        resource: &VirtualServerResource,
        profiles: &[VirtualServerProfile],
    ) -> Result<(), Error> {
        self.call(VIRTUAL_SERVER, "create", &[
            ("definitions", Value::one(definition.encode())),
            ("wildmasks", Value::one(wildmask)),
            ("resources", Value::one(resource.encode())),
            (
                "profiles",
                Value::one(Value::Array(
                    profiles.iter().map(VirtualServerProfile::encode).collect(),
                )),
            ),
        ])
        .await?;
        Ok(())
    }

    async fn virtual_server_set_description(
        &self,
        name: &str,
        description: &str,
    ) -> Result<(), Error> {
        self.call(VIRTUAL_SERVER, "set_description", &[
            ("virtual_servers", Value::one(name)),
            ("descriptions", Value::one(description)),
        ])
        .await?;
        Ok(())
    }

    async fn virtual_server_set_vlan(
        &self,
        name: &str,
        vlans: &VlanFilterList,
    ) -> Result<(), Error> {
        self.call(VIRTUAL_SERVER, "set_vlan", &[
            ("virtual_servers", Value::one(name)),
            ("vlans", Value::one(vlans.encode())),
        ])
        .await?;
        Ok(())
    }

    async fn virtual_server_set_snat_automap(&self, name: &str) -> Result<(), Error> {
        self.call(VIRTUAL_SERVER, "set_snat_automap", &[(
            "virtual_servers",
            Value::one(name),
        )])
        .await?;
        Ok(())
    }

    async fn virtual_server_delete(&self, name: &str) -> Result<(), Error> {
        self.call(VIRTUAL_SERVER, "delete_virtual_server", &[(
            "virtual_servers",
            Value::one(name),
        )])
        .await?;
        Ok(())
    }
}
