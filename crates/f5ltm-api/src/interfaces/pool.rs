// LocalLB.Pool

use crate::client::IControlClient;
use crate::error::Error;
use crate::interfaces::names::POOL;
use crate::soap::Value;
use crate::types::{IpPortDefinition, MonitorAssociation, first, texts};

#[allow(async_fn_in_trait)]
pub trait PoolApi {
    async fn pool_get_list(&self) -> Result<Vec<String>, Error>;
    async fn pool_get_description(&self, pool: &str) -> Result<String, Error>;
    /// `LB_METHOD_*` token.
    async fn pool_get_lb_method(&self, pool: &str) -> Result<String, Error>;
    async fn pool_get_member(&self, pool: &str) -> Result<Vec<IpPortDefinition>, Error>;
    /// `None` when the appliance returns no association entry.
    async fn pool_get_monitor_association(
        &self,
        pool: &str,
    ) -> Result<Option<MonitorAssociation>, Error>;
    async fn pool_create(
        &self,
        pool: &str,
        lb_method: &str,
        members: &[IpPortDefinition],
    ) -> Result<(), Error>;
    async fn pool_set_description(&self, pool: &str, description: &str) -> Result<(), Error>;
    async fn pool_set_lb_method(&self, pool: &str, lb_method: &str) -> Result<(), Error>;
    async fn pool_add_member(&self, pool: &str, members: &[IpPortDefinition])
    -> Result<(), Error>;
    async fn pool_remove_member(
        &self,
        pool: &str,
        members: &[IpPortDefinition],
    ) -> Result<(), Error>;
    async fn pool_set_monitor_association(
        &self,
        association: &MonitorAssociation,
    ) -> Result<(), Error>;
    async fn pool_remove_monitor_association(&self, pool: &str) -> Result<(), Error>;
    async fn pool_delete(&self, pool: &str) -> Result<(), Error>;
}

fn member_sequence(members: &[IpPortDefinition]) -> Value {
    Value::one(Value::Array(
        members.iter().map(IpPortDefinition::encode).collect(),
    ))
}

impl PoolApi for IControlClient {
    async fn pool_get_list(&self) -> Result<Vec<String>, Error> {
        let ret = self.call(POOL, "get_list", &[]).await?;
        Ok(texts(&ret))
    }

    async fn pool_get_description(&self, pool: &str) -> Result<String, Error> {
        const METHOD: &str = "get_description";
        let ret = self
            .call(POOL, METHOD, &[("pool_names", Value::one(pool))])
            .await?;
        Ok(first(METHOD, &ret)?.text().to_owned())
    }

    async fn pool_get_lb_method(&self, pool: &str) -> Result<String, Error> {
        const METHOD: &str = "get_lb_method";
        let ret = self
            .call(POOL, METHOD, &[("pool_names", Value::one(pool))])
            .await?;
        Ok(first(METHOD, &ret)?.text().trim().to_owned())
    }

    async fn pool_get_member(&self, pool: &str) -> Result<Vec<IpPortDefinition>, Error> {
        const METHOD: &str = "get_member";
        let ret = self
            .call(POOL, METHOD, &[("pool_names", Value::one(pool))])
            .await?;
        first(METHOD, &ret)?
            .items()
            .map(|item| IpPortDefinition::decode(METHOD, item))
            .collect()
    }

    async fn pool_get_monitor_association(
        &self,
        pool: &str,
    ) -> Result<Option<MonitorAssociation>, Error> {
        const METHOD: &str = "get_monitor_association";
        let ret = self
            .call(POOL, METHOD, &[("pool_names", Value::one(pool))])
            .await?;
        ret.items()
            .next()
            .filter(|item| !item.nil)
            .map(|item| MonitorAssociation::decode(METHOD, item))
            .transpose()
    }

    async fn pool_create(
        &self,
        pool: &str,
        lb_method: &str,
        members: &[IpPortDefinition],
    ) -> Result<(), Error> {
        self.call(POOL, "create", &[
            ("pool_names", Value::one(pool)),
            ("lb_methods", Value::one(lb_method)),
            ("members", member_sequence(members)),
        ])
        .await?;
        Ok(())
    }

    async fn pool_set_description(&self, pool: &str, description: &str) -> Result<(), Error> {
        self.call(POOL, "set_description", &[
            ("pool_names", Value::one(pool)),
            ("descriptions", Value::one(description)),
        ])
        .await?;
        Ok(())
    }

    async fn pool_set_lb_method(&self, pool: &str, lb_method: &str) -> Result<(), Error> {
        self.call(POOL, "set_lb_method", &[
            ("pool_names", Value::one(pool)),
            ("lb_methods", Value::one(lb_method)),
        ])
        .await?;
        Ok(())
    }

    async fn pool_add_member(
        &self,
        pool: &str,
        members: &[IpPortDefinition],
    ) -> Result<(), Error> {
        self.call(POOL, "add_member", &[
            ("pool_names", Value::one(pool)),
            ("members", member_sequence(members)),
        ])
        .await?;
        Ok(())
    }

    async fn pool_remove_member(
        &self,
        pool: &str,
        members: &[IpPortDefinition],
    ) -> Result<(), Error> {
        self.call(POOL, "remove_member", &[
            ("pool_names", Value::one(pool)),
            ("members", member_sequence(members)),
        ])
        .await?;
        Ok(())
    }

    async fn pool_set_monitor_association(
        &self,
        association: &MonitorAssociation,
    ) -> Result<(), Error> {
        self.call(POOL, "set_monitor_association", &[(
            "monitor_associations",
            Value::one(association.encode()),
        )])
        .await?;
        Ok(())
    }

    async fn pool_remove_monitor_association(&self, pool: &str) -> Result<(), Error> {
        self.call(POOL, "remove_monitor_association", &[(
            "pool_names",
            Value::one(pool),
        )])
        .await?;
        Ok(())
    }

    async fn pool_delete(&self, pool: &str) -> Result<(), Error> {
        self.call(POOL, "delete_pool", &[("pool_names", Value::one(pool))])
            .await?;
        Ok(())
    }
}
