// Pool mapper

use std::collections::BTreeSet;

use f5ltm_api::Device;
use f5ltm_api::types::{
    IpPortDefinition, MONITOR_RULE_TYPE_NONE, MONITOR_RULE_TYPE_SINGLE, MonitorAssociation,
    MonitorRule,
};
use tracing::{debug, info};

use crate::convert::{WireEnum, non_blank};
use crate::error::CoreError;
use crate::model::{LoadBalancingMethod, Pool, PoolMember};

pub struct PoolMapper<'a, D> {
    device: &'a D,
}

impl<'a, D: Device> PoolMapper<'a, D> {
    pub fn new(device: &'a D) -> Self {
        Self { device }
    }

    pub async fn find(&self, name: &str) -> Result<Option<Pool>, CoreError> {
        let names = self.device.pool_get_list().await?;
        if !names.iter().any(|n| n == name) {
            debug!(name, "pool not found");
            return Ok(None);
        }

        let description = self.device.pool_get_description(name).await?;
        let lb_method = self.device.pool_get_lb_method(name).await?;
        let members = self.device.pool_get_member(name).await?;
        let association = self.device.pool_get_monitor_association(name).await?;

        let monitors = match association {
            Some(a) if a.monitor_rule.rule_type != MONITOR_RULE_TYPE_NONE => {
                a.monitor_rule.monitor_templates.into_iter().collect()
            }
            _ => BTreeSet::new(),
        };

        Ok(Some(Pool {
            name: name.to_owned(),
            load_balancing_method: LoadBalancingMethod::from_token(&lb_method)?,
            members: members.into_iter().map(PoolMember::from).collect(),
            monitors,
            description: non_blank(Some(description.as_str())).map(str::to_owned),
        }))
    }

    pub async fn find_all(&self) -> Result<Vec<Pool>, CoreError> {
        let names = self.device.pool_get_list().await?;
        let mut pools = Vec::with_capacity(names.len());
        for name in &names {
            if let Some(pool) = self.find(name).await? {
                pools.push(pool);
            }
        }
        Ok(pools)
    }

    /// Create the pool, or replace every mutable property of an existing one.
    ///
    /// An existing pool is updated destructively: its monitor association
    /// and all current members are removed before the new state is added.
    pub async fn apply(&self, pool: &Pool) -> Result<(), CoreError> {
        match self.find(&pool.name).await? {
            None => self.insert(pool).await,
            Some(existing) => self.update(&existing, pool).await,
        }
    }

    async fn insert(&self, pool: &Pool) -> Result<(), CoreError> {
        info!(name = %pool.name, members = pool.members.len(), "creating pool");
        self.device
            .pool_create(
                &pool.name,
                pool.load_balancing_method.token(),
                &wire_members(pool.members.iter()),
            )
            .await?;
        if let Some(description) = non_blank(pool.description.as_deref()) {
            self.device
                .pool_set_description(&pool.name, description)
                .await?;
        }
        self.device
            .pool_set_monitor_association(&monitor_association(pool))
            .await?;
        Ok(())
    }

    async fn update(&self, existing: &Pool, pool: &Pool) -> Result<(), CoreError> {
        info!(
            name = %pool.name,
            removed = existing.members.len(),
            added = pool.members.len(),
            "replacing pool"
        );
        self.device
            .pool_remove_monitor_association(&pool.name)
            .await?;
        self.device
            .pool_remove_member(&pool.name, &wire_members(existing.members.iter()))
            .await?;
        self.device
            .pool_set_lb_method(&pool.name, pool.load_balancing_method.token())
            .await?;
        self.device
            .pool_set_description(&pool.name, pool.description.as_deref().unwrap_or(""))
            .await?;
        self.device
            .pool_add_member(&pool.name, &wire_members(pool.members.iter()))
            .await?;
        self.device
            .pool_set_monitor_association(&monitor_association(pool))
            .await?;
        Ok(())
    }

    /// Delete the pool. The appliance's error for a missing pool is returned as-is.
    pub async fn delete(&self, name: &str) -> Result<(), CoreError> {
        info!(name, "deleting pool");
        self.device.pool_delete(name).await?;
        Ok(())
    }
}

fn wire_members<'m>(members: impl Iterator<Item = &'m PoolMember>) -> Vec<IpPortDefinition> {
    members.map(IpPortDefinition::from).collect()
}

/// A single-rule association requiring every listed template (quorum 0).
fn monitor_association(pool: &Pool) -> MonitorAssociation {
    MonitorAssociation {
        pool_name: pool.name.clone(),
        monitor_rule: MonitorRule {
            rule_type: MONITOR_RULE_TYPE_SINGLE.to_owned(),
            quorum: 0,
            monitor_templates: pool.monitors.iter().cloned().collect(),
        },
    }
}
