#![allow(clippy::unwrap_used, dead_code)]
// In-memory appliance for mapper tests.
//
// Implements every iControl interface trait over plain collections and
// records each call as "Interface.method" so tests can assert exact call
// sequences. Operations on missing resources fail with a SOAP fault, as the
// real appliance does.

use std::collections::BTreeMap;
use std::sync::Mutex;

use f5ltm_api::types::{
    IpPortDefinition, MONITOR_RULE_TYPE_NONE, MonitorAssociation, MonitorRule, MonitorTemplate,
    ProfileAttribute, RuleDefinition, STATE_DISABLED, VirtualServerDefinition,
    VirtualServerProfile, VirtualServerResource, VlanFilterList,
};
use f5ltm_api::{
    Error, MonitorApi, NodeAddressApi, NodeAddressV2Api, PoolApi, RuleApi, SystemInfoApi,
    VirtualServerApi,
};
use f5ltm_core::Session;

#[derive(Debug, Clone, Default)]
pub struct FakeNode {
    pub name: String,
    pub limit: u64,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct FakePool {
    pub lb_method: String,
    pub description: String,
    pub members: Vec<IpPortDefinition>,
    pub association: Option<MonitorAssociation>,
}

#[derive(Debug, Clone)]
pub struct FakeVirtualServer {
    pub definition: VirtualServerDefinition,
    pub resource: VirtualServerResource,
    pub description: String,
    pub profiles: Vec<VirtualServerProfile>,
    pub vlans: VlanFilterList,
    pub snat_type: String,
}

#[derive(Debug, Default)]
pub struct State {
    /// Keyed by address.
    pub nodes: BTreeMap<String, FakeNode>,
    pub pools: BTreeMap<String, FakePool>,
    pub virtual_servers: BTreeMap<String, FakeVirtualServer>,
    pub rules: Vec<RuleDefinition>,
    pub templates: Vec<MonitorTemplate>,
}

pub struct FakeDevice {
    version: String,
    pub state: Mutex<State>,
    calls: Mutex<Vec<String>>,
}

impl FakeDevice {
    pub fn new(version: &str) -> Self {
        Self {
            version: version.to_owned(),
            state: Mutex::new(State::default()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_state(self, f: impl FnOnce(&mut State)) -> Self {
        f(&mut self.state.lock().unwrap());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Number of recorded calls to `call` ("Interface.method").
    pub fn count(&self, call: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_owned());
    }
}

/// Establish a session over a fresh fake and forget the version call.
pub async fn session(device: FakeDevice) -> Session<FakeDevice> {
    let session = Session::establish(device).await.unwrap();
    session.device().clear_calls();
    session
}

fn fault(message: impl Into<String>) -> Error {
    Error::Fault {
        code: "SOAP-ENV:Server".into(),
        message: message.into(),
    }
}

fn not_found(kind: &str, name: &str) -> Error {
    fault(format!("01020036:3: The requested {kind} ({name}) was not found."))
}

fn already_exists(kind: &str, name: &str) -> Error {
    fault(format!("01020066:3: The requested {kind} ({name}) already exists."))
}

// ── System ──────────────────────────────────────────────────────────

impl SystemInfoApi for FakeDevice {
    async fn system_get_version(&self) -> Result<String, Error> {
        self.record("SystemInfo.get_version");
        Ok(self.version.clone())
    }
}

// ── Nodes ───────────────────────────────────────────────────────────

impl FakeDevice {
    fn with_node<T>(&self, address: &str, f: impl FnOnce(&mut FakeNode) -> T) -> Result<T, Error> {
        let mut state = self.state.lock().unwrap();
        state
            .nodes
            .get_mut(address)
            .map(f)
            .ok_or_else(|| not_found("node address", address))
    }

    fn with_named_node<T>(&self, name: &str, f: impl FnOnce(&mut FakeNode) -> T) -> Result<T, Error> {
        let mut state = self.state.lock().unwrap();
        state
            .nodes
            .values_mut()
            .find(|n| n.name == name)
            .map(f)
            .ok_or_else(|| not_found("node", name))
    }
}

impl NodeAddressApi for FakeDevice {
    async fn node_get_list(&self) -> Result<Vec<String>, Error> {
        self.record("NodeAddress.get_list");
        Ok(self.state.lock().unwrap().nodes.keys().cloned().collect())
    }

    async fn node_get_screen_name(&self, address: &str) -> Result<String, Error> {
        self.record("NodeAddress.get_screen_name");
        self.with_node(address, |n| n.name.clone())
    }

    async fn node_get_connection_limit(&self, address: &str) -> Result<u64, Error> {
        self.record("NodeAddress.get_connection_limit");
        self.with_node(address, |n| n.limit)
    }

    async fn node_create(&self, address: &str, limit: u64) -> Result<(), Error> {
        self.record("NodeAddress.create");
        let mut state = self.state.lock().unwrap();
        if state.nodes.contains_key(address) {
            return Err(already_exists("node address", address));
        }
        state.nodes.insert(address.to_owned(), FakeNode {
            name: address.to_owned(),
            limit,
            description: String::new(),
        });
        Ok(())
    }

    async fn node_set_screen_name(&self, address: &str, name: &str) -> Result<(), Error> {
        self.record("NodeAddress.set_screen_name");
        self.with_node(address, |n| n.name = name.to_owned())
    }

    async fn node_set_connection_limit(&self, address: &str, limit: u64) -> Result<(), Error> {
        self.record("NodeAddress.set_connection_limit");
        self.with_node(address, |n| n.limit = limit)
    }

    async fn node_delete(&self, address: &str) -> Result<(), Error> {
        self.record("NodeAddress.delete_node_address");
        self.state
            .lock()
            .unwrap()
            .nodes
            .remove(address)
            .map(drop)
            .ok_or_else(|| not_found("node address", address))
    }
}

impl NodeAddressV2Api for FakeDevice {
    async fn node_v2_create(&self, name: &str, address: &str, limit: u64) -> Result<(), Error> {
        self.record("NodeAddressV2.create");
        let mut state = self.state.lock().unwrap();
        if state.nodes.contains_key(address) {
            return Err(already_exists("node address", address));
        }
        state.nodes.insert(address.to_owned(), FakeNode {
            name: name.to_owned(),
            limit,
            description: String::new(),
        });
        Ok(())
    }

    async fn node_v2_get_description(&self, name: &str) -> Result<String, Error> {
        self.record("NodeAddressV2.get_description");
        self.with_named_node(name, |n| n.description.clone())
    }

    async fn node_v2_set_description(&self, name: &str, description: &str) -> Result<(), Error> {
        self.record("NodeAddressV2.set_description");
        self.with_named_node(name, |n| n.description = description.to_owned())
    }
}

// ── Pools ───────────────────────────────────────────────────────────

impl FakeDevice {
    fn with_pool<T>(&self, name: &str, f: impl FnOnce(&mut FakePool) -> T) -> Result<T, Error> {
        let mut state = self.state.lock().unwrap();
        state
            .pools
            .get_mut(name)
            .map(f)
            .ok_or_else(|| not_found("pool", name))
    }
}

impl PoolApi for FakeDevice {
    async fn pool_get_list(&self) -> Result<Vec<String>, Error> {
        self.record("Pool.get_list");
        Ok(self.state.lock().unwrap().pools.keys().cloned().collect())
    }

    async fn pool_get_description(&self, pool: &str) -> Result<String, Error> {
        self.record("Pool.get_description");
        self.with_pool(pool, |p| p.description.clone())
    }

    async fn pool_get_lb_method(&self, pool: &str) -> Result<String, Error> {
        self.record("Pool.get_lb_method");
        self.with_pool(pool, |p| p.lb_method.clone())
    }

    async fn pool_get_member(&self, pool: &str) -> Result<Vec<IpPortDefinition>, Error> {
        self.record("Pool.get_member");
        self.with_pool(pool, |p| p.members.clone())
    }

    async fn pool_get_monitor_association(
        &self,
        pool: &str,
    ) -> Result<Option<MonitorAssociation>, Error> {
        self.record("Pool.get_monitor_association");
        self.with_pool(pool, |p| {
            Some(p.association.clone().unwrap_or_else(|| MonitorAssociation {
                pool_name: pool.to_owned(),
                monitor_rule: MonitorRule {
                    rule_type: MONITOR_RULE_TYPE_NONE.into(),
                    quorum: 0,
                    monitor_templates: Vec::new(),
                },
            }))
        })
    }

    async fn pool_create(
        &self,
        pool: &str,
        lb_method: &str,
        members: &[IpPortDefinition],
    ) -> Result<(), Error> {
        self.record("Pool.create");
        let mut state = self.state.lock().unwrap();
        if state.pools.contains_key(pool) {
            return Err(already_exists("pool", pool));
        }
        state.pools.insert(pool.to_owned(), FakePool {
            lb_method: lb_method.to_owned(),
            description: String::new(),
            members: members.to_vec(),
            association: None,
        });
        Ok(())
    }

    async fn pool_set_description(&self, pool: &str, description: &str) -> Result<(), Error> {
        self.record("Pool.set_description");
        self.with_pool(pool, |p| p.description = description.to_owned())
    }

    async fn pool_set_lb_method(&self, pool: &str, lb_method: &str) -> Result<(), Error> {
        self.record("Pool.set_lb_method");
        self.with_pool(pool, |p| p.lb_method = lb_method.to_owned())
    }

    async fn pool_add_member(
        &self,
        pool: &str,
        members: &[IpPortDefinition],
    ) -> Result<(), Error> {
        self.record("Pool.add_member");
        self.with_pool(pool, |p| {
            for m in members {
                if p.members.contains(m) {
                    return Err(already_exists("pool member", &format!("{}:{}", m.address, m.port)));
                }
                p.members.push(m.clone());
            }
            Ok(())
        })?
    }

    async fn pool_remove_member(
        &self,
        pool: &str,
        members: &[IpPortDefinition],
    ) -> Result<(), Error> {
        self.record("Pool.remove_member");
        self.with_pool(pool, |p| {
            for m in members {
                let before = p.members.len();
                p.members.retain(|x| x != m);
                if p.members.len() == before {
                    return Err(not_found("pool member", &format!("{}:{}", m.address, m.port)));
                }
            }
            Ok(())
        })?
    }

    async fn pool_set_monitor_association(
        &self,
        association: &MonitorAssociation,
    ) -> Result<(), Error> {
        self.record("Pool.set_monitor_association");
        self.with_pool(&association.pool_name, |p| {
            p.association = Some(association.clone());
        })
    }

    async fn pool_remove_monitor_association(&self, pool: &str) -> Result<(), Error> {
        self.record("Pool.remove_monitor_association");
        self.with_pool(pool, |p| p.association = None)
    }

    async fn pool_delete(&self, pool: &str) -> Result<(), Error> {
        self.record("Pool.delete_pool");
        self.state
            .lock()
            .unwrap()
            .pools
            .remove(pool)
            .map(drop)
            .ok_or_else(|| not_found("pool", pool))
    }
}

// ── Virtual servers ─────────────────────────────────────────────────

impl FakeDevice {
    fn with_vs<T>(
        &self,
        name: &str,
        f: impl FnOnce(&mut FakeVirtualServer) -> T,
    ) -> Result<T, Error> {
        let mut state = self.state.lock().unwrap();
        state
            .virtual_servers
            .get_mut(name)
            .map(f)
            .ok_or_else(|| not_found("virtual server", name))
    }
}

impl VirtualServerApi for FakeDevice {
    async fn virtual_server_get_list(&self) -> Result<Vec<String>, Error> {
        self.record("VirtualServer.get_list");
        Ok(self.state.lock().unwrap().virtual_servers.keys().cloned().collect())
    }

    async fn virtual_server_get_description(&self, name: &str) -> Result<String, Error> {
        self.record("VirtualServer.get_description");
        self.with_vs(name, |v| v.description.clone())
    }

    async fn virtual_server_get_destination(
        &self,
        name: &str,
    ) -> Result<IpPortDefinition, Error> {
        self.record("VirtualServer.get_destination");
        self.with_vs(name, |v| IpPortDefinition {
            address: v.definition.address.clone(),
            port: v.definition.port,
        })
    }

    async fn virtual_server_get_protocol(&self, name: &str) -> Result<String, Error> {
        self.record("VirtualServer.get_protocol");
        self.with_vs(name, |v| v.definition.protocol.clone())
    }

    async fn virtual_server_get_default_pool_name(&self, name: &str) -> Result<String, Error> {
        self.record("VirtualServer.get_default_pool_name");
        self.with_vs(name, |v| v.resource.default_pool_name.clone())
    }

    async fn virtual_server_get_profile(
        &self,
        name: &str,
    ) -> Result<Vec<ProfileAttribute>, Error> {
        self.record("VirtualServer.get_profile");
        self.with_vs(name, |v| {
            v.profiles
                .iter()
                .map(|p| ProfileAttribute {
                    profile_type: "PROFILE_TYPE_TCP".into(),
                    profile_context: p.profile_context.clone(),
                    profile_name: p.profile_name.clone(),
                })
                .collect()
        })
    }

    async fn virtual_server_get_vlan(&self, name: &str) -> Result<VlanFilterList, Error> {
        self.record("VirtualServer.get_vlan");
        self.with_vs(name, |v| v.vlans.clone())
    }

    async fn virtual_server_get_snat_type(&self, name: &str) -> Result<String, Error> {
        self.record("VirtualServer.get_snat_type");
        self.with_vs(name, |v| v.snat_type.clone())
    }

    async fn virtual_server_create(
        &self,
        definition: &VirtualServerDefinition,
        _wildmask: &str,
        resource: &VirtualServerResource,
        profiles: &[VirtualServerProfile],
    ) -> Result<(), Error> {
        self.record("VirtualServer.create");
        let mut state = self.state.lock().unwrap();
        if state.virtual_servers.contains_key(&definition.name) {
            return Err(already_exists("virtual server", &definition.name));
        }
        state
            .virtual_servers
            .insert(definition.name.clone(), FakeVirtualServer {
                definition: definition.clone(),
                resource: resource.clone(),
                description: String::new(),
                profiles: profiles.to_vec(),
                vlans: VlanFilterList {
                    state: STATE_DISABLED.into(),
                    vlans: Vec::new(),
                },
                snat_type: "SNAT_TYPE_NONE".into(),
            });
        Ok(())
    }

    async fn virtual_server_set_description(
        &self,
        name: &str,
        description: &str,
    ) -> Result<(), Error> {
        self.record("VirtualServer.set_description");
        self.with_vs(name, |v| v.description = description.to_owned())
    }

    async fn virtual_server_set_vlan(
        &self,
        name: &str,
        vlans: &VlanFilterList,
    ) -> Result<(), Error> {
        self.record("VirtualServer.set_vlan");
        self.with_vs(name, |v| v.vlans = vlans.clone())
    }

    async fn virtual_server_set_snat_automap(&self, name: &str) -> Result<(), Error> {
        self.record("VirtualServer.set_snat_automap");
        self.with_vs(name, |v| v.snat_type = "SNAT_TYPE_AUTOMAP".into())
    }

    async fn virtual_server_delete(&self, name: &str) -> Result<(), Error> {
        self.record("VirtualServer.delete_virtual_server");
        self.state
            .lock()
            .unwrap()
            .virtual_servers
            .remove(name)
            .map(drop)
            .ok_or_else(|| not_found("virtual server", name))
    }
}

// ── Rules & monitors ────────────────────────────────────────────────

impl RuleApi for FakeDevice {
    async fn rule_query_all(&self) -> Result<Vec<RuleDefinition>, Error> {
        self.record("Rule.query_all_rules");
        Ok(self.state.lock().unwrap().rules.clone())
    }
}

impl MonitorApi for FakeDevice {
    async fn monitor_get_template_list(&self) -> Result<Vec<MonitorTemplate>, Error> {
        self.record("Monitor.get_template_list");
        Ok(self.state.lock().unwrap().templates.clone())
    }
}
