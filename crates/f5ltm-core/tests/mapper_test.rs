#![allow(clippy::unwrap_used)]
// Mapper behaviour against an in-memory appliance.

mod support;

use std::collections::BTreeSet;

use f5ltm_api::types::{MonitorTemplate, RuleDefinition};
use f5ltm_core::{
    CoreError, LoadBalancingMethod, MonitorType, Node, NodeCreation, Pool, PoolMember,
    ProfileContext, Session, SnatType, VirtualServer, VirtualServerProfile,
    VirtualServerProtocol,
};
use pretty_assertions::assert_eq;
use support::{FakeDevice, session};

const LEGACY: &str = "BIG-IP_v10.2.1";
const CURRENT: &str = "BIG-IP_v11.4.0";

fn member(address: &str, port: u16) -> PoolMember {
    PoolMember {
        address: address.into(),
        port,
    }
}

fn web_pool() -> Pool {
    Pool {
        name: "/Common/WebPool".into(),
        load_balancing_method: LoadBalancingMethod::RoundRobin,
        members: BTreeSet::from([member("10.1.1.5", 80), member("10.1.1.6", 80)]),
        monitors: BTreeSet::from(["/Common/http".to_owned()]),
        description: None,
    }
}

fn web_vs() -> VirtualServer {
    VirtualServer {
        name: "/Common/vs_web".into(),
        description: Some("public web".into()),
        address: "192.0.2.10".into(),
        port: 443,
        protocol: VirtualServerProtocol::Tcp,
        default_pool_name: "/Common/WebPool".into(),
        profiles: BTreeSet::from([
            VirtualServerProfile {
                name: "/Common/tcp".into(),
                context: ProfileContext::All,
            },
            VirtualServerProfile {
                name: "/Common/clientssl".into(),
                context: ProfileContext::ClientSide,
            },
        ]),
        vlans: BTreeSet::from(["/Common/external".to_owned()]),
        snat_type: SnatType::Automap,
    }
}

// ── Version gate ────────────────────────────────────────────────────

#[tokio::test]
async fn session_selects_node_creation_from_major_version() {
    let legacy = session(FakeDevice::new(LEGACY)).await;
    assert_eq!(legacy.node_creation(), NodeCreation::Legacy);
    assert_eq!(legacy.version().to_string(), "10.2.1");

    let current = session(FakeDevice::new(CURRENT)).await;
    assert_eq!(current.node_creation(), NodeCreation::V2);
}

#[tokio::test]
async fn unparseable_version_fails_session() {
    let err = Session::establish(FakeDevice::new("BIG-IP unknown build"))
        .await
        .err()
        .unwrap();
    assert!(matches!(err, CoreError::VersionParse { raw } if raw == "BIG-IP unknown build"));
}

// ── Nodes ───────────────────────────────────────────────────────────

#[tokio::test]
async fn legacy_node_create_sets_screen_name() {
    let s = session(FakeDevice::new(LEGACY)).await;
    let node = Node {
        name: "web01".into(),
        address: "10.1.1.5".into(),
        connection_limit: 100,
        description: Some("ignored before v11".into()),
    };

    s.nodes().apply(&node).await.unwrap();

    assert_eq!(s.device().calls(), [
        "NodeAddress.get_list",
        "NodeAddress.create",
        "NodeAddress.set_screen_name",
    ]);
    let found = s.nodes().find("10.1.1.5").await.unwrap().unwrap();
    assert_eq!(found, Node {
        description: None,
        ..node
    });
}

#[tokio::test]
async fn v2_node_create_is_a_single_call() {
    let s = session(FakeDevice::new(CURRENT)).await;
    let node = Node {
        name: "/Common/web01".into(),
        address: "10.1.1.5".into(),
        connection_limit: 0,
        description: None,
    };

    s.nodes().apply(&node).await.unwrap();

    assert_eq!(s.device().calls(), [
        "NodeAddress.get_list",
        "NodeAddressV2.create"
    ]);
    assert_eq!(s.nodes().find("10.1.1.5").await.unwrap(), Some(node));
}

#[tokio::test]
async fn v2_node_round_trips_description() {
    let s = session(FakeDevice::new(CURRENT)).await;
    let node = Node {
        name: "/Common/db01".into(),
        address: "10.1.2.7".into(),
        connection_limit: 250,
        description: Some("primary database".into()),
    };

    s.nodes().apply(&node).await.unwrap();

    assert_eq!(s.device().count("NodeAddressV2.set_description"), 1);
    assert_eq!(s.nodes().find("10.1.2.7").await.unwrap(), Some(node));
}

#[tokio::test]
async fn node_update_keeps_name_and_changes_limit() {
    let s = session(FakeDevice::new(CURRENT)).await;
    let node = Node {
        name: "/Common/web01".into(),
        address: "10.1.1.5".into(),
        connection_limit: 10,
        description: Some("old".into()),
    };
    s.nodes().apply(&node).await.unwrap();
    s.device().clear_calls();

    let changed = Node {
        name: "/Common/renamed".into(),
        connection_limit: 20,
        description: None,
        ..node.clone()
    };
    s.nodes().apply(&changed).await.unwrap();

    assert_eq!(s.device().count("NodeAddress.create"), 0);
    assert_eq!(s.device().count("NodeAddressV2.create"), 0);
    let found = s.nodes().find("10.1.1.5").await.unwrap().unwrap();
    assert_eq!(found.name, "/Common/web01");
    assert_eq!(found.connection_limit, 20);
    assert_eq!(found.description, None);
}

#[tokio::test]
async fn legacy_node_update_only_sets_connection_limit() {
    let s = session(FakeDevice::new(LEGACY)).await;
    let node = Node {
        name: "/Common/web01".into(),
        address: "10.1.1.5".into(),
        connection_limit: 10,
        description: None,
    };
    s.nodes().apply(&node).await.unwrap();
    s.device().clear_calls();

    let changed = Node {
        connection_limit: 20,
        description: Some("ignored on v10".into()),
        ..node.clone()
    };
    s.nodes().apply(&changed).await.unwrap();

    assert_eq!(s.device().calls(), [
        "NodeAddress.get_list",
        "NodeAddress.get_screen_name",
        "NodeAddress.get_connection_limit",
        "NodeAddress.set_connection_limit",
    ]);
    let found = s.nodes().find("10.1.1.5").await.unwrap().unwrap();
    assert_eq!(found.connection_limit, 20);
    assert_eq!(found.description, None);
}

#[tokio::test]
async fn node_apply_is_idempotent() {
    let s = session(FakeDevice::new(CURRENT)).await;
    let node = Node {
        name: "/Common/web01".into(),
        address: "10.1.1.5".into(),
        connection_limit: 42,
        description: Some("edge".into()),
    };

    s.nodes().apply(&node).await.unwrap();
    let first = s.nodes().find_all().await.unwrap();
    s.nodes().apply(&node).await.unwrap();
    let second = s.nodes().find_all().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(second, vec![node]);
}

#[tokio::test]
async fn delete_missing_node_surfaces_appliance_error() {
    let s = session(FakeDevice::new(CURRENT)).await;
    let err = s.nodes().delete("10.9.9.9").await.unwrap_err();
    match err {
        CoreError::Device { message } => assert!(message.contains("10.9.9.9"), "{message}"),
        other => panic!("expected device error, got {other:?}"),
    }
}

#[tokio::test]
async fn find_missing_node_is_none() {
    let s = session(FakeDevice::new(LEGACY)).await;
    assert_eq!(s.nodes().find("10.0.0.1").await.unwrap(), None);
}

// ── Pools ───────────────────────────────────────────────────────────

#[tokio::test]
async fn new_pool_is_created_with_monitor_association() {
    let s = session(FakeDevice::new(CURRENT)).await;
    let pool = web_pool();

    s.pools().apply(&pool).await.unwrap();

    assert_eq!(s.device().calls(), [
        "Pool.get_list",
        "Pool.create",
        "Pool.set_monitor_association",
    ]);
    assert_eq!(s.pools().find("/Common/WebPool").await.unwrap(), Some(pool));
}

#[tokio::test]
async fn new_pool_description_is_set_after_create() {
    let s = session(FakeDevice::new(CURRENT)).await;
    let pool = Pool {
        description: Some("web tier".into()),
        ..web_pool()
    };

    s.pools().apply(&pool).await.unwrap();

    assert_eq!(s.device().calls(), [
        "Pool.get_list",
        "Pool.create",
        "Pool.set_description",
        "Pool.set_monitor_association",
    ]);
    assert_eq!(s.pools().find(&pool.name).await.unwrap(), Some(pool));
}

#[tokio::test]
async fn pool_update_replaces_members_exactly() {
    let s = session(FakeDevice::new(CURRENT)).await;
    s.pools().apply(&web_pool()).await.unwrap();
    s.device().clear_calls();

    let replacement = Pool {
        load_balancing_method: LoadBalancingMethod::LeastConnectionMember,
        members: BTreeSet::from([member("10.1.1.6", 80), member("10.1.1.7", 8080)]),
        monitors: BTreeSet::from(["/Common/tcp".to_owned(), "/Common/http".to_owned()]),
        description: Some("resized".into()),
        ..web_pool()
    };
    s.pools().apply(&replacement).await.unwrap();

    assert_eq!(&s.device().calls()[..7], [
        "Pool.get_list",
        "Pool.get_description",
        "Pool.get_lb_method",
        "Pool.get_member",
        "Pool.get_monitor_association",
        "Pool.remove_monitor_association",
        "Pool.remove_member",
    ]);
    assert_eq!(
        s.pools().find(&replacement.name).await.unwrap(),
        Some(replacement)
    );
}

#[tokio::test]
async fn pool_update_clears_description() {
    let s = session(FakeDevice::new(CURRENT)).await;
    let described = Pool {
        description: Some("temporary".into()),
        ..web_pool()
    };
    s.pools().apply(&described).await.unwrap();
    s.pools().apply(&web_pool()).await.unwrap();

    let found = s.pools().find("/Common/WebPool").await.unwrap().unwrap();
    assert_eq!(found.description, None);
}

#[tokio::test]
async fn pool_apply_is_idempotent() {
    let s = session(FakeDevice::new(CURRENT)).await;
    s.pools().apply(&web_pool()).await.unwrap();
    s.pools().apply(&web_pool()).await.unwrap();

    assert_eq!(s.pools().find_all().await.unwrap(), vec![web_pool()]);
}

#[tokio::test]
async fn pool_without_monitors_reads_back_empty() {
    let s = session(FakeDevice::new(CURRENT)).await;
    let pool = Pool {
        monitors: BTreeSet::new(),
        ..web_pool()
    };
    s.pools().apply(&pool).await.unwrap();

    let found = s.pools().find(&pool.name).await.unwrap().unwrap();
    assert!(found.monitors.is_empty());
}

#[tokio::test]
async fn find_all_reads_each_pool_individually() {
    let s = session(FakeDevice::new(CURRENT)).await;
    s.pools().apply(&web_pool()).await.unwrap();
    s.pools()
        .apply(&Pool {
            name: "/Common/ApiPool".into(),
            ..web_pool()
        })
        .await
        .unwrap();
    s.device().clear_calls();

    let pools = s.pools().find_all().await.unwrap();

    assert_eq!(pools.len(), 2);
    assert_eq!(s.device().count("Pool.get_list"), 3);
    assert_eq!(s.device().count("Pool.get_member"), 2);
}

#[tokio::test]
async fn delete_missing_pool_surfaces_appliance_error() {
    let s = session(FakeDevice::new(CURRENT)).await;
    let err = s.pools().delete("/Common/Nope").await.unwrap_err();
    assert!(matches!(err, CoreError::Device { .. }));
}

// ── Virtual servers ─────────────────────────────────────────────────

#[tokio::test]
async fn virtual_server_round_trips() {
    let s = session(FakeDevice::new(CURRENT)).await;
    let vs = web_vs();

    s.virtual_servers().apply(&vs).await.unwrap();

    assert_eq!(s.device().calls(), [
        "VirtualServer.get_list",
        "VirtualServer.create",
        "VirtualServer.set_description",
        "VirtualServer.set_vlan",
        "VirtualServer.set_snat_automap",
    ]);
    assert_eq!(s.virtual_servers().find(&vs.name).await.unwrap(), Some(vs));
}

#[tokio::test]
async fn existing_virtual_server_is_deleted_then_recreated() {
    let s = session(FakeDevice::new(CURRENT)).await;
    s.virtual_servers().apply(&web_vs()).await.unwrap();
    s.device().clear_calls();

    let moved = VirtualServer {
        port: 8443,
        snat_type: SnatType::None,
        ..web_vs()
    };
    s.virtual_servers().apply(&moved).await.unwrap();

    let calls = s.device().calls();
    let delete = calls
        .iter()
        .position(|c| c == "VirtualServer.delete_virtual_server")
        .unwrap();
    let create = calls
        .iter()
        .position(|c| c == "VirtualServer.create")
        .unwrap();
    assert!(delete < create);
    assert_eq!(s.device().count("VirtualServer.set_snat_automap"), 0);
    assert_eq!(s.virtual_servers().find(&moved.name).await.unwrap(), Some(moved));
}

#[tokio::test]
async fn virtual_server_apply_is_idempotent() {
    let s = session(FakeDevice::new(CURRENT)).await;
    let vs = web_vs();

    s.virtual_servers().apply(&vs).await.unwrap();
    let first = s.virtual_servers().find_all().await.unwrap();
    s.virtual_servers().apply(&vs).await.unwrap();
    let second = s.virtual_servers().find_all().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(second, vec![vs]);
}

#[tokio::test]
async fn virtual_server_without_vlans_skips_vlan_call() {
    let s = session(FakeDevice::new(CURRENT)).await;
    let vs = VirtualServer {
        description: None,
        vlans: BTreeSet::new(),
        snat_type: SnatType::None,
        ..web_vs()
    };

    s.virtual_servers().apply(&vs).await.unwrap();

    assert_eq!(s.device().calls(), [
        "VirtualServer.get_list",
        "VirtualServer.create"
    ]);
    assert_eq!(s.virtual_servers().find(&vs.name).await.unwrap(), Some(vs));
}

#[tokio::test]
async fn unsupported_snat_is_rejected_before_any_call() {
    let s = session(FakeDevice::new(CURRENT)).await;
    for snat_type in [
        SnatType::TranslationAddress,
        SnatType::Snatpool,
        SnatType::Unknown,
    ] {
        let vs = VirtualServer {
            snat_type,
            ..web_vs()
        };
        let err = s.virtual_servers().apply(&vs).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }), "{err:?}");
    }
    assert!(s.device().calls().is_empty());
}

#[tokio::test]
async fn delete_missing_virtual_server_surfaces_appliance_error() {
    let s = session(FakeDevice::new(CURRENT)).await;
    let err = s
        .virtual_servers()
        .delete("/Common/vs_gone")
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Device { .. }));
}

// ── Rules & monitors ────────────────────────────────────────────────

fn rule(name: &str, code: &str) -> RuleDefinition {
    RuleDefinition {
        rule_name: name.into(),
        rule_definition: code.into(),
    }
}

fn template(name: &str, template_type: &str) -> MonitorTemplate {
    MonitorTemplate {
        template_name: name.into(),
        template_type: template_type.into(),
    }
}

#[tokio::test]
async fn rules_are_sorted_and_trimmed() {
    let device = FakeDevice::new(CURRENT).with_state(|st| {
        st.rules = vec![
            rule("/Common/redirect", "\nwhen HTTP_REQUEST { HTTP::redirect https://[HTTP::host] }\n"),
            rule("/Common/_sys_auth", "  when CLIENT_ACCEPTED { }  "),
        ];
    });
    let s = session(device).await;

    let rules = s.rules().find_all().await.unwrap();

    let names: Vec<_> = rules.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["/Common/_sys_auth", "/Common/redirect"]);
    assert_eq!(rules[0].code, "when CLIENT_ACCEPTED { }");
    assert_eq!(
        rules[1].code,
        "when HTTP_REQUEST { HTTP::redirect https://[HTTP::host] }"
    );
}

#[tokio::test]
async fn rule_find_by_name() {
    let device = FakeDevice::new(CURRENT)
        .with_state(|st| st.rules = vec![rule("/Common/redirect", "when HTTP_REQUEST {}")]);
    let s = session(device).await;

    let found = s.rules().find("/Common/redirect").await.unwrap().unwrap();
    assert_eq!(found.code, "when HTTP_REQUEST {}");
    assert_eq!(s.rules().find("/Common/other").await.unwrap(), None);
}

#[tokio::test]
async fn monitors_keep_appliance_order() {
    let device = FakeDevice::new(CURRENT).with_state(|st| {
        st.templates = vec![
            template("/Common/tcp", "TTYPE_TCP"),
            template("/Common/http", "TTYPE_HTTP"),
            template("/Common/gateway_icmp", "TTYPE_GATEWAY_ICMP"),
        ];
    });
    let s = session(device).await;

    let monitors = s.monitors().find_all().await.unwrap();

    let kinds: Vec<_> = monitors.iter().map(|m| m.monitor_type).collect();
    assert_eq!(kinds, [
        MonitorType::Tcp,
        MonitorType::Http,
        MonitorType::GatewayIcmp
    ]);
    let http = s.monitors().find("/Common/http").await.unwrap().unwrap();
    assert_eq!(http.monitor_type, MonitorType::Http);
}

#[tokio::test]
async fn unknown_monitor_type_is_reported_by_find() {
    let device = FakeDevice::new(CURRENT)
        .with_state(|st| st.templates = vec![template("/Common/odd", "TTYPE_FROM_THE_FUTURE")]);
    let s = session(device).await;

    let err = s.monitors().find("/Common/odd").await.unwrap_err();
    assert!(
        matches!(err, CoreError::UnknownCode { ref token, .. } if token == "TTYPE_FROM_THE_FUTURE"),
        "{err:?}"
    );
}

#[tokio::test]
async fn unknown_monitor_type_does_not_hide_the_rest() {
    let device = FakeDevice::new(CURRENT).with_state(|st| {
        st.templates = vec![
            template("/Common/tcp", "TTYPE_TCP"),
            template("/Common/odd", "TTYPE_FROM_THE_FUTURE"),
            template("/Common/http", "TTYPE_HTTP"),
        ];
    });
    let s = session(device).await;

    let names: Vec<_> = s
        .monitors()
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.name)
        .collect();

    assert_eq!(names, ["/Common/tcp", "/Common/http"]);
}
