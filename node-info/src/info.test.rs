use assert_matches::assert_matches;

use super::*;

fn host(name: &str, octets: [u8; 4]) -> HostAddress {
    HostAddress::new(name, IpAddr::V4(Ipv4Addr::from(octets)))
}

#[test_log::test]
fn test_defaults() {
    let info = NodeInfo::from_config(NodeConfig::new().set_environment("prod")).unwrap();

    assert_eq!(info.environment(), "prod");
    assert_eq!(info.pool(), "general");
    assert_eq!(info.location(), format!("/{}", info.node_id()));
    assert_eq!(info.internal_address().ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
    assert_eq!(info.bind_address().ip, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    assert_eq!(info.external_address(), info.internal_address());
    assert_ne!(info.node_id(), info.instance_id());
}

#[test]
fn test_configured_values_are_kept() {
    let node_id = Id::new();
    let config = NodeConfig::new()
        .set_environment("staging")
        .set_pool("batch")
        .set_node_id(node_id)
        .set_location("/rack/12")
        .set_node_internal_address(host("internal", [10, 0, 0, 5]))
        .set_node_bind_address(host("bind", [10, 0, 0, 6]))
        .set_node_external_address(host("external", [192, 0, 2, 1]));

    let info = NodeInfo::from_config(config).unwrap();

    assert_eq!(info.environment(), "staging");
    assert_eq!(info.pool(), "batch");
    assert_eq!(info.node_id(), node_id);
    assert_eq!(info.location(), "/rack/12");
    assert_eq!(info.internal_address().hostname, "internal");
    assert_eq!(info.bind_address().hostname, "bind");
    assert_eq!(info.external_address().hostname, "external");
}

#[test]
fn test_instance_id_changes_per_build() {
    let config = NodeConfig::new()
        .set_environment("prod")
        .set_node_id(Id::new());
    let a = NodeInfo::from_config(config.clone()).unwrap();
    let b = NodeInfo::from_config(config).unwrap();

    assert_eq!(a.node_id(), b.node_id());
    assert_ne!(a.instance_id(), b.instance_id());
}

#[test]
fn test_missing_environment() {
    let err = NodeInfo::from_config(NodeConfig::new()).unwrap_err();
    assert_matches!(err, NodeError::InvalidArgument(_));
}

#[test]
fn test_empty_environment() {
    let err = NodeInfo::from_config(NodeConfig::new().set_environment("")).unwrap_err();
    assert_matches!(err, NodeError::InvalidArgument(msg) if msg == "environment is null or empty");
}

#[test]
fn test_blank_environment_is_accepted() {
    // Only emptiness is checked.
    let info = NodeInfo::from_config(NodeConfig::new().set_environment(" ")).unwrap();
    assert_eq!(info.environment(), " ");
}

#[test]
fn test_empty_pool() {
    let config = NodeConfig::new().set_environment("prod").set_pool("");
    let err = NodeInfo::from_config(config).unwrap_err();
    assert_matches!(err, NodeError::InvalidArgument(_));
}

#[test]
fn test_managed_attributes() {
    let info = NodeInfo::from_config(NodeConfig::new().set_environment("prod")).unwrap();
    let attributes = info.attributes();

    let lookup = |key: &str| {
        attributes
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.clone())
    };
    assert_eq!(lookup("environment").as_deref(), Some("prod"));
    assert_eq!(lookup("internal_address").as_deref(), Some("127.0.0.1"));
    assert_eq!(lookup("node_id"), Some(info.node_id().to_string()));
    assert_eq!(attributes.len(), 9);
}

#[test]
fn test_serialized_node_info_reads_back() {
    let info = NodeInfo::from_config(NodeConfig::new().set_environment("prod")).unwrap();
    let json = serde_json::to_string(&info).unwrap();
    let decoded: NodeInfo = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, info);
}

#[test]
fn test_deserialize_rejects_empty_environment() {
    let info = NodeInfo::from_config(NodeConfig::new().set_environment("prod")).unwrap();
    let mut value = serde_json::to_value(&info).unwrap();
    value["environment"] = serde_json::Value::String(String::new());

    let err = serde_json::from_value::<NodeInfo>(value).unwrap_err();
    assert!(err.to_string().contains("environment is null or empty"), "{err}");
}

#[test]
fn test_deserialize_rejects_empty_pool() {
    let info = NodeInfo::from_config(NodeConfig::new().set_environment("prod")).unwrap();
    let mut value = serde_json::to_value(&info).unwrap();
    value["pool"] = serde_json::Value::String(String::new());

    let err = serde_json::from_value::<NodeInfo>(value).unwrap_err();
    assert!(err.to_string().contains("pool is empty"), "{err}");
}
