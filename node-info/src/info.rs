//! The node identity.

use std::net::{IpAddr, Ipv4Addr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::address::{self, HostAddress};
use crate::config::NodeConfig;
use crate::errors::NodeError;
use crate::export::Managed;
use crate::id::Id;

/// Identity of a running node: which environment and pool it belongs to,
/// which addresses it answers on, and when it started.
///
/// Built once from a [`NodeConfig`] and never modified afterwards.
/// Deserialized payloads go through the same environment and pool checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNodeInfo")]
pub struct NodeInfo {
    environment: String,
    pool: String,
    node_id: Id,
    instance_id: Id,
    location: String,
    internal_address: HostAddress,
    bind_address: HostAddress,
    external_address: HostAddress,
    start_time: DateTime<Utc>,
}

impl NodeInfo {
    /// Build the identity, filling unset fields with defaults.
    ///
    /// The environment and pool must be present and non-empty.
    pub fn from_config(config: NodeConfig) -> Result<Self, NodeError> {
        let environment = config.environment.unwrap_or_default();
        check_names(&environment, &config.pool)?;

        let node_id = config.node_id.unwrap_or_default();
        let location = config.location.unwrap_or_else(|| format!("/{}", node_id));
        let internal_address = match config.internal_address {
            Some(address) => address,
            None => address::v4_localhost()?,
        };
        let bind_address = config.bind_address.unwrap_or_else(|| {
            HostAddress::new("0.0.0.0", IpAddr::V4(Ipv4Addr::UNSPECIFIED))
        });
        let external_address = config
            .external_address
            .unwrap_or_else(|| internal_address.clone());

        let info = NodeInfo {
            environment,
            pool: config.pool,
            node_id,
            instance_id: Id::new(),
            location,
            internal_address,
            bind_address,
            external_address,
            start_time: Utc::now(),
        };
        tracing::debug!(
            environment = %info.environment,
            node_id = %info.node_id,
            instance_id = %info.instance_id,
            "Created node info"
        );
        Ok(info)
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn pool(&self) -> &str {
        &self.pool
    }

    /// Stable identifier of the node, carried across restarts when configured.
    pub fn node_id(&self) -> Id {
        self.node_id
    }

    /// Identifier of this particular run of the node.
    pub fn instance_id(&self) -> Id {
        self.instance_id
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn internal_address(&self) -> &HostAddress {
        &self.internal_address
    }

    pub fn bind_address(&self) -> &HostAddress {
        &self.bind_address
    }

    pub fn external_address(&self) -> &HostAddress {
        &self.external_address
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }
}

fn check_names(environment: &str, pool: &str) -> Result<(), NodeError> {
    if environment.is_empty() {
        return Err(NodeError::InvalidArgument(
            "environment is null or empty".to_string(),
        ));
    }
    if pool.is_empty() {
        return Err(NodeError::InvalidArgument("pool is empty".to_string()));
    }
    Ok(())
}

/// Wire shape of [`NodeInfo`], checked before it becomes one.
#[derive(Deserialize)]
struct RawNodeInfo {
    environment: String,
    pool: String,
    node_id: Id,
    instance_id: Id,
    location: String,
    internal_address: HostAddress,
    bind_address: HostAddress,
    external_address: HostAddress,
    start_time: DateTime<Utc>,
}

impl TryFrom<RawNodeInfo> for NodeInfo {
    type Error = NodeError;

    fn try_from(raw: RawNodeInfo) -> Result<Self, Self::Error> {
        check_names(&raw.environment, &raw.pool)?;
        Ok(NodeInfo {
            environment: raw.environment,
            pool: raw.pool,
            node_id: raw.node_id,
            instance_id: raw.instance_id,
            location: raw.location,
            internal_address: raw.internal_address,
            bind_address: raw.bind_address,
            external_address: raw.external_address,
            start_time: raw.start_time,
        })
    }
}

impl Managed for NodeInfo {
    fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            ("environment", self.environment.clone()),
            ("pool", self.pool.clone()),
            ("node_id", self.node_id.to_string()),
            ("instance_id", self.instance_id.to_string()),
            ("location", self.location.clone()),
            ("internal_address", self.internal_address.ip.to_string()),
            ("bind_address", self.bind_address.ip.to_string()),
            ("external_address", self.external_address.ip.to_string()),
            ("start_time", self.start_time.to_rfc3339()),
        ]
    }
}

#[cfg(test)]
#[path = "info.test.rs"]
mod tests;
