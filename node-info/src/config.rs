//! Configuration for building a [`NodeInfo`](crate::info::NodeInfo).

use std::sync::Arc;

use crate::address::HostAddress;
use crate::id::Id;
use crate::sequence::IdSequence;

pub const DEFAULT_POOL: &str = "general";

/// Raw inputs for a node identity. Unset fields fall back to defaults when
/// the identity is built.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub environment: Option<String>,
    pub pool: String,
    pub node_id: Option<Id>,
    pub location: Option<String>,
    pub internal_address: Option<HostAddress>,
    pub bind_address: Option<HostAddress>,
    pub external_address: Option<HostAddress>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            environment: None,
            pool: DEFAULT_POOL.to_string(),
            node_id: None,
            location: None,
            internal_address: None,
            bind_address: None,
            external_address: None,
        }
    }
}

impl NodeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn set_pool(mut self, pool: impl Into<String>) -> Self {
        self.pool = pool.into();
        self
    }

    pub fn set_node_id(mut self, node_id: Id) -> Self {
        self.node_id = Some(node_id);
        self
    }

    pub fn set_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn set_node_internal_address(mut self, address: HostAddress) -> Self {
        self.internal_address = Some(address);
        self
    }

    pub fn set_node_bind_address(mut self, address: HostAddress) -> Self {
        self.bind_address = Some(address);
        self
    }

    pub fn set_node_external_address(mut self, address: HostAddress) -> Self {
        self.external_address = Some(address);
        self
    }
}

/// Inputs for a [`TestingNodeModule`](crate::testing::TestingNodeModule).
///
/// `environment: None` asks for a synthesized name. `sequence: None` draws
/// that name from [`IdSequence::shared`].
#[derive(Debug, Clone, Default)]
pub struct TestingNodeConfig {
    pub environment: Option<String>,
    pub sequence: Option<Arc<IdSequence>>,
}

impl TestingNodeConfig {
    pub fn with_environment(environment: impl Into<String>) -> Self {
        Self {
            environment: Some(environment.into()),
            sequence: None,
        }
    }

    pub fn with_sequence(sequence: Arc<IdSequence>) -> Self {
        Self {
            environment: None,
            sequence: Some(sequence),
        }
    }
}
