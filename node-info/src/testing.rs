//! # Testing Node Module
//!
//! Supplies a fully populated [`NodeInfo`] to test code without any real
//! network configuration or config file.
//!
//! ## Environment
//!
//! A module is created in one of three ways:
//! - [`TestingNodeModule::new`] synthesizes an environment name `test<N>`.
//! - [`TestingNodeModule::with_optional_environment`] synthesizes when given
//!   `None` and validates the name otherwise.
//! - [`TestingNodeModule::with_environment`] validates the name directly.
//!
//! [`TestingNodeModule::from_config`] covers all three and additionally
//! accepts an injected [`IdSequence`], which makes synthesized names
//! predictable in tests that need it.
//!
//! A supplied name must be non-empty. Synthesized names are drawn from an
//! atomic sequence, so modules created concurrently never share a name.
//!
//! ## Binding
//!
//! ```text
//! module.bind(exporter)
//!   1. NodeConfig { environment, internal = bind = localhost/127.0.0.1 }
//!   2. NodeInfo::from_config           (one instance per scope)
//!   3. exporter.export("node_info:name=NodeInfo", node_info)
//!   4. NodeScope                        (unexports on drop)
//! ```

use std::sync::Arc;

use crate::address::v4_localhost;
use crate::config::{NodeConfig, TestingNodeConfig};
use crate::errors::NodeError;
use crate::export::{Managed, ManagementExporter, ObjectName};
use crate::info::NodeInfo;
use crate::sequence::IdSequence;

#[cfg(test)]
#[path = "testing.test.rs"]
mod tests;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestingNodeModule {
    environment: String,
}

impl Default for TestingNodeModule {
    fn default() -> Self {
        Self::new()
    }
}

impl TestingNodeModule {
    /// Create a module with a synthesized environment name
    pub fn new() -> Self {
        Self::synthesized(&IdSequence::shared())
    }

    /// Create a module for `environment`, or with a synthesized name when `None`
    pub fn with_optional_environment(environment: Option<String>) -> Result<Self, NodeError> {
        Self::from_config(TestingNodeConfig {
            environment,
            sequence: None,
        })
    }

    /// Create a module for `environment`, which must not be empty
    pub fn with_environment(environment: impl Into<String>) -> Result<Self, NodeError> {
        let environment = environment.into();
        if environment.is_empty() {
            return Err(NodeError::InvalidArgument(
                "environment is null or empty".to_string(),
            ));
        }
        Ok(Self { environment })
    }

    pub fn from_config(config: TestingNodeConfig) -> Result<Self, NodeError> {
        match config.environment {
            Some(environment) => Self::with_environment(environment),
            None => {
                let sequence = config.sequence.unwrap_or_else(IdSequence::shared);
                Ok(Self::synthesized(&sequence))
            }
        }
    }

    fn synthesized(sequence: &IdSequence) -> Self {
        let environment = sequence.next_environment();
        tracing::debug!(environment = %environment, "Synthesized test environment");
        Self { environment }
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Node configuration with this module's environment and both the
    /// internal and bind addresses set to the IPv4 loopback.
    pub fn node_config(&self) -> Result<NodeConfig, NodeError> {
        let localhost = v4_localhost()?;
        Ok(NodeConfig::new()
            .set_environment(self.environment.clone())
            .set_node_internal_address(localhost.clone())
            .set_node_bind_address(localhost))
    }

    /// Build the node identity and export it under its generated name.
    ///
    /// Nothing stays registered if building or exporting fails.
    pub fn bind(&self, exporter: Arc<dyn ManagementExporter>) -> Result<NodeScope, NodeError> {
        let node_info = Arc::new(NodeInfo::from_config(self.node_config()?)?);
        let name = ObjectName::generated::<NodeInfo>();

        exporter.export(name.clone(), node_info.clone())?;
        tracing::info!(
            environment = %node_info.environment(),
            node_id = %node_info.node_id(),
            name = %name,
            "Bound testing node"
        );

        Ok(NodeScope {
            node_info,
            name,
            exporter,
        })
    }
}

/// A bound node identity.
///
/// Holds the single [`NodeInfo`] built for the scope. Dropping the scope
/// removes the export, but only while the name still refers to this scope's
/// `NodeInfo`; a later scope that re-bound the same name keeps its export.
pub struct NodeScope {
    node_info: Arc<NodeInfo>,
    name: ObjectName,
    exporter: Arc<dyn ManagementExporter>,
}

impl NodeScope {
    pub fn node_info(&self) -> Arc<NodeInfo> {
        self.node_info.clone()
    }

    pub fn object_name(&self) -> &ObjectName {
        &self.name
    }
}

impl std::fmt::Debug for NodeScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeScope")
            .field("node_info", &self.node_info)
            .field("name", &self.name)
            .finish()
    }
}

impl Drop for NodeScope {
    fn drop(&mut self) {
        let object: Arc<dyn Managed> = self.node_info.clone();
        if let Err(e) = self.exporter.unexport_object(&self.name, &object) {
            tracing::warn!(name = %self.name, error = %e, "Failed to unexport node info");
        }
    }
}
