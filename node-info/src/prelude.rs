//! Commonly used node identity types.
//!
//! Import this module to get a testing node bound in a couple of lines.

pub use super::address::{
    HostAddress,  // IP address labeled with a host name
    v4_localhost, // localhost/127.0.0.1 without DNS
};
pub use super::config::{
    NodeConfig,        // Raw inputs for a node identity
    TestingNodeConfig, // Inputs for a testing module
};
pub use super::errors::{AddressError, ExportError, NodeError};
pub use super::export::{
    InMemoryExporter,   // Exporter backed by process memory
    Managed,            // Objects with introspectable attributes
    ManagementExporter, // Registry for managed objects
    NoopExporter,       // Exporter that retains nothing
    ObjectName,         // Name an object is exported under
};
pub use super::id::Id; // An identifier type used for nodes and node instances.
pub use super::info::NodeInfo;
pub use super::sequence::IdSequence;
pub use super::testing::{NodeScope, TestingNodeModule};
