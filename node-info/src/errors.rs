//! Error types for node identity operations

use crate::export::ObjectName;

/// Errors that can occur while building or binding a node identity
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A constant input failed to produce a value. Indicates a broken runtime,
    /// never a usage error.
    #[error("Unreachable: {0}")]
    Unreachable(String),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// Errors raised when constructing a host address from raw octets
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("Address must be 4 or 16 bytes, got {0}")]
    InvalidLength(usize),
}

/// Errors raised by a management exporter
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Object already exported: {0}")]
    AlreadyExported(ObjectName),

    #[error("Object not exported: {0}")]
    NotFound(ObjectName),

    #[error("Object exported under {0} belongs to another owner")]
    Replaced(ObjectName),
}
