//! Test doubles for code that talks to a management exporter.
//!
//! ```ignore
//! use crate::test_utils::prelude::*;
//!
//! let exporter = RecordingExporter::new();
//! let scope = TestingNodeModule::new().bind(exporter.clone())?;
//! assert_eq!(exporter.exports(), vec![scope.object_name().clone()]);
//! ```

use std::sync::Arc;

use parking_lot::Mutex;

use crate::errors::ExportError;
use crate::export::{InMemoryExporter, Managed, ManagementExporter, ObjectName};

/// A call observed by a [`RecordingExporter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportEvent {
    Export(ObjectName),
    Unexport(ObjectName),
}

/// Exporter that forwards to an [`InMemoryExporter`] and records every call,
/// including the ones that fail.
#[derive(Default)]
pub struct RecordingExporter {
    inner: InMemoryExporter,
    events: Mutex<Vec<ExportEvent>>,
}

impl RecordingExporter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<ExportEvent> {
        self.events.lock().clone()
    }

    /// Names passed to `export`, in call order
    pub fn exports(&self) -> Vec<ObjectName> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                ExportEvent::Export(name) => Some(name.clone()),
                ExportEvent::Unexport(_) => None,
            })
            .collect()
    }

    pub fn registry(&self) -> &InMemoryExporter {
        &self.inner
    }
}

impl ManagementExporter for RecordingExporter {
    fn export(&self, name: ObjectName, object: Arc<dyn Managed>) -> Result<(), ExportError> {
        self.events.lock().push(ExportEvent::Export(name.clone()));
        self.inner.export(name, object)
    }

    fn unexport(&self, name: &ObjectName) -> Result<(), ExportError> {
        self.events.lock().push(ExportEvent::Unexport(name.clone()));
        self.inner.unexport(name)
    }

    fn unexport_object(
        &self,
        name: &ObjectName,
        object: &Arc<dyn Managed>,
    ) -> Result<(), ExportError> {
        self.events.lock().push(ExportEvent::Unexport(name.clone()));
        self.inner.unexport_object(name, object)
    }
}

pub mod prelude {
    pub use super::{ExportEvent, RecordingExporter};
    pub use crate::prelude::*;
}
