//! Management export of long-lived objects.
//!
//! Objects implementing [`Managed`] can be registered with a
//! [`ManagementExporter`] under an [`ObjectName`] so monitoring tooling can
//! introspect them at runtime. The exporter is always passed in explicitly;
//! nothing is discovered or registered behind the caller's back.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::errors::ExportError;

/// Name an object is exported under, rendered as `domain:name=Name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectName {
    domain: String,
    name: String,
}

impl ObjectName {
    pub fn new(domain: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            name: name.into(),
        }
    }

    /// Derive a name from the type: the crate is the domain and the type
    /// name is the name, e.g. `node_info:name=NodeInfo`.
    ///
    /// References and trait objects name their target, so `&NodeInfo` and
    /// `dyn Managed + Send` give `NodeInfo` and `Managed`.
    pub fn generated<T: ?Sized>() -> Self {
        let full = std::any::type_name::<T>();
        let path = full
            .trim_start_matches(['&', ' '])
            .trim_start_matches("mut ")
            .trim_start_matches("dyn ");
        // Generic arguments and extra bounds would otherwise leak `::`
        // separators into the name.
        let path = path.split('<').next().unwrap_or(path);
        let path = path.split(" + ").next().unwrap_or(path);
        let domain = path.split("::").next().unwrap_or(path);
        let name = path.rsplit("::").next().unwrap_or(path);
        Self::new(domain, name)
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:name={}", self.domain, self.name)
    }
}

/// An object that exposes named attributes for introspection.
pub trait Managed: Send + Sync {
    fn attributes(&self) -> Vec<(&'static str, String)>;
}

/// A registry that makes [`Managed`] objects visible to monitoring.
pub trait ManagementExporter: Send + Sync {
    fn export(&self, name: ObjectName, object: Arc<dyn Managed>) -> Result<(), ExportError>;

    fn unexport(&self, name: &ObjectName) -> Result<(), ExportError>;

    /// Remove `name` only while it still refers to `object`.
    ///
    /// Registries that cannot tell objects apart fall back to [`unexport`](Self::unexport).
    fn unexport_object(
        &self,
        name: &ObjectName,
        _object: &Arc<dyn Managed>,
    ) -> Result<(), ExportError> {
        self.unexport(name)
    }
}

/// Exporter that keeps everything in process memory.
#[derive(Default)]
pub struct InMemoryExporter {
    objects: RwLock<HashMap<ObjectName, Arc<dyn Managed>>>,
}

impl InMemoryExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_exported(&self, name: &ObjectName) -> bool {
        self.objects.read().contains_key(name)
    }

    /// Snapshot of the attributes of the object exported under `name`
    pub fn attributes(&self, name: &ObjectName) -> Option<Vec<(&'static str, String)>> {
        self.objects.read().get(name).map(|object| object.attributes())
    }

    /// All exported names in sorted order
    pub fn names(&self) -> Vec<ObjectName> {
        let mut names: Vec<_> = self.objects.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }
}

impl ManagementExporter for InMemoryExporter {
    fn export(&self, name: ObjectName, object: Arc<dyn Managed>) -> Result<(), ExportError> {
        let mut objects = self.objects.write();
        if objects.contains_key(&name) {
            return Err(ExportError::AlreadyExported(name));
        }
        tracing::debug!(name = %name, "Exported object");
        objects.insert(name, object);
        Ok(())
    }

    fn unexport(&self, name: &ObjectName) -> Result<(), ExportError> {
        match self.objects.write().remove(name) {
            Some(_) => {
                tracing::debug!(name = %name, "Unexported object");
                Ok(())
            }
            None => Err(ExportError::NotFound(name.clone())),
        }
    }

    fn unexport_object(
        &self,
        name: &ObjectName,
        object: &Arc<dyn Managed>,
    ) -> Result<(), ExportError> {
        let mut objects = self.objects.write();
        match objects.get(name) {
            Some(current) if Arc::ptr_eq(current, object) => {
                objects.remove(name);
                tracing::debug!(name = %name, "Unexported object");
                Ok(())
            }
            Some(_) => Err(ExportError::Replaced(name.clone())),
            None => Err(ExportError::NotFound(name.clone())),
        }
    }
}

/// Exporter that accepts every request and retains nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopExporter;

impl ManagementExporter for NoopExporter {
    fn export(&self, _name: ObjectName, _object: Arc<dyn Managed>) -> Result<(), ExportError> {
        Ok(())
    }

    fn unexport(&self, _name: &ObjectName) -> Result<(), ExportError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "export.test.rs"]
mod tests;
