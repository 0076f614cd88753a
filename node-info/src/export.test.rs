use assert_matches::assert_matches;

use super::*;

struct Gauge(u32);

impl Managed for Gauge {
    fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![("value", self.0.to_string())]
    }
}

#[allow(dead_code)]
mod sample {
    pub struct Wrapper<T>(pub T);
}

#[test]
fn test_generated_name() {
    let name = ObjectName::generated::<Gauge>();
    assert_eq!(name.name(), "Gauge");
    assert_eq!(name.domain(), "node_info");
    assert_eq!(name.to_string(), "node_info:name=Gauge");
}

#[test]
fn test_generated_name_ignores_generic_arguments() {
    let name = ObjectName::generated::<sample::Wrapper<std::sync::Arc<Gauge>>>();
    assert_eq!(name.name(), "Wrapper");
    assert_eq!(name.domain(), "node_info");
}

#[test]
fn test_generated_name_for_references_and_trait_objects() {
    let expected = ObjectName::new("node_info", "Gauge");
    assert_eq!(ObjectName::generated::<&Gauge>(), expected);
    assert_eq!(ObjectName::generated::<&mut Gauge>(), expected);
    assert_eq!(ObjectName::generated::<&&Gauge>(), expected);

    let managed = ObjectName::new("node_info", "Managed");
    assert_eq!(ObjectName::generated::<dyn Managed>(), managed);
    assert_eq!(ObjectName::generated::<&dyn Managed>(), managed);
    assert_eq!(ObjectName::generated::<dyn Managed + Send>(), managed);
}

#[test_log::test]
fn test_in_memory_export_and_unexport() {
    let exporter = InMemoryExporter::new();
    let name = ObjectName::new("metrics", "Gauge");

    exporter.export(name.clone(), Arc::new(Gauge(3))).unwrap();
    assert!(exporter.is_exported(&name));
    assert_eq!(
        exporter.attributes(&name),
        Some(vec![("value", "3".to_string())])
    );

    exporter.unexport(&name).unwrap();
    assert!(exporter.is_empty());
    assert_eq!(exporter.attributes(&name), None);
}

#[test]
fn test_duplicate_export_is_rejected() {
    let exporter = InMemoryExporter::new();
    let name = ObjectName::new("metrics", "Gauge");

    exporter.export(name.clone(), Arc::new(Gauge(1))).unwrap();
    let err = exporter.export(name.clone(), Arc::new(Gauge(2))).unwrap_err();
    assert_matches!(err, ExportError::AlreadyExported(n) if n == name);

    // The first object stays registered.
    assert_eq!(
        exporter.attributes(&name),
        Some(vec![("value", "1".to_string())])
    );
}

#[test]
fn test_unexport_object_checks_ownership() {
    let exporter = InMemoryExporter::new();
    let name = ObjectName::new("metrics", "Gauge");
    let owned: Arc<dyn Managed> = Arc::new(Gauge(1));
    let stranger: Arc<dyn Managed> = Arc::new(Gauge(2));

    exporter.export(name.clone(), owned.clone()).unwrap();

    let err = exporter.unexport_object(&name, &stranger).unwrap_err();
    assert_matches!(err, ExportError::Replaced(n) if n == name);
    assert!(exporter.is_exported(&name));

    exporter.unexport_object(&name, &owned).unwrap();
    assert!(!exporter.is_exported(&name));

    let err = exporter.unexport_object(&name, &owned).unwrap_err();
    assert_matches!(err, ExportError::NotFound(_));
}

#[test]
fn test_noop_unexport_object_ignores_ownership() {
    let stranger: Arc<dyn Managed> = Arc::new(Gauge(2));
    NoopExporter
        .unexport_object(&ObjectName::new("metrics", "Gauge"), &stranger)
        .unwrap();
}

#[test]
fn test_unexport_unknown_name() {
    let exporter = InMemoryExporter::new();
    let err = exporter
        .unexport(&ObjectName::new("metrics", "Missing"))
        .unwrap_err();
    assert_matches!(err, ExportError::NotFound(_));
}

#[test]
fn test_names_are_sorted() {
    let exporter = InMemoryExporter::new();
    exporter
        .export(ObjectName::new("b", "Two"), Arc::new(Gauge(2)))
        .unwrap();
    exporter
        .export(ObjectName::new("a", "One"), Arc::new(Gauge(1)))
        .unwrap();

    let names: Vec<_> = exporter.names().iter().map(|n| n.to_string()).collect();
    assert_eq!(names, vec!["a:name=One", "b:name=Two"]);
    assert_eq!(exporter.len(), 2);
}

#[test]
fn test_noop_exporter_accepts_everything() {
    let exporter = NoopExporter;
    let name = ObjectName::new("metrics", "Gauge");
    exporter.export(name.clone(), Arc::new(Gauge(1))).unwrap();
    exporter.export(name.clone(), Arc::new(Gauge(1))).unwrap();
    exporter.unexport(&name).unwrap();
}
