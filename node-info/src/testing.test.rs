use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr};

use assert_matches::assert_matches;

use super::*;
use crate::errors::ExportError;
use crate::export::InMemoryExporter;
use crate::test_utils::prelude::*;

const LOOPBACK: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

fn assert_synthesized(environment: &str) {
    let suffix = environment
        .strip_prefix("test")
        .unwrap_or_else(|| panic!("{environment} does not start with `test`"));
    assert!(!suffix.is_empty());
    assert!(suffix.parse::<u64>().is_ok(), "{environment} has a non-numeric suffix");
}

fn assert_loopback(info: &NodeInfo) {
    assert_eq!(info.internal_address().ip, LOOPBACK);
    assert_eq!(info.internal_address().hostname, "localhost");
    assert_eq!(info.bind_address().ip, LOOPBACK);
    assert_eq!(info.bind_address().hostname, "localhost");
}

#[test_log::test]
fn test_no_argument_modules_are_distinct() {
    let a = TestingNodeModule::new();
    let b = TestingNodeModule::new();

    assert_ne!(a.environment(), b.environment());
    assert_synthesized(a.environment());
    assert_synthesized(b.environment());

    let a = a.bind(Arc::new(InMemoryExporter::new())).unwrap();
    let b = b.bind(Arc::new(InMemoryExporter::new())).unwrap();
    assert_loopback(&a.node_info());
    assert_loopback(&b.node_info());
}

#[test]
fn test_default_synthesizes() {
    assert_synthesized(TestingNodeModule::default().environment());
}

#[test_log::test]
fn test_explicit_environment() {
    let module = TestingNodeModule::with_environment("staging").unwrap();
    assert_eq!(module.environment(), "staging");

    let scope = module.bind(Arc::new(InMemoryExporter::new())).unwrap();
    let info = scope.node_info();
    assert_eq!(info.environment(), "staging");
    assert_loopback(&info);
}

#[test]
fn test_explicit_environment_is_kept_verbatim() {
    for environment in ["a", " padded ", "prod-eu_1", "ünïcödé"] {
        let module = TestingNodeModule::with_environment(environment).unwrap();
        assert_eq!(module.environment(), environment);
    }
}

#[test]
fn test_empty_environment_is_rejected() {
    // Every constructor fails, so there is no module to bind.
    let err = TestingNodeModule::with_environment("").unwrap_err();
    assert_matches!(err, NodeError::InvalidArgument(msg) if msg == "environment is null or empty");

    let err = TestingNodeModule::with_optional_environment(Some(String::new())).unwrap_err();
    assert_matches!(err, NodeError::InvalidArgument(_));

    let err = TestingNodeModule::from_config(TestingNodeConfig::with_environment("")).unwrap_err();
    assert_matches!(err, NodeError::InvalidArgument(_));
}

#[test]
fn test_optional_environment() {
    let module = TestingNodeModule::with_optional_environment(Some("qa".to_string())).unwrap();
    assert_eq!(module.environment(), "qa");

    let module = TestingNodeModule::with_optional_environment(None).unwrap();
    assert_synthesized(module.environment());
}

#[test]
fn test_injected_sequence() {
    let sequence = Arc::new(IdSequence::starting_at(100));
    let config = TestingNodeConfig::with_sequence(sequence.clone());

    let a = TestingNodeModule::from_config(config.clone()).unwrap();
    let b = TestingNodeModule::from_config(config).unwrap();

    assert_eq!(a.environment(), "test100");
    assert_eq!(b.environment(), "test101");
    assert_eq!(sequence.peek(), 102);
}

#[test]
fn test_explicit_environment_does_not_advance_sequence() {
    let sequence = Arc::new(IdSequence::starting_at(5));
    let config = TestingNodeConfig {
        environment: Some("fixed".to_string()),
        sequence: Some(sequence.clone()),
    };

    let module = TestingNodeModule::from_config(config).unwrap();
    assert_eq!(module.environment(), "fixed");
    assert_eq!(sequence.peek(), 5);
}

#[test]
fn test_node_config() {
    let module = TestingNodeModule::with_environment("staging").unwrap();
    let config = module.node_config().unwrap();

    assert_eq!(config.environment.as_deref(), Some("staging"));
    assert_eq!(config.internal_address.map(|a| a.ip), Some(LOOPBACK));
    assert_eq!(config.bind_address.map(|a| a.ip), Some(LOOPBACK));
}

#[test_log::test]
fn test_bind_exports_generated_name() {
    let exporter = RecordingExporter::new();
    let module = TestingNodeModule::with_environment("staging").unwrap();

    let scope = module.bind(exporter.clone()).unwrap();

    assert_eq!(scope.object_name().to_string(), "node_info:name=NodeInfo");
    assert_eq!(exporter.exports(), vec![scope.object_name().clone()]);

    let attributes = exporter.registry().attributes(scope.object_name()).unwrap();
    assert!(attributes.contains(&("environment", "staging".to_string())));
    assert!(attributes.contains(&("internal_address", "127.0.0.1".to_string())));
    assert!(attributes.contains(&("bind_address", "127.0.0.1".to_string())));
}

#[test]
fn test_scope_holds_a_single_instance() {
    let scope = TestingNodeModule::new()
        .bind(Arc::new(InMemoryExporter::new()))
        .unwrap();
    assert!(Arc::ptr_eq(&scope.node_info(), &scope.node_info()));
}

#[test_log::test]
fn test_drop_unexports() {
    let exporter = RecordingExporter::new();
    let scope = TestingNodeModule::new().bind(exporter.clone()).unwrap();
    let name = scope.object_name().clone();
    assert!(exporter.registry().is_exported(&name));

    drop(scope);

    assert!(!exporter.registry().is_exported(&name));
    assert_eq!(
        exporter.events(),
        vec![ExportEvent::Export(name.clone()), ExportEvent::Unexport(name)]
    );
}

#[test_log::test]
fn test_second_bind_into_same_registry_fails() {
    let exporter = RecordingExporter::new();
    let module = TestingNodeModule::new();

    let first = module.bind(exporter.clone()).unwrap();
    let err = module.bind(exporter.clone()).unwrap_err();
    assert_matches!(err, NodeError::Export(ExportError::AlreadyExported(_)));

    // The failed bind leaves the first export untouched.
    assert!(exporter.registry().is_exported(first.object_name()));
    assert_eq!(exporter.registry().len(), 1);
}

#[test_log::test]
fn test_stale_scope_keeps_rebound_export() {
    let exporter = RecordingExporter::new();
    let first = TestingNodeModule::with_environment("first")
        .unwrap()
        .bind(exporter.clone())
        .unwrap();
    let name = first.object_name().clone();

    // Another party clears the name and a second scope takes it over.
    exporter.unexport(&name).unwrap();
    let second = TestingNodeModule::with_environment("second")
        .unwrap()
        .bind(exporter.clone())
        .unwrap();

    drop(first);

    let attributes = exporter.registry().attributes(&name).unwrap();
    assert!(attributes.contains(&("environment", "second".to_string())));

    drop(second);
    assert!(!exporter.registry().is_exported(&name));
}

#[test]
fn test_rebind_after_teardown() {
    let exporter = Arc::new(InMemoryExporter::new());
    let module = TestingNodeModule::new();

    let first = module.bind(exporter.clone()).unwrap();
    let first_instance = first.node_info().instance_id();
    drop(first);

    let second = module.bind(exporter.clone()).unwrap();
    assert_ne!(second.node_info().instance_id(), first_instance);
    assert_eq!(second.node_info().environment(), module.environment());
}

#[test]
fn test_concurrent_construction_is_unique() {
    const THREADS: usize = 32;

    let names = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| scope.spawn(|| TestingNodeModule::new().environment().to_string()))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect::<Vec<_>>()
    });

    let unique: HashSet<_> = names.iter().collect();
    assert_eq!(unique.len(), THREADS);
    names.iter().for_each(|name| assert_synthesized(name));
}

#[test]
fn test_concurrent_bind_with_injected_sequence() {
    const THREADS: u64 = 16;
    let sequence = Arc::new(IdSequence::starting_at(0));

    let environments = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let config = TestingNodeConfig::with_sequence(sequence.clone());
                scope.spawn(move || {
                    let bound = TestingNodeModule::from_config(config)
                        .unwrap()
                        .bind(Arc::new(NoopExporter))
                        .unwrap();
                    let info = bound.node_info();
                    assert_loopback(&info);
                    info.environment().to_string()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect::<HashSet<_>>()
    });

    let expected: HashSet<_> = (0..THREADS).map(|n| format!("test{n}")).collect();
    assert_eq!(environments, expected);
}
