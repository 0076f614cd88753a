//! Node identity for services and the test harnesses that exercise them.
//!
//! A [`NodeInfo`](info::NodeInfo) names the environment a node runs in and
//! the addresses it answers on. Tests rarely have a real environment to
//! point at, so [`TestingNodeModule`](testing::TestingNodeModule) builds one
//! from loopback addresses and a synthesized environment name, and exports
//! it to an explicitly supplied [`ManagementExporter`](export::ManagementExporter).

pub mod address;
pub mod config;
pub mod errors;
pub mod export;
pub mod id;
pub mod info;
pub mod prelude;
pub mod sequence;
#[cfg(test)]
mod test_utils;
pub mod testing;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::Arc;
    use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

    /// Initialize tracing for tests
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env()
                    .add_directive("node_info=debug".parse().unwrap()),
            )
            .with_span_events(FmtSpan::FULL)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(false)
            .try_init();
    }

    #[test]
    fn test_testing_node_lifecycle() {
        init_tracing();
        let exporter = Arc::new(InMemoryExporter::new());

        let scope = TestingNodeModule::with_environment("staging")
            .expect("valid environment")
            .bind(exporter.clone())
            .expect("failed to bind node");

        let node_info = scope.node_info();
        assert_eq!(node_info.environment(), "staging");
        assert_eq!(node_info.pool(), "general");
        assert_eq!(node_info.internal_address().ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(node_info.bind_address().ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(node_info.external_address(), node_info.internal_address());
        assert_eq!(
            exporter.names(),
            vec![ObjectName::generated::<NodeInfo>()]
        );

        drop(scope);
        assert!(exporter.is_empty());
    }

    #[test]
    fn test_two_scopes_in_separate_registries() {
        init_tracing();
        let a = TestingNodeModule::new().bind(Arc::new(InMemoryExporter::new()));
        let b = TestingNodeModule::new().bind(Arc::new(InMemoryExporter::new()));

        let (a, b) = (a.unwrap().node_info(), b.unwrap().node_info());
        assert_ne!(a.environment(), b.environment());
        assert_ne!(a.node_id(), b.node_id());
    }
}
