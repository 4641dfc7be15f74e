use campus_placement::config::PlacementConfig;
use campus_placement::registry::PlacementRegistry;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Fresh registry for a session, optionally seeded with the sample roster.
pub(crate) fn bootstrap_registry(config: &PlacementConfig) -> PlacementRegistry {
    if config.seed_sample_data {
        let registry = PlacementRegistry::with_sample_data();
        info!(
            students = registry.students().len(),
            companies = registry.companies().len(),
            "registry seeded with sample data"
        );
        registry
    } else {
        PlacementRegistry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeding_follows_configuration() {
        let seeded = bootstrap_registry(&PlacementConfig {
            seed_sample_data: true,
        });
        assert_eq!(seeded.students().len(), 2);

        let empty = bootstrap_registry(&PlacementConfig {
            seed_sample_data: false,
        });
        assert!(empty.students().is_empty());
        assert!(empty.companies().is_empty());
    }
}
