//! Application state - shared across all handlers.

use std::sync::Arc;

use mindfeed_core::ports::{HumanDetector, PostRepository, ReachabilityProbe};
use mindfeed_core::validation::KeywordHumanDetector;
use mindfeed_core::{FeedService, PostValidator};
use mindfeed_infra::InMemoryPostRepository;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub feed: Arc<FeedService>,
}

impl AppState {
    pub fn from_service(feed: FeedService) -> Self {
        Self {
            feed: Arc::new(feed),
        }
    }

    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let posts = Self::post_repository(config).await;
        let probe = Self::reachability_probe(config);
        let detector: Arc<dyn HumanDetector> = Arc::new(KeywordHumanDetector::new());

        let validator = PostValidator::new(detector, probe, config.validation);

        tracing::info!(
            event_cutoff = %config.validation.event_cutoff,
            "Application state initialized"
        );

        Self::from_service(FeedService::new(posts, validator))
    }

    #[cfg(feature = "postgres")]
    async fn post_repository(config: &AppConfig) -> Arc<dyn PostRepository> {
        use mindfeed_infra::PostgresPostRepository;
        use mindfeed_infra::database::connect;

        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Arc::new(InMemoryPostRepository::new());
        };

        match connect(db_config).await {
            Ok(conn) => Arc::new(PostgresPostRepository::new(conn)),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Arc::new(InMemoryPostRepository::new())
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn post_repository(_config: &AppConfig) -> Arc<dyn PostRepository> {
        tracing::info!("Running without postgres feature - using in-memory repository");
        Arc::new(InMemoryPostRepository::new())
    }

    #[cfg(feature = "http-probe")]
    fn reachability_probe(config: &AppConfig) -> Arc<dyn ReachabilityProbe> {
        use mindfeed_infra::{HttpReachabilityProbe, UnreachableProbe};

        match HttpReachabilityProbe::new(&config.probe) {
            Ok(probe) => Arc::new(probe),
            Err(e) => {
                tracing::error!(
                    "Failed to build HTTP client for source probes: {}. Sources will be rejected.",
                    e
                );
                Arc::new(UnreachableProbe)
            }
        }
    }

    #[cfg(not(feature = "http-probe"))]
    fn reachability_probe(_config: &AppConfig) -> Arc<dyn ReachabilityProbe> {
        tracing::warn!("Running without http-probe feature - scientific sources will be rejected");
        Arc::new(mindfeed_infra::UnreachableProbe)
    }
}
