use prepdeck_api::{AppState, Server};
use prepdeck_cache::AnalysisCache;
use prepdeck_core::{ConfigManager, PrepdeckError};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> prepdeck_core::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prepdeck_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let manager = ConfigManager::load().map_err(|e| PrepdeckError::Config(e.to_string()))?;
    let config = manager.config();

    let store = prepdeck_store::store_from_config(&config.store)?;

    let analyzer = if config.analysis.enabled {
        let provider = prepdeck_ai::provider_from_config(&config.analysis)?;
        let ttl = match config.analysis.cache_ttl_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };
        let cache = Arc::new(AnalysisCache::new(config.analysis.cache_max_entries, ttl));
        info!(
            provider = provider.provider_name(),
            model = provider.model_name(),
            "time complexity analysis enabled"
        );
        Some(Arc::new(prepdeck_ai::ComplexityAnalyzer::new(
            provider, cache,
        )))
    } else {
        warn!("time complexity analysis disabled; /api/analyze will answer 503");
        None
    };

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| PrepdeckError::Config(format!("invalid server address: {}", e)))?;

    let server = Server::new(addr, AppState::new(store, analyzer));
    server.run().await
}
