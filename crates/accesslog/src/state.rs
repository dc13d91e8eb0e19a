use std::sync::Arc;

use crate::conf::AppConfig;
use crate::filter::FilterError;
use crate::parser::metrics::IngestMetrics;
use crate::parser::RecordNormalizer;
use crate::query::LogQueries;
use crate::store::{MemoryStore, RecordStore};

pub struct AppState {
    pub queries: LogQueries,
    /// Concrete handle on the store for materialized results.
    pub store: Arc<MemoryStore>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, FilterError> {
        let store = Arc::new(MemoryStore::new(config.store.clone()));
        let queries = LogQueries::new(
            Arc::clone(&store) as Arc<dyn RecordStore>,
            RecordNormalizer::new()?,
            Arc::new(IngestMetrics::new()),
        );

        Ok(Self {
            queries,
            store,
            config,
        })
    }
}

pub type SharedState = Arc<AppState>;
