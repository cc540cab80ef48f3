// Navigation service - Derives tabs and drill-throughs from tagged dashboards
use crate::application::resource_client::{ResourceClient, ResourceFilter, SECURABLE_RESOURCE};
use crate::domain::dashboard::{DashboardRecord, RejectedDashboard, ResultSet, TabEntry};
use crate::domain::drill_through::DrillThroughConfigBuilder;
use crate::domain::tag::TagMarkers;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum DerivationError {
    #[error("failed to fetch dashboards: {0:#}")]
    Fetch(#[source] anyhow::Error),
}

/// Route every record to a tab or a drill-through, preserving input order in each collection.
/// Dashboards whose tags cannot be resolved are listed in `rejected` instead.
pub fn aggregate_dashboards(records: &[DashboardRecord], markers: &TagMarkers) -> ResultSet {
    let builder = DrillThroughConfigBuilder::new(markers);
    let mut result = ResultSet::default();

    for record in records {
        if !record.has_tag(&markers.drill_through_marker) {
            result
                .tabs
                .push(TabEntry::new(record.id.clone(), record.name.clone()));
            continue;
        }

        match builder.build(record) {
            Ok(config) => result.drill_throughs.push(config),
            Err(e) => {
                tracing::error!(dashboard = %record.id, "Rejecting drill-through dashboard: {}", e);
                result.rejected.push(RejectedDashboard {
                    id: record.id.clone(),
                    name: record.name.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    result
}

#[derive(Clone)]
pub struct NavigationService {
    client: Arc<dyn ResourceClient>,
    markers: TagMarkers,
    cache: Arc<Mutex<Option<Arc<ResultSet>>>>,
}

impl NavigationService {
    pub fn new(client: Arc<dyn ResourceClient>, markers: TagMarkers) -> Self {
        Self {
            client,
            markers,
            cache: Arc::new(Mutex::new(None)),
        }
    }

    /// Run a derivation pass. The cached set is kept when it already holds drill-throughs,
    /// or holds tabs and the fetch came back empty.
    pub async fn derive(&self) -> Result<Arc<ResultSet>, DerivationError> {
        // Held for the whole pass so only one derivation writes the cache.
        let mut cache = self.cache.lock().await;

        let filter = ResourceFilter::dashboards_tagged(&self.markers.scope_marker);
        let rows = self
            .client
            .query(SECURABLE_RESOURCE, &filter)
            .await
            .map_err(DerivationError::Fetch)?;

        if let Some(cached) = cache.as_ref() {
            let keep = !cached.drill_throughs.is_empty()
                || (!cached.tabs.is_empty() && rows.is_empty());
            if keep {
                tracing::debug!("Navigation already derived, {} rows fetched", rows.len());
                return Ok(cached.clone());
            }
        }

        let result = Arc::new(aggregate_dashboards(&rows, &self.markers));

        tracing::info!(
            "Successfully fetched {} dashboard tab(s) and {} drill-through(s)",
            result.tabs.len(),
            result.drill_throughs.len()
        );
        if !result.rejected.is_empty() {
            tracing::warn!("{} drill-through dashboard(s) rejected", result.rejected.len());
        }

        *cache = Some(result.clone());
        Ok(result)
    }

    /// Last derived set, without fetching.
    pub async fn current(&self) -> Option<Arc<ResultSet>> {
        self.cache.lock().await.clone()
    }

    pub async fn invalidate(&self) {
        *self.cache.lock().await = None;
    }

    pub async fn refresh(&self) -> Result<Arc<ResultSet>, DerivationError> {
        self.invalidate().await;
        self.derive().await
    }
}
