use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tow_compliance::error::AppError;
use tow_compliance::workflows::capacity::CapacityCatalog;
use tow_compliance::workflows::weigh::{RepositoryError, WeighId, WeighRecord, WeighRepository};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct WeighStore {
    records: HashMap<WeighId, WeighRecord>,
    order: Vec<WeighId>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryWeighRepository {
    store: Arc<Mutex<WeighStore>>,
}

impl WeighRepository for InMemoryWeighRepository {
    fn insert(&self, record: WeighRecord) -> Result<WeighRecord, RepositoryError> {
        let mut guard = self.store.lock().expect("repository mutex poisoned");
        if guard.records.contains_key(&record.weigh_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.order.push(record.weigh_id.clone());
        guard.records.insert(record.weigh_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &WeighId) -> Result<Option<WeighRecord>, RepositoryError> {
        let guard = self.store.lock().expect("repository mutex poisoned");
        Ok(guard.records.get(id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<WeighRecord>, RepositoryError> {
        let guard = self.store.lock().expect("repository mutex poisoned");
        Ok(guard
            .order
            .iter()
            .rev()
            .take(limit)
            .filter_map(|id| guard.records.get(id).cloned())
            .collect())
    }
}

/// Capacity catalog from disk, or an empty one when no path is configured.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<CapacityCatalog, AppError> {
    match path {
        Some(path) => Ok(CapacityCatalog::from_path(path)?),
        None => {
            tracing::warn!("no capacity catalog configured; vehicle references will not resolve");
            Ok(CapacityCatalog::empty())
        }
    }
}
