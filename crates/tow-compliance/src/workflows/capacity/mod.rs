//! Vehicle capacity reference data loaded from a CSV export.

mod catalog;
mod normalizer;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use crate::workflows::weigh::VehicleCapacityProfile;
use normalizer::normalize_name;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read capacity catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid capacity catalog data: {0}")]
    Csv(#[from] csv::Error),
    #[error("capacity catalog lists {make} {model} more than once")]
    DuplicateEntry { make: String, model: String },
}

/// Make and model as entered on a weigh form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRef {
    pub make: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub make: String,
    pub model: String,
    pub profile: VehicleCapacityProfile,
}

/// In-memory vehicle ratings keyed by normalised make and model.
#[derive(Debug, Clone, Default)]
pub struct CapacityCatalog {
    entries: BTreeMap<(String, String), CatalogEntry>,
}

impl CapacityCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let catalog = Self::from_reader(file)?;
        tracing::info!(
            path = %path.display(),
            entries = catalog.len(),
            "loaded vehicle capacity catalog"
        );
        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut entries = BTreeMap::new();

        for row in catalog::parse_rows(reader)? {
            let key = (normalize_name(&row.make), normalize_name(&row.model));
            if entries.contains_key(&key) {
                return Err(CatalogError::DuplicateEntry {
                    make: row.make,
                    model: row.model,
                });
            }

            entries.insert(
                key,
                CatalogEntry {
                    make: row.make,
                    model: row.model,
                    profile: row.profile,
                },
            );
        }

        Ok(Self { entries })
    }

    pub fn lookup(&self, make: &str, model: &str) -> Option<&VehicleCapacityProfile> {
        self.entries
            .get(&(normalize_name(make), normalize_name(model)))
            .map(|entry| &entry.profile)
    }

    pub fn resolve(&self, vehicle: &VehicleRef) -> Option<&VehicleCapacityProfile> {
        self.lookup(&vehicle.make, &vehicle.model)
    }

    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> + '_ {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
