use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::advisory::AdvisoryRatio;
use super::compliance::ComplianceRow;
use super::derivation::{DerivedMass, DerivedMetrics};
use super::domain::{
    MeasurementMethod, NormalizedReadingSet, RawInput, TrailerCapacityProfile,
    VehicleCapacityProfile, WeighingScenario,
};
use super::result::WeighResult;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeighId(pub String);

impl std::fmt::Display for WeighId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored weigh: the inputs exactly as received plus everything derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeighRecord {
    pub weigh_id: WeighId,
    pub recorded_at: DateTime<Utc>,
    pub input: RawInput,
    pub vehicle: VehicleCapacityProfile,
    pub trailer: TrailerCapacityProfile,
    pub readings: NormalizedReadingSet,
    pub metrics: DerivedMetrics,
    pub result: WeighResult,
}

impl WeighRecord {
    pub fn view(&self) -> WeighRecordView {
        WeighRecordView {
            weigh_id: self.weigh_id.clone(),
            recorded_at: self.recorded_at,
            scenario: self.input.scenario,
            method: self.input.method,
            overall_compliant: self.result.overall_compliant,
            verdict: self.result.verdict_label(),
            rows: self.result.rows.clone(),
            advisories: self.result.advisories.clone(),
        }
    }
}

/// Storage abstraction so the service can be exercised without a database.
pub trait WeighRepository: Send + Sync {
    fn insert(&self, record: WeighRecord) -> Result<WeighRecord, RepositoryError>;
    fn fetch(&self, id: &WeighId) -> Result<Option<WeighRecord>, RepositoryError>;
    /// Newest first.
    fn recent(&self, limit: usize) -> Result<Vec<WeighRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Response shape for a stored weigh.
#[derive(Debug, Clone, Serialize)]
pub struct WeighRecordView {
    pub weigh_id: WeighId,
    pub recorded_at: DateTime<Utc>,
    pub scenario: WeighingScenario,
    pub method: MeasurementMethod,
    pub overall_compliant: bool,
    pub verdict: &'static str,
    pub rows: Vec<ComplianceRow>,
    pub advisories: Vec<AdvisoryRatio>,
}

/// Save-time verdict recomputed straight from the stored masses, without the row builder.
///
/// A weigh fails when any known mass exceeds a positive rating. The table below has to
/// name the same mass/rating pairs the compliance rows use.
pub fn stored_verdict(
    metrics: &DerivedMetrics,
    vehicle: &VehicleCapacityProfile,
    trailer: &TrailerCapacityProfile,
) -> bool {
    let vehicle_only = metrics.scenario == WeighingScenario::VehicleOnly;
    let single_cell = metrics.method == MeasurementMethod::WeighbridgeAboveGroundSingleCell;

    let (front, rear) = if vehicle_only {
        (metrics.front_axle_unhitched, metrics.rear_axle_unhitched)
    } else {
        (metrics.front_axle_hitched, metrics.rear_axle_hitched)
    };
    let gvm = if vehicle_only || single_cell {
        metrics.gvm_unhitched
    } else {
        metrics.gvm_hitched
    };
    let tow_ball_rating = if metrics.scenario == WeighingScenario::CaravanOnlyRegistered {
        match (trailer.atm_rating, trailer.gtm_rating) {
            (Some(atm), Some(gtm)) if atm > 0.0 && gtm > 0.0 => Some(atm - gtm),
            _ => None,
        }
    } else {
        vehicle.tow_ball_mass_rating
    };

    let checks: [(DerivedMass, Option<f64>); 8] = [
        (front, vehicle.front_axle_rating),
        (rear, vehicle.rear_axle_rating),
        (gvm, vehicle.gvm_rating),
        (metrics.tow_ball_mass, tow_ball_rating),
        (metrics.gross_trailer_mass, trailer.gtm_rating),
        (metrics.gross_trailer_mass, trailer.axle_group_loading_rating),
        (metrics.aggregate_trailer_mass, trailer.atm_rating),
        (metrics.gross_combination_mass, vehicle.gcm_rating),
    ];

    !checks.iter().any(|(mass, rating)| match (mass, rating) {
        (DerivedMass::Known(kg), Some(limit)) => *limit > 0.0 && kg > limit,
        _ => false,
    })
}
