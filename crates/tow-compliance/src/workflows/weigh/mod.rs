//! Weigh evaluation: raw field readings in, a compliance verdict with advisory ratios out.
//!
//! The engine stages (normalize, derive, evaluate, advise, aggregate) are pure functions.
//! Validation, capacity lookup, persistence and HTTP sit around them in the service and router.

pub mod advisory;
pub mod compliance;
pub mod config;
pub mod derivation;
pub mod domain;
pub mod normalizer;
pub mod pipeline;
pub mod record;
pub mod result;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use advisory::{advise, AdvisoryKind, AdvisoryRatio, IdealBand};
pub use compliance::{evaluate, ComplianceMetric, ComplianceRow, ComplianceStatus};
pub use config::{EngineConfig, GcmPolicy};
pub use derivation::{derive, derive_with_policy, DerivedMass, DerivedMetrics};
pub use domain::{
    AxleGroupConfig, AxlePlatformReading, AxleTyreLoads, GoWeighReadings, InGroundAxleReadings,
    MeasurementMethod, NormalizedReadingSet, PlatformPair, RawInput, RawReadings,
    SingleCellReadings, TrailerCapacityProfile, TrailerTyreLoads, TyreReadings,
    VehicleCapacityProfile, VehicleTyreLoads, WeighingScenario,
};
pub use normalizer::{normalize, NormalizeError};
pub use pipeline::{WeighEngine, WeighOutcome};
pub use record::{
    stored_verdict, RepositoryError, WeighId, WeighRecord, WeighRecordView, WeighRepository,
};
pub use result::{aggregate, WeighResult};
pub use router::weigh_router;
pub use service::{WeighService, WeighServiceError, WeighSubmission};
pub use validation::{validate, validate_profiles, InputError};
