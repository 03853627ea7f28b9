use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::config::EngineConfig;
use super::domain::{RawInput, TrailerCapacityProfile, VehicleCapacityProfile};
use super::normalizer::NormalizeError;
use super::pipeline::{WeighEngine, WeighOutcome};
use super::record::{stored_verdict, RepositoryError, WeighId, WeighRecord, WeighRepository};
use super::validation::{validate, validate_profiles, InputError};
use crate::workflows::capacity::{CapacityCatalog, VehicleRef};

/// A weigh as submitted by the form: field readings plus the ratings to judge them against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeighSubmission {
    pub input: RawInput,
    /// Ratings entered by hand. Takes precedence over `vehicle_ref`.
    #[serde(default)]
    pub vehicle: Option<VehicleCapacityProfile>,
    #[serde(default)]
    pub vehicle_ref: Option<VehicleRef>,
    #[serde(default)]
    pub trailer: TrailerCapacityProfile,
}

/// Service composing validation, capacity lookup, the engine and the repository.
pub struct WeighService<R> {
    repository: Arc<R>,
    catalog: Arc<CapacityCatalog>,
    engine: WeighEngine,
    sequence: AtomicU64,
}

impl<R> WeighService<R>
where
    R: WeighRepository + 'static,
{
    pub fn new(repository: Arc<R>, catalog: Arc<CapacityCatalog>, config: EngineConfig) -> Self {
        Self {
            repository,
            catalog,
            engine: WeighEngine::new(config),
            sequence: AtomicU64::new(1),
        }
    }

    pub fn engine(&self) -> &WeighEngine {
        &self.engine
    }

    /// Run the pipeline without storing anything.
    pub fn evaluate(
        &self,
        submission: &WeighSubmission,
    ) -> Result<WeighOutcome, WeighServiceError> {
        self.run(submission).map(|(_, outcome)| outcome)
    }

    /// Evaluate and persist a weigh, refusing to store a verdict the save-time check disputes.
    pub fn submit(&self, submission: WeighSubmission) -> Result<WeighRecord, WeighServiceError> {
        let (vehicle, outcome) = self.run(&submission)?;
        let weigh_id = self.next_weigh_id();

        if stored_verdict(&outcome.metrics, &vehicle, &submission.trailer)
            != outcome.result.overall_compliant
        {
            tracing::warn!(weigh_id = %weigh_id, "save-time verdict disagrees with weigh result");
            return Err(WeighServiceError::VerdictMismatch { weigh_id });
        }

        let record = WeighRecord {
            weigh_id,
            recorded_at: Utc::now(),
            input: submission.input,
            vehicle,
            trailer: submission.trailer,
            readings: outcome.readings,
            metrics: outcome.metrics,
            result: outcome.result,
        };

        let stored = self.repository.insert(record)?;
        tracing::info!(
            weigh_id = %stored.weigh_id,
            verdict = stored.result.verdict_label(),
            "stored weigh"
        );
        Ok(stored)
    }

    pub fn get(&self, weigh_id: &WeighId) -> Result<WeighRecord, WeighServiceError> {
        let record = self
            .repository
            .fetch(weigh_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn recent(&self, limit: usize) -> Result<Vec<WeighRecord>, WeighServiceError> {
        Ok(self.repository.recent(limit)?)
    }

    fn run(
        &self,
        submission: &WeighSubmission,
    ) -> Result<(VehicleCapacityProfile, WeighOutcome), WeighServiceError> {
        let vehicle = self.vehicle_profile(submission)?;
        validate(&submission.input)?;
        validate_profiles(&vehicle, &submission.trailer)?;

        let outcome = self
            .engine
            .run(&submission.input, &vehicle, &submission.trailer)?;

        tracing::debug!(
            scenario = submission.input.scenario.label(),
            method = submission.input.method.label(),
            overall_compliant = outcome.result.overall_compliant,
            "evaluated weigh"
        );

        Ok((vehicle, outcome))
    }

    fn vehicle_profile(
        &self,
        submission: &WeighSubmission,
    ) -> Result<VehicleCapacityProfile, WeighServiceError> {
        match (&submission.vehicle, &submission.vehicle_ref) {
            (Some(profile), _) => Ok(*profile),
            (None, Some(reference)) => self.catalog.resolve(reference).copied().ok_or_else(|| {
                WeighServiceError::UnknownVehicle {
                    make: reference.make.clone(),
                    model: reference.model.clone(),
                }
            }),
            (None, None) => Ok(VehicleCapacityProfile::default()),
        }
    }

    fn next_weigh_id(&self) -> WeighId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        WeighId(format!("weigh-{id:06}"))
    }
}

/// Error raised by the weigh service.
#[derive(Debug, thiserror::Error)]
pub enum WeighServiceError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Configuration(#[from] NormalizeError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("compliance verdict for {weigh_id} could not be confirmed at save time")]
    VerdictMismatch { weigh_id: WeighId },
    #[error("no capacity ratings on file for {make} {model}")]
    UnknownVehicle { make: String, model: String },
}

impl WeighServiceError {
    /// Whether the caller sent something the engine cannot accept.
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Input(_) | Self::Configuration(_) | Self::UnknownVehicle { .. }
        )
    }
}
