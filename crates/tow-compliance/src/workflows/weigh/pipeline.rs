use super::advisory::advise;
use super::compliance::evaluate;
use super::config::EngineConfig;
use super::derivation::{derive_with_policy, DerivedMetrics};
use super::domain::{
    NormalizedReadingSet, RawInput, TrailerCapacityProfile, VehicleCapacityProfile,
};
use super::normalizer::{normalize, NormalizeError};
use super::result::{aggregate, WeighResult};
use serde::{Deserialize, Serialize};

/// Intermediate values kept alongside the result so callers can store or display them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeighOutcome {
    pub readings: NormalizedReadingSet,
    pub metrics: DerivedMetrics,
    pub result: WeighResult,
}

/// Runs normalize, derive, evaluate, advise and aggregate for a single weigh.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeighEngine {
    config: EngineConfig,
}

impl WeighEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn run(
        &self,
        input: &RawInput,
        vehicle: &VehicleCapacityProfile,
        trailer: &TrailerCapacityProfile,
    ) -> Result<WeighOutcome, NormalizeError> {
        let readings = normalize(input.scenario, input.method, &input.readings)?;
        let metrics = derive_with_policy(
            input.scenario,
            input.method,
            &readings,
            self.config.gcm_policy,
        );
        let rows = evaluate(&metrics, vehicle, trailer);
        let advisories = advise(&metrics, vehicle);

        Ok(WeighOutcome {
            readings,
            metrics,
            result: aggregate(rows, advisories),
        })
    }
}
