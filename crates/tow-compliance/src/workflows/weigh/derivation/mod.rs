mod resolvers;

use super::config::GcmPolicy;
use super::domain::{MeasurementMethod, NormalizedReadingSet, WeighingScenario};
use serde::{Deserialize, Serialize};

/// A derived mass together with the reason it may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "kg", rename_all = "snake_case")]
pub enum DerivedMass {
    Known(f64),
    /// Relevant to the weigh, but the method did not yield enough readings.
    NotComplete,
    /// Meaningless for the scenario being weighed.
    NotApplicable,
}

impl DerivedMass {
    fn scoped(applicable: bool, value: Option<f64>) -> Self {
        match (applicable, value) {
            (false, _) => Self::NotApplicable,
            (true, Some(kg)) => Self::Known(kg),
            (true, None) => Self::NotComplete,
        }
    }

    pub fn known(self) -> Option<f64> {
        match self {
            Self::Known(kg) => Some(kg),
            Self::NotComplete | Self::NotApplicable => None,
        }
    }

    /// Reported figure; zero when nothing was derived.
    pub fn kg(self) -> f64 {
        self.known().unwrap_or(0.0)
    }

    pub fn is_known(self) -> bool {
        matches!(self, Self::Known(_))
    }
}

/// Canonical masses for one weigh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub scenario: WeighingScenario,
    pub method: MeasurementMethod,
    pub gvm_hitched: DerivedMass,
    pub gvm_unhitched: DerivedMass,
    pub front_axle_hitched: DerivedMass,
    pub rear_axle_hitched: DerivedMass,
    pub front_axle_unhitched: DerivedMass,
    pub rear_axle_unhitched: DerivedMass,
    pub tow_ball_mass: DerivedMass,
    pub gross_trailer_mass: DerivedMass,
    pub aggregate_trailer_mass: DerivedMass,
    pub gross_combination_mass: DerivedMass,
}

#[derive(Debug, Default)]
struct MassSlots {
    gvm_hitched: Option<f64>,
    gvm_unhitched: Option<f64>,
    front_axle_hitched: Option<f64>,
    rear_axle_hitched: Option<f64>,
    front_axle_unhitched: Option<f64>,
    rear_axle_unhitched: Option<f64>,
    tow_ball_mass: Option<f64>,
    gross_trailer_mass: Option<f64>,
    aggregate_trailer_mass: Option<f64>,
    gross_combination_mass: Option<f64>,
}

impl MassSlots {
    fn into_metrics(self, scenario: WeighingScenario, method: MeasurementMethod) -> DerivedMetrics {
        let vehicle = scenario.includes_vehicle();
        let trailer = scenario.includes_trailer();
        let hitched = scenario.is_combination();

        DerivedMetrics {
            scenario,
            method,
            gvm_hitched: DerivedMass::scoped(hitched, self.gvm_hitched),
            gvm_unhitched: DerivedMass::scoped(vehicle, self.gvm_unhitched),
            front_axle_hitched: DerivedMass::scoped(hitched, self.front_axle_hitched),
            rear_axle_hitched: DerivedMass::scoped(hitched, self.rear_axle_hitched),
            front_axle_unhitched: DerivedMass::scoped(vehicle, self.front_axle_unhitched),
            rear_axle_unhitched: DerivedMass::scoped(vehicle, self.rear_axle_unhitched),
            tow_ball_mass: DerivedMass::scoped(trailer, self.tow_ball_mass),
            gross_trailer_mass: DerivedMass::scoped(trailer, self.gross_trailer_mass),
            aggregate_trailer_mass: DerivedMass::scoped(trailer, self.aggregate_trailer_mass),
            gross_combination_mass: DerivedMass::scoped(hitched, self.gross_combination_mass),
        }
    }
}

/// Derive the canonical masses using the default GCM policy.
pub fn derive(
    scenario: WeighingScenario,
    method: MeasurementMethod,
    readings: &NormalizedReadingSet,
) -> DerivedMetrics {
    derive_with_policy(scenario, method, readings, GcmPolicy::default())
}

pub fn derive_with_policy(
    scenario: WeighingScenario,
    method: MeasurementMethod,
    readings: &NormalizedReadingSet,
    policy: GcmPolicy,
) -> DerivedMetrics {
    let slots = match method {
        MeasurementMethod::WeighbridgeAboveGroundSingleCell => single_cell_slots(readings),
        MeasurementMethod::PortableScalesIndividualTyre
        | MeasurementMethod::WeighbridgeInGroundAxle
        | MeasurementMethod::WeighbridgeGoWeigh => {
            measured_slots(scenario, method, readings, policy)
        }
    };

    slots.into_metrics(scenario, method)
}

// Only whole-unit totals exist; GTM and TBM cannot be isolated whatever else was entered.
fn single_cell_slots(readings: &NormalizedReadingSet) -> MassSlots {
    MassSlots {
        gvm_unhitched: readings.gvm_unhitched,
        aggregate_trailer_mass: readings.trailer_atm_supplied,
        gross_combination_mass: readings.gcm_supplied,
        ..MassSlots::default()
    }
}

fn measured_slots(
    scenario: WeighingScenario,
    method: MeasurementMethod,
    readings: &NormalizedReadingSet,
    policy: GcmPolicy,
) -> MassSlots {
    let unhitched = resolvers::axle_set(
        readings.front_axle_unhitched,
        readings.rear_axle_unhitched,
        readings.gvm_unhitched,
    );
    let hitched = resolvers::axle_set(
        readings.front_axle_hitched,
        readings.rear_axle_hitched,
        resolvers::hitched_gvm_total(method, readings, unhitched.gvm),
    );
    let tow_ball_mass = resolvers::tow_ball_mass(readings, hitched.gvm, unhitched.gvm);

    // A GoWeigh summary prints 0 when the caravan axles were not weighed on their own.
    let gtm_supplied = match method {
        MeasurementMethod::WeighbridgeGoWeigh => {
            readings.trailer_gtm_supplied.filter(|kg| *kg > 0.0)
        }
        _ => readings.trailer_gtm_supplied,
    };
    let atm_supplied = match (scenario, method) {
        (
            WeighingScenario::CaravanOnlyRegistered,
            MeasurementMethod::PortableScalesIndividualTyre,
        ) => None,
        _ => readings.trailer_atm_supplied,
    };
    let trailer = resolvers::trailer_masses(atm_supplied, gtm_supplied, tow_ball_mass);

    let gross_combination_mass = resolvers::combination_mass(
        policy,
        trailer.gross_trailer_mass,
        hitched.gvm,
        readings.gcm_supplied,
    );

    MassSlots {
        gvm_hitched: hitched.gvm,
        gvm_unhitched: unhitched.gvm,
        front_axle_hitched: hitched.front,
        rear_axle_hitched: hitched.rear,
        front_axle_unhitched: unhitched.front,
        rear_axle_unhitched: unhitched.rear,
        tow_ball_mass: trailer.tow_ball_mass,
        gross_trailer_mass: trailer.gross_trailer_mass,
        aggregate_trailer_mass: trailer.aggregate_trailer_mass,
        gross_combination_mass,
    }
}
