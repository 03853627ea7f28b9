use super::domain::{
    AxleGroupConfig, AxlePlatformReading, AxleTyreLoads, GoWeighReadings, InGroundAxleReadings,
    MeasurementMethod, NormalizedReadingSet, PlatformPair, RawReadings, SingleCellReadings,
    TrailerTyreLoads, TyreReadings, VehicleTyreLoads, WeighingScenario,
};

/// Raised when the input cannot be interpreted at all. Missing readings are not errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NormalizeError {
    #[error("{} is not available for {} weighs", .method.label(), .scenario.label())]
    UnsupportedCombination {
        scenario: WeighingScenario,
        method: MeasurementMethod,
    },
    #[error("{} weighs cannot be read from '{readings}' readings", .method.label())]
    ReadingsMismatch {
        method: MeasurementMethod,
        readings: &'static str,
    },
    #[error("{axle_group:?} axle group holds {capacity} tyre loads, found {found}")]
    TyreCount {
        axle_group: AxleGroupConfig,
        capacity: usize,
        found: usize,
    },
}

/// Convert a method-specific payload into the uniform reading slots.
pub fn normalize(
    scenario: WeighingScenario,
    method: MeasurementMethod,
    raw: &RawReadings,
) -> Result<NormalizedReadingSet, NormalizeError> {
    if !method.supports(scenario) {
        return Err(NormalizeError::UnsupportedCombination { scenario, method });
    }

    let mismatch = || NormalizeError::ReadingsMismatch {
        method,
        readings: raw.kind(),
    };

    match method {
        MeasurementMethod::PortableScalesIndividualTyre => {
            let RawReadings::IndividualTyres(readings) = raw else {
                return Err(mismatch());
            };
            from_tyres(scenario, readings)
        }
        MeasurementMethod::WeighbridgeInGroundAxle => {
            let RawReadings::InGroundAxle(readings) = raw else {
                return Err(mismatch());
            };
            from_in_ground_axle(scenario, readings)
        }
        MeasurementMethod::WeighbridgeGoWeigh => {
            let RawReadings::GoWeigh(readings) = raw else {
                return Err(mismatch());
            };
            Ok(from_go_weigh(scenario, readings))
        }
        MeasurementMethod::WeighbridgeAboveGroundSingleCell => {
            let RawReadings::SingleCell(readings) = raw else {
                return Err(mismatch());
            };
            Ok(from_single_cell(scenario, readings))
        }
    }
}

fn from_tyres(
    scenario: WeighingScenario,
    readings: &TyreReadings,
) -> Result<NormalizedReadingSet, NormalizeError> {
    let mut set = NormalizedReadingSet::default();

    match scenario {
        WeighingScenario::VehicleOnly => {
            let (front, rear, gvm) = vehicle_tyre_totals(readings.unhitched.as_ref());
            set.front_axle_unhitched = front;
            set.rear_axle_unhitched = rear;
            set.gvm_unhitched = gvm;
        }
        WeighingScenario::CaravanOnlyRegistered => {
            set.trailer_gtm_supplied = trailer_tyre_total(readings.trailer.as_ref())?;
            set.tow_ball_mass_override = readings.tow_ball_mass;
        }
        WeighingScenario::TowVehicleAndCaravan => {
            let (front, rear, gvm) = vehicle_tyre_totals(readings.unhitched.as_ref());
            set.front_axle_unhitched = front;
            set.rear_axle_unhitched = rear;
            set.gvm_unhitched = gvm;

            let (front, rear, gvm) = vehicle_tyre_totals(readings.hitched.as_ref());
            set.front_axle_hitched = front;
            set.rear_axle_hitched = rear;
            set.gvm_hitched = gvm.or(readings.gvm_hitched_total);

            let (_, _, released) = vehicle_tyre_totals(readings.hitched_wdh_release.as_ref());
            set.gvm_hitched_wdh_release = released;
            set.uses_weight_distribution_hitch = readings.uses_weight_distribution_hitch;

            set.trailer_gtm_supplied = trailer_tyre_total(readings.trailer.as_ref())?;
            set.tow_ball_mass_override = readings.tow_ball_mass;
        }
    }

    Ok(set)
}

// The rear axle is never read by this method; derivation fills it from GVM - front.
fn from_in_ground_axle(
    scenario: WeighingScenario,
    readings: &InGroundAxleReadings,
) -> Result<NormalizedReadingSet, NormalizeError> {
    let mut set = NormalizedReadingSet::default();
    let unhitched = readings.unhitched.unwrap_or_default();

    match scenario {
        WeighingScenario::VehicleOnly => {
            set.front_axle_unhitched = unhitched.front_axle;
            set.gvm_unhitched = unhitched.gvm;
        }
        WeighingScenario::CaravanOnlyRegistered => {
            return Err(NormalizeError::UnsupportedCombination {
                scenario,
                method: MeasurementMethod::WeighbridgeInGroundAxle,
            });
        }
        WeighingScenario::TowVehicleAndCaravan => {
            let AxlePlatformReading { front_axle, gvm } = readings.hitched.unwrap_or_default();
            set.front_axle_unhitched = unhitched.front_axle;
            set.gvm_unhitched = unhitched.gvm;
            set.front_axle_hitched = front_axle;
            set.gvm_hitched = gvm;
            set.gvm_hitched_wdh_release = readings.gvm_hitched_wdh_release;
            set.uses_weight_distribution_hitch = readings.uses_weight_distribution_hitch;
            set.trailer_gtm_supplied = readings.trailer_gtm;
            set.trailer_atm_supplied = readings.trailer_atm;
            set.tow_ball_mass_override = readings.tow_ball_mass;
        }
    }

    Ok(set)
}

fn from_go_weigh(scenario: WeighingScenario, readings: &GoWeighReadings) -> NormalizedReadingSet {
    let mut set = NormalizedReadingSet::default();
    let unhitched = readings.unhitched.unwrap_or_default();

    match scenario {
        WeighingScenario::VehicleOnly => {
            set.front_axle_unhitched = unhitched.front;
            set.rear_axle_unhitched = unhitched.rear;
            set.gvm_unhitched = platform_total(unhitched);
        }
        WeighingScenario::CaravanOnlyRegistered => {
            set.trailer_atm_supplied = readings.trailer_atm;
            set.trailer_gtm_supplied = readings.trailer_gtm;
            set.tow_ball_mass_override = readings.tow_ball_mass;
        }
        WeighingScenario::TowVehicleAndCaravan => {
            let hitched = readings.hitched.unwrap_or_default();
            set.front_axle_unhitched = unhitched.front;
            set.rear_axle_unhitched = unhitched.rear;
            set.gvm_unhitched = platform_total(unhitched);
            set.front_axle_hitched = hitched.front;
            set.rear_axle_hitched = hitched.rear;
            set.gvm_hitched = platform_total(hitched);
            set.gvm_hitched_wdh_release = readings.hitched_wdh_release.and_then(platform_total);
            set.uses_weight_distribution_hitch = readings.uses_weight_distribution_hitch;
            set.trailer_atm_supplied = readings.trailer_atm;
            set.trailer_gtm_supplied = readings.trailer_gtm;
            set.tow_ball_mass_override = readings.tow_ball_mass;
            set.gcm_supplied = readings.gcm;
        }
    }

    set
}

// Axle-level, GTM and TBM readings do not exist for this method.
fn from_single_cell(
    scenario: WeighingScenario,
    readings: &SingleCellReadings,
) -> NormalizedReadingSet {
    let mut set = NormalizedReadingSet::default();

    match scenario {
        WeighingScenario::VehicleOnly => {
            set.gvm_unhitched = readings.vehicle_total;
        }
        WeighingScenario::CaravanOnlyRegistered => {
            set.trailer_atm_supplied = readings.trailer_total;
        }
        WeighingScenario::TowVehicleAndCaravan => {
            set.gvm_unhitched = readings.vehicle_total;
            set.trailer_atm_supplied = readings.trailer_total;
            set.gcm_supplied = readings.combination_total;
        }
    }

    set
}

fn axle_total(axle: &AxleTyreLoads) -> Option<f64> {
    Some(axle.left? + axle.right?)
}

fn vehicle_tyre_totals(
    loads: Option<&VehicleTyreLoads>,
) -> (Option<f64>, Option<f64>, Option<f64>) {
    let Some(loads) = loads else {
        return (None, None, None);
    };

    let front = axle_total(&loads.front);
    let rear = axle_total(&loads.rear);
    let gvm = front.zip(rear).map(|(front, rear)| front + rear);
    (front, rear, gvm)
}

fn trailer_tyre_total(loads: Option<&TrailerTyreLoads>) -> Result<Option<f64>, NormalizeError> {
    let Some(TrailerTyreLoads { axle_group, loads }) = loads else {
        return Ok(None);
    };

    let capacity = axle_group.tyre_count();
    if loads.len() > capacity {
        return Err(NormalizeError::TyreCount {
            axle_group: *axle_group,
            capacity,
            found: loads.len(),
        });
    }

    // A partly read axle group leaves the trailer unmeasured.
    if loads.len() < capacity {
        return Ok(None);
    }

    Ok(Some(loads.iter().sum()))
}

fn platform_total(pair: PlatformPair) -> Option<f64> {
    Some(pair.front? + pair.rear?)
}
