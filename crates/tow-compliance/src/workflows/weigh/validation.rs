//! Field-level checks applied before any reading reaches the engine.

use super::domain::{
    AxlePlatformReading, PlatformPair, RawInput, RawReadings, TrailerCapacityProfile,
    VehicleCapacityProfile, VehicleTyreLoads,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("{field} must be a non-negative number of kilograms, got {value}")]
    InvalidMass { field: String, value: f64 },
}

/// Reject negative or non-finite masses anywhere in the payload.
pub fn validate(input: &RawInput) -> Result<(), InputError> {
    let mut fields = MassFields::default();

    match &input.readings {
        RawReadings::IndividualTyres(readings) => {
            fields.tyres("unhitched", readings.unhitched.as_ref());
            fields.tyres("hitched", readings.hitched.as_ref());
            fields.tyres("hitched_wdh_release", readings.hitched_wdh_release.as_ref());
            fields.push("gvm_hitched_total", readings.gvm_hitched_total);
            if let Some(trailer) = &readings.trailer {
                for (index, load) in trailer.loads.iter().enumerate() {
                    fields.push(format!("trailer.loads[{index}]"), Some(*load));
                }
            }
            fields.push("tow_ball_mass", readings.tow_ball_mass);
        }
        RawReadings::InGroundAxle(readings) => {
            fields.axle_platform("unhitched", readings.unhitched);
            fields.axle_platform("hitched", readings.hitched);
            fields.push("gvm_hitched_wdh_release", readings.gvm_hitched_wdh_release);
            fields.push("trailer_gtm", readings.trailer_gtm);
            fields.push("trailer_atm", readings.trailer_atm);
            fields.push("tow_ball_mass", readings.tow_ball_mass);
        }
        RawReadings::GoWeigh(readings) => {
            fields.platforms("unhitched", readings.unhitched);
            fields.platforms("hitched", readings.hitched);
            fields.platforms("hitched_wdh_release", readings.hitched_wdh_release);
            fields.push("trailer_atm", readings.trailer_atm);
            fields.push("trailer_gtm", readings.trailer_gtm);
            fields.push("tow_ball_mass", readings.tow_ball_mass);
            fields.push("gcm", readings.gcm);
        }
        RawReadings::SingleCell(readings) => {
            fields.push("vehicle_total", readings.vehicle_total);
            fields.push("trailer_total", readings.trailer_total);
            fields.push("combination_total", readings.combination_total);
        }
    }

    fields.check()
}

/// Ratings follow the same rule as readings; zero stays legal and means "not entered".
pub fn validate_profiles(
    vehicle: &VehicleCapacityProfile,
    trailer: &TrailerCapacityProfile,
) -> Result<(), InputError> {
    let mut fields = MassFields::default();
    fields.push("vehicle.front_axle_rating", vehicle.front_axle_rating);
    fields.push("vehicle.rear_axle_rating", vehicle.rear_axle_rating);
    fields.push("vehicle.gvm_rating", vehicle.gvm_rating);
    fields.push("vehicle.gcm_rating", vehicle.gcm_rating);
    fields.push("vehicle.braked_towing_capacity", vehicle.braked_towing_capacity);
    fields.push("vehicle.tow_ball_mass_rating", vehicle.tow_ball_mass_rating);
    fields.push("trailer.atm_rating", trailer.atm_rating);
    fields.push("trailer.gtm_rating", trailer.gtm_rating);
    fields.push(
        "trailer.axle_group_loading_rating",
        trailer.axle_group_loading_rating,
    );
    fields.check()
}

#[derive(Default)]
struct MassFields {
    entries: Vec<(String, f64)>,
}

impl MassFields {
    fn push(&mut self, field: impl Into<String>, value: Option<f64>) {
        if let Some(value) = value {
            self.entries.push((field.into(), value));
        }
    }

    fn tyres(&mut self, prefix: &str, loads: Option<&VehicleTyreLoads>) {
        let Some(loads) = loads else {
            return;
        };
        for (axle, tyres) in [("front", loads.front), ("rear", loads.rear)] {
            self.push(format!("{prefix}.{axle}.left"), tyres.left);
            self.push(format!("{prefix}.{axle}.right"), tyres.right);
        }
    }

    fn axle_platform(&mut self, prefix: &str, reading: Option<AxlePlatformReading>) {
        let Some(reading) = reading else {
            return;
        };
        self.push(format!("{prefix}.front_axle"), reading.front_axle);
        self.push(format!("{prefix}.gvm"), reading.gvm);
    }

    fn platforms(&mut self, prefix: &str, pair: Option<PlatformPair>) {
        let Some(pair) = pair else {
            return;
        };
        self.push(format!("{prefix}.front"), pair.front);
        self.push(format!("{prefix}.rear"), pair.rear);
    }

    fn check(self) -> Result<(), InputError> {
        match self
            .entries
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            Some((field, value)) => Err(InputError::InvalidMass { field, value }),
            None => Ok(()),
        }
    }
}
