use super::derivation::{DerivedMass, DerivedMetrics};
use super::domain::{VehicleCapacityProfile, WeighingScenario};
use serde::{Deserialize, Serialize};

/// Informational towing ratios. None of them affect the compliance verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryKind {
    VanToCarRatio,
    TowBallPercentage,
    BrakedTowingCapacityRatio,
}

impl AdvisoryKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::VanToCarRatio => "Van to car ratio",
            Self::TowBallPercentage => "Tow ball percentage",
            Self::BrakedTowingCapacityRatio => "Braked towing capacity used",
        }
    }

    pub const fn ideal_band(self) -> IdealBand {
        match self {
            Self::VanToCarRatio => IdealBand::Below(85.0),
            Self::TowBallPercentage => IdealBand::Between(8.0, 10.0),
            Self::BrakedTowingCapacityRatio => IdealBand::Below(80.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IdealBand {
    Below(f64),
    Between(f64, f64),
}

impl IdealBand {
    pub fn contains(self, percent: f64) -> bool {
        match self {
            Self::Below(ceiling) => percent < ceiling,
            Self::Between(low, high) => (low..=high).contains(&percent),
        }
    }

    pub fn description(self) -> String {
        match self {
            Self::Below(ceiling) => format!("< {ceiling:.0}%"),
            Self::Between(low, high) => format!("{low:.0}% - {high:.0}%"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryRatio {
    pub name: AdvisoryKind,
    /// Percentage, absent when a denominator is missing or not positive.
    pub value: Option<f64>,
    pub ideal_range_description: String,
    pub within_ideal_range: Option<bool>,
}

impl AdvisoryRatio {
    fn compute(name: AdvisoryKind, numerator: DerivedMass, denominator: Option<f64>) -> Self {
        let band = name.ideal_band();
        let value = match (numerator.known(), denominator) {
            (Some(numerator), Some(denominator)) if denominator > 0.0 => {
                Some(numerator / denominator * 100.0)
            }
            _ => None,
        };

        Self {
            name,
            value,
            ideal_range_description: band.description(),
            within_ideal_range: value.map(|percent| band.contains(percent)),
        }
    }
}

/// Towing ratios for the weighed combination.
///
/// No ratio is taken against a trailer rating, so only the vehicle profile is needed.
pub fn advise(metrics: &DerivedMetrics, vehicle: &VehicleCapacityProfile) -> Vec<AdvisoryRatio> {
    match metrics.scenario {
        WeighingScenario::VehicleOnly => Vec::new(),
        WeighingScenario::CaravanOnlyRegistered => vec![AdvisoryRatio::compute(
            AdvisoryKind::TowBallPercentage,
            metrics.tow_ball_mass,
            metrics.aggregate_trailer_mass.known(),
        )],
        WeighingScenario::TowVehicleAndCaravan => vec![
            AdvisoryRatio::compute(
                AdvisoryKind::VanToCarRatio,
                metrics.gross_trailer_mass,
                metrics.gvm_hitched.known(),
            ),
            AdvisoryRatio::compute(
                AdvisoryKind::TowBallPercentage,
                metrics.tow_ball_mass,
                metrics.aggregate_trailer_mass.known(),
            ),
            AdvisoryRatio::compute(
                AdvisoryKind::BrakedTowingCapacityRatio,
                metrics.aggregate_trailer_mass,
                vehicle.braked_towing_capacity,
            ),
        ],
    }
}
