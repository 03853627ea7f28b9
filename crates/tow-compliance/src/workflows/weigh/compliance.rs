use super::derivation::{DerivedMass, DerivedMetrics};
use super::domain::{
    MeasurementMethod, TrailerCapacityProfile, VehicleCapacityProfile, WeighingScenario,
};
use serde::{Deserialize, Serialize};

/// Verdict for one metric. The serialized names are stored by the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplianceStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "OVER")]
    Over,
    NotApplicable,
    NotComplete,
}

impl ComplianceStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Over => "OVER",
            Self::NotApplicable => "N/A",
            Self::NotComplete => "Not complete",
        }
    }

    pub const fn is_failure(self) -> bool {
        matches!(self, Self::Over)
    }
}

/// Regulated masses checked against a rating, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceMetric {
    FrontAxle,
    RearAxle,
    Gvm,
    TowBallMass,
    GrossTrailerMass,
    TrailerAxleGroup,
    AggregateTrailerMass,
    GrossCombinationMass,
}

impl ComplianceMetric {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::FrontAxle,
            Self::RearAxle,
            Self::Gvm,
            Self::TowBallMass,
            Self::GrossTrailerMass,
            Self::TrailerAxleGroup,
            Self::AggregateTrailerMass,
            Self::GrossCombinationMass,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FrontAxle => "Front axle",
            Self::RearAxle => "Rear axle",
            Self::Gvm => "Gross vehicle mass",
            Self::TowBallMass => "Tow ball mass",
            Self::GrossTrailerMass => "Gross trailer mass",
            Self::TrailerAxleGroup => "Trailer axle group",
            Self::AggregateTrailerMass => "Aggregate trailer mass",
            Self::GrossCombinationMass => "Gross combination mass",
        }
    }

    pub const fn rating_label(self) -> &'static str {
        match self {
            Self::FrontAxle => "FAWR",
            Self::RearAxle => "RAWR",
            Self::Gvm => "GVM",
            Self::TowBallMass => "TBM",
            Self::GrossTrailerMass => "GTM",
            Self::TrailerAxleGroup => "Axle group loading",
            Self::AggregateTrailerMass => "ATM",
            Self::GrossCombinationMass => "GCM",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplianceRow {
    #[serde(rename = "metric_name")]
    pub metric: ComplianceMetric,
    pub measured: f64,
    pub limit: Option<f64>,
    /// `limit - measured`; negative when over.
    pub difference: Option<f64>,
    pub status: ComplianceStatus,
}

/// Compare every regulated mass with its rating.
pub fn evaluate(
    metrics: &DerivedMetrics,
    vehicle: &VehicleCapacityProfile,
    trailer: &TrailerCapacityProfile,
) -> Vec<ComplianceRow> {
    ComplianceMetric::ordered()
        .into_iter()
        .map(|metric| {
            let measured = measured_mass(metrics, metric);
            let limit = rating(metric, metrics.scenario, vehicle, trailer);
            assess(metric, measured, limit)
        })
        .collect()
}

/// A zero rating is how an unentered rating arrives, so it counts as unknown.
pub(crate) fn assess(
    metric: ComplianceMetric,
    measured: DerivedMass,
    limit: Option<f64>,
) -> ComplianceRow {
    let limit = limit.filter(|kg| *kg > 0.0);

    let (difference, status) = match (measured, limit) {
        (DerivedMass::NotApplicable, _) | (_, None) => (None, ComplianceStatus::NotApplicable),
        (DerivedMass::NotComplete, Some(_)) => (None, ComplianceStatus::NotComplete),
        (DerivedMass::Known(kg), Some(limit)) => {
            let status = if kg <= limit {
                ComplianceStatus::Ok
            } else {
                ComplianceStatus::Over
            };
            (Some(limit - kg), status)
        }
    };

    ComplianceRow {
        metric,
        measured: measured.kg(),
        limit,
        difference,
        status,
    }
}

fn measured_mass(metrics: &DerivedMetrics, metric: ComplianceMetric) -> DerivedMass {
    let unhitched = metrics.scenario == WeighingScenario::VehicleOnly;

    match metric {
        ComplianceMetric::FrontAxle if unhitched => metrics.front_axle_unhitched,
        ComplianceMetric::FrontAxle => metrics.front_axle_hitched,
        ComplianceMetric::RearAxle if unhitched => metrics.rear_axle_unhitched,
        ComplianceMetric::RearAxle => metrics.rear_axle_hitched,
        ComplianceMetric::Gvm if unhitched => metrics.gvm_unhitched,
        // A single load cell only ever sees the tow vehicle on its own.
        ComplianceMetric::Gvm
            if metrics.method == MeasurementMethod::WeighbridgeAboveGroundSingleCell
                && metrics.scenario.includes_vehicle() =>
        {
            metrics.gvm_unhitched
        }
        ComplianceMetric::Gvm => metrics.gvm_hitched,
        ComplianceMetric::TowBallMass => metrics.tow_ball_mass,
        ComplianceMetric::GrossTrailerMass | ComplianceMetric::TrailerAxleGroup => {
            metrics.gross_trailer_mass
        }
        ComplianceMetric::AggregateTrailerMass => metrics.aggregate_trailer_mass,
        ComplianceMetric::GrossCombinationMass => metrics.gross_combination_mass,
    }
}

fn rating(
    metric: ComplianceMetric,
    scenario: WeighingScenario,
    vehicle: &VehicleCapacityProfile,
    trailer: &TrailerCapacityProfile,
) -> Option<f64> {
    match metric {
        ComplianceMetric::FrontAxle => vehicle.front_axle_rating,
        ComplianceMetric::RearAxle => vehicle.rear_axle_rating,
        ComplianceMetric::Gvm => vehicle.gvm_rating,
        ComplianceMetric::TowBallMass => match scenario {
            WeighingScenario::CaravanOnlyRegistered => caravan_tow_ball_rating(trailer),
            WeighingScenario::VehicleOnly | WeighingScenario::TowVehicleAndCaravan => {
                vehicle.tow_ball_mass_rating
            }
        },
        ComplianceMetric::GrossTrailerMass => trailer.gtm_rating,
        ComplianceMetric::TrailerAxleGroup => trailer.axle_group_loading_rating,
        ComplianceMetric::AggregateTrailerMass => trailer.atm_rating,
        ComplianceMetric::GrossCombinationMass => vehicle.gcm_rating,
    }
}

/// Without a tow vehicle the only tow-ball limit is what the caravan plate implies.
pub(crate) fn caravan_tow_ball_rating(trailer: &TrailerCapacityProfile) -> Option<f64> {
    let atm = trailer.atm_rating.filter(|kg| *kg > 0.0)?;
    let gtm = trailer.gtm_rating.filter(|kg| *kg > 0.0)?;
    Some(atm - gtm).filter(|kg| *kg > 0.0)
}
