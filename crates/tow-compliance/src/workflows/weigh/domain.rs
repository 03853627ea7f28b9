use serde::{Deserialize, Serialize};

/// Which parts of a combination were put on the scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeighingScenario {
    VehicleOnly,
    CaravanOnlyRegistered,
    TowVehicleAndCaravan,
}

impl WeighingScenario {
    pub const fn ordered() -> [Self; 3] {
        [
            Self::VehicleOnly,
            Self::CaravanOnlyRegistered,
            Self::TowVehicleAndCaravan,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::VehicleOnly => "Vehicle only",
            Self::CaravanOnlyRegistered => "Caravan only (registered)",
            Self::TowVehicleAndCaravan => "Tow vehicle and caravan",
        }
    }

    pub const fn includes_vehicle(self) -> bool {
        matches!(self, Self::VehicleOnly | Self::TowVehicleAndCaravan)
    }

    pub const fn includes_trailer(self) -> bool {
        matches!(self, Self::CaravanOnlyRegistered | Self::TowVehicleAndCaravan)
    }

    pub const fn is_combination(self) -> bool {
        matches!(self, Self::TowVehicleAndCaravan)
    }
}

/// Weighing procedure used in the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementMethod {
    PortableScalesIndividualTyre,
    WeighbridgeInGroundAxle,
    WeighbridgeGoWeigh,
    WeighbridgeAboveGroundSingleCell,
}

impl MeasurementMethod {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::PortableScalesIndividualTyre,
            Self::WeighbridgeInGroundAxle,
            Self::WeighbridgeGoWeigh,
            Self::WeighbridgeAboveGroundSingleCell,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PortableScalesIndividualTyre => "Portable scales (individual tyre)",
            Self::WeighbridgeInGroundAxle => "Weighbridge (in-ground, axle by axle)",
            Self::WeighbridgeGoWeigh => "Weighbridge (GoWeigh)",
            Self::WeighbridgeAboveGroundSingleCell => "Weighbridge (above-ground, single cell)",
        }
    }

    /// A caravan weighed on its own has no front axle to put on an in-ground axle platform.
    pub const fn supports(self, scenario: WeighingScenario) -> bool {
        !matches!(
            (self, scenario),
            (
                Self::WeighbridgeInGroundAxle,
                WeighingScenario::CaravanOnlyRegistered
            )
        )
    }
}

/// Number of axles under the caravan, which fixes how many tyre loads are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxleGroupConfig {
    Single,
    Dual,
    Triple,
}

impl AxleGroupConfig {
    pub const fn tyre_count(self) -> usize {
        match self {
            Self::Single => 2,
            Self::Dual => 4,
            Self::Triple => 6,
        }
    }
}

/// Left and right tyre loads for one axle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxleTyreLoads {
    pub left: Option<f64>,
    pub right: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleTyreLoads {
    pub front: AxleTyreLoads,
    pub rear: AxleTyreLoads,
}

/// Caravan tyre loads, front axle first, left before right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailerTyreLoads {
    pub axle_group: AxleGroupConfig,
    pub loads: Vec<f64>,
}

/// Portable scales placed under each tyre in turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TyreReadings {
    pub unhitched: Option<VehicleTyreLoads>,
    pub hitched: Option<VehicleTyreLoads>,
    pub hitched_wdh_release: Option<VehicleTyreLoads>,
    pub uses_weight_distribution_hitch: bool,
    /// Whole-vehicle total read off the scale display while hitched.
    pub gvm_hitched_total: Option<f64>,
    pub trailer: Option<TrailerTyreLoads>,
    /// Tow-ball scale reading.
    pub tow_ball_mass: Option<f64>,
}

/// Front axle on the platform, then the whole vehicle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxlePlatformReading {
    pub front_axle: Option<f64>,
    pub gvm: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InGroundAxleReadings {
    pub unhitched: Option<AxlePlatformReading>,
    pub hitched: Option<AxlePlatformReading>,
    pub gvm_hitched_wdh_release: Option<f64>,
    pub uses_weight_distribution_hitch: bool,
    pub trailer_gtm: Option<f64>,
    pub trailer_atm: Option<f64>,
    pub tow_ball_mass: Option<f64>,
}

/// Side-by-side platform groups under the front and rear axles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformPair {
    pub front: Option<f64>,
    pub rear: Option<f64>,
}

/// Platform passes plus the totals printed on the GoWeigh summary screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoWeighReadings {
    pub unhitched: Option<PlatformPair>,
    pub hitched: Option<PlatformPair>,
    pub hitched_wdh_release: Option<PlatformPair>,
    pub uses_weight_distribution_hitch: bool,
    pub trailer_atm: Option<f64>,
    pub trailer_gtm: Option<f64>,
    pub tow_ball_mass: Option<f64>,
    pub gcm: Option<f64>,
}

/// Whole-unit totals from a single above-ground load cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SingleCellReadings {
    pub vehicle_total: Option<f64>,
    pub trailer_total: Option<f64>,
    pub combination_total: Option<f64>,
}

/// Method-specific field payload as captured by the weigh form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawReadings {
    IndividualTyres(TyreReadings),
    InGroundAxle(InGroundAxleReadings),
    GoWeigh(GoWeighReadings),
    SingleCell(SingleCellReadings),
}

impl RawReadings {
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::IndividualTyres(_) => "individual_tyres",
            Self::InGroundAxle(_) => "in_ground_axle",
            Self::GoWeigh(_) => "go_weigh",
            Self::SingleCell(_) => "single_cell",
        }
    }
}

/// Scenario and method tagged field input for one weigh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    pub scenario: WeighingScenario,
    pub method: MeasurementMethod,
    pub readings: RawReadings,
}

/// Uniform reading slots. `None` means the method did not measure the slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizedReadingSet {
    pub front_axle_unhitched: Option<f64>,
    pub rear_axle_unhitched: Option<f64>,
    pub front_axle_hitched: Option<f64>,
    pub rear_axle_hitched: Option<f64>,
    pub gvm_unhitched: Option<f64>,
    pub gvm_hitched: Option<f64>,
    pub gvm_hitched_wdh_release: Option<f64>,
    pub uses_weight_distribution_hitch: bool,
    pub trailer_gtm_supplied: Option<f64>,
    pub trailer_atm_supplied: Option<f64>,
    pub tow_ball_mass_override: Option<f64>,
    pub gcm_supplied: Option<f64>,
}

/// Manufacturer ratings for the tow vehicle. Absent ratings are unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleCapacityProfile {
    pub front_axle_rating: Option<f64>,
    pub rear_axle_rating: Option<f64>,
    pub gvm_rating: Option<f64>,
    pub gcm_rating: Option<f64>,
    pub braked_towing_capacity: Option<f64>,
    pub tow_ball_mass_rating: Option<f64>,
}

/// Compliance plate ratings for the caravan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailerCapacityProfile {
    pub atm_rating: Option<f64>,
    pub gtm_rating: Option<f64>,
    pub axle_group_loading_rating: Option<f64>,
}
