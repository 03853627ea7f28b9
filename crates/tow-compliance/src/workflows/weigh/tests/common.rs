use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::telemetry;
use crate::workflows::capacity::CapacityCatalog;
use crate::workflows::weigh::domain::{
    AxleGroupConfig, AxlePlatformReading, GoWeighReadings, InGroundAxleReadings,
    MeasurementMethod, RawInput, RawReadings, SingleCellReadings, TrailerCapacityProfile,
    TrailerTyreLoads, TyreReadings, VehicleCapacityProfile, WeighingScenario,
};
use crate::workflows::weigh::record::{RepositoryError, WeighId, WeighRecord, WeighRepository};
use crate::workflows::weigh::{
    weigh_router, DerivedMass, EngineConfig, WeighService, WeighSubmission,
};

pub(super) const TOLERANCE: f64 = 1e-9;

pub(super) fn assert_kg(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected} kg, got {actual} kg"
    );
}

pub(super) fn known(mass: DerivedMass) -> f64 {
    match mass {
        DerivedMass::Known(kg) => kg,
        other => panic!("expected a known mass, got {other:?}"),
    }
}

/// Vehicle only on an in-ground axle weighbridge.
pub(super) fn vehicle_only_in_ground() -> RawInput {
    RawInput {
        scenario: WeighingScenario::VehicleOnly,
        method: MeasurementMethod::WeighbridgeInGroundAxle,
        readings: RawReadings::InGroundAxle(InGroundAxleReadings {
            unhitched: Some(AxlePlatformReading {
                front_axle: Some(1_000.0),
                gvm: Some(2_500.0),
            }),
            ..InGroundAxleReadings::default()
        }),
    }
}

pub(super) fn light_vehicle() -> VehicleCapacityProfile {
    VehicleCapacityProfile {
        front_axle_rating: Some(1_200.0),
        rear_axle_rating: Some(1_600.0),
        gvm_rating: Some(2_800.0),
        ..VehicleCapacityProfile::default()
    }
}

/// Caravan on its own with every total read off the GoWeigh summary.
pub(super) fn caravan_only_go_weigh() -> RawInput {
    RawInput {
        scenario: WeighingScenario::CaravanOnlyRegistered,
        method: MeasurementMethod::WeighbridgeGoWeigh,
        readings: RawReadings::GoWeigh(GoWeighReadings {
            trailer_atm: Some(2_400.0),
            trailer_gtm: Some(2_170.0),
            tow_ball_mass: Some(230.0),
            ..GoWeighReadings::default()
        }),
    }
}

pub(super) fn touring_caravan() -> TrailerCapacityProfile {
    TrailerCapacityProfile {
        atm_rating: Some(2_400.0),
        gtm_rating: Some(2_200.0),
        axle_group_loading_rating: None,
    }
}

/// Hitched combination with a weight distribution hitch, in-ground axle weighbridge.
pub(super) fn tow_in_ground_with_hitch() -> RawInput {
    RawInput {
        scenario: WeighingScenario::TowVehicleAndCaravan,
        method: MeasurementMethod::WeighbridgeInGroundAxle,
        readings: RawReadings::InGroundAxle(InGroundAxleReadings {
            unhitched: Some(AxlePlatformReading {
                front_axle: Some(1_050.0),
                gvm: Some(2_200.0),
            }),
            hitched: Some(AxlePlatformReading {
                front_axle: Some(1_000.0),
                gvm: Some(2_750.0),
            }),
            gvm_hitched_wdh_release: Some(2_500.0),
            uses_weight_distribution_hitch: true,
            trailer_gtm: Some(1_900.0),
            ..InGroundAxleReadings::default()
        }),
    }
}

pub(super) fn tow_vehicle() -> VehicleCapacityProfile {
    VehicleCapacityProfile {
        front_axle_rating: Some(1_400.0),
        rear_axle_rating: Some(1_900.0),
        gvm_rating: Some(3_000.0),
        gcm_rating: Some(6_000.0),
        braked_towing_capacity: Some(3_000.0),
        tow_ball_mass_rating: Some(300.0),
    }
}

pub(super) fn family_caravan() -> TrailerCapacityProfile {
    TrailerCapacityProfile {
        atm_rating: Some(2_500.0),
        gtm_rating: Some(2_200.0),
        axle_group_loading_rating: Some(2_300.0),
    }
}

/// Hitched combination on an above-ground single load cell.
pub(super) fn tow_single_cell() -> RawInput {
    RawInput {
        scenario: WeighingScenario::TowVehicleAndCaravan,
        method: MeasurementMethod::WeighbridgeAboveGroundSingleCell,
        readings: RawReadings::SingleCell(SingleCellReadings {
            vehicle_total: Some(2_100.0),
            trailer_total: Some(2_300.0),
            combination_total: Some(4_900.0),
        }),
    }
}

pub(super) fn single_cell_vehicle() -> VehicleCapacityProfile {
    VehicleCapacityProfile {
        front_axle_rating: Some(1_300.0),
        rear_axle_rating: None,
        gvm_rating: Some(2_800.0),
        gcm_rating: Some(5_000.0),
        braked_towing_capacity: Some(3_500.0),
        tow_ball_mass_rating: Some(250.0),
    }
}

pub(super) fn single_cell_caravan() -> TrailerCapacityProfile {
    TrailerCapacityProfile {
        atm_rating: Some(2_500.0),
        gtm_rating: Some(2_300.0),
        axle_group_loading_rating: None,
    }
}

/// Dual-axle caravan on portable scales with a tow-ball scale reading.
pub(super) fn caravan_only_portable() -> RawInput {
    RawInput {
        scenario: WeighingScenario::CaravanOnlyRegistered,
        method: MeasurementMethod::PortableScalesIndividualTyre,
        readings: RawReadings::IndividualTyres(TyreReadings {
            trailer: Some(TrailerTyreLoads {
                axle_group: AxleGroupConfig::Dual,
                loads: vec![450.0, 460.0, 470.0, 480.0],
            }),
            tow_ball_mass: Some(180.0),
            ..TyreReadings::default()
        }),
    }
}

pub(super) fn compact_caravan() -> TrailerCapacityProfile {
    TrailerCapacityProfile {
        atm_rating: Some(2_000.0),
        gtm_rating: Some(2_000.0),
        axle_group_loading_rating: None,
    }
}

pub(super) fn submission(
    input: RawInput,
    vehicle: VehicleCapacityProfile,
    trailer: TrailerCapacityProfile,
) -> WeighSubmission {
    WeighSubmission {
        input,
        vehicle: Some(vehicle),
        vehicle_ref: None,
        trailer,
    }
}

pub(super) fn tow_submission() -> WeighSubmission {
    submission(tow_in_ground_with_hitch(), tow_vehicle(), family_caravan())
}

pub(super) fn catalog() -> CapacityCatalog {
    CapacityCatalog::from_reader(Cursor::new(
        "Make,Model,Front Axle,Rear Axle,GVM,GCM,BTC,TBM\n\
Toyota,LandCruiser 300 GXL,1400,1900,3000,6000,3000,300\n",
    ))
    .expect("catalog parses")
}

pub(super) fn build_service() -> (WeighService<MemoryRepository>, Arc<MemoryRepository>) {
    telemetry::init_for_tests();
    let repository = Arc::new(MemoryRepository::default());
    let service = WeighService::new(
        repository.clone(),
        Arc::new(catalog()),
        EngineConfig::default(),
    );
    (service, repository)
}

pub(super) fn service_with<R>(repository: R) -> WeighService<R>
where
    R: WeighRepository + 'static,
{
    telemetry::init_for_tests();
    WeighService::new(
        Arc::new(repository),
        Arc::new(catalog()),
        EngineConfig::default(),
    )
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<WeighId, WeighRecord>>>,
    order: Arc<Mutex<Vec<WeighId>>>,
}

impl WeighRepository for MemoryRepository {
    fn insert(&self, record: WeighRecord) -> Result<WeighRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.weigh_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.weigh_id.clone(), record.clone());
        self.order
            .lock()
            .expect("order mutex poisoned")
            .push(record.weigh_id.clone());
        Ok(record)
    }

    fn fetch(&self, id: &WeighId) -> Result<Option<WeighRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<WeighRecord>, RepositoryError> {
        let records = self.records.lock().expect("repository mutex poisoned");
        let order = self.order.lock().expect("order mutex poisoned");
        Ok(order
            .iter()
            .rev()
            .take(limit)
            .filter_map(|id| records.get(id).cloned())
            .collect())
    }
}

pub(super) struct ConflictRepository;

impl WeighRepository for ConflictRepository {
    fn insert(&self, _record: WeighRecord) -> Result<WeighRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &WeighId) -> Result<Option<WeighRecord>, RepositoryError> {
        Ok(None)
    }

    fn recent(&self, _limit: usize) -> Result<Vec<WeighRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl WeighRepository for UnavailableRepository {
    fn insert(&self, _record: WeighRecord) -> Result<WeighRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &WeighId) -> Result<Option<WeighRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<WeighRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn weigh_router_with_service(service: WeighService<MemoryRepository>) -> axum::Router {
    weigh_router(Arc::new(service))
}
