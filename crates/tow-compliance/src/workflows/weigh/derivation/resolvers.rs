//! One resolver per derived mass. Each walks an ordered list of candidate sources and takes the
//! first that can be computed from the readings at hand.

use super::super::config::GcmPolicy;
use super::super::domain::{MeasurementMethod, NormalizedReadingSet};

/// Front, rear and whole-vehicle mass for one hitch state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct AxleSet {
    pub front: Option<f64>,
    pub rear: Option<f64>,
    pub gvm: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct TrailerMasses {
    pub tow_ball_mass: Option<f64>,
    pub gross_trailer_mass: Option<f64>,
    pub aggregate_trailer_mass: Option<f64>,
}

pub(crate) fn first_known<const N: usize>(candidates: [Option<f64>; N]) -> Option<f64> {
    candidates.into_iter().flatten().next()
}

pub(crate) fn add(left: Option<f64>, right: Option<f64>) -> Option<f64> {
    Some(left? + right?)
}

pub(crate) fn difference(total: Option<f64>, part: Option<f64>) -> Option<f64> {
    Some(total? - part?)
}

/// `front + rear = GVM`. Two known axles always define GVM; otherwise the missing axle is
/// taken from the total.
pub(crate) fn axle_set(front: Option<f64>, rear: Option<f64>, gvm: Option<f64>) -> AxleSet {
    let gvm = first_known([add(front, rear), gvm]);
    AxleSet {
        front: first_known([front, difference(gvm, rear)]),
        rear: first_known([rear, difference(gvm, front)]),
        gvm,
    }
}

/// Hitched whole-vehicle total when the axles cannot provide it:
/// 1. total supplied by the method (scale display or platform sum),
/// 2. portable scales only: unhitched GVM plus the tow-ball scale reading.
pub(crate) fn hitched_gvm_total(
    method: MeasurementMethod,
    readings: &NormalizedReadingSet,
    gvm_unhitched: Option<f64>,
) -> Option<f64> {
    let estimate = match method {
        MeasurementMethod::PortableScalesIndividualTyre => {
            add(gvm_unhitched, readings.tow_ball_mass_override)
        }
        MeasurementMethod::WeighbridgeInGroundAxle
        | MeasurementMethod::WeighbridgeGoWeigh
        | MeasurementMethod::WeighbridgeAboveGroundSingleCell => None,
    };

    first_known([readings.gvm_hitched, estimate])
}

/// Tow-ball mass:
/// 1. explicit override,
/// 2. WDH release total minus unhitched GVM, when a weight distribution hitch is fitted,
/// 3. hitched GVM minus unhitched GVM.
pub(crate) fn tow_ball_mass(
    readings: &NormalizedReadingSet,
    gvm_hitched: Option<f64>,
    gvm_unhitched: Option<f64>,
) -> Option<f64> {
    let released = if readings.uses_weight_distribution_hitch {
        difference(readings.gvm_hitched_wdh_release, gvm_unhitched)
    } else {
        None
    };

    first_known([
        readings.tow_ball_mass_override,
        released,
        difference(gvm_hitched, gvm_unhitched),
    ])
}

/// `GTM + TBM = ATM`, preferring supplied totals and deriving whichever one is missing.
pub(crate) fn trailer_masses(
    atm_supplied: Option<f64>,
    gtm_supplied: Option<f64>,
    tow_ball_mass: Option<f64>,
) -> TrailerMasses {
    let tow_ball_mass = first_known([tow_ball_mass, difference(atm_supplied, gtm_supplied)]);
    let gross_trailer_mass = first_known([gtm_supplied, difference(atm_supplied, tow_ball_mass)]);
    let aggregate_trailer_mass =
        first_known([atm_supplied, add(gross_trailer_mass, tow_ball_mass)]);

    TrailerMasses {
        tow_ball_mass,
        gross_trailer_mass,
        aggregate_trailer_mass,
    }
}

/// `GTM + GVM(hitched) = GCM`, ordered by the configured policy.
pub(crate) fn combination_mass(
    policy: GcmPolicy,
    gross_trailer_mass: Option<f64>,
    gvm_hitched: Option<f64>,
    gcm_supplied: Option<f64>,
) -> Option<f64> {
    let derived = add(gross_trailer_mass, gvm_hitched);
    match policy {
        GcmPolicy::PreferDerived => first_known([derived, gcm_supplied]),
        GcmPolicy::PreferSupplied => first_known([gcm_supplied, derived]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axle_sums_outrank_a_supplied_total() {
        let set = axle_set(Some(1_100.0), Some(1_450.0), Some(2_600.0));
        assert_eq!(set.gvm, Some(2_550.0));
    }

    #[test]
    fn missing_axle_comes_from_total() {
        let set = axle_set(Some(1_000.0), None, Some(2_500.0));
        assert_eq!(set.rear, Some(1_500.0));

        let set = axle_set(None, Some(1_300.0), Some(2_500.0));
        assert_eq!(set.front, Some(1_200.0));
    }

    #[test]
    fn single_axle_without_total_stays_unknown() {
        let set = axle_set(Some(1_000.0), None, None);
        assert_eq!(set.rear, None);
        assert_eq!(set.gvm, None);
    }

    #[test]
    fn portable_hitched_total_falls_back_to_tow_ball_estimate() {
        let readings = NormalizedReadingSet {
            tow_ball_mass_override: Some(210.0),
            ..NormalizedReadingSet::default()
        };

        assert_eq!(
            hitched_gvm_total(
                MeasurementMethod::PortableScalesIndividualTyre,
                &readings,
                Some(2_300.0)
            ),
            Some(2_510.0)
        );
        assert_eq!(
            hitched_gvm_total(MeasurementMethod::WeighbridgeGoWeigh, &readings, Some(2_300.0)),
            None
        );
    }

    #[test]
    fn supplied_hitched_total_beats_estimate() {
        let readings = NormalizedReadingSet {
            gvm_hitched: Some(2_540.0),
            tow_ball_mass_override: Some(210.0),
            ..NormalizedReadingSet::default()
        };

        assert_eq!(
            hitched_gvm_total(
                MeasurementMethod::PortableScalesIndividualTyre,
                &readings,
                Some(2_300.0)
            ),
            Some(2_540.0)
        );
    }

    #[test]
    fn tow_ball_prefers_override_then_release_then_difference() {
        let mut readings = NormalizedReadingSet {
            gvm_hitched_wdh_release: Some(2_500.0),
            uses_weight_distribution_hitch: true,
            tow_ball_mass_override: Some(260.0),
            ..NormalizedReadingSet::default()
        };
        assert_eq!(
            tow_ball_mass(&readings, Some(2_750.0), Some(2_200.0)),
            Some(260.0)
        );

        readings.tow_ball_mass_override = None;
        assert_eq!(
            tow_ball_mass(&readings, Some(2_750.0), Some(2_200.0)),
            Some(300.0)
        );

        readings.uses_weight_distribution_hitch = false;
        assert_eq!(
            tow_ball_mass(&readings, Some(2_750.0), Some(2_200.0)),
            Some(550.0)
        );
    }

    #[test]
    fn release_reading_is_ignored_without_a_hitch() {
        let readings = NormalizedReadingSet {
            gvm_hitched_wdh_release: Some(2_500.0),
            ..NormalizedReadingSet::default()
        };
        assert_eq!(tow_ball_mass(&readings, None, Some(2_200.0)), None);
    }

    #[test]
    fn trailer_identity_holds_for_any_two_inputs() {
        let from_atm_gtm = trailer_masses(Some(2_400.0), Some(2_170.0), None);
        let from_gtm_tbm = trailer_masses(None, Some(2_170.0), Some(230.0));
        let from_atm_tbm = trailer_masses(Some(2_400.0), None, Some(230.0));

        for masses in [from_atm_gtm, from_gtm_tbm, from_atm_tbm] {
            assert_eq!(masses.aggregate_trailer_mass, Some(2_400.0));
            assert_eq!(masses.gross_trailer_mass, Some(2_170.0));
            assert_eq!(masses.tow_ball_mass, Some(230.0));
        }
    }

    #[test]
    fn combination_policy_orders_sources() {
        let derived = combination_mass(
            GcmPolicy::PreferDerived,
            Some(1_900.0),
            Some(2_750.0),
            Some(4_700.0),
        );
        let supplied = combination_mass(
            GcmPolicy::PreferSupplied,
            Some(1_900.0),
            Some(2_750.0),
            Some(4_700.0),
        );
        assert_eq!(derived, Some(4_650.0));
        assert_eq!(supplied, Some(4_700.0));

        let fallback =
            combination_mass(GcmPolicy::PreferDerived, None, Some(2_750.0), Some(4_700.0));
        assert_eq!(fallback, Some(4_700.0));
    }
}
