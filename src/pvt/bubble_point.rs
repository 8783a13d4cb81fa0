use log::debug;

use crate::correlations::VB_SOLUBILITY_API_SPLIT;
use crate::models::Conditions;
use crate::pvt::selection::Correlation;
use crate::pvt::series::{CorrelationResult, Quantity, RsTable};
use crate::pvt::solubility::{RsCorrelation, petrosky_exponent};

/// Vasquez-Beggs `(C1, C2, C3)` for the bubble-point form; split at 30 °API.
fn vasquez_beggs_pb_coefficients(api: f64) -> (f64, f64, f64) {
    if api < VB_SOLUBILITY_API_SPLIT {
        (27.624, 0.914328, 11.172)
    } else {
        (56.18, 0.84246, 10.393)
    }
}

/// Bubble-point pressure (psia) of an oil holding `rs` scf/STB in solution.
///
/// Each variant is the published inverse of the matching solubility
/// correlation, so `bubble_point_pressure(c, k, solution_gor(c, k, Pb)) ≈ Pb`
/// up to the rounding of the published coefficients.
pub fn bubble_point_pressure(cond: &Conditions, correlation: RsCorrelation, rs: f64) -> f64 {
    match correlation {
        RsCorrelation::Standing => {
            let a = 0.00091 * cond.temp_f - 0.0125 * cond.api;
            18.2 * ((rs / cond.gas_gravity).powf(0.83) * 10f64.powf(a) - 1.4)
        }
        RsCorrelation::VasquezBeggs => {
            let (c1, c2, c3) = vasquez_beggs_pb_coefficients(cond.api);
            let a = -c3 * cond.api / cond.temp_r;
            ((c1 * rs / cond.separator_gas_gravity) * 10f64.powf(a)).powf(c2)
        }
        RsCorrelation::Marhoun => {
            5.38088e-3
                * rs.powf(0.715082)
                * cond.gas_gravity.powf(-1.87784)
                * cond.oil_gravity.powf(3.1437)
                * cond.temp_r.powf(1.32657)
        }
        RsCorrelation::PetroskyFarshad => {
            let x = petrosky_exponent(cond);
            112.727 * rs.powf(0.577421) / (cond.gas_gravity.powf(0.8439) * 10f64.powf(x))
                - 1391.051
        }
    }
}

/// Pb for every row of an uploaded table; the axis is the table's Rs column.
pub fn bubble_point_from_table(
    cond: &Conditions,
    correlation: RsCorrelation,
    table: &RsTable,
) -> CorrelationResult {
    debug!(
        "Pb ({}) for {} uploaded rows",
        correlation.name(),
        table.len()
    );
    let values = table
        .rs()
        .iter()
        .map(|&rs| bubble_point_pressure(cond, correlation, rs))
        .collect();
    CorrelationResult::new(
        correlation.name(),
        Quantity::SolutionGor,
        Quantity::BubblePointPressure,
        table.rs().to_vec(),
        values,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReservoirInputs;
    use crate::pvt::solubility::solution_gor_at_bubble_point;

    #[test]
    fn standing_inverse_recovers_bubble_point() {
        let cond = ReservoirInputs::default().normalized().unwrap();
        let rs = solution_gor_at_bubble_point(&cond, RsCorrelation::Standing);
        let pb = bubble_point_pressure(&cond, RsCorrelation::Standing, rs);
        let rel = (pb - cond.bubble_point_pressure).abs() / cond.bubble_point_pressure;
        assert!(rel < 1e-3, "Standing Pb {pb} vs {}", cond.bubble_point_pressure);
    }

    #[test]
    fn heavier_oil_uses_low_api_table() {
        let cond = ReservoirInputs {
            api: 22.0,
            ..Default::default()
        }
        .normalized()
        .unwrap();
        let rs = solution_gor_at_bubble_point(&cond, RsCorrelation::VasquezBeggs);
        let pb = bubble_point_pressure(&cond, RsCorrelation::VasquezBeggs, rs);
        let rel = (pb - cond.bubble_point_pressure).abs() / cond.bubble_point_pressure;
        assert!(rel < 1e-3, "Vasquez-Beggs Pb {pb}");
    }

    #[test]
    fn table_rows_map_one_to_one() {
        let cond = ReservoirInputs::default().normalized().unwrap();
        let table = RsTable::new(vec![800.0, 1600.0, 2391.7], vec![250.0, 520.0, 840.0]).unwrap();
        let out = bubble_point_from_table(&cond, RsCorrelation::Marhoun, &table);
        assert_eq!(out.len(), 3);
        assert_eq!(out.axis, Quantity::SolutionGor);
        assert_eq!(out.axis_values, vec![250.0, 520.0, 840.0]);
        assert!(out.values.windows(2).all(|w| w[1] > w[0]));
    }
}
