//! Oil viscosity in three cascaded stages: dead oil, saturated oil at or
//! below the bubble point, and undersaturated oil above it.
//!
//! Each stage consumes the previous one's output: `uod` feeds the saturated
//! correlations, and the bubble-point viscosity `uob` anchors the
//! Vasquez-Beggs undersaturated power law. All temperatures are °F.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{Conditions, SweepOptions};
use crate::pvt::selection::Correlation;
use crate::pvt::series::{BubblePointBoundary, CorrelationResult, PressureSeries, Quantity, RsTable};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum DeadOilViscosity {
    Beal,
    BeggsRobinson,
    Glaso,
}

impl Correlation for DeadOilViscosity {
    const ALL: &'static [Self] = &[
        DeadOilViscosity::Beal,
        DeadOilViscosity::BeggsRobinson,
        DeadOilViscosity::Glaso,
    ];

    fn name(self) -> &'static str {
        match self {
            DeadOilViscosity::Beal => "Beal",
            DeadOilViscosity::BeggsRobinson => "Beggs-Robinson",
            DeadOilViscosity::Glaso => "Glaso",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum SaturatedViscosity {
    ChewConnally,
    BeggsRobinson,
}

impl Correlation for SaturatedViscosity {
    const ALL: &'static [Self] = &[
        SaturatedViscosity::ChewConnally,
        SaturatedViscosity::BeggsRobinson,
    ];

    fn name(self) -> &'static str {
        match self {
            SaturatedViscosity::ChewConnally => "Chew-Connally",
            SaturatedViscosity::BeggsRobinson => "Beggs-Robinson",
        }
    }
}

/// Gas-free oil viscosity (cp) at reservoir temperature.
pub fn dead_oil_viscosity(cond: &Conditions, correlation: DeadOilViscosity) -> f64 {
    let (api, t) = (cond.api, cond.temp_f);
    match correlation {
        DeadOilViscosity::Beal => {
            let a = 10f64.powf(0.43 + 8.33 / api);
            (0.32 + 1.8e7 / api.powf(4.53)) * (360.0 / (t + 200.0)).powf(a)
        }
        DeadOilViscosity::BeggsRobinson => {
            let y = 10f64.powf(3.0324 - 0.02023 * api);
            let x = y * t.powf(-1.163);
            10f64.powf(x) - 1.0
        }
        DeadOilViscosity::Glaso => {
            let a = 10.313 * t.log10() - 36.447;
            3.141e10 * t.powf(-3.444) * api.log10().powf(a)
        }
    }
}

/// Saturated oil viscosity `uob = 10^a * uod^b`, with `a` and `b` functions of `rs`.
pub fn saturated_viscosity(correlation: SaturatedViscosity, uod: f64, rs: f64) -> f64 {
    match correlation {
        SaturatedViscosity::ChewConnally => {
            let b = 0.68 / 10f64.powf(8.62e-5 * rs)
                + 0.25 / 10f64.powf(1.1e-3 * rs)
                + 0.062 / 10f64.powf(3.74e-3 * rs);
            let a = rs * (2.2e-7 * rs - 7.4e-4);
            10f64.powf(a) * uod.powf(b)
        }
        SaturatedViscosity::BeggsRobinson => {
            let a = 10.715 * (rs + 100.0).powf(-0.515);
            let b = 5.44 * (rs + 150.0).powf(-0.338);
            a * uod.powf(b)
        }
    }
}

/// Vasquez-Beggs undersaturated viscosity `uob * (p / Pb)^m`.
pub fn undersaturated_viscosity(uob: f64, pressure: f64, bubble_point: f64) -> f64 {
    let a = -3.9e-5 * pressure - 5.0;
    let m = 2.6 * pressure.powf(1.187) * 10f64.powf(a);
    uob * (pressure / bubble_point).powf(m)
}

/// Saturated viscosity for every uploaded row at or below the bubble point.
pub fn viscosity_below_bubble_point(
    cond: &Conditions,
    correlation: SaturatedViscosity,
    uod: f64,
    table: &RsTable,
) -> Result<CorrelationResult, AppError> {
    let rows = table.at_or_below(cond.bubble_point_pressure)?;
    debug!(
        "uob ({}) for {} rows from uod = {uod}",
        correlation.name(),
        rows.len()
    );
    let values = rows
        .rs()
        .iter()
        .map(|&rs| saturated_viscosity(correlation, uod, rs))
        .collect();
    Ok(CorrelationResult::new(
        correlation.name(),
        Quantity::Pressure,
        Quantity::Viscosity,
        rows.pressure().to_vec(),
        values,
    ))
}

/// Undersaturated viscosity over `[Pb, reservoir pressure)`.
pub fn viscosity_above_bubble_point(
    cond: &Conditions,
    boundary: &BubblePointBoundary,
    opts: &SweepOptions,
) -> Result<CorrelationResult, AppError> {
    let uob = boundary.require_viscosity()?;
    let pb = cond.bubble_point_pressure;
    let pressures = PressureSeries::sweep(pb, cond.reservoir_pressure, opts.step_psi)?;
    let values = pressures
        .values()
        .iter()
        .map(|&p| undersaturated_viscosity(uob, p, pb))
        .collect();
    Ok(CorrelationResult::new(
        "Vasquez-Beggs",
        Quantity::Pressure,
        Quantity::Viscosity,
        pressures.into_inner(),
        values,
    ))
}

#[derive(Serialize, Debug, Clone)]
pub struct ViscositySummary {
    pub dead_oil: &'static str,
    pub saturated: &'static str,
    pub dead_oil_viscosity: f64,
    pub boundary: BubblePointBoundary,
    pub below: Option<CorrelationResult>,
    pub above: CorrelationResult,
    pub full_range: Option<CorrelationResult>,
}

/// Run the three viscosity stages end to end.
///
/// Without a table the bubble-point viscosity comes from the scalar
/// `solution_gor`, mirroring the Bo calculator.
pub fn viscosity_summary(
    cond: &Conditions,
    dead: DeadOilViscosity,
    saturated: SaturatedViscosity,
    table: Option<&RsTable>,
    opts: &SweepOptions,
) -> Result<ViscositySummary, AppError> {
    let uod = dead_oil_viscosity(cond, dead);
    let (below, uob) = match table {
        Some(t) => {
            let below = viscosity_below_bubble_point(cond, saturated, uod, t)?;
            let uob = below.last_value();
            (Some(below), uob)
        }
        None => (
            None,
            cond.solution_gor
                .map(|rs| saturated_viscosity(saturated, uod, rs)),
        ),
    };

    let mut boundary = BubblePointBoundary::at(cond.bubble_point_pressure);
    boundary.viscosity = uob;

    let above = viscosity_above_bubble_point(cond, &boundary, opts)?;
    let full_range = below
        .as_ref()
        .map(|b| CorrelationResult::concat(b, &above))
        .transpose()?;
    info!(
        "uo: uod = {uod:.4} cp ({}), uob = {:?} cp ({})",
        dead.name(),
        boundary.viscosity,
        saturated.name()
    );

    Ok(ViscositySummary {
        dead_oil: dead.name(),
        saturated: saturated.name(),
        dead_oil_viscosity: uod,
        boundary,
        below,
        above,
        full_range,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReservoirInputs;
    use approx::assert_relative_eq;

    fn cond() -> Conditions {
        ReservoirInputs {
            reservoir_pressure_psia: 5000.0,
            ..Default::default()
        }
        .normalized()
        .unwrap()
    }

    #[test]
    fn dead_oil_viscosities_are_light_oil_values() {
        let c = cond();
        for corr in DeadOilViscosity::ALL {
            let uod = dead_oil_viscosity(&c, *corr);
            assert!(uod > 0.1 && uod < 2.0, "{} uod = {uod}", corr.name());
        }
    }

    #[test]
    fn dissolved_gas_thins_the_oil() {
        let uod = dead_oil_viscosity(&cond(), DeadOilViscosity::BeggsRobinson);
        for corr in SaturatedViscosity::ALL {
            let uob = saturated_viscosity(*corr, uod, 751.0);
            assert!(uob < uod, "{} uob {uob} >= uod {uod}", corr.name());
            assert_relative_eq!(saturated_viscosity(*corr, uod, 0.0), uod, max_relative = 0.02);
        }
    }

    #[test]
    fn undersaturated_equals_uob_at_bubble_point() {
        assert_relative_eq!(undersaturated_viscosity(0.35, 2391.7, 2391.7), 0.35);
    }

    #[test]
    fn above_without_uob_is_missing_prerequisite() {
        let c = cond();
        let boundary = BubblePointBoundary::at(c.bubble_point_pressure);
        assert!(matches!(
            viscosity_above_bubble_point(&c, &boundary, &SweepOptions::default()),
            Err(AppError::MissingPrerequisite { .. })
        ));
    }

    #[test]
    fn scalar_mode_has_no_full_range() {
        let c = Conditions {
            solution_gor: Some(751.0),
            ..cond()
        };
        let s = viscosity_summary(
            &c,
            DeadOilViscosity::Beal,
            SaturatedViscosity::ChewConnally,
            None,
            &SweepOptions::default(),
        )
        .unwrap();
        assert!(s.below.is_none() && s.full_range.is_none());
        assert_eq!(s.above.values.first().copied(), s.boundary.viscosity);
    }
}
