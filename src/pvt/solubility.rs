use log::debug;
use serde::{Deserialize, Serialize};

use crate::correlations::VB_SOLUBILITY_API_SPLIT;
use crate::error::AppError;
use crate::models::{Conditions, SweepOptions};
use crate::pvt::selection::Correlation;
use crate::pvt::series::{CorrelationResult, PressureSeries, Quantity};

/// Gas solubility correlations. The bubble-point calculator uses their inverses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum RsCorrelation {
    Standing,
    VasquezBeggs,
    Marhoun,
    PetroskyFarshad,
}

impl Correlation for RsCorrelation {
    const ALL: &'static [Self] = &[
        RsCorrelation::Standing,
        RsCorrelation::VasquezBeggs,
        RsCorrelation::Marhoun,
        RsCorrelation::PetroskyFarshad,
    ];

    fn name(self) -> &'static str {
        match self {
            RsCorrelation::Standing => "Standing",
            RsCorrelation::VasquezBeggs => "Vasquez-Beggs",
            RsCorrelation::Marhoun => "Marhoun",
            RsCorrelation::PetroskyFarshad => "Petrosky-Farshad",
        }
    }
}

/// Marhoun (1988) solubility coefficients `a..e`.
pub(crate) const MARHOUN_RS: [f64; 5] = [185.843208, 1.877840, -3.1437, -1.32657, 1.398441];

/// Vasquez-Beggs `(C1, C2, C3)` for the solubility form; split at 30 °API.
pub(crate) fn vasquez_beggs_rs_coefficients(api: f64) -> (f64, f64, f64) {
    if api < VB_SOLUBILITY_API_SPLIT {
        (0.0362, 1.0937, 25.7240)
    } else {
        (0.0178, 1.1870, 23.931)
    }
}

/// Standing's temperature/API exponent `x = 0.0125 API - 0.00091 T(°F)`.
pub(crate) fn standing_exponent(cond: &Conditions) -> f64 {
    0.0125 * cond.api - 0.00091 * cond.temp_f
}

/// Petrosky-Farshad exponent `x = 7.916e-4 API^1.541 - 4.561e-5 T(°F)^1.3911`.
pub(crate) fn petrosky_exponent(cond: &Conditions) -> f64 {
    7.916e-4 * cond.api.powf(1.5410) - 4.561e-5 * cond.temp_f.powf(1.3911)
}

/// Gas solubility (scf/STB) at `pressure` (psia).
///
/// Above the bubble point no more gas can dissolve, so the formula is
/// evaluated at `Pb` for every `pressure >= Pb`.
pub fn solution_gor(cond: &Conditions, correlation: RsCorrelation, pressure: f64) -> f64 {
    let p = pressure.min(cond.bubble_point_pressure);
    match correlation {
        RsCorrelation::Standing => {
            let x = standing_exponent(cond);
            cond.gas_gravity * ((p / 18.2 + 1.4) * 10f64.powf(x)).powf(1.2048)
        }
        RsCorrelation::VasquezBeggs => {
            let (c1, c2, c3) = vasquez_beggs_rs_coefficients(cond.api);
            c1 * cond.separator_gas_gravity * p.powf(c2) * (c3 * cond.api / cond.temp_r).exp()
        }
        RsCorrelation::Marhoun => {
            let [a, b, c, d, e] = MARHOUN_RS;
            (a * cond.gas_gravity.powf(b)
                * cond.oil_gravity.powf(c)
                * cond.temp_r.powf(d)
                * p)
                .powf(e)
        }
        RsCorrelation::PetroskyFarshad => {
            let x = petrosky_exponent(cond);
            ((p / 112.727 + 12.340) * cond.gas_gravity.powf(0.8439) * 10f64.powf(x)).powf(1.73184)
        }
    }
}

/// Gas solubility at the bubble point, the Rs boundary for dependent calculators.
pub fn solution_gor_at_bubble_point(cond: &Conditions, correlation: RsCorrelation) -> f64 {
    solution_gor(cond, correlation, cond.bubble_point_pressure)
}

/// Rs over the synthesized sweep `[start, reservoir pressure)`.
pub fn solution_gor_sweep(
    cond: &Conditions,
    correlation: RsCorrelation,
    opts: &SweepOptions,
) -> Result<CorrelationResult, AppError> {
    opts.validate()?;
    let pressures =
        PressureSeries::sweep(opts.start_psia, cond.reservoir_pressure, opts.step_psi)?;
    debug!(
        "Rs sweep ({}) over {} pressures",
        correlation.name(),
        pressures.len()
    );
    let values = pressures
        .values()
        .iter()
        .map(|&p| solution_gor(cond, correlation, p))
        .collect();
    Ok(CorrelationResult::new(
        correlation.name(),
        Quantity::Pressure,
        Quantity::SolutionGor,
        pressures.into_inner(),
        values,
    ))
}

/// Rs at the bubble point for every correlation, in [`Correlation::ALL`] order.
pub fn bubble_point_comparison(cond: &Conditions) -> Vec<(&'static str, f64)> {
    RsCorrelation::ALL
        .iter()
        .map(|c| (c.name(), solution_gor_at_bubble_point(cond, *c)))
        .collect()
}

/// Rs sweep together with its bubble-point boundary.
#[derive(Serialize, Debug, Clone)]
pub struct SolubilitySummary {
    pub correlation: &'static str,
    pub bubble_point_pressure: f64,
    pub rs_at_bubble_point: f64,
    pub series: CorrelationResult,
}

pub fn solubility_summary(
    cond: &Conditions,
    correlation: RsCorrelation,
    opts: &SweepOptions,
) -> Result<SolubilitySummary, AppError> {
    Ok(SolubilitySummary {
        correlation: correlation.name(),
        bubble_point_pressure: cond.bubble_point_pressure,
        rs_at_bubble_point: solution_gor_at_bubble_point(cond, correlation),
        series: solution_gor_sweep(cond, correlation, opts)?,
    })
}
