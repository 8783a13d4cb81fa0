use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::correlations::{VB_FVF_API_SPLIT, WATER_DENSITY_LB_FT3, percent_deviation};
use crate::error::AppError;
use crate::models::{Conditions, SweepOptions};
use crate::pvt::selection::Correlation;
use crate::pvt::series::{BubblePointBoundary, CorrelationResult, PressureSeries, Quantity, RsTable};

/// Saturated (p <= Pb) oil formation volume factor correlations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum SaturatedFvf {
    Standing,
    VasquezBeggs,
    Glaso,
    Marhoun,
    PetroskyFarshad,
    MaterialBalance,
}

impl Correlation for SaturatedFvf {
    const ALL: &'static [Self] = &[
        SaturatedFvf::Standing,
        SaturatedFvf::VasquezBeggs,
        SaturatedFvf::Glaso,
        SaturatedFvf::Marhoun,
        SaturatedFvf::PetroskyFarshad,
        SaturatedFvf::MaterialBalance,
    ];

    fn name(self) -> &'static str {
        match self {
            SaturatedFvf::Standing => "Standing",
            SaturatedFvf::VasquezBeggs => "Vasquez-Beggs",
            SaturatedFvf::Glaso => "Glaso",
            SaturatedFvf::Marhoun => "Marhoun",
            SaturatedFvf::PetroskyFarshad => "Petrosky-Farshad",
            SaturatedFvf::MaterialBalance => "Material Balance",
        }
    }
}

/// Undersaturated (p > Pb) formation volume factor correlations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum UndersaturatedFvf {
    VasquezBeggs,
    PetroskyFarshad,
}

impl Correlation for UndersaturatedFvf {
    const ALL: &'static [Self] = &[
        UndersaturatedFvf::VasquezBeggs,
        UndersaturatedFvf::PetroskyFarshad,
    ];

    fn name(self) -> &'static str {
        match self {
            UndersaturatedFvf::VasquezBeggs => "Vasquez-Beggs",
            UndersaturatedFvf::PetroskyFarshad => "Petrosky-Farshad",
        }
    }
}

fn vasquez_beggs_fvf_coefficients(api: f64) -> (f64, f64, f64) {
    if api <= VB_FVF_API_SPLIT {
        (4.677e-4, 1.751e-5, -1.811e-8)
    } else {
        (4.670e-4, 1.100e-5, 1.337e-9)
    }
}

/// Oil formation volume factor (rb/STB) of saturated oil holding `rs` scf/STB.
pub fn saturated_fvf(cond: &Conditions, correlation: SaturatedFvf, rs: f64) -> f64 {
    let (yg, yo, t) = (cond.gas_gravity, cond.oil_gravity, cond.temp_f);
    match correlation {
        SaturatedFvf::Standing => 0.9759 + 0.000120 * (rs * (yg / yo).sqrt() + 1.25 * t).powf(1.2),
        SaturatedFvf::VasquezBeggs => {
            let (c1, c2, c3) = vasquez_beggs_fvf_coefficients(cond.api);
            1.0 + c1 * rs + (t - 60.0) * (cond.api / cond.separator_gas_gravity) * (c2 + c3 * rs)
        }
        SaturatedFvf::Glaso => {
            let b_star = rs * (yg / yo).powf(0.526) + 0.968 * t;
            let log_b = b_star.log10();
            let a = -6.58511 + 2.91329 * log_b - 0.27683 * log_b * log_b;
            1.0 + 10f64.powf(a)
        }
        SaturatedFvf::Marhoun => {
            let f = rs.powf(0.742390) * yg.powf(0.323294) * yo.powf(-1.202040);
            0.497069 + 0.862963e-3 * cond.temp_r + 0.182594e-2 * f + 0.318099e-5 * f * f
        }
        SaturatedFvf::PetroskyFarshad => {
            1.0113
                + 7.2046e-5
                    * (rs.powf(0.3738) * (yg.powf(0.2914) / yo.powf(0.6265))
                        + 0.24626 * t.powf(0.5371))
                    .powf(3.0936)
        }
        SaturatedFvf::MaterialBalance => {
            (WATER_DENSITY_LB_FT3 * yo + 0.0136 * rs * yg) / cond.oil_density
        }
    }
}

/// Vasquez-Beggs numerator `-1433 + 5 Rsb + 17.2 T - 1180 γgs + 12.61 API`.
fn vasquez_beggs_compressibility_term(cond: &Conditions, rsb: f64) -> f64 {
    -1433.0 + 5.0 * rsb + 17.2 * cond.temp_f - 1180.0 * cond.separator_gas_gravity
        + 12.61 * cond.api
}

fn petrosky_compressibility_term(cond: &Conditions, rsb: f64) -> f64 {
    rsb.powf(0.69357)
        * cond.gas_gravity.powf(0.1885)
        * cond.api.powf(0.3272)
        * cond.temp_f.powf(0.6729)
}

/// Formation volume factor above the bubble point, `Bob * exp(-A f(p, Pb))`.
pub fn undersaturated_fvf(
    cond: &Conditions,
    correlation: UndersaturatedFvf,
    bob: f64,
    rsb: f64,
    pressure: f64,
) -> f64 {
    let pb = cond.bubble_point_pressure;
    match correlation {
        UndersaturatedFvf::VasquezBeggs => {
            let a = 1e-5 * vasquez_beggs_compressibility_term(cond, rsb);
            bob * (-a * (pressure / pb).ln()).exp()
        }
        UndersaturatedFvf::PetroskyFarshad => {
            let a = 4.1646e-7 * petrosky_compressibility_term(cond, rsb);
            bob * (-a * (pressure.powf(0.4094) - pb.powf(0.4094))).exp()
        }
    }
}

/// Isothermal oil compressibility (1/psi) above the bubble point.
pub fn oil_compressibility(
    cond: &Conditions,
    correlation: UndersaturatedFvf,
    rsb: f64,
    pressure: f64,
) -> f64 {
    match correlation {
        UndersaturatedFvf::VasquezBeggs => {
            vasquez_beggs_compressibility_term(cond, rsb) / (1e5 * pressure)
        }
        UndersaturatedFvf::PetroskyFarshad => {
            1.705e-7 * petrosky_compressibility_term(cond, rsb) * pressure.powf(-0.5906)
        }
    }
}

fn above_bubble_point_sweep(cond: &Conditions, opts: &SweepOptions) -> Result<PressureSeries, AppError> {
    PressureSeries::sweep(cond.bubble_point_pressure, cond.reservoir_pressure, opts.step_psi)
}

/// Bo for every uploaded row at or below the bubble point.
///
/// The last row is the bubble-point Bo boundary.
pub fn fvf_below_bubble_point(
    cond: &Conditions,
    correlation: SaturatedFvf,
    table: &RsTable,
) -> Result<CorrelationResult, AppError> {
    let rows = table.at_or_below(cond.bubble_point_pressure)?;
    debug!(
        "Bo below Pb ({}) for {} of {} rows",
        correlation.name(),
        rows.len(),
        table.len()
    );
    let values = rows
        .rs()
        .iter()
        .map(|&rs| saturated_fvf(cond, correlation, rs))
        .collect();
    Ok(CorrelationResult::new(
        correlation.name(),
        Quantity::Pressure,
        Quantity::FormationVolumeFactor,
        rows.pressure().to_vec(),
        values,
    ))
}

/// Bo over `[Pb, reservoir pressure)` from the bubble-point Bo and Rs.
pub fn fvf_above_bubble_point(
    cond: &Conditions,
    correlation: UndersaturatedFvf,
    boundary: &BubblePointBoundary,
    opts: &SweepOptions,
) -> Result<CorrelationResult, AppError> {
    let bob = boundary.require_bo()?;
    let rsb = boundary.require_rs()?;
    let pressures = above_bubble_point_sweep(cond, opts)?;
    debug!(
        "Bo above Pb ({}) over {} pressures from Bob = {bob}",
        correlation.name(),
        pressures.len()
    );
    let values = pressures
        .values()
        .iter()
        .map(|&p| undersaturated_fvf(cond, correlation, bob, rsb, p))
        .collect();
    Ok(CorrelationResult::new(
        correlation.name(),
        Quantity::Pressure,
        Quantity::FormationVolumeFactor,
        pressures.into_inner(),
        values,
    ))
}

/// Oil compressibility over `[Pb, reservoir pressure)`.
pub fn compressibility_above_bubble_point(
    cond: &Conditions,
    correlation: UndersaturatedFvf,
    boundary: &BubblePointBoundary,
    opts: &SweepOptions,
) -> Result<CorrelationResult, AppError> {
    let rsb = boundary.require_rs()?;
    let pressures = above_bubble_point_sweep(cond, opts)?;
    let values = pressures
        .values()
        .iter()
        .map(|&p| oil_compressibility(cond, correlation, rsb, p))
        .collect();
    Ok(CorrelationResult::new(
        correlation.name(),
        Quantity::Pressure,
        Quantity::Compressibility,
        pressures.into_inner(),
        values,
    ))
}

/// Every Bo series of one run: below, boundary, above and the joined range.
#[derive(Serialize, Debug, Clone)]
pub struct FvfSummary {
    pub saturated: &'static str,
    pub undersaturated: &'static str,
    pub boundary: BubblePointBoundary,
    pub below: Option<CorrelationResult>,
    pub above: CorrelationResult,
    pub compressibility: CorrelationResult,
    pub full_range: Option<CorrelationResult>,
    pub measured_bo_deviation_pct: Option<f64>,
}

/// Run the Bo calculator end to end.
///
/// With a table, the bubble-point Bo is the last row at or below Pb and the
/// joined full-range series is produced. Without one, Bo at Pb is evaluated
/// from the scalar `solution_gor` and no full-range series exists. The Rs
/// boundary is the explicit `rs_at_bubble_point` input, else the last table
/// row, else `solution_gor`.
pub fn fvf_summary(
    cond: &Conditions,
    saturated: SaturatedFvf,
    undersaturated: UndersaturatedFvf,
    table: Option<&RsTable>,
    opts: &SweepOptions,
) -> Result<FvfSummary, AppError> {
    let (below, bob, table_rsb) = match table {
        Some(t) => {
            let below = fvf_below_bubble_point(cond, saturated, t)?;
            let bob = below.last_value();
            let rsb = t.at_or_below(cond.bubble_point_pressure)?.rs().last().copied();
            (Some(below), bob, rsb)
        }
        None => {
            let bob = cond
                .solution_gor
                .map(|rs| saturated_fvf(cond, saturated, rs));
            (None, bob, None)
        }
    };
    let rsb = cond.rs_at_bubble_point.or(table_rsb).or(cond.solution_gor);

    let mut boundary = BubblePointBoundary::at(cond.bubble_point_pressure);
    boundary.bo = bob;
    boundary.rs = rsb;

    let above = fvf_above_bubble_point(cond, undersaturated, &boundary, opts)?;
    let compressibility = compressibility_above_bubble_point(cond, undersaturated, &boundary, opts)?;
    let full_range = below
        .as_ref()
        .map(|b| CorrelationResult::concat(b, &above))
        .transpose()?;
    let measured_bo_deviation_pct = match (boundary.bo, cond.measured_bo) {
        (Some(bo), Some(measured)) => Some(percent_deviation(bo, measured)),
        _ => None,
    };
    info!(
        "Bo: {} below / {} above, Bob = {:?}",
        saturated.name(),
        undersaturated.name(),
        boundary.bo
    );

    Ok(FvfSummary {
        saturated: saturated.name(),
        undersaturated: undersaturated.name(),
        boundary,
        below,
        above,
        compressibility,
        full_range,
        measured_bo_deviation_pct,
    })
}
