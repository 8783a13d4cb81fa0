use serde::{Deserialize, Serialize};

use crate::correlations::{
    ATMOSPHERIC_PSI, RANKINE_OFFSET, SWEEP_START_PSIA, SWEEP_STEP_PSI, oil_specific_gravity,
    separator_gas_gravity,
};
use crate::error::AppError;

/// Reservoir and separator properties exactly as entered (field units, gauge pressures).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservoirInputs {
    pub api: f64,
    pub gas_gravity: f64,
    pub reservoir_pressure_psia: f64,
    pub reservoir_temp_f: f64,
    pub bubble_point_psig: f64,
    pub separator_pressure_psig: f64,
    pub separator_temp_f: f64,
    pub oil_density_lb_ft3: f64,
    pub solution_gor: Option<f64>,
    pub rs_at_bubble_point: Option<f64>,
    pub measured_bo: Option<f64>,
}

impl Default for ReservoirInputs {
    fn default() -> Self {
        Self {
            api: 47.1,
            gas_gravity: 0.851,
            reservoir_pressure_psia: 8000.0,
            reservoir_temp_f: 250.0,
            bubble_point_psig: 2377.0,
            separator_pressure_psig: 150.0,
            separator_temp_f: 60.0,
            oil_density_lb_ft3: 38.13,
            solution_gor: None,
            rs_at_bubble_point: None,
            measured_bo: None,
        }
    }
}

/// Normalized, validated conditions shared by every calculator.
///
/// Built once by [`ReservoirInputs::normalized`]; pressures are absolute and
/// the reservoir temperature is available in both °F and °R.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Conditions {
    pub api: f64,
    pub gas_gravity: f64,
    /// Stock-tank oil specific gravity (water = 1).
    pub oil_gravity: f64,
    /// Gas gravity corrected to the 100 psig reference separator.
    pub separator_gas_gravity: f64,
    pub reservoir_pressure: f64,
    pub bubble_point_pressure: f64,
    pub separator_pressure: f64,
    pub separator_temp_f: f64,
    pub temp_f: f64,
    pub temp_r: f64,
    pub oil_density: f64,
    pub solution_gor: Option<f64>,
    pub rs_at_bubble_point: Option<f64>,
    pub measured_bo: Option<f64>,
}

fn check_range(
    what: &'static str,
    value: f64,
    min: f64,
    max: f64,
    expected: &'static str,
) -> Result<f64, AppError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(AppError::InvalidInput {
            what,
            value,
            expected,
        })
    }
}

fn check_positive(what: &'static str, value: f64) -> Result<f64, AppError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(AppError::InvalidInput {
            what,
            value,
            expected: "a positive number",
        })
    }
}

fn check_optional(
    what: &'static str,
    value: Option<f64>,
    allow_zero: bool,
) -> Result<Option<f64>, AppError> {
    match value {
        Some(v) if v.is_finite() && (v > 0.0 || (allow_zero && v == 0.0)) => Ok(Some(v)),
        Some(v) => Err(AppError::InvalidInput {
            what,
            value: v,
            expected: if allow_zero {
                "a non-negative number"
            } else {
                "a positive number"
            },
        }),
        None => Ok(None),
    }
}

impl ReservoirInputs {
    /// Validate ranges and convert to absolute pressures and Rankine once.
    pub fn normalized(&self) -> Result<Conditions, AppError> {
        let api = check_range("API gravity", self.api, 10.0, 60.0, "10..=60 °API")?;
        let gas_gravity = check_range("gas specific gravity", self.gas_gravity, 0.0, 1.0, "0..=1")?;
        if gas_gravity == 0.0 {
            return Err(AppError::InvalidInput {
                what: "gas specific gravity",
                value: gas_gravity,
                expected: "greater than zero",
            });
        }
        let reservoir_pressure = check_range(
            "reservoir pressure",
            self.reservoir_pressure_psia,
            500.0,
            12_000.0,
            "500..=12000 psia",
        )?;
        let temp_f = check_range(
            "reservoir temperature",
            self.reservoir_temp_f,
            50.0,
            400.0,
            "50..=400 °F",
        )?;
        let bubble_point_psig = check_range(
            "bubble point pressure",
            self.bubble_point_psig,
            100.0,
            10_000.0,
            "100..=10000 psig",
        )?;
        let separator_pressure_psig = check_range(
            "separator pressure",
            self.separator_pressure_psig,
            14.0,
            1_000.0,
            "14..=1000 psig",
        )?;
        let separator_temp_f = check_range(
            "separator temperature",
            self.separator_temp_f,
            10.0,
            400.0,
            "10..=400 °F",
        )?;
        let oil_density = check_positive("oil density", self.oil_density_lb_ft3)?;
        let solution_gor = check_optional("solution gas-oil ratio", self.solution_gor, true)?;
        let rs_at_bubble_point =
            check_optional("Rs at bubble point", self.rs_at_bubble_point, true)?;
        let measured_bo = check_optional("measured Bo", self.measured_bo, false)?;

        let separator_pressure = separator_pressure_psig + ATMOSPHERIC_PSI;

        Ok(Conditions {
            api,
            gas_gravity,
            oil_gravity: oil_specific_gravity(api),
            separator_gas_gravity: separator_gas_gravity(
                gas_gravity,
                api,
                separator_temp_f,
                separator_pressure,
            ),
            reservoir_pressure,
            bubble_point_pressure: bubble_point_psig + ATMOSPHERIC_PSI,
            separator_pressure,
            separator_temp_f,
            temp_f,
            temp_r: temp_f + RANKINE_OFFSET,
            oil_density,
            solution_gor,
            rs_at_bubble_point,
            measured_bo,
        })
    }
}

/// Sweep synthesis settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepOptions {
    pub start_psia: f64,
    pub step_psi: f64,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            start_psia: SWEEP_START_PSIA,
            step_psi: SWEEP_STEP_PSI,
        }
    }
}

impl SweepOptions {
    /// Reject a non-positive start pressure or step before any sweep is built.
    pub fn validate(&self) -> Result<(), AppError> {
        check_positive("sweep start pressure", self.start_psia)?;
        check_positive("sweep step", self.step_psi)?;
        Ok(())
    }
}
