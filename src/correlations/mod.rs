//! Correlations module: unit constants and helpers shared by the black-oil correlations.
//!
//! This module provides:
//! - Field-unit offsets (psig -> psia, °F -> °R) applied once when inputs are normalized
//! - Stock-tank oil specific gravity from API gravity
//! - Vasquez-Beggs separator correction of the gas gravity to the 100 psig reference
//! - The API split points used by the Vasquez-Beggs coefficient tables
//! - Default bounds for the synthesized pressure sweep
//!
//! Units conventions:
//! - Pressures are psia inside the calculators; gauge values only exist in `ReservoirInputs`
//! - Temperatures are carried both in °F and °R since the published correlations mix them
//! - Gas solubility is scf/STB, formation volume factor rb/STB, viscosity cp
//!
//! # Examples
//! ```rust
//! use pvt_rs::correlations::{oil_specific_gravity, separator_gas_gravity};
//!
//! let yo = oil_specific_gravity(47.1);
//! assert!((yo - 0.7918).abs() < 1e-4);
//! let ygs = separator_gas_gravity(0.851, 47.1, 60.0, 164.7);
//! assert!(ygs > 0.851);
//! ```
//!
//! # Panics
//! None of the functions panic; ranges are enforced by `ReservoirInputs::normalized`.

/// Offset between gauge and absolute pressure (psi).
pub const ATMOSPHERIC_PSI: f64 = 14.7;
/// Offset between degrees Fahrenheit and degrees Rankine.
pub const RANKINE_OFFSET: f64 = 460.0;

/// Reference separator pressure of the Vasquez-Beggs gas gravity correction (psia).
pub const VB_REFERENCE_SEPARATOR_PSIA: f64 = 114.7;
/// Vasquez-Beggs solubility / bubble-point tables switch at this API gravity (exclusive).
pub const VB_SOLUBILITY_API_SPLIT: f64 = 30.0;
/// Vasquez-Beggs formation volume factor table switches above this API gravity (inclusive).
pub const VB_FVF_API_SPLIT: f64 = 30.0;

/// Lower bound of the synthesized solubility sweep (psia).
pub const SWEEP_START_PSIA: f64 = 500.0;
/// Default pressure increment of every synthesized sweep (psi).
pub const SWEEP_STEP_PSI: f64 = 1.0;
/// Upper bound on the number of points in one synthesized sweep.
pub const MAX_SWEEP_POINTS: usize = 100_000;

/// Density of water at standard conditions (lb/ft³), used by the material-balance Bo.
pub const WATER_DENSITY_LB_FT3: f64 = 62.4;

/// Stock-tank oil specific gravity (water = 1) from API gravity.
pub fn oil_specific_gravity(api: f64) -> f64 {
    141.5 / (131.5 + api)
}

/// Gas gravity corrected to the 100 psig reference separator (Vasquez-Beggs).
///
/// `separator_temp_f` is in °F and `separator_pressure_psia` is absolute.
pub fn separator_gas_gravity(
    gas_gravity: f64,
    api: f64,
    separator_temp_f: f64,
    separator_pressure_psia: f64,
) -> f64 {
    gas_gravity
        * (1.0
            + 5.912e-5
                * api
                * separator_temp_f
                * (separator_pressure_psia / VB_REFERENCE_SEPARATOR_PSIA).log10())
}

/// Percent deviation of `computed` from `measured`.
pub fn percent_deviation(computed: f64, measured: f64) -> f64 {
    (computed - measured) / measured * 100.0
}
