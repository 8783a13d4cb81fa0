use serde::Serialize;

use crate::correlations::MAX_SWEEP_POINTS;
use crate::error::AppError;

/// A physical quantity appearing as a column of a result or table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    Pressure,
    SolutionGor,
    BubblePointPressure,
    FormationVolumeFactor,
    Viscosity,
    Compressibility,
}

impl Quantity {
    pub const ALL: [Quantity; 6] = [
        Quantity::Pressure,
        Quantity::SolutionGor,
        Quantity::BubblePointPressure,
        Quantity::FormationVolumeFactor,
        Quantity::Viscosity,
        Quantity::Compressibility,
    ];

    /// Column label used for display and CSV export, e.g. `Bo(rb/STB)`.
    pub fn label(self) -> &'static str {
        match self {
            Quantity::Pressure => "Pressure(psia)",
            Quantity::SolutionGor => "Rs(scf/STB)",
            Quantity::BubblePointPressure => "Pb(psia)",
            Quantity::FormationVolumeFactor => "Bo(rb/STB)",
            Quantity::Viscosity => "uo(cp)",
            Quantity::Compressibility => "co(1/psi)",
        }
    }

    pub fn from_label(label: &str) -> Option<Quantity> {
        let label = label.trim();
        Quantity::ALL.into_iter().find(|q| q.label() == label)
    }
}

/// Ordered, non-decreasing pressures (psia).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PressureSeries(Vec<f64>);

impl PressureSeries {
    /// Pressures `start, start + step, ...` strictly below `end`.
    ///
    /// The length is `ceil((end - start) / step)`, zero when `end <= start`,
    /// and may not exceed [`MAX_SWEEP_POINTS`].
    pub fn sweep(start: f64, end: f64, step: f64) -> Result<Self, AppError> {
        if !(step.is_finite() && step > 0.0) {
            return Err(AppError::InvalidInput {
                what: "sweep step",
                value: step,
                expected: "a positive number",
            });
        }
        for (what, value) in [("sweep start", start), ("sweep end", end)] {
            if !value.is_finite() {
                return Err(AppError::InvalidInput {
                    what,
                    value,
                    expected: "a finite pressure",
                });
            }
        }
        let count = ((end - start) / step).ceil().max(0.0);
        if count > MAX_SWEEP_POINTS as f64 {
            return Err(AppError::InvalidInput {
                what: "sweep step",
                value: step,
                expected: "a step yielding at most 100000 points",
            });
        }
        let n = count as usize;
        Ok(Self((0..n).map(|i| start + i as f64 * step).collect()))
    }

    pub fn from_values(values: Vec<f64>) -> Result<Self, AppError> {
        if let Some(i) = values.windows(2).position(|w| w[1] < w[0]) {
            return Err(AppError::malformed(format!(
                "pressure decreases from {} to {} at row {}",
                values[i],
                values[i + 1],
                i + 2
            )));
        }
        Ok(Self(values))
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

/// Uploaded (pressure, Rs) pairs in their original row order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RsTable {
    pressure: PressureSeries,
    rs: Vec<f64>,
}

impl RsTable {
    pub fn new(pressure: Vec<f64>, rs: Vec<f64>) -> Result<Self, AppError> {
        if pressure.len() != rs.len() {
            return Err(AppError::malformed(format!(
                "{} pressures but {} Rs values",
                pressure.len(),
                rs.len()
            )));
        }
        if pressure.is_empty() {
            return Err(AppError::malformed("table has no data rows"));
        }
        // data rows start on line 2
        for (i, (&p, &r)) in pressure.iter().zip(&rs).enumerate() {
            if p <= 0.0 {
                return Err(AppError::malformed(format!(
                    "row {}: pressure {p} is not positive",
                    i + 2
                )));
            }
            if r < 0.0 {
                return Err(AppError::malformed(format!(
                    "row {}: Rs {r} is negative",
                    i + 2
                )));
            }
        }
        Ok(Self {
            pressure: PressureSeries::from_values(pressure)?,
            rs,
        })
    }

    pub fn pressure(&self) -> &[f64] {
        self.pressure.values()
    }

    pub fn rs(&self) -> &[f64] {
        &self.rs
    }

    pub fn len(&self) -> usize {
        self.rs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rs.is_empty()
    }

    /// Rows with pressure at or below `pb`; fails when none remain.
    pub fn at_or_below(&self, pb: f64) -> Result<RsTable, AppError> {
        let (pressure, rs): (Vec<f64>, Vec<f64>) = self
            .pressure()
            .iter()
            .zip(&self.rs)
            .filter(|(p, _)| **p <= pb)
            .map(|(p, r)| (*p, *r))
            .unzip();
        if pressure.is_empty() {
            return Err(AppError::malformed(format!(
                "no rows at or below the bubble point ({pb} psia)"
            )));
        }
        Ok(Self {
            pressure: PressureSeries(pressure),
            rs,
        })
    }
}

/// A computed property aligned 1:1 with its axis values.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CorrelationResult {
    pub correlation: String,
    pub axis: Quantity,
    pub property: Quantity,
    pub axis_values: Vec<f64>,
    pub values: Vec<f64>,
}

impl CorrelationResult {
    pub fn new(
        correlation: impl Into<String>,
        axis: Quantity,
        property: Quantity,
        axis_values: Vec<f64>,
        values: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(axis_values.len(), values.len());
        Self {
            correlation: correlation.into(),
            axis,
            property,
            axis_values,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.axis_values.iter().copied().zip(self.values.iter().copied())
    }

    pub fn last_value(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Value at the last sample whose axis value is `<= limit`.
    pub fn value_at_or_below(&self, limit: f64) -> Option<f64> {
        self.points()
            .take_while(|(x, _)| *x <= limit)
            .last()
            .map(|(_, v)| v)
    }

    /// Join a below-bubble-point series with the above-bubble-point one.
    pub fn concat(below: &CorrelationResult, above: &CorrelationResult) -> Result<Self, AppError> {
        if below.property != above.property || below.axis != above.axis {
            return Err(AppError::MismatchedSeries {
                below: below.property.label(),
                above: above.property.label(),
            });
        }
        if let (Some(&last), Some(&first)) = (below.axis_values.last(), above.axis_values.first()) {
            if first < last {
                return Err(AppError::InvalidInput {
                    what: "above-bubble-point series start",
                    value: first,
                    expected: "not below the end of the below-bubble-point series",
                });
            }
        }
        let mut axis_values = below.axis_values.clone();
        axis_values.extend_from_slice(&above.axis_values);
        let mut values = below.values.clone();
        values.extend_from_slice(&above.values);
        Ok(Self {
            correlation: format!("{} / {}", below.correlation, above.correlation),
            axis: below.axis,
            property: below.property,
            axis_values,
            values,
        })
    }
}

/// Values at the bubble point carried into the above-bubble-point formulas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct BubblePointBoundary {
    pub pressure: f64,
    pub rs: Option<f64>,
    pub bo: Option<f64>,
    pub viscosity: Option<f64>,
}

impl BubblePointBoundary {
    pub fn at(pressure: f64) -> Self {
        Self {
            pressure,
            ..Default::default()
        }
    }

    pub fn with_rs(mut self, rs: f64) -> Self {
        self.rs = Some(rs);
        self
    }

    pub fn with_bo(mut self, bo: f64) -> Self {
        self.bo = Some(bo);
        self
    }

    pub fn with_viscosity(mut self, viscosity: f64) -> Self {
        self.viscosity = Some(viscosity);
        self
    }

    pub fn require_rs(&self) -> Result<f64, AppError> {
        self.rs.ok_or(AppError::MissingPrerequisite {
            what: "gas solubility at bubble point",
        })
    }

    pub fn require_bo(&self) -> Result<f64, AppError> {
        self.bo.ok_or(AppError::MissingPrerequisite {
            what: "formation volume factor at bubble point",
        })
    }

    pub fn require_viscosity(&self) -> Result<f64, AppError> {
        self.viscosity.ok_or(AppError::MissingPrerequisite {
            what: "oil viscosity at bubble point",
        })
    }
}
