pub mod adapters;
pub mod correlations;
pub mod error;
pub mod models;
pub mod pvt;

pub use crate::adapters::table::{read_result_csv, read_rs_table, write_result_csv};
pub use crate::error::AppError;
pub use crate::models::{Conditions, ReservoirInputs, SweepOptions};
pub use crate::pvt::bubble_point::{bubble_point_from_table, bubble_point_pressure};
pub use crate::pvt::fvf::{
    FvfSummary, SaturatedFvf, UndersaturatedFvf, compressibility_above_bubble_point,
    fvf_above_bubble_point, fvf_below_bubble_point, fvf_summary, oil_compressibility,
    saturated_fvf, undersaturated_fvf,
};
pub use crate::pvt::selection::{Correlation, single_choice};
pub use crate::pvt::series::{
    BubblePointBoundary, CorrelationResult, PressureSeries, Quantity, RsTable,
};
pub use crate::pvt::solubility::{
    RsCorrelation, SolubilitySummary, bubble_point_comparison, solubility_summary, solution_gor,
    solution_gor_at_bubble_point, solution_gor_sweep,
};
pub use crate::pvt::viscosity::{
    DeadOilViscosity, SaturatedViscosity, ViscositySummary, dead_oil_viscosity,
    saturated_viscosity, undersaturated_viscosity, viscosity_above_bubble_point,
    viscosity_below_bubble_point, viscosity_summary,
};
