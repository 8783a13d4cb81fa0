pub mod bubble_point;
pub mod fvf;
pub mod selection;
pub mod series;
pub mod solubility;
pub mod viscosity;
