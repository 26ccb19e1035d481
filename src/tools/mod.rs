//! Deterministic tools and lookup tables.
//!
//! Everything here is pure: the tables are process-lifetime statics and the
//! tools never touch shared state, so they can be used from any number of
//! concurrent requests.

pub mod calculator;
pub mod constants;
pub mod elements;
pub mod formulas;
pub mod units;

pub use calculator::{format_result, CalculationResult, Calculator};
pub use constants::{ConstantRecord, ConstantsTable};
pub use elements::{ElementRecord, PeriodicTable};
pub use formulas::{FormulaCatalog, FormulaRecord};
pub use units::{Conversion, UnitConverter};

/// Names reported in `tools_used`.
pub mod names {
    pub const CALCULATOR: &str = "Calculator";
    pub const PHYSICS_CONSTANTS: &str = "Physics Constants";
    pub const UNIT_CONVERTER: &str = "Unit Converter";
    pub const FORMULA_SEARCH: &str = "Formula Search";
    pub const PERIODIC_TABLE: &str = "Periodic Table";
}
