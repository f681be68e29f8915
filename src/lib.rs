//! 핵심 계산 로직을 라이브러리로 분리하여 CLI 외의 보고 계층에서도 그대로 쓸 수 있게 한다.

pub mod app;
pub mod batch;
pub mod cache;
pub mod config;
pub mod conversion;
pub mod emissions;
pub mod error;
pub mod geometry;
pub mod material;
pub mod meteorology;
pub mod mixture;
pub mod quantity;
pub mod scenario;
pub mod tank;
pub mod units;

pub use emissions::{calculate_total_emissions, EmissionResult, FixedRoofEmissions};
pub use error::{CalculationError, EmissionsError, EmissionsResult, TankCalculationError};
pub use mixture::{calculate_vapor_molecular_weight, calculate_vapor_pressure, Mixture};
pub use quantity::{Quantity, QuantityKind, UnitMismatch};
