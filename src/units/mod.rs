//! 단위 정의 및 변환 모듈 모음. 모든 변환은 `Decimal` 위에서 이루어진다.

pub mod area;
pub mod insolation;
pub mod length;
pub mod mass;
pub mod pressure;
pub mod temperature;
pub mod velocity;
pub mod volume;

pub use area::{convert_area, AreaUnit};
pub use insolation::{convert_insolation, InsolationUnit};
pub use length::{convert_length, LengthUnit};
pub use mass::{convert_mass, convert_molar_mass, MassUnit, MolarMassUnit};
pub use pressure::{convert_pressure, convert_pressure_diff, PressureDiffUnit, PressureUnit};
pub use temperature::{
    convert_temperature, convert_temperature_diff, TemperatureDiffUnit, TemperatureUnit,
};
pub use velocity::{convert_velocity, VelocityUnit};
pub use volume::{convert_volume, VolumeUnit};
