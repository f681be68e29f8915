//! 단위가 붙은 정확한 십진수 물리량.
//!
//! 계산식은 항상 [`Quantity::value_in`]으로 기준 단위 값을 꺼낸 뒤 무차원 계수를
//! 적용한다. 서로 다른 차원끼리의 덧셈/뺄셈/변환은 [`UnitMismatch`]로 실패한다.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::units::*;

/// 다루는 물리량 종류를 나타낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantityKind {
    Temperature,
    TemperatureDifference,
    Pressure,
    PressureDifference,
    Length,
    Area,
    Volume,
    Mass,
    MolarMass,
    Insolation,
    Velocity,
    Dimensionless,
}

impl fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuantityKind::Temperature => "온도",
            QuantityKind::TemperatureDifference => "온도차",
            QuantityKind::Pressure => "절대압",
            QuantityKind::PressureDifference => "게이지압/압력차",
            QuantityKind::Length => "길이",
            QuantityKind::Area => "면적",
            QuantityKind::Volume => "체적",
            QuantityKind::Mass => "질량",
            QuantityKind::MolarMass => "몰질량",
            QuantityKind::Insolation => "일사량",
            QuantityKind::Velocity => "속도",
            QuantityKind::Dimensionless => "무차원",
        };
        f.write_str(name)
    }
}

/// 차원이 맞지 않는 두 물리량을 결합하려 했을 때의 오류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("단위 불일치: {expected} 이(가) 필요하지만 {found} 이(가) 주어짐")]
pub struct UnitMismatch {
    pub expected: QuantityKind,
    pub found: QuantityKind,
}

/// 차원별 단위를 하나로 묶은 태그.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    Temperature(TemperatureUnit),
    TemperatureDiff(TemperatureDiffUnit),
    Pressure(PressureUnit),
    PressureDiff(PressureDiffUnit),
    Length(LengthUnit),
    Area(AreaUnit),
    Volume(VolumeUnit),
    Mass(MassUnit),
    MolarMass(MolarMassUnit),
    Insolation(InsolationUnit),
    Velocity(VelocityUnit),
    Dimensionless,
}

impl Unit {
    pub fn kind(self) -> QuantityKind {
        match self {
            Unit::Temperature(_) => QuantityKind::Temperature,
            Unit::TemperatureDiff(_) => QuantityKind::TemperatureDifference,
            Unit::Pressure(_) => QuantityKind::Pressure,
            Unit::PressureDiff(_) => QuantityKind::PressureDifference,
            Unit::Length(_) => QuantityKind::Length,
            Unit::Area(_) => QuantityKind::Area,
            Unit::Volume(_) => QuantityKind::Volume,
            Unit::Mass(_) => QuantityKind::Mass,
            Unit::MolarMass(_) => QuantityKind::MolarMass,
            Unit::Insolation(_) => QuantityKind::Insolation,
            Unit::Velocity(_) => QuantityKind::Velocity,
            Unit::Dimensionless => QuantityKind::Dimensionless,
        }
    }

    /// 출력용 단위 기호.
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Temperature(u) => match u {
                TemperatureUnit::Rankine => "°R",
                TemperatureUnit::Fahrenheit => "°F",
                TemperatureUnit::Celsius => "°C",
                TemperatureUnit::Kelvin => "K",
            },
            Unit::TemperatureDiff(u) => match u {
                TemperatureDiffUnit::Rankine => "Δ°R",
                TemperatureDiffUnit::Fahrenheit => "Δ°F",
                TemperatureDiffUnit::Celsius => "Δ°C",
                TemperatureDiffUnit::Kelvin => "ΔK",
            },
            Unit::Pressure(u) => match u {
                PressureUnit::Psia => "psia",
                PressureUnit::MmHg => "mmHg",
                PressureUnit::InHg => "inHg",
                PressureUnit::KiloPascal => "kPa",
                PressureUnit::BarA => "bara",
                PressureUnit::Atm => "atm",
            },
            Unit::PressureDiff(u) => match u {
                PressureDiffUnit::Psi => "psig",
                PressureDiffUnit::OuncePerSquareInch => "oz/in²",
                PressureDiffUnit::InchWater => "inH2O",
                PressureDiffUnit::MmHg => "mmHg(g)",
                PressureDiffUnit::KiloPascal => "kPa(g)",
            },
            Unit::Length(u) => match u {
                LengthUnit::Foot => "ft",
                LengthUnit::Inch => "in",
                LengthUnit::Yard => "yd",
                LengthUnit::Meter => "m",
                LengthUnit::Centimeter => "cm",
                LengthUnit::Millimeter => "mm",
            },
            Unit::Area(u) => match u {
                AreaUnit::SquareFoot => "ft²",
                AreaUnit::SquareInch => "in²",
                AreaUnit::SquareMeter => "m²",
            },
            Unit::Volume(u) => match u {
                VolumeUnit::CubicFoot => "ft³",
                VolumeUnit::Gallon => "gal",
                VolumeUnit::Barrel => "bbl",
                VolumeUnit::CubicMeter => "m³",
                VolumeUnit::Liter => "L",
            },
            Unit::Mass(u) => match u {
                MassUnit::Pound => "lb",
                MassUnit::ShortTon => "ton",
                MassUnit::Kilogram => "kg",
                MassUnit::Gram => "g",
                MassUnit::MetricTon => "t",
            },
            Unit::MolarMass(u) => match u {
                MolarMassUnit::PoundPerPoundMole => "lb/lb-mol",
                MolarMassUnit::GramPerMole => "g/mol",
                MolarMassUnit::KilogramPerMole => "kg/mol",
            },
            Unit::Insolation(u) => match u {
                InsolationUnit::BtuPerSquareFootDay => "Btu/ft²·day",
                InsolationUnit::WattPerSquareMeter => "W/m²",
                InsolationUnit::KilowattHourPerSquareMeterDay => "kWh/m²·day",
            },
            Unit::Velocity(u) => match u {
                VelocityUnit::MilePerHour => "mph",
                VelocityUnit::MeterPerSecond => "m/s",
                VelocityUnit::KilometerPerHour => "km/h",
                VelocityUnit::Knot => "kn",
            },
            Unit::Dimensionless => "",
        }
    }
}

macro_rules! unit_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Unit {
                fn from(value: $ty) -> Self {
                    Unit::$variant(value)
                }
            }
        )*
    };
}

unit_from!(
    Temperature(TemperatureUnit),
    TemperatureDiff(TemperatureDiffUnit),
    Pressure(PressureUnit),
    PressureDiff(PressureDiffUnit),
    Length(LengthUnit),
    Area(AreaUnit),
    Volume(VolumeUnit),
    Mass(MassUnit),
    MolarMass(MolarMassUnit),
    Insolation(InsolationUnit),
    Velocity(VelocityUnit),
);

/// 단위가 붙은 값. 값은 입력된 단위 그대로 보관하고 필요할 때 변환한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quantity {
    pub value: Decimal,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(value: Decimal, unit: impl Into<Unit>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    pub fn dimensionless(value: Decimal) -> Self {
        Self {
            value,
            unit: Unit::Dimensionless,
        }
    }

    pub fn kind(&self) -> QuantityKind {
        self.unit.kind()
    }

    /// 같은 차원의 다른 단위로 변환한다.
    pub fn to(&self, unit: impl Into<Unit>) -> Result<Quantity, UnitMismatch> {
        let target = unit.into();
        let value = convert_value(self.value, self.unit, target)?;
        Ok(Quantity {
            value,
            unit: target,
        })
    }

    /// 지정한 단위로 환산한 수치만 돌려준다.
    pub fn value_in(&self, unit: impl Into<Unit>) -> Result<Decimal, UnitMismatch> {
        convert_value(self.value, self.unit, unit.into())
    }

    /// 차원을 확인한 뒤 더한다. 결과 단위는 `self`의 단위를 따른다.
    /// 온도에는 온도차만 더할 수 있다.
    pub fn checked_add(&self, other: &Quantity) -> Result<Quantity, UnitMismatch> {
        let value = match (self.unit, other.unit) {
            (Unit::Temperature(t), Unit::TemperatureDiff(_)) => {
                self.value + other.value_in(t.difference_unit())?
            }
            _ => self.value + other.value_in(self.unit)?,
        };
        Ok(Quantity {
            value,
            unit: self.unit,
        })
    }

    /// 차원을 확인한 뒤 뺀다. 온도 − 온도는 온도차가 된다.
    pub fn checked_sub(&self, other: &Quantity) -> Result<Quantity, UnitMismatch> {
        match (self.unit, other.unit) {
            (Unit::Temperature(t), Unit::Temperature(_)) => Ok(Quantity {
                value: self.value - other.value_in(t)?,
                unit: Unit::TemperatureDiff(t.difference_unit()),
            }),
            (Unit::Temperature(t), Unit::TemperatureDiff(_)) => Ok(Quantity {
                value: self.value - other.value_in(t.difference_unit())?,
                unit: self.unit,
            }),
            _ => Ok(Quantity {
                value: self.value - other.value_in(self.unit)?,
                unit: self.unit,
            }),
        }
    }

    /// 무차원 계수를 곱한다. 절대 온도에는 쓰지 않는다.
    pub fn scale(&self, factor: Decimal) -> Quantity {
        Quantity {
            value: self.value * factor,
            unit: self.unit,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.unit.symbol();
        if symbol.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, symbol)
        }
    }
}

fn convert_value(value: Decimal, from: Unit, to: Unit) -> Result<Decimal, UnitMismatch> {
    let converted = match (from, to) {
        (Unit::Temperature(a), Unit::Temperature(b)) => convert_temperature(value, a, b),
        (Unit::TemperatureDiff(a), Unit::TemperatureDiff(b)) => {
            convert_temperature_diff(value, a, b)
        }
        (Unit::Pressure(a), Unit::Pressure(b)) => convert_pressure(value, a, b),
        (Unit::PressureDiff(a), Unit::PressureDiff(b)) => convert_pressure_diff(value, a, b),
        (Unit::Length(a), Unit::Length(b)) => convert_length(value, a, b),
        (Unit::Area(a), Unit::Area(b)) => convert_area(value, a, b),
        (Unit::Volume(a), Unit::Volume(b)) => convert_volume(value, a, b),
        (Unit::Mass(a), Unit::Mass(b)) => convert_mass(value, a, b),
        (Unit::MolarMass(a), Unit::MolarMass(b)) => convert_molar_mass(value, a, b),
        (Unit::Insolation(a), Unit::Insolation(b)) => convert_insolation(value, a, b),
        (Unit::Velocity(a), Unit::Velocity(b)) => convert_velocity(value, a, b),
        (Unit::Dimensionless, Unit::Dimensionless) => value,
        _ => {
            return Err(UnitMismatch {
                expected: to.kind(),
                found: from.kind(),
            })
        }
    };
    Ok(converted)
}
