use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// 길이 단위. 내부 기준은 피트이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUnit {
    Foot,
    Inch,
    Yard,
    Meter,
    Centimeter,
    Millimeter,
}

const METER_PER_FOOT: Decimal = dec!(0.3048);

fn to_foot(value: Decimal, unit: LengthUnit) -> Decimal {
    match unit {
        LengthUnit::Foot => value,
        LengthUnit::Inch => value / dec!(12),
        LengthUnit::Yard => value * dec!(3),
        LengthUnit::Meter => value / METER_PER_FOOT,
        LengthUnit::Centimeter => value / dec!(100) / METER_PER_FOOT,
        LengthUnit::Millimeter => value / dec!(1000) / METER_PER_FOOT,
    }
}

fn from_foot(value_ft: Decimal, unit: LengthUnit) -> Decimal {
    match unit {
        LengthUnit::Foot => value_ft,
        LengthUnit::Inch => value_ft * dec!(12),
        LengthUnit::Yard => value_ft / dec!(3),
        LengthUnit::Meter => value_ft * METER_PER_FOOT,
        LengthUnit::Centimeter => value_ft * METER_PER_FOOT * dec!(100),
        LengthUnit::Millimeter => value_ft * METER_PER_FOOT * dec!(1000),
    }
}

/// 길이를 다른 단위로 변환한다.
pub fn convert_length(value: Decimal, from: LengthUnit, to: LengthUnit) -> Decimal {
    if from == to {
        return value;
    }
    from_foot(to_foot(value, from), to)
}
