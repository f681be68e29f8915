use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// 속도 단위(풍속). 내부 기준은 mph이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VelocityUnit {
    MilePerHour,
    MeterPerSecond,
    KilometerPerHour,
    Knot,
}

// 1 mi = 1609.344 m
const METER_PER_MILE: Decimal = dec!(1609.344);
const METER_PER_NAUTICAL_MILE: Decimal = dec!(1852);

fn to_mph(value: Decimal, unit: VelocityUnit) -> Decimal {
    match unit {
        VelocityUnit::MilePerHour => value,
        VelocityUnit::MeterPerSecond => value * dec!(3600) / METER_PER_MILE,
        VelocityUnit::KilometerPerHour => value * dec!(1000) / METER_PER_MILE,
        VelocityUnit::Knot => value * METER_PER_NAUTICAL_MILE / METER_PER_MILE,
    }
}

fn from_mph(value_mph: Decimal, unit: VelocityUnit) -> Decimal {
    match unit {
        VelocityUnit::MilePerHour => value_mph,
        VelocityUnit::MeterPerSecond => value_mph * METER_PER_MILE / dec!(3600),
        VelocityUnit::KilometerPerHour => value_mph * METER_PER_MILE / dec!(1000),
        VelocityUnit::Knot => value_mph * METER_PER_MILE / METER_PER_NAUTICAL_MILE,
    }
}

/// 속도를 변환한다.
pub fn convert_velocity(value: Decimal, from: VelocityUnit, to: VelocityUnit) -> Decimal {
    if from == to {
        return value;
    }
    from_mph(to_mph(value, from), to)
}
