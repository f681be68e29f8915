use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// 체적 단위. 내부 기준은 입방피트이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolumeUnit {
    CubicFoot,
    Gallon,
    Barrel,
    CubicMeter,
    Liter,
}

/// 미국 갤런 = 231 in³
const CUBIC_INCH_PER_GALLON: Decimal = dec!(231);
const CUBIC_INCH_PER_CUBIC_FOOT: Decimal = dec!(1728);
const GALLON_PER_BARREL: Decimal = dec!(42);
const CUBIC_METER_PER_CUBIC_FOOT: Decimal = dec!(0.028316846592);

fn to_cubic_foot(value: Decimal, unit: VolumeUnit) -> Decimal {
    match unit {
        VolumeUnit::CubicFoot => value,
        VolumeUnit::Gallon => value * CUBIC_INCH_PER_GALLON / CUBIC_INCH_PER_CUBIC_FOOT,
        VolumeUnit::Barrel => {
            value * GALLON_PER_BARREL * CUBIC_INCH_PER_GALLON / CUBIC_INCH_PER_CUBIC_FOOT
        }
        VolumeUnit::CubicMeter => value / CUBIC_METER_PER_CUBIC_FOOT,
        VolumeUnit::Liter => value / dec!(1000) / CUBIC_METER_PER_CUBIC_FOOT,
    }
}

fn from_cubic_foot(value_ft3: Decimal, unit: VolumeUnit) -> Decimal {
    match unit {
        VolumeUnit::CubicFoot => value_ft3,
        VolumeUnit::Gallon => value_ft3 * CUBIC_INCH_PER_CUBIC_FOOT / CUBIC_INCH_PER_GALLON,
        VolumeUnit::Barrel => {
            value_ft3 * CUBIC_INCH_PER_CUBIC_FOOT / CUBIC_INCH_PER_GALLON / GALLON_PER_BARREL
        }
        VolumeUnit::CubicMeter => value_ft3 * CUBIC_METER_PER_CUBIC_FOOT,
        VolumeUnit::Liter => value_ft3 * CUBIC_METER_PER_CUBIC_FOOT * dec!(1000),
    }
}

/// 체적을 변환한다.
pub fn convert_volume(value: Decimal, from: VolumeUnit, to: VolumeUnit) -> Decimal {
    if from == to {
        return value;
    }
    from_cubic_foot(to_cubic_foot(value, from), to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barrel_is_42_gallons() {
        let gal = convert_volume(dec!(1), VolumeUnit::Barrel, VolumeUnit::Gallon);
        assert_eq!(gal.round_dp(20), dec!(42));
    }
}
