use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// 온도 단위를 정의한다. 내부 기준은 랭킨(°R)이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureUnit {
    Rankine,
    Fahrenheit,
    Celsius,
    Kelvin,
}

/// 온도차 단위를 정의한다. 스케일만 고려한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureDiffUnit {
    Rankine,
    Fahrenheit,
    Celsius,
    Kelvin,
}

const RANKINE_OFFSET_F: Decimal = dec!(459.67);
const KELVIN_OFFSET_C: Decimal = dec!(273.15);
const RANKINE_PER_KELVIN: Decimal = dec!(1.8);

/// 주어진 값을 랭킨으로 변환한다.
pub fn to_rankine(value: Decimal, unit: TemperatureUnit) -> Decimal {
    match unit {
        TemperatureUnit::Rankine => value,
        TemperatureUnit::Fahrenheit => value + RANKINE_OFFSET_F,
        TemperatureUnit::Celsius => (value + KELVIN_OFFSET_C) * RANKINE_PER_KELVIN,
        TemperatureUnit::Kelvin => value * RANKINE_PER_KELVIN,
    }
}

/// 랭킨 값을 원하는 단위로 변환한다.
pub fn from_rankine(value_r: Decimal, unit: TemperatureUnit) -> Decimal {
    match unit {
        TemperatureUnit::Rankine => value_r,
        TemperatureUnit::Fahrenheit => value_r - RANKINE_OFFSET_F,
        TemperatureUnit::Celsius => value_r / RANKINE_PER_KELVIN - KELVIN_OFFSET_C,
        TemperatureUnit::Kelvin => value_r / RANKINE_PER_KELVIN,
    }
}

/// 온도를 서로 다른 단위로 변환한다.
pub fn convert_temperature(value: Decimal, from: TemperatureUnit, to: TemperatureUnit) -> Decimal {
    if from == to {
        return value;
    }
    from_rankine(to_rankine(value, from), to)
}

fn diff_scale(unit: TemperatureDiffUnit) -> Decimal {
    // 화씨/랭킨은 1:1, 섭씨/켈빈은 1.8배
    match unit {
        TemperatureDiffUnit::Rankine | TemperatureDiffUnit::Fahrenheit => Decimal::ONE,
        TemperatureDiffUnit::Celsius | TemperatureDiffUnit::Kelvin => RANKINE_PER_KELVIN,
    }
}

/// 온도차를 서로 다른 단위로 변환한다. 절대 기준점 없이 배율만 고려한다.
pub fn convert_temperature_diff(
    value: Decimal,
    from: TemperatureDiffUnit,
    to: TemperatureDiffUnit,
) -> Decimal {
    if diff_scale(from) == diff_scale(to) {
        return value;
    }
    value * diff_scale(from) / diff_scale(to)
}

impl TemperatureUnit {
    /// 같은 눈금 간격을 갖는 온도차 단위.
    pub fn difference_unit(self) -> TemperatureDiffUnit {
        match self {
            TemperatureUnit::Rankine => TemperatureDiffUnit::Rankine,
            TemperatureUnit::Fahrenheit => TemperatureDiffUnit::Fahrenheit,
            TemperatureUnit::Celsius => TemperatureDiffUnit::Celsius,
            TemperatureUnit::Kelvin => TemperatureDiffUnit::Kelvin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fahrenheit_to_rankine_is_exact() {
        let r = convert_temperature(dec!(60), TemperatureUnit::Fahrenheit, TemperatureUnit::Rankine);
        assert_eq!(r, dec!(519.67));
    }

    #[test]
    fn celsius_round_trip_through_rankine() {
        let r = convert_temperature(dec!(25), TemperatureUnit::Celsius, TemperatureUnit::Rankine);
        assert_eq!(r, dec!(536.67));
        let c = convert_temperature(r, TemperatureUnit::Rankine, TemperatureUnit::Celsius);
        assert_eq!(c.normalize(), dec!(25));
    }

    #[test]
    fn diff_only_scales() {
        let f = convert_temperature_diff(dec!(10), TemperatureDiffUnit::Celsius, TemperatureDiffUnit::Fahrenheit);
        assert_eq!(f, dec!(18.0));
    }
}
