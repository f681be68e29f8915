use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// 일사량 단위(일평균 수평면 전일사). 내부 기준은 Btu/(ft²·day)이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsolationUnit {
    BtuPerSquareFootDay,
    WattPerSquareMeter,
    KilowattHourPerSquareMeterDay,
}

const JOULE_PER_BTU: Decimal = dec!(1055.05585262);
const SQUARE_FOOT_PER_SQUARE_METER: Decimal = dec!(10.76391041671);

/// 1 W/m² 를 하루 동안 받았을 때의 Btu/(ft²·day)
fn btu_ft2_day_per_w_m2() -> Decimal {
    dec!(86400) / JOULE_PER_BTU / SQUARE_FOOT_PER_SQUARE_METER
}

/// 일사량을 변환한다.
pub fn convert_insolation(value: Decimal, from: InsolationUnit, to: InsolationUnit) -> Decimal {
    if from == to {
        return value;
    }
    let base = match from {
        InsolationUnit::BtuPerSquareFootDay => value,
        InsolationUnit::WattPerSquareMeter => value * btu_ft2_day_per_w_m2(),
        InsolationUnit::KilowattHourPerSquareMeterDay => {
            value * dec!(1000) / dec!(24) * btu_ft2_day_per_w_m2()
        }
    };
    match to {
        InsolationUnit::BtuPerSquareFootDay => base,
        InsolationUnit::WattPerSquareMeter => base / btu_ft2_day_per_w_m2(),
        InsolationUnit::KilowattHourPerSquareMeterDay => {
            base / btu_ft2_day_per_w_m2() * dec!(24) / dec!(1000)
        }
    }
}
