use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// 면적 단위. 내부 기준은 ft²이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaUnit {
    SquareFoot,
    SquareInch,
    SquareMeter,
}

const SQUARE_METER_PER_SQUARE_FOOT: Decimal = dec!(0.09290304);

/// 면적을 변환한다.
pub fn convert_area(value: Decimal, from: AreaUnit, to: AreaUnit) -> Decimal {
    if from == to {
        return value;
    }
    let ft2 = match from {
        AreaUnit::SquareFoot => value,
        AreaUnit::SquareInch => value / dec!(144),
        AreaUnit::SquareMeter => value / SQUARE_METER_PER_SQUARE_FOOT,
    };
    match to {
        AreaUnit::SquareFoot => ft2,
        AreaUnit::SquareInch => ft2 * dec!(144),
        AreaUnit::SquareMeter => ft2 * SQUARE_METER_PER_SQUARE_FOOT,
    }
}
