use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// 질량 단위. 내부 기준은 lb이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MassUnit {
    Pound,
    ShortTon,
    Kilogram,
    Gram,
    MetricTon,
}

const KG_PER_LB: Decimal = dec!(0.45359237);

fn to_pound(value: Decimal, unit: MassUnit) -> Decimal {
    match unit {
        MassUnit::Pound => value,
        MassUnit::ShortTon => value * dec!(2000),
        MassUnit::Kilogram => value / KG_PER_LB,
        MassUnit::Gram => value / dec!(1000) / KG_PER_LB,
        MassUnit::MetricTon => value * dec!(1000) / KG_PER_LB,
    }
}

fn from_pound(value_lb: Decimal, unit: MassUnit) -> Decimal {
    match unit {
        MassUnit::Pound => value_lb,
        MassUnit::ShortTon => value_lb / dec!(2000),
        MassUnit::Kilogram => value_lb * KG_PER_LB,
        MassUnit::Gram => value_lb * KG_PER_LB * dec!(1000),
        MassUnit::MetricTon => value_lb * KG_PER_LB / dec!(1000),
    }
}

/// 질량을 변환한다.
pub fn convert_mass(value: Decimal, from: MassUnit, to: MassUnit) -> Decimal {
    if from == to {
        return value;
    }
    from_pound(to_pound(value, from), to)
}

/// 몰질량 단위. lb/lb-mol 과 g/mol 은 수치가 같다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MolarMassUnit {
    PoundPerPoundMole,
    GramPerMole,
    KilogramPerMole,
}

/// 몰질량을 변환한다.
pub fn convert_molar_mass(value: Decimal, from: MolarMassUnit, to: MolarMassUnit) -> Decimal {
    let base = match from {
        MolarMassUnit::PoundPerPoundMole | MolarMassUnit::GramPerMole => value,
        MolarMassUnit::KilogramPerMole => value * dec!(1000),
    };
    match to {
        MolarMassUnit::PoundPerPoundMole | MolarMassUnit::GramPerMole => base,
        MolarMassUnit::KilogramPerMole => base / dec!(1000),
    }
}
