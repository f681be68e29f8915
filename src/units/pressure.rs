use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// 절대압 단위. 내부 기준은 psia이다.
/// 증기압, 대기압처럼 진공을 0으로 하는 값에만 사용한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PressureUnit {
    Psia,
    MmHg,
    InHg,
    KiloPascal,
    BarA,
    Atm,
}

/// 게이지압/압력차 단위. 내부 기준은 psi이다.
/// 통기밸브 설정값처럼 대기압 기준으로 주어지는 값에 쓴다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PressureDiffUnit {
    Psi,
    OuncePerSquareInch,
    InchWater,
    MmHg,
    KiloPascal,
}

/// 760 mmHg = 1 atm = 14.695948775 psia
pub const PSI_PER_ATM: Decimal = dec!(14.695948775);
const MMHG_PER_ATM: Decimal = dec!(760);
const KPA_PER_PSI: Decimal = dec!(6.894757293168);
const PSI_PER_INHG: Decimal = dec!(0.4911541);
const PSI_PER_INH2O: Decimal = dec!(0.036127292);

fn psi_per_mmhg() -> Decimal {
    PSI_PER_ATM / MMHG_PER_ATM
}

/// 주어진 절대압을 psia로 변환한다.
pub fn to_psia(value: Decimal, unit: PressureUnit) -> Decimal {
    match unit {
        PressureUnit::Psia => value,
        PressureUnit::MmHg => value * psi_per_mmhg(),
        PressureUnit::InHg => value * PSI_PER_INHG,
        PressureUnit::KiloPascal => value / KPA_PER_PSI,
        PressureUnit::BarA => value * dec!(100) / KPA_PER_PSI,
        PressureUnit::Atm => value * PSI_PER_ATM,
    }
}

/// psia 값을 원하는 단위로 변환한다.
pub fn from_psia(value_psia: Decimal, unit: PressureUnit) -> Decimal {
    match unit {
        PressureUnit::Psia => value_psia,
        PressureUnit::MmHg => value_psia / psi_per_mmhg(),
        PressureUnit::InHg => value_psia / PSI_PER_INHG,
        PressureUnit::KiloPascal => value_psia * KPA_PER_PSI,
        PressureUnit::BarA => value_psia * KPA_PER_PSI / dec!(100),
        PressureUnit::Atm => value_psia / PSI_PER_ATM,
    }
}

/// 절대압을 원하는 단위로 변환한다.
pub fn convert_pressure(value: Decimal, from: PressureUnit, to: PressureUnit) -> Decimal {
    if from == to {
        return value;
    }
    from_psia(to_psia(value, from), to)
}

fn diff_to_psi(value: Decimal, unit: PressureDiffUnit) -> Decimal {
    match unit {
        PressureDiffUnit::Psi => value,
        PressureDiffUnit::OuncePerSquareInch => value / dec!(16),
        PressureDiffUnit::InchWater => value * PSI_PER_INH2O,
        PressureDiffUnit::MmHg => value * psi_per_mmhg(),
        PressureDiffUnit::KiloPascal => value / KPA_PER_PSI,
    }
}

fn diff_from_psi(value_psi: Decimal, unit: PressureDiffUnit) -> Decimal {
    match unit {
        PressureDiffUnit::Psi => value_psi,
        PressureDiffUnit::OuncePerSquareInch => value_psi * dec!(16),
        PressureDiffUnit::InchWater => value_psi / PSI_PER_INH2O,
        PressureDiffUnit::MmHg => value_psi / psi_per_mmhg(),
        PressureDiffUnit::KiloPascal => value_psi * KPA_PER_PSI,
    }
}

/// 게이지압/압력차를 다른 단위로 변환한다.
pub fn convert_pressure_diff(
    value: Decimal,
    from: PressureDiffUnit,
    to: PressureDiffUnit,
) -> Decimal {
    if from == to {
        return value;
    }
    diff_from_psi(diff_to_psi(value, from), to)
}
