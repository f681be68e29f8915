use rust_decimal::Decimal;
use thiserror::Error;

use crate::quantity::{Quantity, QuantityKind, Unit};
use crate::units::*;

/// 단위 문자열 해석 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    #[error("알 수 없는 {kind} 단위: {unit}")]
    UnknownUnit { kind: QuantityKind, unit: String },
    /// 수치 부분을 읽을 수 없음
    #[error("수치를 읽을 수 없음: {0}")]
    InvalidNumber(String),
    /// 차원이 맞지 않음
    #[error(transparent)]
    Mismatch(#[from] crate::quantity::UnitMismatch),
}

fn unknown(kind: QuantityKind, s: &str) -> ConversionError {
    ConversionError::UnknownUnit {
        kind,
        unit: s.to_string(),
    }
}

/// 단위 문자열을 물리량 종류에 맞는 단위로 해석한다.
///
/// 단위 문자열 예시: `degF`, `°R`, `psia`, `psig`, `ft`, `gal`, `bbl`, `lb/lb-mol`, `Btu/ft2/day`.
pub fn parse_unit(kind: QuantityKind, s: &str) -> Result<Unit, ConversionError> {
    let key = s.trim().to_lowercase();
    let miss = || unknown(kind, s);
    let unit: Unit = match kind {
        QuantityKind::Temperature => parse_temperature_unit(&key).ok_or_else(miss)?.into(),
        QuantityKind::TemperatureDifference => {
            parse_temperature_diff_unit(&key).ok_or_else(miss)?.into()
        }
        QuantityKind::Pressure => parse_pressure_unit(&key).ok_or_else(miss)?.into(),
        QuantityKind::PressureDifference => parse_pressure_diff_unit(&key).ok_or_else(miss)?.into(),
        QuantityKind::Length => parse_length_unit(&key).ok_or_else(miss)?.into(),
        QuantityKind::Area => parse_area_unit(&key).ok_or_else(miss)?.into(),
        QuantityKind::Volume => parse_volume_unit(&key).ok_or_else(miss)?.into(),
        QuantityKind::Mass => parse_mass_unit(&key).ok_or_else(miss)?.into(),
        QuantityKind::MolarMass => parse_molar_mass_unit(&key).ok_or_else(miss)?.into(),
        QuantityKind::Insolation => parse_insolation_unit(&key).ok_or_else(miss)?.into(),
        QuantityKind::Velocity => parse_velocity_unit(&key).ok_or_else(miss)?.into(),
        QuantityKind::Dimensionless => {
            if key.is_empty() || key == "-" {
                Unit::Dimensionless
            } else {
                return Err(miss());
            }
        }
    };
    Ok(unit)
}

/// `"12 ft"`, `"64.3 degF"`처럼 수치와 단위를 공백으로 구분한 문자열을 해석한다.
/// 무차원 값은 단위 없이 쓸 수 있다.
pub fn parse_quantity(kind: QuantityKind, s: &str) -> Result<Quantity, ConversionError> {
    let text = s.trim();
    let (number, unit) = match text.split_once(char::is_whitespace) {
        Some((n, u)) => (n, u.trim()),
        None => (text, ""),
    };
    let value = parse_decimal(number)?;
    let unit = parse_unit(kind, unit)?;
    Ok(Quantity { value, unit })
}

/// 지수 표기(`1.5e-3`)도 받아들인다.
pub fn parse_decimal(s: &str) -> Result<Decimal, ConversionError> {
    let s = s.trim();
    let parsed = if s.contains(['e', 'E']) {
        Decimal::from_scientific(s)
    } else {
        s.parse::<Decimal>()
    };
    parsed.map_err(|_| ConversionError::InvalidNumber(s.to_string()))
}

/// 문자열 단위로 주어진 값을 다른 단위로 환산한다.
pub fn convert(
    kind: QuantityKind,
    value: Decimal,
    from_unit_str: &str,
    to_unit_str: &str,
) -> Result<Decimal, ConversionError> {
    let from = parse_unit(kind, from_unit_str)?;
    let to = parse_unit(kind, to_unit_str)?;
    Ok(Quantity { value, unit: from }.value_in(to)?)
}

fn parse_temperature_unit(s: &str) -> Option<TemperatureUnit> {
    match s {
        "r" | "°r" | "degr" | "rankine" => Some(TemperatureUnit::Rankine),
        "f" | "°f" | "degf" | "fahrenheit" => Some(TemperatureUnit::Fahrenheit),
        "c" | "°c" | "degc" | "celsius" => Some(TemperatureUnit::Celsius),
        "k" | "kelvin" => Some(TemperatureUnit::Kelvin),
        _ => None,
    }
}

fn parse_temperature_diff_unit(s: &str) -> Option<TemperatureDiffUnit> {
    let s = s
        .strip_prefix("delta_")
        .or_else(|| s.strip_prefix("δ"))
        .unwrap_or(s);
    Some(match parse_temperature_unit(s)? {
        TemperatureUnit::Rankine => TemperatureDiffUnit::Rankine,
        TemperatureUnit::Fahrenheit => TemperatureDiffUnit::Fahrenheit,
        TemperatureUnit::Celsius => TemperatureDiffUnit::Celsius,
        TemperatureUnit::Kelvin => TemperatureDiffUnit::Kelvin,
    })
}

fn parse_pressure_unit(s: &str) -> Option<PressureUnit> {
    match s {
        "psia" => Some(PressureUnit::Psia),
        "mmhg" | "torr" => Some(PressureUnit::MmHg),
        "inhg" => Some(PressureUnit::InHg),
        "kpa" | "kilopascal" => Some(PressureUnit::KiloPascal),
        "bar" | "bara" => Some(PressureUnit::BarA),
        "atm" => Some(PressureUnit::Atm),
        _ => None,
    }
}

fn parse_pressure_diff_unit(s: &str) -> Option<PressureDiffUnit> {
    match s {
        "psi" | "psig" => Some(PressureDiffUnit::Psi),
        "oz/in2" | "oz/in²" | "osig" => Some(PressureDiffUnit::OuncePerSquareInch),
        "inh2o" | "inwc" | "in.w.c." => Some(PressureDiffUnit::InchWater),
        "mmhg" | "mmhg(g)" => Some(PressureDiffUnit::MmHg),
        "kpa" | "kpa(g)" | "kpag" => Some(PressureDiffUnit::KiloPascal),
        _ => None,
    }
}

fn parse_length_unit(s: &str) -> Option<LengthUnit> {
    match s {
        "ft" | "foot" | "feet" => Some(LengthUnit::Foot),
        "in" | "inch" => Some(LengthUnit::Inch),
        "yd" | "yard" => Some(LengthUnit::Yard),
        "m" | "meter" | "metre" => Some(LengthUnit::Meter),
        "cm" => Some(LengthUnit::Centimeter),
        "mm" => Some(LengthUnit::Millimeter),
        _ => None,
    }
}

fn parse_area_unit(s: &str) -> Option<AreaUnit> {
    match s {
        "ft2" | "ft^2" | "ft²" | "sqft" => Some(AreaUnit::SquareFoot),
        "in2" | "in^2" | "in²" => Some(AreaUnit::SquareInch),
        "m2" | "m^2" | "m²" | "sqm" => Some(AreaUnit::SquareMeter),
        _ => None,
    }
}

fn parse_volume_unit(s: &str) -> Option<VolumeUnit> {
    match s {
        "ft3" | "ft^3" | "ft³" | "cuft" => Some(VolumeUnit::CubicFoot),
        "gal" | "gallon" | "gallons" => Some(VolumeUnit::Gallon),
        "bbl" | "barrel" | "barrels" => Some(VolumeUnit::Barrel),
        "m3" | "m^3" | "m³" => Some(VolumeUnit::CubicMeter),
        "l" | "liter" | "litre" => Some(VolumeUnit::Liter),
        _ => None,
    }
}

fn parse_mass_unit(s: &str) -> Option<MassUnit> {
    match s {
        "lb" | "lbs" | "lbm" => Some(MassUnit::Pound),
        "ton" | "short_ton" => Some(MassUnit::ShortTon),
        "kg" => Some(MassUnit::Kilogram),
        "g" => Some(MassUnit::Gram),
        "t" | "tonne" => Some(MassUnit::MetricTon),
        _ => None,
    }
}

fn parse_molar_mass_unit(s: &str) -> Option<MolarMassUnit> {
    match s {
        "lb/lb-mol" | "lb/lbmol" | "lb/lb-mole" => Some(MolarMassUnit::PoundPerPoundMole),
        "g/mol" => Some(MolarMassUnit::GramPerMole),
        "kg/mol" => Some(MolarMassUnit::KilogramPerMole),
        _ => None,
    }
}

fn parse_insolation_unit(s: &str) -> Option<InsolationUnit> {
    match s {
        "btu/ft2/day" | "btu/ft2-day" | "btu/(ft2·day)" | "btu/ft²·day" => {
            Some(InsolationUnit::BtuPerSquareFootDay)
        }
        "w/m2" | "w/m^2" | "w/m²" => Some(InsolationUnit::WattPerSquareMeter),
        "kwh/m2/day" | "kwh/m2-day" | "kwh/m²·day" => {
            Some(InsolationUnit::KilowattHourPerSquareMeterDay)
        }
        _ => None,
    }
}

fn parse_velocity_unit(s: &str) -> Option<VelocityUnit> {
    match s {
        "mph" | "mi/h" => Some(VelocityUnit::MilePerHour),
        "m/s" | "mps" => Some(VelocityUnit::MeterPerSecond),
        "km/h" | "kph" => Some(VelocityUnit::KilometerPerHour),
        "kn" | "knot" | "knots" => Some(VelocityUnit::Knot),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_value_and_unit() {
        let q = parse_quantity(QuantityKind::Length, "12 ft").unwrap();
        assert_eq!(q.value, dec!(12));
        assert_eq!(q.unit, Unit::Length(LengthUnit::Foot));

        let t = parse_quantity(QuantityKind::Temperature, " 64.3  degF ").unwrap();
        assert_eq!(t.value, dec!(64.3));
        assert_eq!(t.unit, Unit::Temperature(TemperatureUnit::Fahrenheit));
    }

    #[test]
    fn same_symbol_resolves_by_kind() {
        assert_eq!(
            parse_unit(QuantityKind::Pressure, "mmHg").unwrap(),
            Unit::Pressure(PressureUnit::MmHg)
        );
        assert_eq!(
            parse_unit(QuantityKind::PressureDifference, "mmHg").unwrap(),
            Unit::PressureDiff(PressureDiffUnit::MmHg)
        );
        assert_eq!(
            parse_unit(QuantityKind::TemperatureDifference, "degF").unwrap(),
            Unit::TemperatureDiff(TemperatureDiffUnit::Fahrenheit)
        );
    }

    #[test]
    fn unknown_unit_is_reported() {
        let err = parse_quantity(QuantityKind::Length, "3 furlong").unwrap_err();
        assert!(matches!(err, ConversionError::UnknownUnit { .. }));
        // psia는 게이지압이 아니다
        assert!(parse_unit(QuantityKind::PressureDifference, "psia").is_err());
    }

    #[test]
    fn bad_number_is_reported() {
        let err = parse_quantity(QuantityKind::Volume, "lots gal").unwrap_err();
        assert_eq!(err, ConversionError::InvalidNumber("lots".into()));
    }

    #[test]
    fn scientific_notation() {
        assert_eq!(parse_decimal("1.5e-3").unwrap(), dec!(0.0015));
    }

    #[test]
    fn converts_by_unit_names() {
        let v = convert(QuantityKind::Volume, dec!(1), "bbl", "gal").unwrap();
        assert_eq!(v.round_dp(20), dec!(42));
    }
}
