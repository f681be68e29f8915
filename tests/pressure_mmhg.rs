//! mmHg ↔ psia 절대압/게이지압 변환 회귀 테스트.
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tank_emissions_toolbox::quantity::Quantity;
use tank_emissions_toolbox::units::{
    convert_pressure, convert_pressure_diff, PressureDiffUnit, PressureUnit,
};

fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected} ± {tol}, got {actual}"
    );
}

#[test]
fn one_atmosphere_of_mmhg_is_standard_psia() {
    let psia = convert_pressure(dec!(760), PressureUnit::MmHg, PressureUnit::Psia);
    assert_close(psia, dec!(14.695948775), dec!(0.00000000000000000001));
}

#[test]
fn psia_to_mmhg_roundtrip() {
    let mmhg = convert_pressure(dec!(12.08), PressureUnit::Psia, PressureUnit::MmHg);
    // Denver 평균 대기압 ≈ 624.7 mmHg
    assert_close(mmhg, dec!(624.7), dec!(0.05));
    let back = convert_pressure(mmhg, PressureUnit::MmHg, PressureUnit::Psia);
    assert_close(back, dec!(12.08), dec!(0.00000000000000000001));
}

#[test]
fn gauge_ounces_to_psi() {
    let psi = convert_pressure_diff(
        dec!(8),
        PressureDiffUnit::OuncePerSquareInch,
        PressureDiffUnit::Psi,
    );
    assert_eq!(psi, dec!(0.5));
}

#[test]
fn gauge_and_absolute_do_not_mix() {
    let gauge = Quantity::new(dec!(0.03), PressureDiffUnit::Psi);
    assert!(gauge.value_in(PressureUnit::Psia).is_err());
    let absolute = Quantity::new(dec!(14.7), PressureUnit::Psia);
    assert!(absolute.checked_add(&gauge).is_err());
}
