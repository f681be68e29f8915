//! 고정지붕 탱크 배출량 회귀 테스트.
//!
//! 기준 사례: 12 ft × 6 ft 수직 원추지붕 탱크, 백색/보통 도장, 액위 8 ft,
//! 연간 8450 gal, Denver 기상 평균, 벤젠/톨루엔/사이클로헥산 중량 기준 혼합물.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tank_emissions_toolbox::batch::calculate_batch;
use tank_emissions_toolbox::emissions::{calculate_total_emissions, FixedRoofEmissions};
use tank_emissions_toolbox::error::EmissionsError;
use tank_emissions_toolbox::material::find_material;
use tank_emissions_toolbox::meteorology::{MeteorologicalChunk, ReportingChunk};
use tank_emissions_toolbox::mixture::{calculate_vapor_pressure, MakeupType, Mixture};
use tank_emissions_toolbox::quantity::Quantity;
use tank_emissions_toolbox::tank::{Insulation, Orientation, TankGeometry};
use tank_emissions_toolbox::units::*;

fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected} ± {tol}, got {actual}"
    );
}

fn ft(v: Decimal) -> Quantity {
    Quantity::new(v, LengthUnit::Foot)
}

fn btc_mixture() -> Mixture {
    Mixture::new(
        "btc",
        "Benzene/Toluene/Cyclohexane",
        MakeupType::Weight,
        vec![
            (find_material("benzene").unwrap(), dec!(88.68)),
            (find_material("toluene").unwrap(), dec!(8.14)),
            (find_material("cyclohexane").unwrap(), dec!(3.18)),
        ],
    )
    .unwrap()
}

fn denver_chunk() -> ReportingChunk {
    ReportingChunk {
        start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        end: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
        meteorology: MeteorologicalChunk {
            average_temperature: Quantity::new(dec!(50.25), TemperatureUnit::Fahrenheit),
            min_temperature: Quantity::new(dec!(36.2), TemperatureUnit::Fahrenheit),
            max_temperature: Quantity::new(dec!(64.3), TemperatureUnit::Fahrenheit),
            wind_speed: Quantity::new(dec!(8.7), VelocityUnit::MilePerHour),
            insolation: Quantity::new(dec!(1568), InsolationUnit::BtuPerSquareFootDay),
            atmospheric_pressure: Quantity::new(dec!(12.08), PressureUnit::Psia),
        },
        throughput: Quantity::new(dec!(8450), VolumeUnit::Gallon),
        mixture: btc_mixture(),
    }
}

fn denver_tank() -> TankGeometry {
    let mut tank = TankGeometry::new(
        "t-101",
        "Benzene day tank",
        Orientation::Vertical,
        ft(dec!(12)),
        ft(dec!(6)),
    );
    tank.liquid_height = Some(ft(dec!(8)));
    tank
}

#[test]
fn denver_intermediate_values() {
    let tank = denver_tank();
    let chunk = denver_chunk();
    let mut calc = FixedRoofEmissions::new(&tank, &chunk);
    let s = calc.standing_loss_factors().unwrap();

    let rankine = |q: &Quantity| q.value_in(TemperatureUnit::Rankine).unwrap();
    assert_close(rankine(&s.ambient_temperature), dec!(509.92), dec!(0.0000001));
    assert_close(rankine(&s.bulk_temperature), dec!(511.096), dec!(0.0000001));
    assert_close(rankine(&s.liquid_surface_temperature), dec!(512.3178), dec!(0.001));
    assert_close(rankine(&s.vapor_temperature), dec!(512.9938), dec!(0.001));
    assert_close(
        s.vapor_pressure.value_in(PressureUnit::Psia).unwrap(),
        dec!(0.90441),
        dec!(0.0005),
    );
    assert_close(
        s.vapor_molecular_weight
            .value_in(MolarMassUnit::PoundPerPoundMole)
            .unwrap(),
        dec!(78.593),
        dec!(0.005),
    );
    assert_close(s.expansion_factor, dec!(0.08944), dec!(0.0005));

    let space = s.vapor_space.as_ref().unwrap();
    // 12 − 8 + 0.0625 (원추 지붕 기본 기울기)
    assert_eq!(space.outage.value_in(LengthUnit::Foot).unwrap(), dec!(4.0625));
    assert_close(space.saturation_factor, dec!(0.83701), dec!(0.0005));

    let w = calc.working_loss_factors().unwrap();
    assert_close(w.turnovers, dec!(3.9947), dec!(0.001));
    assert_eq!(w.turnover_factor, Decimal::ONE);
    assert_eq!(w.product_factor, Decimal::ONE);
    assert_eq!(w.vent_correction_factor, Decimal::ONE);
}

#[test]
fn denver_totals_are_deterministic_and_positive() {
    let tank = denver_tank();
    let chunk = denver_chunk();
    let first = calculate_total_emissions(&tank, &chunk).unwrap();
    let second = calculate_total_emissions(&tank, &chunk).unwrap();
    assert_eq!(first, second);

    let l_s = first.standing_loss.value_in(MassUnit::Pound).unwrap();
    let l_w = first.working_loss.value_in(MassUnit::Pound).unwrap();
    assert_close(l_s, dec!(40.53), dec!(0.05));
    assert_close(l_w, dec!(14.584), dec!(0.02));
    assert_eq!(first.total_loss().unwrap().value, l_s + l_w);
}

#[test]
fn apportionment_sums_back_to_totals() {
    let result = calculate_total_emissions(&denver_tank(), &denver_chunk()).unwrap();
    for (mixture_emission, total) in [
        (&result.standing, result.standing_loss),
        (&result.working, result.working_loss),
    ] {
        assert_eq!(mixture_emission.materials.len(), 3);
        assert_close(
            mixture_emission.total().value,
            total.value,
            dec!(0.000000000001),
        );
        let fractions: Decimal = mixture_emission
            .materials
            .iter()
            .map(|m| m.vapor_weight_fraction)
            .sum();
        assert_close(fractions, Decimal::ONE, dec!(0.000000000001));
    }
    // 벤젠이 증기 대부분을 차지한다
    let benzene = result.standing.find("benzene").unwrap();
    assert_close(benzene.vapor_weight_fraction, dec!(0.94108), dec!(0.0005));
}

#[test]
fn orchestrator_vapor_pressure_matches_standalone() {
    let tank = denver_tank();
    let chunk = denver_chunk();
    let mut calc = FixedRoofEmissions::new(&tank, &chunk);
    let t = Quantity::new(dec!(60), TemperatureUnit::Fahrenheit);
    let via_calc = calc.mixture_vapor_pressure(&t).unwrap();
    let standalone = calculate_vapor_pressure(&chunk.mixture, &t).unwrap();
    assert_eq!(via_calc, standalone);
}

#[test]
fn mixture_vapor_pressure_rises_with_temperature() {
    let mixture = btc_mixture();
    let mut previous = Decimal::ZERO;
    for f in [20, 40, 60, 80, 100] {
        let t = Quantity::new(Decimal::from(f), TemperatureUnit::Fahrenheit);
        let p = calculate_vapor_pressure(&mixture, &t)
            .unwrap()
            .value_in(PressureUnit::Psia)
            .unwrap();
        assert!(p > previous, "P({f} °F) = {p} ≤ {previous}");
        previous = p;
    }
}

#[test]
fn full_insulation_removes_daily_swing() {
    let mut tank = denver_tank();
    tank.insulation = Insulation::Full;
    let chunk = denver_chunk();
    let mut calc = FixedRoofEmissions::new(&tank, &chunk);
    let s = calc.standing_loss_factors().unwrap();

    assert!(s.vapor_temperature_range.is_zero());
    assert!(s.vapor_pressure_range.is_zero());
    assert_eq!(s.liquid_surface_temperature, s.bulk_temperature);
    assert_eq!(s.vapor_temperature, s.bulk_temperature);
    // 온도 변화가 없으면 호흡밸브 범위만 남아 K_E가 음수가 되고 0으로 고정된다
    assert_eq!(s.expansion_factor, Decimal::ZERO);
    assert!(s.standing_loss.is_zero());

    let result = calc.calculate().unwrap();
    assert!(result.working_loss.value > Decimal::ZERO);
}

#[test]
fn underground_tank_has_no_standing_loss() {
    let mut tank = denver_tank();
    tank.underground = true;
    let chunk = denver_chunk();

    let buried = calculate_total_emissions(&tank, &chunk).unwrap();
    let above = calculate_total_emissions(&denver_tank(), &chunk).unwrap();
    assert!(buried.standing_loss.is_zero());
    assert!(buried.standing.materials.iter().all(|m| m.emission.is_zero()));
    assert_eq!(buried.working_loss, above.working_loss);

    let mut calc = FixedRoofEmissions::new(&tank, &chunk);
    assert!(calc.standing_loss_factors().unwrap().vapor_space.is_none());
}

#[test]
fn horizontal_tank_uses_effective_dimensions() {
    let tank = TankGeometry::new(
        "h-1",
        "Horizontal",
        Orientation::Horizontal,
        ft(dec!(20)),
        ft(dec!(8)),
    );
    let chunk = denver_chunk();
    let mut calc = FixedRoofEmissions::new(&tank, &chunk);
    let s = calc.standing_loss_factors().unwrap();
    let outage = s.vapor_space.as_ref().unwrap().outage.value;
    // H_E/2 = (π/4)·8/2
    assert_close(outage, dec!(3.14159265), dec!(0.00001));
    assert!(s.standing_loss.value > Decimal::ZERO);
    assert!(calc.calculate().unwrap().working_loss.value > Decimal::ZERO);
}

#[test]
fn raised_vent_settings_reduce_standing_loss() {
    let mut tank = denver_tank();
    tank.vents.breather = Quantity::new(dec!(0.5), PressureDiffUnit::Psi);
    tank.vents.vacuum = Quantity::new(dec!(-0.5), PressureDiffUnit::Psi);
    let chunk = denver_chunk();
    let vented = calculate_total_emissions(&tank, &chunk).unwrap();
    let open = calculate_total_emissions(&denver_tank(), &chunk).unwrap();
    assert!(vented.standing_loss.value < open.standing_loss.value);
}

#[test]
fn reversed_period_is_rejected() {
    let tank = denver_tank();
    let mut chunk = denver_chunk();
    std::mem::swap(&mut chunk.start, &mut chunk.end);
    let err = calculate_total_emissions(&tank, &chunk).unwrap_err();
    assert_eq!(err.tank_id, "t-101");
    assert!(matches!(err.source, EmissionsError::Calculation(_)));
}

#[test]
fn batch_isolates_failing_tank() {
    let good = denver_tank();
    let mut bad = denver_tank();
    bad.id = "t-bad".into();
    bad.diameter = ft(Decimal::ZERO);
    let chunk = denver_chunk();

    let report = calculate_batch([(&bad, &chunk), (&good, &chunk)]);
    assert!(!report.is_clean());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].tank_id, "t-bad");
    assert!(matches!(
        report.failures[0].source,
        EmissionsError::MissingData { .. }
    ));
    assert_eq!(report.results.len(), 1);
    assert_eq!(
        report.results[0],
        calculate_total_emissions(&good, &chunk).unwrap()
    );
}
