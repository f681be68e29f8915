use std::path::PathBuf;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tank_emissions_toolbox::batch::calculate_batch;
use tank_emissions_toolbox::scenario::{Scenario, ScenarioError};
use tank_emissions_toolbox::tank::{Orientation, Paint, RoofType};
use tank_emissions_toolbox::units::{LengthUnit, PressureDiffUnit, VolumeUnit};

fn denver_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios/denver.toml")
}

#[test]
fn sample_scenario_resolves() {
    let scenario = Scenario::load(denver_path()).expect("load scenario");
    let pairs = scenario.resolve().expect("resolve scenario");
    assert_eq!(pairs.len(), 2);

    let (tank, chunk) = &pairs[0];
    assert_eq!(tank.id, "t-101");
    assert_eq!(
        tank.liquid_height.unwrap().value_in(LengthUnit::Foot).unwrap(),
        dec!(8)
    );
    assert!(matches!(
        tank.roof,
        Some(RoofType::Cone { height: None, slope: Some(s) }) if s == dec!(0.0625)
    ));
    assert_eq!(chunk.mixture.components().len(), 3);
    assert_eq!(chunk.throughput.value_in(VolumeUnit::Gallon).unwrap(), dec!(8450));

    let (tank, chunk) = &pairs[1];
    assert_eq!(tank.orientation, Orientation::Horizontal);
    assert_eq!(tank.roof_paint, Paint::Absorptance(dec!(0.64)));
    assert_eq!(
        tank.vents.breather.value_in(PressureDiffUnit::Psi).unwrap(),
        dec!(0.75)
    );
    assert_eq!(chunk.days_in_period().unwrap(), dec!(181));
}

#[test]
fn sample_scenario_calculates_cleanly() {
    let pairs = Scenario::load(denver_path()).unwrap().resolve().unwrap();
    let report = calculate_batch(pairs.iter().map(|(t, c)| (t, c)));
    assert!(report.is_clean(), "failures: {:?}", report.failures);
    assert_eq!(report.results.len(), 2);
    for result in &report.results {
        assert!(result.standing_loss.value > Decimal::ZERO, "{}", result.tank_id);
        assert!(result.working_loss.value > Decimal::ZERO, "{}", result.tank_id);
    }
}

#[test]
fn vapor_pressure_lookup_by_mixture_id() {
    let scenario = Scenario::load(denver_path()).unwrap();
    let ids: Vec<_> = scenario.mixture_ids().collect();
    assert_eq!(ids, ["btc", "gasoline"]);
    assert!(scenario.mixture("gasoline").is_ok());
    assert!(matches!(
        scenario.mixture("diesel"),
        Err(ScenarioError::UnknownReference { what: "mixture", .. })
    ));
}

#[test]
fn duplicate_tank_ids_are_rejected() {
    let text = r#"
        [[tanks]]
        id = "a"
        orientation = "vertical"
        shell_height = "10 ft"
        diameter = "5 ft"

        [[tanks]]
        id = "a"
        orientation = "vertical"
        shell_height = "12 ft"
        diameter = "6 ft"
    "#;
    let err = Scenario::from_toml_str(text).unwrap().resolve().unwrap_err();
    assert!(matches!(err, ScenarioError::DuplicateId { what: "tank", .. }));
}

#[test]
fn volume_makeup_surfaces_as_mixture_error() {
    let text = r#"
        [[mixtures]]
        id = "v"
        makeup = "volume"
        components = [{ material = "benzene", value = 1 }]
    "#;
    let err = Scenario::from_toml_str(text)
        .unwrap()
        .mixture("v")
        .unwrap_err();
    assert!(matches!(err, ScenarioError::Mixture { .. }));
}
