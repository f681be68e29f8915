use std::fmt::Write as _;
use std::path::Path;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::batch::{calculate_batch, BatchReport};
use crate::config::Config;
use crate::conversion::{self, ConversionError};
use crate::error::EmissionsError;
use crate::material::{self, VaporPressureCorrelation};
use crate::mixture::calculate_vapor_pressure_details;
use crate::quantity::{Quantity, QuantityKind, Unit, UnitMismatch};
use crate::scenario::{Scenario, ScenarioError};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] crate::config::ConfigError),
    /// 시나리오 오류
    #[error("시나리오 오류: {0}")]
    Scenario(#[from] ScenarioError),
    /// 단위 변환 오류
    #[error("단위 변환 오류: {0}")]
    Conversion(#[from] ConversionError),
    /// 계산 오류
    #[error("계산 오류: {0}")]
    Emissions(#[from] EmissionsError),
    /// 일부 탱크 계산 실패. 성공한 결과는 이미 출력됨
    #[error("{failed}/{total} 개 탱크 계산 실패")]
    TankFailures { failed: usize, total: usize },
}

impl From<UnitMismatch> for AppError {
    fn from(value: UnitMismatch) -> Self {
        AppError::Emissions(value.into())
    }
}

/// 출력용 단위로 환산해 반올림한 문자열.
fn display(q: &Quantity, unit: impl Into<Unit>, decimal_places: u32) -> Result<String, AppError> {
    let q = q.to(unit)?;
    Ok(Quantity::new(q.value.round_dp(decimal_places), q.unit).to_string())
}

/// 일괄 계산 결과를 탱크별/물질별 표로 만든다.
pub fn render_report(config: &Config, report: &BatchReport) -> Result<String, AppError> {
    let dp = config.decimal_places;
    let mass = config.output.mass;
    let mut out = String::new();
    for result in &report.results {
        let _ = writeln!(
            out,
            "[{}] {} ({} ~ {})",
            result.tank_id, result.tank_name, result.start, result.end
        );
        let standing = display(&result.standing_loss, mass, dp)?;
        let working = display(&result.working_loss, mass, dp)?;
        let total = display(&result.total_loss()?, mass, dp)?;
        let _ = writeln!(out, "  정지 손실 L_S : {standing}");
        let _ = writeln!(out, "  작업 손실 L_W : {working}");
        let _ = writeln!(out, "  총 손실   L_T : {total}");
        for (standing, working) in result
            .standing
            .materials
            .iter()
            .zip(&result.working.materials)
        {
            let total = standing.emission.checked_add(&working.emission)?;
            let _ = writeln!(
                out,
                "    {:<24} 정지 {:>14}  작업 {:>14}  합계 {:>14}",
                standing.material_name,
                display(&standing.emission, mass, dp)?,
                display(&working.emission, mass, dp)?,
                display(&total, mass, dp)?
            );
        }
    }
    for failure in &report.failures {
        let _ = writeln!(
            out,
            "[{}] {} 실패: {}",
            failure.tank_id, failure.tank_name, failure.source
        );
    }
    Ok(out)
}

/// `calculate` 명령. 시나리오 전체를 계산해 출력한다.
pub fn run_calculate(config: &Config, scenario_path: &Path) -> Result<BatchReport, AppError> {
    let pairs = Scenario::load(scenario_path)?.resolve()?;
    let report = calculate_batch(pairs.iter().map(|(tank, chunk)| (tank, chunk)));
    print!("{}", render_report(config, &report)?);
    if !report.is_clean() {
        return Err(AppError::TankFailures {
            failed: report.failures.len(),
            total: pairs.len(),
        });
    }
    Ok(report)
}

/// `vapor-pressure` 명령. 혼합물 하나의 증기압과 증기 조성을 출력한다.
pub fn run_vapor_pressure(
    config: &Config,
    scenario_path: &Path,
    mixture_id: &str,
    temperature: &str,
) -> Result<(), AppError> {
    let dp = config.decimal_places;
    let mixture = Scenario::load(scenario_path)?.mixture(mixture_id)?;
    let temperature = conversion::parse_quantity(QuantityKind::Temperature, temperature)?;
    let vapor = calculate_vapor_pressure_details(&mixture, &temperature)?;

    println!(
        "{} @ {}",
        mixture.name,
        display(&vapor.temperature, config.output.temperature, dp)?
    );
    println!(
        "  증기압 P_VA      : {}",
        display(&vapor.vapor_pressure, config.output.pressure, dp)?
    );
    let mw = vapor.vapor_molecular_weight;
    println!(
        "  증기 분자량 M_V  : {}",
        Quantity::new(mw.value.round_dp(dp), mw.unit)
    );
    for c in &vapor.components {
        println!(
            "    {:<24} 분압 {:>10} psia  기상 몰분율 {:>8}  증기 중량분율 {:>8}",
            c.material_name,
            c.partial_pressure.round_dp(dp),
            c.vapor_mole_fraction.round_dp(dp),
            c.vapor_weight_fraction.round_dp(dp)
        );
    }
    Ok(())
}

/// `materials` 명령. 내장 카탈로그를 출력한다.
pub fn run_materials() -> Result<(), AppError> {
    for m in material::catalog() {
        let kind = match m.correlation {
            VaporPressureCorrelation::Petrochemical { .. } => "Antoine",
            VaporPressureCorrelation::PetroleumLiquid { .. } => "석유류",
        };
        let k_p = if m.working_loss_product_factor == Decimal::ONE {
            String::new()
        } else {
            format!("  K_P={}", m.working_loss_product_factor)
        };
        println!(
            "{:<16} {:<32} {:>16} {kind}{k_p}",
            m.id,
            m.name,
            m.molecular_weight.to_string()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emissions::{EmissionResult, MixtureEmission};
    use crate::error::TankCalculationError;
    use crate::units::MassUnit;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sample_report() -> BatchReport {
        let date = |m, d| NaiveDate::from_ymd_opt(2023, m, d).unwrap();
        let lb = |v| Quantity::new(v, MassUnit::Pound);
        let empty = MixtureEmission {
            mixture_id: "m".into(),
            mixture_name: "m".into(),
            materials: Vec::new(),
        };
        BatchReport {
            results: vec![EmissionResult {
                tank_id: "t-1".into(),
                tank_name: "Tank 1".into(),
                start: date(1, 1),
                end: date(12, 31),
                standing_loss: lb(dec!(10.5)),
                working_loss: lb(dec!(2.25)),
                standing: empty.clone(),
                working: empty,
            }],
            failures: vec![TankCalculationError {
                tank_id: "t-2".into(),
                tank_name: "Tank 2".into(),
                source: EmissionsError::MissingData {
                    step: "유효 직경",
                    field: "diameter",
                },
            }],
        }
    }

    #[test]
    fn report_lists_results_and_failures() {
        let text = render_report(&Config::default(), &sample_report()).unwrap();
        assert!(text.contains("[t-1] Tank 1"));
        assert!(text.contains("12.75 lb"));
        assert!(text.contains("[t-2] Tank 2 실패"));
    }

    #[test]
    fn report_uses_configured_mass_unit() {
        let mut config = Config::default();
        config.output.mass = MassUnit::Kilogram;
        let text = render_report(&config, &sample_report()).unwrap();
        assert!(text.contains(" kg"));
        assert!(!text.contains(" lb"));
    }
}
