/// 물질별 증기압 상관식과 기본 물질 카탈로그를 제공한다.
/// 카탈로그 값은 AP-42 7.1장 표 7.1-2(석유류), 7.1-5(석유화학물질)를 참고한 것이며
/// 신고용 계산에는 최신 표로 검증해야 한다.
use log::warn;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{EmissionsError, EmissionsResult};
use crate::quantity::Quantity;
use crate::units::{MolarMassUnit, PressureUnit, TemperatureUnit};

/// 상관식의 유효 온도 범위. 범위 밖이어도 외삽하여 계산한다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min: Quantity,
    pub max: Quantity,
}

/// 순수 물질 증기압 상관식.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VaporPressureCorrelation {
    /// Antoine 식: log10(P[mmHg]) = A − B / (T[°C] + C)
    Petrochemical {
        a: Decimal,
        b: Decimal,
        c: Decimal,
        valid_range: Option<TemperatureRange>,
    },
    /// Clausius–Clapeyron 형: P[psia] = exp(A − B / T[°R])
    PetroleumLiquid { a: Decimal, b: Decimal },
}

/// 계산 한 번 동안 읽기 전용으로 쓰이는 물질 기록.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: String,
    pub name: String,
    /// 석유류는 증기 분자량, 석유화학물질은 순물질 분자량
    pub molecular_weight: Quantity,
    pub correlation: VaporPressureCorrelation,
    /// 작업손실 제품계수 K_P (원유 0.75, 그 외 1.0)
    pub working_loss_product_factor: Decimal,
}

impl Material {
    /// 분자량을 lb/lb-mol 로 돌려준다.
    pub fn molecular_weight_lb_per_lbmol(&self) -> EmissionsResult<Decimal> {
        Ok(self
            .molecular_weight
            .value_in(MolarMassUnit::PoundPerPoundMole)?)
    }

    /// 주어진 온도에서 순수 물질 증기압(psia)을 계산한다.
    pub fn vapor_pressure(&self, temperature: &Quantity) -> EmissionsResult<Quantity> {
        match self.correlation {
            VaporPressureCorrelation::Petrochemical {
                a,
                b,
                c,
                valid_range,
            } => {
                let t_c = temperature.value_in(TemperatureUnit::Celsius)?;
                if let Some(range) = valid_range {
                    let lo = range.min.value_in(TemperatureUnit::Celsius)?;
                    let hi = range.max.value_in(TemperatureUnit::Celsius)?;
                    if t_c < lo || t_c > hi {
                        warn!(
                            "{}: {} °C 는 Antoine 유효범위({} ~ {} °C) 밖이라 외삽합니다",
                            self.id,
                            t_c.round_dp(2),
                            lo,
                            hi
                        );
                    }
                }
                let denom = t_c + c;
                if denom <= Decimal::ZERO {
                    return Err(EmissionsError::domain(
                        "Antoine 증기압",
                        format!("{}: T + C = {denom} ≤ 0", self.id),
                    ));
                }
                let log10_p = a - b / denom;
                let p_mmhg = Decimal::TEN.checked_powd(log10_p).ok_or_else(|| {
                    EmissionsError::domain(
                        "Antoine 증기압",
                        format!("{}: 10^{log10_p} 계산 불가", self.id),
                    )
                })?;
                Ok(Quantity::new(p_mmhg, PressureUnit::MmHg).to(PressureUnit::Psia)?)
            }
            VaporPressureCorrelation::PetroleumLiquid { a, b } => {
                let t_r = temperature.value_in(TemperatureUnit::Rankine)?;
                if t_r <= Decimal::ZERO {
                    return Err(EmissionsError::domain(
                        "석유류 증기압",
                        format!("{}: 절대온도 {t_r} °R ≤ 0", self.id),
                    ));
                }
                let exponent = a - b / t_r;
                let p_psia = exponent.checked_exp().ok_or_else(|| {
                    EmissionsError::domain(
                        "석유류 증기압",
                        format!("{}: exp({exponent}) 계산 불가", self.id),
                    )
                })?;
                Ok(Quantity::new(p_psia, PressureUnit::Psia))
            }
        }
    }
}

#[derive(Debug)]
struct CatalogEntry {
    id: &'static str,
    name: &'static str,
    molecular_weight: Decimal,
    correlation: CatalogCorrelation,
    product_factor: Decimal,
}

#[derive(Debug)]
enum CatalogCorrelation {
    /// (A, B, C, 유효범위 최소 °C, 최대 °C)
    Antoine(Decimal, Decimal, Decimal, Decimal, Decimal),
    /// (A, B)
    Petroleum(Decimal, Decimal),
}

impl CatalogEntry {
    fn to_material(&self) -> Material {
        let correlation = match self.correlation {
            CatalogCorrelation::Antoine(a, b, c, lo, hi) => VaporPressureCorrelation::Petrochemical {
                a,
                b,
                c,
                valid_range: Some(TemperatureRange {
                    min: Quantity::new(lo, TemperatureUnit::Celsius),
                    max: Quantity::new(hi, TemperatureUnit::Celsius),
                }),
            },
            CatalogCorrelation::Petroleum(a, b) => {
                VaporPressureCorrelation::PetroleumLiquid { a, b }
            }
        };
        Material {
            id: self.id.to_string(),
            name: self.name.to_string(),
            molecular_weight: Quantity::new(
                self.molecular_weight,
                MolarMassUnit::PoundPerPoundMole,
            ),
            correlation,
            working_loss_product_factor: self.product_factor,
        }
    }
}

/// 기본 카탈로그 전체를 돌려준다.
pub fn catalog() -> Vec<Material> {
    CATALOG.iter().map(CatalogEntry::to_material).collect()
}

/// id 또는 이름(대소문자 무시)으로 카탈로그 물질을 찾는다.
pub fn find_material(key: &str) -> Option<Material> {
    CATALOG
        .iter()
        .find(|m| m.id.eq_ignore_ascii_case(key) || m.name.eq_ignore_ascii_case(key))
        .map(CatalogEntry::to_material)
}

const fn antoine(
    id: &'static str,
    name: &'static str,
    molecular_weight: Decimal,
    abc: (Decimal, Decimal, Decimal),
    range_c: (Decimal, Decimal),
) -> CatalogEntry {
    CatalogEntry {
        id,
        name,
        molecular_weight,
        correlation: CatalogCorrelation::Antoine(abc.0, abc.1, abc.2, range_c.0, range_c.1),
        product_factor: Decimal::ONE,
    }
}

const fn petroleum(
    id: &'static str,
    name: &'static str,
    molecular_weight: Decimal,
    a: Decimal,
    b: Decimal,
    product_factor: Decimal,
) -> CatalogEntry {
    CatalogEntry {
        id,
        name,
        molecular_weight,
        correlation: CatalogCorrelation::Petroleum(a, b),
        product_factor,
    }
}

const CATALOG: &[CatalogEntry] = &[
    antoine(
        "benzene",
        "Benzene",
        dec!(78.11),
        (dec!(6.906), dec!(1211.0), dec!(220.79)),
        (dec!(8), dec!(103)),
    ),
    antoine(
        "toluene",
        "Toluene",
        dec!(92.13),
        (dec!(7.017), dec!(1377.6), dec!(222.64)),
        (dec!(6), dec!(137)),
    ),
    antoine(
        "cyclohexane",
        "Cyclohexane",
        dec!(84.16),
        (dec!(6.845), dec!(1203.5), dec!(222.86)),
        (dec!(20), dec!(81)),
    ),
    antoine(
        "ethylbenzene",
        "Ethylbenzene",
        dec!(106.17),
        (dec!(6.975), dec!(1424.255), dec!(213.21)),
        (dec!(26), dec!(164)),
    ),
    antoine(
        "o-xylene",
        "o-Xylene",
        dec!(106.17),
        (dec!(6.998), dec!(1474.679), dec!(213.69)),
        (dec!(32), dec!(172)),
    ),
    antoine(
        "n-hexane",
        "n-Hexane",
        dec!(86.17),
        (dec!(6.876), dec!(1171.17), dec!(224.41)),
        (dec!(-25), dec!(92)),
    ),
    antoine(
        "methanol",
        "Methanol",
        dec!(32.04),
        (dec!(7.897), dec!(1474.08), dec!(229.13)),
        (dec!(-14), dec!(65)),
    ),
    petroleum(
        "gasoline-rvp7",
        "Gasoline (RVP 7)",
        dec!(68),
        dec!(11.833),
        dec!(5500.6),
        Decimal::ONE,
    ),
    petroleum(
        "gasoline-rvp10",
        "Gasoline (RVP 10)",
        dec!(66),
        dec!(11.724),
        dec!(5237.3),
        Decimal::ONE,
    ),
    petroleum(
        "gasoline-rvp13",
        "Gasoline (RVP 13)",
        dec!(62),
        dec!(11.644),
        dec!(5043.6),
        Decimal::ONE,
    ),
    petroleum(
        "crude-rvp5",
        "Crude oil (RVP 5)",
        dec!(50),
        dec!(12.82),
        dec!(7261),
        dec!(0.75),
    ),
    petroleum(
        "jet-naphtha",
        "Jet naphtha (JP-4)",
        dec!(80),
        dec!(11.368),
        dec!(5784.3),
        Decimal::ONE,
    ),
    petroleum(
        "jet-kerosene",
        "Jet kerosene",
        dec!(130),
        dec!(12.390),
        dec!(8933),
        Decimal::ONE,
    ),
    petroleum(
        "distillate-no2",
        "Distillate fuel oil No. 2",
        dec!(130),
        dec!(12.101),
        dec!(8907),
        Decimal::ONE,
    ),
    petroleum(
        "residual-no6",
        "Residual oil No. 6",
        dec!(190),
        dec!(10.781),
        dec!(10475.5),
        Decimal::ONE,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lookup_ignores_case() {
        assert!(find_material("BENZENE").is_some());
        assert!(find_material("Crude oil (RVP 5)").is_some());
        assert!(find_material("unobtainium").is_none());
    }

    #[test]
    fn benzene_boils_near_80_c() {
        // 정상 끓는점 80.1 °C 에서 증기압은 1 atm 근처여야 한다
        let benzene = find_material("benzene").unwrap();
        let p = benzene
            .vapor_pressure(&Quantity::new(dec!(80.1), TemperatureUnit::Celsius))
            .unwrap();
        let psia = p.value_in(PressureUnit::Psia).unwrap();
        assert!((psia - dec!(14.696)).abs() < dec!(0.3), "psia={psia}");
    }

    #[test]
    fn gasoline_rvp10_at_60_f() {
        // AP-42 표 7.1-2: 60 °F 에서 약 5.2 psia
        let gasoline = find_material("gasoline-rvp10").unwrap();
        let p = gasoline
            .vapor_pressure(&Quantity::new(dec!(60), TemperatureUnit::Fahrenheit))
            .unwrap();
        assert!((p.value - dec!(5.2)).abs() < dec!(0.1), "p={}", p.value);
    }

    #[test]
    fn extrapolation_still_returns_value() {
        let cyclohexane = find_material("cyclohexane").unwrap();
        let p = cyclohexane
            .vapor_pressure(&Quantity::new(dec!(0), TemperatureUnit::Celsius))
            .unwrap();
        assert!(p.value > Decimal::ZERO);
    }

    #[test]
    fn antoine_pole_is_a_domain_error() {
        let benzene = find_material("benzene").unwrap();
        let err = benzene
            .vapor_pressure(&Quantity::new(dec!(-230), TemperatureUnit::Celsius))
            .unwrap_err();
        assert!(matches!(err, EmissionsError::Calculation(_)));
    }
}
