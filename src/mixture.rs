//! 혼합물 증기압/증기 분자량 계산.
//!
//! 몰분율은 생성 시 한 번 계산해 고정하고, 온도별 분압과 증기 조성은
//! [`CalculationCache`]를 통해 온도 키로 한 번만 계산한다. Raoult 법칙을 가정한다.

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cache::CalculationCache;
use crate::error::{CalculationError, EmissionsError, EmissionsResult};
use crate::material::Material;
use crate::quantity::Quantity;
use crate::units::{MolarMassUnit, PressureUnit, TemperatureUnit};

/// 조성값의 기준. 혼합물 전체가 하나의 기준을 공유한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MakeupType {
    Weight,
    Volume,
    MolePercent,
}

/// 혼합물 구성 성분. 몰수와 몰분율은 [`Mixture::new`]에서 채워진다.
#[derive(Debug, Clone, PartialEq)]
pub struct MixtureComponent {
    pub material: Material,
    pub makeup_value: Decimal,
    moles: Decimal,
    mole_fraction: Decimal,
}

impl MixtureComponent {
    pub fn moles(&self) -> Decimal {
        self.moles
    }

    pub fn mole_fraction(&self) -> Decimal {
        self.mole_fraction
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mixture {
    pub id: String,
    pub name: String,
    pub makeup_type: MakeupType,
    components: Vec<MixtureComponent>,
}

/// 특정 온도에서 한 성분의 증기 상태.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentVapor {
    pub material_id: String,
    pub material_name: String,
    /// 순수 물질 증기압(psia)
    pub pure_vapor_pressure: Decimal,
    /// 분압(psia) = 액상 몰분율 × 순수 증기압
    pub partial_pressure: Decimal,
    /// 기상 몰분율 = 분압 / 혼합물 증기압
    pub vapor_mole_fraction: Decimal,
    /// 증기 분자량 기여분(lb/lb-mol)
    pub molecular_weight_contribution: Decimal,
    /// 증기 중량분율. 배출량 배분에 쓰인다.
    pub vapor_weight_fraction: Decimal,
}

/// 특정 온도에서 혼합물의 증기 상태.
#[derive(Debug, Clone, PartialEq)]
pub struct MixtureVapor {
    pub temperature: Quantity,
    pub vapor_pressure: Quantity,
    pub vapor_molecular_weight: Quantity,
    pub components: Vec<ComponentVapor>,
}

impl Mixture {
    /// 조성값으로부터 몰분율을 계산해 혼합물을 만든다.
    ///
    /// 체적 기준은 밀도 정보가 없어 몰분율을 구할 수 없으므로
    /// [`CalculationError::UnsupportedMakeupType`]으로 실패한다.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        makeup_type: MakeupType,
        parts: Vec<(Material, Decimal)>,
    ) -> EmissionsResult<Self> {
        const STEP: &str = "혼합물 몰분율";
        if parts.is_empty() {
            return Err(EmissionsError::missing(STEP, "components"));
        }
        if let Some((material, value)) = parts.iter().find(|(_, v)| v.is_sign_negative()) {
            return Err(EmissionsError::domain(
                STEP,
                format!("{}: 조성값 {value} 이 음수", material.id),
            ));
        }

        let moles: Vec<Decimal> = match makeup_type {
            MakeupType::Weight => parts
                .iter()
                .map(|(material, weight)| {
                    let mw = material.molecular_weight_lb_per_lbmol()?;
                    if mw <= Decimal::ZERO {
                        return Err(EmissionsError::domain(
                            STEP,
                            format!("{}: 분자량 {mw} ≤ 0", material.id),
                        ));
                    }
                    Ok(*weight / mw)
                })
                .collect::<EmissionsResult<_>>()?,
            MakeupType::MolePercent => parts.iter().map(|(_, pct)| *pct).collect(),
            MakeupType::Volume => {
                return Err(CalculationError::UnsupportedMakeupType(makeup_type).into())
            }
        };

        let total: Decimal = moles.iter().copied().sum();
        if total.is_zero() {
            return Err(EmissionsError::missing(STEP, "makeup values"));
        }

        let components = parts
            .into_iter()
            .zip(moles)
            .map(|((material, makeup_value), moles)| MixtureComponent {
                material,
                makeup_value,
                moles,
                mole_fraction: moles / total,
            })
            .collect();

        Ok(Self {
            id: id.into(),
            name: name.into(),
            makeup_type,
            components,
        })
    }

    pub fn components(&self) -> &[MixtureComponent] {
        &self.components
    }

    /// 캐시를 거치지 않고 주어진 온도의 증기 상태를 계산한다.
    /// 순수 물질 증기압은 `cache`에서 가져온다.
    pub(crate) fn evaluate(
        &self,
        temperature: &Quantity,
        cache: &mut CalculationCache,
    ) -> EmissionsResult<MixtureVapor> {
        const STEP: &str = "혼합물 증기압";
        let t_r = temperature.value_in(TemperatureUnit::Rankine)?;

        let mut partials = Vec::with_capacity(self.components.len());
        for component in &self.components {
            let pure = cache
                .material_vapor_pressure(&component.material, temperature)?
                .value_in(PressureUnit::Psia)?;
            partials.push((pure, component.mole_fraction * pure));
        }
        let vapor_pressure: Decimal = partials.iter().map(|(_, partial)| *partial).sum();
        if vapor_pressure <= Decimal::ZERO {
            return Err(EmissionsError::domain(
                STEP,
                format!("{}: {t_r} °R 에서 증기압이 0", self.id),
            ));
        }

        // 기상 몰분율로 분자량을 재가중한다(액상 몰분율이 아님)
        let mut contributions = Vec::with_capacity(self.components.len());
        for (component, (_, partial)) in self.components.iter().zip(&partials) {
            let mw = component.material.molecular_weight_lb_per_lbmol()?;
            contributions.push(mw * *partial / vapor_pressure);
        }
        let vapor_mw: Decimal = contributions.iter().copied().sum();
        if vapor_mw <= Decimal::ZERO {
            return Err(EmissionsError::domain(
                STEP,
                format!("{}: 증기 분자량이 0", self.id),
            ));
        }

        let components = self
            .components
            .iter()
            .zip(partials)
            .zip(contributions)
            .map(|((component, (pure, partial)), contribution)| ComponentVapor {
                material_id: component.material.id.clone(),
                material_name: component.material.name.clone(),
                pure_vapor_pressure: pure,
                partial_pressure: partial,
                vapor_mole_fraction: partial / vapor_pressure,
                molecular_weight_contribution: contribution,
                vapor_weight_fraction: contribution / vapor_mw,
            })
            .collect();

        debug!(
            "{} @ {} °R: P_VA={} psia, M_V={}",
            self.id,
            t_r.round_dp(2),
            vapor_pressure.round_dp(6),
            vapor_mw.round_dp(4)
        );

        Ok(MixtureVapor {
            temperature: *temperature,
            vapor_pressure: Quantity::new(vapor_pressure, PressureUnit::Psia),
            vapor_molecular_weight: Quantity::new(vapor_mw, MolarMassUnit::PoundPerPoundMole),
            components,
        })
    }
}

/// 혼합물 증기압을 계산한다. 진단/시험용 독립 진입점이며 매 호출마다 새 캐시를 쓴다.
pub fn calculate_vapor_pressure(
    mixture: &Mixture,
    temperature: &Quantity,
) -> EmissionsResult<Quantity> {
    let mut cache = CalculationCache::new();
    Ok(cache.mixture_vapor(mixture, temperature)?.vapor_pressure)
}

/// 혼합물 증기 분자량을 계산한다.
pub fn calculate_vapor_molecular_weight(
    mixture: &Mixture,
    temperature: &Quantity,
) -> EmissionsResult<Quantity> {
    let mut cache = CalculationCache::new();
    Ok(cache.mixture_vapor(mixture, temperature)?.vapor_molecular_weight)
}

/// 성분별 분압과 증기 조성까지 포함한 전체 증기 상태.
pub fn calculate_vapor_pressure_details(
    mixture: &Mixture,
    temperature: &Quantity,
) -> EmissionsResult<MixtureVapor> {
    CalculationCache::new().mixture_vapor(mixture, temperature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::find_material;
    use rust_decimal_macros::dec;

    fn fixture_mixture() -> Mixture {
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

    #[test]
    fn weight_basis_mole_fractions_sum_to_one() {
        let mixture = fixture_mixture();
        let sum: Decimal = mixture.components().iter().map(|c| c.mole_fraction()).sum();
        assert!((sum - Decimal::ONE).abs() < dec!(0.000001));
        // 벤젠이 가장 가벼워 몰분율이 중량분율보다 크다
        assert!(mixture.components()[0].mole_fraction() > dec!(0.8868));
    }

    #[test]
    fn mole_percent_is_used_directly() {
        let mixture = Mixture::new(
            "mp",
            "mole percent",
            MakeupType::MolePercent,
            vec![
                (find_material("benzene").unwrap(), dec!(25)),
                (find_material("toluene").unwrap(), dec!(75)),
            ],
        )
        .unwrap();
        assert_eq!(mixture.components()[0].mole_fraction(), dec!(0.25));
        assert_eq!(mixture.components()[1].mole_fraction(), dec!(0.75));
    }

    #[test]
    fn volume_basis_is_rejected() {
        let err = Mixture::new(
            "vol",
            "volume",
            MakeupType::Volume,
            vec![(find_material("benzene").unwrap(), dec!(100))],
        )
        .unwrap_err();
        assert_eq!(
            err,
            EmissionsError::Calculation(CalculationError::UnsupportedMakeupType(
                MakeupType::Volume
            ))
        );
    }

    #[test]
    fn empty_mixture_is_missing_data() {
        let err = Mixture::new("empty", "empty", MakeupType::Weight, vec![]).unwrap_err();
        assert!(matches!(err, EmissionsError::MissingData { .. }));
    }

    #[test]
    fn vapor_weight_fractions_sum_to_one() {
        let mixture = fixture_mixture();
        let mut cache = CalculationCache::new();
        let vapor = cache
            .mixture_vapor(&mixture, &Quantity::new(dec!(60), TemperatureUnit::Fahrenheit))
            .unwrap();
        let sum: Decimal = vapor.components.iter().map(|c| c.vapor_weight_fraction).sum();
        assert!((sum - Decimal::ONE).abs() < dec!(0.000001));
        let partials: Decimal = vapor.components.iter().map(|c| c.partial_pressure).sum();
        assert_eq!(partials, vapor.vapor_pressure.value);
    }

    #[test]
    fn vapor_molecular_weight_lies_between_components() {
        let mixture = fixture_mixture();
        let t = Quantity::new(dec!(60), TemperatureUnit::Fahrenheit);
        let mw = calculate_vapor_molecular_weight(&mixture, &t)
            .unwrap()
            .value_in(MolarMassUnit::PoundPerPoundMole)
            .unwrap();
        assert!(mw > dec!(78.11) && mw < dec!(92.13), "mw={mw}");
    }
}
