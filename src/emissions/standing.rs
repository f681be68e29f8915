//! 정지(호흡) 손실 L_S. AP-42 7.1.3.1 절의 식 순서를 따른다.

use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::FixedRoofEmissions;
use crate::error::{EmissionsError, EmissionsResult};
use crate::quantity::Quantity;
use crate::tank::Insulation;
use crate::units::{
    InsolationUnit, LengthUnit, MassUnit, MolarMassUnit, PressureDiffUnit, PressureUnit,
    TemperatureDiffUnit, TemperatureUnit, VolumeUnit,
};

/// 이상기체 상수 R, psia·ft³/(lb-mol·°R)
pub const IDEAL_GAS_CONSTANT: Decimal = dec!(10.731);

/// 증기공간 관련 값. 지하 탱크는 계산하지 않는다.
#[derive(Debug, Clone, PartialEq)]
pub struct VaporSpace {
    /// H_VO
    pub outage: Quantity,
    /// V_V
    pub volume: Quantity,
    /// K_S
    pub saturation_factor: Decimal,
}

/// 정지 손실 계산의 중간값 전체.
#[derive(Debug, Clone, PartialEq)]
pub struct StandingLossFactors {
    /// T_AA
    pub ambient_temperature: Quantity,
    /// T_B
    pub bulk_temperature: Quantity,
    /// T_LA
    pub liquid_surface_temperature: Quantity,
    /// P_VA (T_LA 기준)
    pub vapor_pressure: Quantity,
    /// M_V (T_LA 기준)
    pub vapor_molecular_weight: Quantity,
    /// T_V
    pub vapor_temperature: Quantity,
    /// W_V, lb/ft³
    pub vapor_density: Decimal,
    /// ΔT_A
    pub ambient_temperature_range: Quantity,
    /// ΔT_V
    pub vapor_temperature_range: Quantity,
    /// ΔP_V
    pub vapor_pressure_range: Quantity,
    /// ΔP_B
    pub breather_vent_range: Quantity,
    /// K_E
    pub expansion_factor: Decimal,
    pub vapor_space: Option<VaporSpace>,
    /// L_S
    pub standing_loss: Quantity,
}

/// 온도식에 들어가는 일사 관련 입력.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SolarTerms {
    pub alpha_shell: Decimal,
    pub alpha_roof: Decimal,
    pub alpha_average: Decimal,
    /// I, Btu/(ft²·day)
    pub insolation: Decimal,
    /// H_S / D
    pub height_to_diameter: Decimal,
}

/// 액 벌크 온도 T_B = T_AA + 0.003·α_S·I.
pub(crate) fn bulk_temperature(t_aa: Decimal, solar: &SolarTerms) -> Decimal {
    t_aa + dec!(0.003) * solar.alpha_shell * solar.insolation
}

/// 일평균 액 표면온도 T_LA.
pub(crate) fn liquid_surface_temperature(
    insulation: Insulation,
    t_aa: Decimal,
    t_b: Decimal,
    solar: &SolarTerms,
) -> Decimal {
    let i = solar.insolation;
    match insulation {
        Insulation::None => {
            let hd = solar.height_to_diameter;
            let denom = dec!(4.4) * hd + dec!(1.9);
            (dec!(0.5) - dec!(0.8) / denom) * t_aa
                + (dec!(0.5) + dec!(0.8) / denom) * t_b
                + (dec!(0.021) * solar.alpha_roof * i + dec!(0.013) * hd * solar.alpha_shell * i)
                    / denom
        }
        Insulation::Partial => {
            dec!(0.3) * t_aa + dec!(0.7) * t_b + dec!(0.005) * solar.alpha_average * i
        }
        Insulation::Full => t_b,
    }
}

/// 평균 증기온도 T_V.
pub(crate) fn vapor_temperature(
    insulation: Insulation,
    t_aa: Decimal,
    t_b: Decimal,
    solar: &SolarTerms,
) -> Decimal {
    let i = solar.insolation;
    match insulation {
        Insulation::None => {
            let hd = solar.height_to_diameter;
            let denom = dec!(2.2) * hd + dec!(1.9);
            ((dec!(2.2) * hd + dec!(1.1)) * t_aa
                + dec!(0.8) * t_b
                + dec!(0.021) * solar.alpha_roof * i
                + dec!(0.013) * hd * solar.alpha_shell * i)
                / denom
        }
        Insulation::Partial => {
            dec!(0.6) * t_aa + dec!(0.4) * t_b + dec!(0.01) * solar.alpha_roof * i
        }
        Insulation::Full => t_b,
    }
}

/// 일 증기온도 범위 ΔT_V. 완전 단열이면 0.
pub(crate) fn vapor_temperature_range(
    insulation: Insulation,
    delta_t_a: Decimal,
    solar: &SolarTerms,
) -> Decimal {
    let i = solar.insolation;
    match insulation {
        Insulation::None => {
            let hd = solar.height_to_diameter;
            let denom = dec!(2.2) * hd + dec!(1.9);
            (Decimal::ONE - dec!(0.8) / denom) * delta_t_a
                + (dec!(0.042) * solar.alpha_roof * i + dec!(0.026) * hd * solar.alpha_shell * i)
                    / denom
        }
        Insulation::Partial => dec!(0.6) * delta_t_a + dec!(0.02) * solar.alpha_roof * i,
        Insulation::Full => Decimal::ZERO,
    }
}

impl<'a> FixedRoofEmissions<'a> {
    fn solar_terms(&self) -> EmissionsResult<SolarTerms> {
        Ok(SolarTerms {
            alpha_shell: self.tank.shell_paint.solar_absorptance(),
            alpha_roof: self.tank.roof_paint.solar_absorptance(),
            alpha_average: self.tank.average_absorptance(),
            insolation: self
                .chunk
                .meteorology
                .insolation
                .value_in(InsolationUnit::BtuPerSquareFootDay)?,
            height_to_diameter: self.shim.height_to_diameter()?,
        })
    }

    /// 정지 손실 식 전체를 순서대로 계산한다. 결과는 이 계산 안에서 재사용된다.
    pub fn standing_loss_factors(&mut self) -> EmissionsResult<StandingLossFactors> {
        if let Some(factors) = &self.standing {
            return Ok(factors.clone());
        }
        let factors = self.compute_standing()?;
        self.standing = Some(factors.clone());
        Ok(factors)
    }

    fn compute_standing(&mut self) -> EmissionsResult<StandingLossFactors> {
        let tank = self.tank;
        let chunk = self.chunk;
        let met = &chunk.meteorology;
        let insulation = tank.insulation;
        let solar = self.solar_terms()?;

        // 1–3. 온도
        let t_aa = met
            .average_ambient_temperature()?
            .value_in(TemperatureUnit::Rankine)?;
        let t_b = bulk_temperature(t_aa, &solar);
        let t_la = liquid_surface_temperature(insulation, t_aa, t_b, &solar);
        let t_la_q = Quantity::new(t_la, TemperatureUnit::Rankine);

        // 4. 표면온도에서의 혼합물 증기압/분자량
        let vapor = self.cache.mixture_vapor(&chunk.mixture, &t_la_q)?;
        let p_va = vapor.vapor_pressure.value_in(PressureUnit::Psia)?;
        let m_v = vapor
            .vapor_molecular_weight
            .value_in(MolarMassUnit::PoundPerPoundMole)?;

        // 5–6. 증기온도, 증기밀도
        let t_v = vapor_temperature(insulation, t_aa, t_b, &solar);
        if t_v <= Decimal::ZERO {
            return Err(EmissionsError::domain("증기밀도", format!("T_V = {t_v} °R ≤ 0")));
        }
        let w_v = m_v * p_va / (IDEAL_GAS_CONSTANT * t_v);

        // 8. 팽창계수
        let delta_t_a = met
            .ambient_temperature_range()?
            .value_in(TemperatureDiffUnit::Rankine)?;
        let delta_t_v = vapor_temperature_range(insulation, delta_t_a, &solar);
        let delta_p_v = match insulation {
            Insulation::Full => Decimal::ZERO,
            Insulation::None | Insulation::Partial => {
                let swing = dec!(0.25) * delta_t_v;
                let high = Quantity::new(t_la + swing, TemperatureUnit::Rankine);
                let low = Quantity::new(t_la - swing, TemperatureUnit::Rankine);
                let p_high = self
                    .cache
                    .mixture_vapor(&chunk.mixture, &high)?
                    .vapor_pressure
                    .value_in(PressureUnit::Psia)?;
                let p_low = self
                    .cache
                    .mixture_vapor(&chunk.mixture, &low)?
                    .vapor_pressure
                    .value_in(PressureUnit::Psia)?;
                p_high - p_low
            }
        };
        let delta_p_b = tank
            .vents
            .breather
            .checked_sub(&tank.vents.vacuum)?
            .value_in(PressureDiffUnit::Psi)?;
        let p_a = met.atmospheric_pressure.value_in(PressureUnit::Psia)?;
        if p_a <= p_va {
            return Err(EmissionsError::domain(
                "증기공간 팽창계수",
                format!("대기압 {p_a} psia ≤ 증기압 {p_va} psia (비등 상태)"),
            ));
        }
        let mut k_e = delta_t_v / t_la + (delta_p_v - delta_p_b) / (p_a - p_va);
        if k_e < Decimal::ZERO {
            debug!("{}: K_E={} < 0, 정지 손실 없음으로 처리", tank.id, k_e.round_dp(6));
            k_e = Decimal::ZERO;
        }

        // 7, 9–10. 증기공간과 포화계수, 정지 손실
        let (vapor_space, standing_loss) = if tank.underground {
            debug!("{}: 지하 탱크, 정지 손실 0", tank.id);
            (None, Decimal::ZERO)
        } else {
            let h_vo = self.shim.vapor_space_outage()?;
            let v_v = self.shim.vapor_space_volume()?;
            let k_s = Decimal::ONE
                / (Decimal::ONE + dec!(0.053) * p_va * h_vo.value_in(LengthUnit::Foot)?);
            let days = chunk.days_in_period()?;
            let l_s = days * v_v.value_in(VolumeUnit::CubicFoot)? * w_v * k_e * k_s;
            (
                Some(VaporSpace {
                    outage: h_vo,
                    volume: v_v,
                    saturation_factor: k_s,
                }),
                l_s,
            )
        };

        debug!(
            "{}: T_AA={} T_B={} T_LA={} T_V={} W_V={} K_E={} L_S={} lb",
            tank.id,
            t_aa.round_dp(3),
            t_b.round_dp(3),
            t_la.round_dp(3),
            t_v.round_dp(3),
            w_v.round_dp(6),
            k_e.round_dp(6),
            standing_loss.round_dp(4)
        );

        Ok(StandingLossFactors {
            ambient_temperature: Quantity::new(t_aa, TemperatureUnit::Rankine),
            bulk_temperature: Quantity::new(t_b, TemperatureUnit::Rankine),
            liquid_surface_temperature: t_la_q,
            vapor_pressure: vapor.vapor_pressure,
            vapor_molecular_weight: vapor.vapor_molecular_weight,
            vapor_temperature: Quantity::new(t_v, TemperatureUnit::Rankine),
            vapor_density: w_v,
            ambient_temperature_range: Quantity::new(delta_t_a, TemperatureDiffUnit::Rankine),
            vapor_temperature_range: Quantity::new(delta_t_v, TemperatureDiffUnit::Rankine),
            vapor_pressure_range: Quantity::new(delta_p_v, PressureDiffUnit::Psi),
            breather_vent_range: Quantity::new(delta_p_b, PressureDiffUnit::Psi),
            expansion_factor: k_e,
            vapor_space,
            standing_loss: Quantity::new(standing_loss, MassUnit::Pound),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solar() -> SolarTerms {
        SolarTerms {
            alpha_shell: dec!(0.25),
            alpha_roof: dec!(0.25),
            alpha_average: dec!(0.25),
            insolation: dec!(1568),
            height_to_diameter: dec!(2),
        }
    }

    #[test]
    fn bulk_temperature_adds_solar_gain() {
        assert_eq!(bulk_temperature(dec!(510), &solar()), dec!(511.176));
    }

    #[test]
    fn full_insulation_collapses_to_bulk() {
        let s = solar();
        let t_b = bulk_temperature(dec!(510), &s);
        assert_eq!(liquid_surface_temperature(Insulation::Full, dec!(510), t_b, &s), t_b);
        assert_eq!(vapor_temperature(Insulation::Full, dec!(510), t_b, &s), t_b);
        assert_eq!(vapor_temperature_range(Insulation::Full, dec!(28), &s), Decimal::ZERO);
    }

    #[test]
    fn uninsulated_surface_is_warmer_than_ambient() {
        let s = solar();
        let t_b = bulk_temperature(dec!(510), &s);
        let t_la = liquid_surface_temperature(Insulation::None, dec!(510), t_b, &s);
        assert!(t_la > dec!(510));
        let t_v = vapor_temperature(Insulation::None, dec!(510), t_b, &s);
        assert!(t_v > t_la);
    }

    #[test]
    fn partial_insulation_weights() {
        let s = solar();
        let t_la = liquid_surface_temperature(Insulation::Partial, dec!(500), dec!(510), &s);
        // 0.3·500 + 0.7·510 + 0.005·0.25·1568
        assert_eq!(t_la, dec!(508.96));
        let dt_v = vapor_temperature_range(Insulation::Partial, dec!(20), &s);
        assert_eq!(dt_v, dec!(19.84));
    }
}
