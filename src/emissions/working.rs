//! 작업(입출하) 손실 L_W. 증기밀도 W_V는 정지 손실 계산 결과를 재사용한다.

use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::FixedRoofEmissions;
use crate::error::{EmissionsError, EmissionsResult};
use crate::quantity::Quantity;
use crate::units::{LengthUnit, MassUnit, PressureDiffUnit, PressureUnit, VolumeUnit};

/// ft³/bbl, 액위 상승량 식의 환산계수
pub const CUBIC_FEET_PER_BARREL: Decimal = dec!(5.614);
/// 이 회전수 이하에서는 K_N = 1
pub const TURNOVER_THRESHOLD: Decimal = dec!(36);
/// 이 범위 안의 통기 설정은 대기 개방으로 본다(psig)
pub const VENT_SETTING_TOLERANCE: Decimal = dec!(0.03);

#[derive(Debug, Clone, PartialEq)]
pub struct WorkingLossFactors {
    /// ΣH_QI, 기간 동안의 액위 상승 합
    pub liquid_level_increase: Quantity,
    /// V_Q
    pub net_throughput: Quantity,
    /// N, 연간 회전수
    pub turnovers: Decimal,
    /// K_N
    pub turnover_factor: Decimal,
    /// K_P
    pub product_factor: Decimal,
    /// K_B
    pub vent_correction_factor: Decimal,
    /// L_W
    pub working_loss: Quantity,
}

/// 회전계수 K_N.
pub fn turnover_factor(turnovers: Decimal) -> Decimal {
    if turnovers <= TURNOVER_THRESHOLD {
        Decimal::ONE
    } else {
        (dec!(180) + turnovers) / (dec!(6) * turnovers)
    }
}

/// 통기 설정 보정계수 K_B. 정상 운전 게이지압 P_I는 0으로 둔다.
///
/// - `breather`, `vacuum`: psig
/// - `atmospheric`, `vapor_pressure`: psia
pub fn vent_setting_correction(
    breather: Decimal,
    vacuum: Decimal,
    atmospheric: Decimal,
    vapor_pressure: Decimal,
    k_n: Decimal,
) -> EmissionsResult<Decimal> {
    const STEP: &str = "통기 설정 보정계수";
    if breather.abs() <= VENT_SETTING_TOLERANCE && vacuum.abs() <= VENT_SETTING_TOLERANCE {
        return Ok(Decimal::ONE);
    }
    let p_i = Decimal::ZERO;
    let vented = breather + atmospheric;
    if atmospheric + p_i <= Decimal::ZERO || k_n <= Decimal::ZERO {
        return Err(EmissionsError::domain(STEP, "P_I + P_A ≤ 0"));
    }
    // 식 1-40: 통기 설정 때문에 손실이 줄어드는지 판정
    let gate = k_n * vented / (p_i + atmospheric);
    if gate <= Decimal::ONE {
        return Ok(Decimal::ONE);
    }
    // 식 1-41
    let denom = vented - vapor_pressure;
    if denom <= Decimal::ZERO {
        return Err(EmissionsError::domain(
            STEP,
            format!("P_BP + P_A − P_VI = {denom} ≤ 0"),
        ));
    }
    Ok(((p_i + atmospheric) / k_n - vapor_pressure) / denom)
}

impl<'a> FixedRoofEmissions<'a> {
    /// 작업 손실 식 전체를 계산한다.
    pub fn working_loss_factors(&mut self) -> EmissionsResult<WorkingLossFactors> {
        if let Some(factors) = &self.working {
            return Ok(factors.clone());
        }
        let factors = self.compute_working()?;
        self.working = Some(factors.clone());
        Ok(factors)
    }

    fn compute_working(&mut self) -> EmissionsResult<WorkingLossFactors> {
        let standing = self.standing_loss_factors()?;
        let tank = self.tank;
        let chunk = self.chunk;

        // 1–2. 액위 상승량과 순 처리량
        let throughput_bbl = chunk.throughput.value_in(VolumeUnit::Barrel)?;
        let area = self.shim.cross_section_ft2()?;
        let delta_h = CUBIC_FEET_PER_BARREL * throughput_bbl / area;
        let v_q = delta_h * area;

        // 3. 회전수와 회전계수
        let turnovers = match tank.turnovers {
            Some(n) => n,
            None => {
                let range = self.shim.liquid_height_range()?.value_in(LengthUnit::Foot)?;
                let days = chunk.days_in_period()?;
                delta_h * dec!(365) / days / range
            }
        };
        let k_n = turnover_factor(turnovers);

        // 4. 제품계수는 첫 성분 값을 쓴다
        let k_p = chunk
            .mixture
            .components()
            .first()
            .map(|c| c.material.working_loss_product_factor)
            .ok_or_else(|| EmissionsError::missing("제품계수", "mixture components"))?;

        // 5. 통기 설정 보정
        let k_b = vent_setting_correction(
            tank.vents.breather.value_in(PressureDiffUnit::Psi)?,
            tank.vents.vacuum.value_in(PressureDiffUnit::Psi)?,
            chunk.meteorology.atmospheric_pressure.value_in(PressureUnit::Psia)?,
            standing.vapor_pressure.value_in(PressureUnit::Psia)?,
            k_n,
        )?;

        // 6.
        let l_w = v_q * k_n * k_p * standing.vapor_density * k_b;

        debug!(
            "{}: ΣH_QI={} ft V_Q={} ft³ N={} K_N={} K_P={} K_B={} L_W={} lb",
            tank.id,
            delta_h.round_dp(4),
            v_q.round_dp(4),
            turnovers.round_dp(3),
            k_n.round_dp(6),
            k_p,
            k_b.round_dp(6),
            l_w.round_dp(4)
        );

        Ok(WorkingLossFactors {
            liquid_level_increase: Quantity::new(delta_h, LengthUnit::Foot),
            net_throughput: Quantity::new(v_q, VolumeUnit::CubicFoot),
            turnovers,
            turnover_factor: k_n,
            product_factor: k_p,
            vent_correction_factor: k_b,
            working_loss: Quantity::new(l_w, MassUnit::Pound),
        })
    }
}
