//! 고정지붕 탱크 배출량 계산 (AP-42 7장).
//!
//! 순서: 형상/기상 → 평균 온도 → 혼합물 증기압·분자량 → 정지 손실 → 작업 손실 → 성분별 배분.
//! 계산기 하나는 (탱크, 보고 기간) 하나만 담당하며 캐시도 그 안에서만 산다.

pub mod result;
pub mod standing;
pub mod working;

pub use result::{EmissionResult, MaterialEmission, MixtureEmission};
pub use standing::{StandingLossFactors, VaporSpace, IDEAL_GAS_CONSTANT};
pub use working::{turnover_factor, vent_setting_correction, WorkingLossFactors};

use log::info;

use crate::cache::CalculationCache;
use crate::error::{EmissionsResult, TankCalculationError};
use crate::geometry::TankShim;
use crate::meteorology::ReportingChunk;
use crate::quantity::Quantity;
use crate::tank::TankGeometry;

pub struct FixedRoofEmissions<'a> {
    tank: &'a TankGeometry,
    chunk: &'a ReportingChunk,
    shim: TankShim<'a>,
    cache: CalculationCache,
    standing: Option<StandingLossFactors>,
    working: Option<WorkingLossFactors>,
}

impl<'a> FixedRoofEmissions<'a> {
    pub fn new(tank: &'a TankGeometry, chunk: &'a ReportingChunk) -> Self {
        Self {
            tank,
            chunk,
            shim: TankShim::new(tank),
            cache: CalculationCache::new(),
            standing: None,
            working: None,
        }
    }

    pub fn tank(&self) -> &'a TankGeometry {
        self.tank
    }

    pub fn shim(&self) -> &TankShim<'a> {
        &self.shim
    }

    /// 주어진 온도에서의 혼합물 증기압. 이 계산의 캐시를 공유한다.
    pub fn mixture_vapor_pressure(&mut self, temperature: &Quantity) -> EmissionsResult<Quantity> {
        Ok(self
            .cache
            .mixture_vapor(&self.chunk.mixture, temperature)?
            .vapor_pressure)
    }

    /// 정지/작업 손실을 계산하고 표면온도의 증기 중량분율로 성분별 배분한다.
    pub fn calculate(mut self) -> EmissionsResult<EmissionResult> {
        let standing = self.standing_loss_factors()?;
        let working = self.working_loss_factors()?;
        let chunk = self.chunk;
        let vapor = self
            .cache
            .mixture_vapor(&chunk.mixture, &standing.liquid_surface_temperature)?;

        let mixture = &chunk.mixture;
        let standing_emission = MixtureEmission::apportion(
            &mixture.id,
            &mixture.name,
            &vapor,
            &standing.standing_loss,
        )?;
        let working_emission =
            MixtureEmission::apportion(&mixture.id, &mixture.name, &vapor, &working.working_loss)?;

        info!(
            "{} [{} ~ {}]: L_S={} lb, L_W={} lb",
            self.tank.id,
            chunk.start,
            chunk.end,
            standing.standing_loss.value.round_dp(4),
            working.working_loss.value.round_dp(4)
        );

        Ok(EmissionResult {
            tank_id: self.tank.id.clone(),
            tank_name: self.tank.name.clone(),
            start: chunk.start,
            end: chunk.end,
            standing_loss: standing.standing_loss,
            working_loss: working.working_loss,
            standing: standing_emission,
            working: working_emission,
        })
    }
}

/// 탱크 하나, 보고 기간 하나의 총 배출량을 계산한다.
pub fn calculate_total_emissions(
    tank: &TankGeometry,
    chunk: &ReportingChunk,
) -> Result<EmissionResult, TankCalculationError> {
    FixedRoofEmissions::new(tank, chunk)
        .calculate()
        .map_err(|source| TankCalculationError {
            tank_id: tank.id.clone(),
            tank_name: tank.name.clone(),
            source,
        })
}
