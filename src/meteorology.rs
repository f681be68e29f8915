//! 보고 기간 단위의 기상 평균값과 기간 입력.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{CalculationError, EmissionsResult};
use crate::mixture::Mixture;
use crate::quantity::Quantity;
use crate::units::{TemperatureDiffUnit, TemperatureUnit};

/// 기간 평균 기상값. 엔진은 이 값을 그대로 소비하며 다시 평균내지 않는다.
#[derive(Debug, Clone, PartialEq)]
pub struct MeteorologicalChunk {
    pub average_temperature: Quantity,
    /// 일 최저기온의 기간 평균 T_AN
    pub min_temperature: Quantity,
    /// 일 최고기온의 기간 평균 T_AX
    pub max_temperature: Quantity,
    pub wind_speed: Quantity,
    /// 일 수평면 전일사량 I
    pub insolation: Quantity,
    pub atmospheric_pressure: Quantity,
}

impl MeteorologicalChunk {
    /// 평균 대기온도 T_AA = (T_AX + T_AN) / 2, °R.
    pub fn average_ambient_temperature(&self) -> EmissionsResult<Quantity> {
        let max = self.max_temperature.value_in(TemperatureUnit::Rankine)?;
        let min = self.min_temperature.value_in(TemperatureUnit::Rankine)?;
        Ok(Quantity::new((max + min) / dec!(2), TemperatureUnit::Rankine))
    }

    /// 일 대기온도 범위 ΔT_A = T_AX − T_AN, Δ°R.
    pub fn ambient_temperature_range(&self) -> EmissionsResult<Quantity> {
        Ok(self
            .max_temperature
            .checked_sub(&self.min_temperature)?
            .to(TemperatureDiffUnit::Rankine)?)
    }
}

/// 하나의 보고 기간 조각. 서비스 기록과 보고 기간이 겹치는 구간마다 만들어진다.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportingChunk {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub meteorology: MeteorologicalChunk,
    /// 기간 동안의 처리량(체적)
    pub throughput: Quantity,
    pub mixture: Mixture,
}

impl ReportingChunk {
    /// 기간 일수. 시작일과 종료일을 모두 포함한다(1/1 ~ 12/31 = 365일).
    pub fn days_in_period(&self) -> EmissionsResult<Decimal> {
        let days = self.end.signed_duration_since(self.start).num_days() + 1;
        if days <= 0 {
            return Err(CalculationError::InvalidPeriod {
                start: self.start,
                end: self.end,
            }
            .into());
        }
        Ok(Decimal::from(days))
    }
}
