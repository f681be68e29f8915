//! 계산 한 번(탱크 하나, 보고 기간 하나)에 한정된 메모이제이션.
//!
//! 캐시는 계산을 시작할 때 만들고 끝나면 버린다. 다른 탱크나 기간과 공유하지 않는다.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::EmissionsResult;
use crate::material::Material;
use crate::mixture::{Mixture, MixtureVapor};
use crate::quantity::Quantity;
use crate::units::TemperatureUnit;

#[derive(Debug, Default)]
pub struct CalculationCache {
    material_vapor_pressure: HashMap<(String, Decimal), Quantity>,
    mixture_vapor: HashMap<(String, Decimal), MixtureVapor>,
}

/// 같은 온도가 다른 단위로 들어와도 같은 키가 되도록 °R 로 정규화한다.
fn temperature_key(temperature: &Quantity) -> EmissionsResult<Decimal> {
    Ok(temperature.value_in(TemperatureUnit::Rankine)?.normalize())
}

impl CalculationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 순수 물질 증기압. 같은 (물질, 온도)에 대해서는 처음 계산한 값을 그대로 돌려준다.
    pub fn material_vapor_pressure(
        &mut self,
        material: &Material,
        temperature: &Quantity,
    ) -> EmissionsResult<Quantity> {
        let key = (material.id.clone(), temperature_key(temperature)?);
        if let Some(cached) = self.material_vapor_pressure.get(&key) {
            return Ok(*cached);
        }
        let pressure = material.vapor_pressure(temperature)?;
        self.material_vapor_pressure.insert(key, pressure);
        Ok(pressure)
    }

    /// 혼합물 증기 상태. 증기압과 증기 분자량은 같은 분압 계산 결과를 공유한다.
    pub fn mixture_vapor(
        &mut self,
        mixture: &Mixture,
        temperature: &Quantity,
    ) -> EmissionsResult<MixtureVapor> {
        let key = (mixture.id.clone(), temperature_key(temperature)?);
        if let Some(cached) = self.mixture_vapor.get(&key) {
            return Ok(cached.clone());
        }
        let vapor = mixture.evaluate(temperature, self)?;
        self.mixture_vapor.insert(key, vapor.clone());
        Ok(vapor)
    }

    pub fn len(&self) -> usize {
        self.material_vapor_pressure.len() + self.mixture_vapor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
