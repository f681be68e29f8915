use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::EmissionsResult;
use crate::mixture::MixtureVapor;
use crate::quantity::Quantity;
use crate::units::MassUnit;

/// 한 물질에 배분된 배출량.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialEmission {
    pub material_id: String,
    pub material_name: String,
    pub vapor_weight_fraction: Decimal,
    pub emission: Quantity,
}

/// 손실 한 종류(정지/작업)의 물질별 배분 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct MixtureEmission {
    pub mixture_id: String,
    pub mixture_name: String,
    pub materials: Vec<MaterialEmission>,
}

impl MixtureEmission {
    /// 총 손실을 증기 중량분율로 성분별 배분한다.
    pub(crate) fn apportion(
        mixture_id: &str,
        mixture_name: &str,
        vapor: &MixtureVapor,
        total: &Quantity,
    ) -> EmissionsResult<Self> {
        let total_lb = total.value_in(MassUnit::Pound)?;
        let materials = vapor
            .components
            .iter()
            .map(|c| MaterialEmission {
                material_id: c.material_id.clone(),
                material_name: c.material_name.clone(),
                vapor_weight_fraction: c.vapor_weight_fraction,
                emission: Quantity::new(total_lb * c.vapor_weight_fraction, MassUnit::Pound),
            })
            .collect();
        Ok(Self {
            mixture_id: mixture_id.to_string(),
            mixture_name: mixture_name.to_string(),
            materials,
        })
    }

    /// 물질별 배출량 합(lb).
    pub fn total(&self) -> Quantity {
        let sum: Decimal = self.materials.iter().map(|m| m.emission.value).sum();
        Quantity::new(sum, MassUnit::Pound)
    }

    pub fn find(&self, material_id: &str) -> Option<&MaterialEmission> {
        self.materials.iter().find(|m| m.material_id == material_id)
    }
}

/// (탱크, 보고 기간) 하나의 계산 결과. 만들어진 뒤에는 바뀌지 않는다.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionResult {
    pub tank_id: String,
    pub tank_name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// 배분 전 L_S
    pub standing_loss: Quantity,
    /// 배분 전 L_W
    pub working_loss: Quantity,
    pub standing: MixtureEmission,
    pub working: MixtureEmission,
}

impl EmissionResult {
    /// L_T = L_S + L_W (lb).
    pub fn total_loss(&self) -> EmissionsResult<Quantity> {
        Ok(self.standing_loss.checked_add(&self.working_loss)?)
    }
}
