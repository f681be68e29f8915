//! 탱크 형상을 "유효" 수직 원통으로 정규화하고 증기공간 outage/체적을 계산한다.
//!
//! [`TankShim`]은 탱크를 빌려 쓰므로 탱크가 바뀌면 새 shim을 만들어야 한다.
//! 한 번의 계산 안에서는 각 값이 처음 요청될 때 한 번만 계산된다.

use std::cell::OnceCell;

use log::{debug, warn};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::error::{EmissionsError, EmissionsResult};
use crate::quantity::Quantity;
use crate::tank::{Orientation, RoofType, TankGeometry};
use crate::units::{LengthUnit, VolumeUnit};

/// 원추 지붕 기울기 기본값(ft/ft)
pub const DEFAULT_CONE_SLOPE: Decimal = dec!(0.0625);
/// 돔 반경 = 직경일 때 지붕 outage / 셸 반경
pub const DOME_OUTAGE_FRACTION: Decimal = dec!(0.137);

pub(crate) fn quarter_pi() -> Decimal {
    Decimal::PI / dec!(4)
}

fn memo(
    cell: &OnceCell<Decimal>,
    f: impl FnOnce() -> EmissionsResult<Decimal>,
) -> EmissionsResult<Decimal> {
    if let Some(value) = cell.get() {
        return Ok(*value);
    }
    let value = f()?;
    Ok(*cell.get_or_init(|| value))
}

pub struct TankShim<'a> {
    tank: &'a TankGeometry,
    effective_height: OnceCell<Decimal>,
    effective_diameter: OnceCell<Decimal>,
    outage: OnceCell<Decimal>,
    volume: OnceCell<Decimal>,
}

impl<'a> TankShim<'a> {
    pub fn new(tank: &'a TankGeometry) -> Self {
        Self {
            tank,
            effective_height: OnceCell::new(),
            effective_diameter: OnceCell::new(),
            outage: OnceCell::new(),
            volume: OnceCell::new(),
        }
    }

    pub fn tank(&self) -> &'a TankGeometry {
        self.tank
    }

    fn effective_height_ft(&self) -> EmissionsResult<Decimal> {
        memo(&self.effective_height, || {
            let height = TankGeometry::feet(&self.tank.shell_height)?;
            let diameter = TankGeometry::feet(&self.tank.diameter)?;
            positive("셸 치수", "shell_height", height)?;
            positive("셸 치수", "diameter", diameter)?;
            Ok(match self.tank.orientation {
                Orientation::Vertical => height,
                // 수평 탱크: 같은 단면적의 수직 원통으로 환산
                Orientation::Horizontal => quarter_pi() * diameter,
            })
        })
    }

    fn effective_diameter_ft(&self) -> EmissionsResult<Decimal> {
        memo(&self.effective_diameter, || {
            let height = TankGeometry::feet(&self.tank.shell_height)?;
            let diameter = TankGeometry::feet(&self.tank.diameter)?;
            positive("셸 치수", "shell_height", height)?;
            positive("셸 치수", "diameter", diameter)?;
            match self.tank.orientation {
                Orientation::Vertical => Ok(diameter),
                Orientation::Horizontal => (height * diameter / quarter_pi())
                    .sqrt()
                    .ok_or_else(|| EmissionsError::domain("유효 직경", "음수의 제곱근")),
            }
        })
    }

    /// 유효 셸 높이 H_E (수직 탱크는 셸 높이 그대로).
    pub fn effective_height(&self) -> EmissionsResult<Quantity> {
        Ok(Quantity::new(self.effective_height_ft()?, LengthUnit::Foot))
    }

    /// 유효 직경 D_E (수직 탱크는 직경 그대로).
    pub fn effective_diameter(&self) -> EmissionsResult<Quantity> {
        Ok(Quantity::new(self.effective_diameter_ft()?, LengthUnit::Foot))
    }

    /// H_S / D, 온도식에 쓰인다.
    pub fn height_to_diameter(&self) -> EmissionsResult<Decimal> {
        Ok(self.effective_height_ft()? / self.effective_diameter_ft()?)
    }

    /// 유효 단면적 (π/4)·D².
    pub fn cross_section_ft2(&self) -> EmissionsResult<Decimal> {
        let d = self.effective_diameter_ft()?;
        Ok(quarter_pi() * d * d)
    }

    /// 지붕 outage H_RO (ft).
    pub fn roof_outage(&self) -> EmissionsResult<Quantity> {
        Ok(Quantity::new(self.roof_outage_ft()?, LengthUnit::Foot))
    }

    fn roof_outage_ft(&self) -> EmissionsResult<Decimal> {
        const STEP: &str = "지붕 outage";
        let shell_radius = self.effective_diameter_ft()? / dec!(2);
        let roof = self
            .tank
            .roof
            .ok_or_else(|| EmissionsError::missing(STEP, "roof"))?;
        match roof {
            RoofType::Cone { height, slope } => {
                let roof_height = match height {
                    Some(h) => TankGeometry::feet(&h)?,
                    None => slope.unwrap_or(DEFAULT_CONE_SLOPE) * shell_radius,
                };
                Ok(roof_height / dec!(3))
            }
            RoofType::Dome { height, radius } => {
                let roof_height = match (height, radius) {
                    (Some(h), _) => TankGeometry::feet(&h)?,
                    (None, Some(r)) => {
                        let roof_radius = TankGeometry::feet(&r)?;
                        if roof_radius < shell_radius {
                            return Err(EmissionsError::domain(
                                STEP,
                                format!("돔 반경 {roof_radius} ft < 셸 반경 {shell_radius} ft"),
                            ));
                        }
                        let chord = (roof_radius * roof_radius - shell_radius * shell_radius)
                            .sqrt()
                            .ok_or_else(|| EmissionsError::domain(STEP, "음수의 제곱근"))?;
                        roof_radius - chord
                    }
                    (None, None) => return Ok(DOME_OUTAGE_FRACTION * shell_radius),
                };
                let ratio = roof_height / shell_radius;
                Ok(roof_height * (dec!(0.5) + ratio * ratio / dec!(6)))
            }
        }
    }

    /// 평균 액위 H_L. 없거나 0이면 셸 높이의 절반을 쓴다.
    pub fn liquid_height(&self) -> EmissionsResult<Quantity> {
        let shell = self.effective_height_ft()?;
        let value = match &self.tank.liquid_height {
            Some(h) if !h.is_zero() => TankGeometry::feet(h)?,
            _ => {
                warn!("{}: 평균 액위가 없어 셸 높이의 절반을 사용", self.tank.id);
                shell / dec!(2)
            }
        };
        Ok(Quantity::new(value, LengthUnit::Foot))
    }

    /// 증기공간 outage H_VO.
    pub fn vapor_space_outage(&self) -> EmissionsResult<Quantity> {
        let value = memo(&self.outage, || {
            let outage = match self.tank.orientation {
                Orientation::Horizontal => self.effective_height_ft()? / dec!(2),
                Orientation::Vertical => {
                    let shell = self.effective_height_ft()?;
                    let liquid = self.liquid_height()?.value_in(LengthUnit::Foot)?;
                    shell - liquid + self.roof_outage_ft()?
                }
            };
            if outage <= Decimal::ZERO {
                return Err(EmissionsError::domain(
                    "증기공간 outage",
                    format!("{}: outage {outage} ft ≤ 0 (액위가 셸보다 높음)", self.tank.id),
                ));
            }
            debug!("{}: H_VO={} ft", self.tank.id, outage.round_dp(4));
            Ok(outage)
        })?;
        Ok(Quantity::new(value, LengthUnit::Foot))
    }

    /// 증기공간 체적 V_V = (π/4)·D²·H_VO.
    pub fn vapor_space_volume(&self) -> EmissionsResult<Quantity> {
        let value = memo(&self.volume, || {
            let outage = self.vapor_space_outage()?.value_in(LengthUnit::Foot)?;
            Ok(self.cross_section_ft2()? * outage)
        })?;
        Ok(Quantity::new(value, VolumeUnit::CubicFoot))
    }

    /// 최고/최저 액위 차 H_LX − H_LN (ft).
    pub fn liquid_height_range(&self) -> EmissionsResult<Quantity> {
        let shell = self.effective_height_ft()?;
        let (default_max, default_min) = match self.tank.orientation {
            Orientation::Vertical => (shell - Decimal::ONE, Decimal::ONE),
            Orientation::Horizontal => (shell, Decimal::ZERO),
        };
        let max = match &self.tank.max_liquid_height {
            Some(h) => TankGeometry::feet(h)?,
            None => default_max,
        };
        let min = match &self.tank.min_liquid_height {
            Some(h) => TankGeometry::feet(h)?,
            None => default_min,
        };
        let range = max - min;
        if range <= Decimal::ZERO {
            return Err(EmissionsError::domain(
                "액위 범위",
                format!("{}: H_LX − H_LN = {range} ft ≤ 0", self.tank.id),
            ));
        }
        Ok(Quantity::new(range, LengthUnit::Foot))
    }
}

fn positive(step: &'static str, field: &'static str, value: Decimal) -> EmissionsResult<()> {
    if value <= Decimal::ZERO {
        return Err(EmissionsError::missing(step, field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ft(v: Decimal) -> Quantity {
        Quantity::new(v, LengthUnit::Foot)
    }

    fn vertical(height: Decimal, diameter: Decimal) -> TankGeometry {
        TankGeometry::new("v", "vertical", Orientation::Vertical, ft(height), ft(diameter))
    }

    #[test]
    fn cone_roof_from_default_slope() {
        let mut tank = vertical(dec!(12), dec!(6));
        tank.liquid_height = Some(ft(dec!(8)));
        let shim = TankShim::new(&tank);
        // H_RO = 0.0625 · 3 / 3
        assert_eq!(shim.roof_outage().unwrap().value, dec!(0.0625));
        assert_eq!(shim.vapor_space_outage().unwrap().value, dec!(4.0625));
    }

    #[test]
    fn cone_roof_from_known_height() {
        let mut tank = vertical(dec!(12), dec!(6));
        tank.roof = Some(RoofType::Cone {
            height: Some(ft(dec!(0.9))),
            slope: None,
        });
        let shim = TankShim::new(&tank);
        assert_eq!(shim.roof_outage().unwrap().value, dec!(0.3));
    }

    #[test]
    fn dome_roof_default_fraction() {
        let mut tank = vertical(dec!(20), dec!(10));
        tank.roof = Some(RoofType::Dome {
            height: None,
            radius: None,
        });
        let shim = TankShim::new(&tank);
        assert_eq!(shim.roof_outage().unwrap().value, dec!(0.685));
    }

    #[test]
    fn dome_roof_radius_equal_to_diameter_matches_fraction() {
        let mut tank = vertical(dec!(20), dec!(10));
        tank.roof = Some(RoofType::Dome {
            height: None,
            radius: Some(ft(dec!(10))),
        });
        let shim = TankShim::new(&tank);
        let h_ro = shim.roof_outage().unwrap().value;
        assert!((h_ro - dec!(0.685)).abs() < dec!(0.002), "h_ro={h_ro}");
    }

    #[test]
    fn dome_radius_below_shell_radius_is_rejected() {
        let mut tank = vertical(dec!(20), dec!(10));
        tank.roof = Some(RoofType::Dome {
            height: None,
            radius: Some(ft(dec!(4))),
        });
        assert!(TankShim::new(&tank).roof_outage().is_err());
    }

    #[test]
    fn missing_roof_is_missing_data() {
        let mut tank = vertical(dec!(12), dec!(6));
        tank.roof = None;
        let err = TankShim::new(&tank).vapor_space_outage().unwrap_err();
        assert!(matches!(err, EmissionsError::MissingData { field: "roof", .. }));
    }

    #[test]
    fn unset_liquid_height_defaults_to_half_shell() {
        let tank = vertical(dec!(12), dec!(6));
        let shim = TankShim::new(&tank);
        assert_eq!(shim.liquid_height().unwrap().value, dec!(6));
    }

    #[test]
    fn horizontal_tank_uses_effective_cylinder() {
        let tank = TankGeometry::new(
            "h",
            "horizontal",
            Orientation::Horizontal,
            ft(dec!(20)),
            ft(dec!(8)),
        );
        let shim = TankShim::new(&tank);
        let h_e = shim.effective_height().unwrap().value;
        let d_e = shim.effective_diameter().unwrap().value;
        assert_eq!(h_e, quarter_pi() * dec!(8));
        // 유효 원통 단면적 × 유효 높이 = 실제 체적 (π/4)·D²·L
        let actual = quarter_pi() * dec!(64) * dec!(20);
        let effective = quarter_pi() * d_e * d_e * h_e;
        assert!((actual - effective).abs() < dec!(0.0001));
        assert_eq!(shim.vapor_space_outage().unwrap().value, h_e / dec!(2));
    }

    #[test]
    fn outage_and_volume_are_memoised() {
        let tank = vertical(dec!(12), dec!(6));
        let shim = TankShim::new(&tank);
        let first = shim.vapor_space_volume().unwrap();
        let second = shim.vapor_space_volume().unwrap();
        assert_eq!(first, second);
        assert!(first.value > Decimal::ZERO);
    }

    #[test]
    fn overfilled_tank_is_rejected() {
        let mut tank = vertical(dec!(12), dec!(6));
        tank.liquid_height = Some(ft(dec!(13)));
        assert!(TankShim::new(&tank).vapor_space_outage().is_err());
    }
}
