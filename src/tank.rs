//! 고정지붕 탱크 형상/도장/통기 입력 값 객체.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::quantity::Quantity;
use crate::units::{LengthUnit, PressureDiffUnit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// 지붕 형상. 높이를 모르면 기울기/반경에서 유도한다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RoofType {
    /// 원추 지붕. `slope`는 ft/ft, 없으면 0.0625
    Cone {
        height: Option<Quantity>,
        slope: Option<Decimal>,
    },
    /// 돔 지붕. `radius`가 없으면 경험식(0.137·R_S)을 쓴다
    Dome {
        height: Option<Quantity>,
        radius: Option<Quantity>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Insulation {
    None,
    /// 셸만 단열, 지붕은 비단열
    Partial,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaintColor {
    AluminumSpecular,
    AluminumDiffuse,
    BeigeCream,
    Black,
    Brown,
    GrayLight,
    GrayMedium,
    GreenDark,
    RedPrimer,
    RustRedIronOxide,
    Tan,
    White,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaintCondition {
    New,
    Average,
    Aged,
}

/// 도장 사양. 표 값 또는 측정된 일사 흡수율.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    Listed {
        color: PaintColor,
        condition: PaintCondition,
    },
    Absorptance(Decimal),
}

impl Paint {
    pub fn white_average() -> Self {
        Paint::Listed {
            color: PaintColor::White,
            condition: PaintCondition::Average,
        }
    }

    /// 일사 흡수율 α (AP-42 표 7.1-6).
    pub fn solar_absorptance(&self) -> Decimal {
        match *self {
            Paint::Absorptance(alpha) => alpha,
            Paint::Listed { color, condition } => {
                let (new, average, aged) = match color {
                    PaintColor::AluminumSpecular => (dec!(0.39), dec!(0.44), dec!(0.49)),
                    PaintColor::AluminumDiffuse => (dec!(0.60), dec!(0.64), dec!(0.68)),
                    PaintColor::BeigeCream => (dec!(0.35), dec!(0.42), dec!(0.49)),
                    PaintColor::Black => (dec!(0.97), dec!(0.97), dec!(0.97)),
                    PaintColor::Brown => (dec!(0.58), dec!(0.67), dec!(0.76)),
                    PaintColor::GrayLight => (dec!(0.54), dec!(0.61), dec!(0.68)),
                    PaintColor::GrayMedium => (dec!(0.68), dec!(0.74), dec!(0.80)),
                    PaintColor::GreenDark => (dec!(0.89), dec!(0.91), dec!(0.93)),
                    PaintColor::RedPrimer => (dec!(0.89), dec!(0.91), dec!(0.93)),
                    PaintColor::RustRedIronOxide => (dec!(0.38), dec!(0.50), dec!(0.62)),
                    PaintColor::Tan => (dec!(0.43), dec!(0.52), dec!(0.61)),
                    PaintColor::White => (dec!(0.17), dec!(0.25), dec!(0.34)),
                };
                match condition {
                    PaintCondition::New => new,
                    PaintCondition::Average => average,
                    PaintCondition::Aged => aged,
                }
            }
        }
    }
}

/// 호흡밸브 설정(게이지압). 진공 설정은 보통 음수다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VentSettings {
    pub breather: Quantity,
    pub vacuum: Quantity,
}

impl Default for VentSettings {
    fn default() -> Self {
        Self {
            breather: Quantity::new(dec!(0.03), PressureDiffUnit::Psi),
            vacuum: Quantity::new(dec!(-0.03), PressureDiffUnit::Psi),
        }
    }
}

/// 계산 시점의 탱크 스냅샷. 계산 중에는 바뀌지 않는다.
#[derive(Debug, Clone, PartialEq)]
pub struct TankGeometry {
    pub id: String,
    pub name: String,
    pub orientation: Orientation,
    /// 수직 탱크는 셸 높이, 수평 탱크는 길이
    pub shell_height: Quantity,
    pub diameter: Quantity,
    /// 수평 탱크에는 쓰이지 않는다
    pub roof: Option<RoofType>,
    /// 평균 액위. 없거나 0이면 셸 높이의 절반
    pub liquid_height: Option<Quantity>,
    pub max_liquid_height: Option<Quantity>,
    pub min_liquid_height: Option<Quantity>,
    pub shell_paint: Paint,
    pub roof_paint: Paint,
    pub vents: VentSettings,
    /// 연간 회전수. 없으면 처리량과 액위 범위에서 계산한다
    pub turnovers: Option<Decimal>,
    pub underground: bool,
    pub insulation: Insulation,
}

impl TankGeometry {
    /// 기본값(백색/보통 도장, ±0.03 psig, 비단열, 원추 지붕)을 채운 탱크를 만든다.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        orientation: Orientation,
        shell_height: Quantity,
        diameter: Quantity,
    ) -> Self {
        let roof = match orientation {
            Orientation::Vertical => Some(RoofType::Cone {
                height: None,
                slope: None,
            }),
            Orientation::Horizontal => None,
        };
        Self {
            id: id.into(),
            name: name.into(),
            orientation,
            shell_height,
            diameter,
            roof,
            liquid_height: None,
            max_liquid_height: None,
            min_liquid_height: None,
            shell_paint: Paint::white_average(),
            roof_paint: Paint::white_average(),
            vents: VentSettings::default(),
            turnovers: None,
            underground: false,
            insulation: Insulation::None,
        }
    }

    pub fn is_vertical(&self) -> bool {
        self.orientation == Orientation::Vertical
    }

    /// 셸/지붕 평균 흡수율.
    pub fn average_absorptance(&self) -> Decimal {
        (self.shell_paint.solar_absorptance() + self.roof_paint.solar_absorptance()) / dec!(2)
    }

    pub(crate) fn feet(quantity: &Quantity) -> Result<Decimal, crate::quantity::UnitMismatch> {
        quantity.value_in(LengthUnit::Foot)
    }
}
