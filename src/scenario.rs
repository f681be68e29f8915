//! TOML 시나리오 파일. 외부 데이터 계층 대신 탱크/혼합물/보고 기간을 한 문서로 받는다.
//!
//! 물리량은 `"12 ft"`, `"8450 gal"`처럼 문자열로 적어 십진 값이 그대로 유지되게 한다.
//!
//! ```toml
//! [[mixtures]]
//! id = "bz"
//! makeup = "weight"
//! components = [{ material = "benzene", value = 88.68 }]
//!
//! [[tanks]]
//! id = "t-101"
//! orientation = "vertical"
//! shell_height = "12 ft"
//! diameter = "6 ft"
//!
//! [[chunks]]
//! tank = "t-101"
//! mixture = "bz"
//! start = "2023-01-01"
//! end = "2023-12-31"
//! throughput = "8450 gal"
//! min_temperature = "36.2 degF"
//! max_temperature = "64.3 degF"
//! insolation = "1568 btu/ft2/day"
//! atmospheric_pressure = "12.08 psia"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use thiserror::Error;

use crate::conversion::{parse_quantity, ConversionError};
use crate::error::EmissionsError;
use crate::material::{self, Material, TemperatureRange, VaporPressureCorrelation};
use crate::meteorology::{MeteorologicalChunk, ReportingChunk};
use crate::mixture::{MakeupType, Mixture};
use crate::quantity::{Quantity, QuantityKind};
use crate::tank::{
    Insulation, Orientation, Paint, PaintColor, PaintCondition, RoofType, TankGeometry,
    VentSettings,
};
use crate::units::{TemperatureUnit, VelocityUnit};

/// 시나리오 로드/해석 오류.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("시나리오 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{owner}.{field}: {source}")]
    Field {
        owner: String,
        field: &'static str,
        #[source]
        source: ConversionError,
    },
    #[error("{owner}: 날짜 형식이 잘못됨 ({value})")]
    InvalidDate { owner: String, value: String },
    #[error("{owner}: 알 수 없는 {what} '{id}'")]
    UnknownReference {
        owner: String,
        what: &'static str,
        id: String,
    },
    #[error("중복된 {what} id '{id}'")]
    DuplicateId { what: &'static str, id: String },
    #[error("{owner}: {detail}")]
    Invalid { owner: String, detail: String },
    #[error("혼합물 {id}: {source}")]
    Mixture {
        id: String,
        #[source]
        source: EmissionsError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum CorrelationKind {
    Antoine,
    Petroleum,
}

#[derive(Debug, Clone, Deserialize)]
struct RawMaterial {
    id: String,
    name: Option<String>,
    molecular_weight: String,
    correlation: CorrelationKind,
    a: Decimal,
    b: Decimal,
    c: Option<Decimal>,
    min_temperature: Option<String>,
    max_temperature: Option<String>,
    product_factor: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawComponent {
    material: String,
    value: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
struct RawMixture {
    id: String,
    name: Option<String>,
    makeup: MakeupType,
    components: Vec<RawComponent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RoofKind {
    Cone,
    Dome,
}

#[derive(Debug, Clone, Deserialize)]
struct RawRoof {
    kind: RoofKind,
    height: Option<String>,
    slope: Option<Decimal>,
    radius: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawPaint {
    color: Option<PaintColor>,
    condition: Option<PaintCondition>,
    absorptance: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawTank {
    id: String,
    name: Option<String>,
    orientation: Orientation,
    shell_height: String,
    diameter: String,
    roof: Option<RawRoof>,
    liquid_height: Option<String>,
    max_liquid_height: Option<String>,
    min_liquid_height: Option<String>,
    shell_paint: Option<RawPaint>,
    roof_paint: Option<RawPaint>,
    breather_setting: Option<String>,
    vacuum_setting: Option<String>,
    turnovers: Option<Decimal>,
    #[serde(default)]
    underground: bool,
    insulation: Option<Insulation>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawChunk {
    tank: String,
    mixture: String,
    start: String,
    end: String,
    throughput: String,
    average_temperature: Option<String>,
    min_temperature: String,
    max_temperature: String,
    wind_speed: Option<String>,
    insolation: String,
    atmospheric_pressure: String,
}

/// 파싱된 시나리오 문서. 참조 해석은 [`Scenario::resolve`]에서 한다.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    materials: Vec<RawMaterial>,
    #[serde(default)]
    mixtures: Vec<RawMixture>,
    #[serde(default)]
    tanks: Vec<RawTank>,
    #[serde(default)]
    chunks: Vec<RawChunk>,
}

impl Scenario {
    pub fn from_toml_str(text: &str) -> Result<Self, ScenarioError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn mixture_ids(&self) -> impl Iterator<Item = &str> {
        self.mixtures.iter().map(|m| m.id.as_str())
    }

    /// 시나리오 정의 물질 우선, 없으면 내장 카탈로그에서 찾는다.
    fn material(&self, key: &str) -> Result<Option<Material>, ScenarioError> {
        match self.materials.iter().find(|m| m.id.eq_ignore_ascii_case(key)) {
            Some(raw) => raw.resolve().map(Some),
            None => Ok(material::find_material(key)),
        }
    }

    /// id로 혼합물을 만든다.
    pub fn mixture(&self, id: &str) -> Result<Mixture, ScenarioError> {
        let raw = self
            .mixtures
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| ScenarioError::UnknownReference {
                owner: "scenario".to_string(),
                what: "mixture",
                id: id.to_string(),
            })?;
        let parts = raw
            .components
            .iter()
            .map(|c| {
                let material = self.material(&c.material)?.ok_or_else(|| {
                    ScenarioError::UnknownReference {
                        owner: format!("mixture {}", raw.id),
                        what: "material",
                        id: c.material.clone(),
                    }
                })?;
                Ok((material, c.value))
            })
            .collect::<Result<Vec<_>, ScenarioError>>()?;
        let name = raw.name.clone().unwrap_or_else(|| raw.id.clone());
        Mixture::new(raw.id.clone(), name, raw.makeup, parts).map_err(|source| {
            ScenarioError::Mixture {
                id: raw.id.clone(),
                source,
            }
        })
    }

    /// 모든 보고 기간을 (탱크, 기간) 쌍으로 해석한다. 순서는 `[[chunks]]` 순서를 따른다.
    pub fn resolve(&self) -> Result<Vec<(TankGeometry, ReportingChunk)>, ScenarioError> {
        check_unique("material", self.materials.iter().map(|m| m.id.as_str()))?;
        check_unique("mixture", self.mixtures.iter().map(|m| m.id.as_str()))?;
        check_unique("tank", self.tanks.iter().map(|t| t.id.as_str()))?;

        let tanks = self
            .tanks
            .iter()
            .map(|raw| Ok((raw.id.as_str(), raw.resolve()?)))
            .collect::<Result<HashMap<_, _>, ScenarioError>>()?;
        let mut mixtures: HashMap<&str, Mixture> = HashMap::new();

        let mut pairs = Vec::with_capacity(self.chunks.len());
        for (index, raw) in self.chunks.iter().enumerate() {
            let owner = format!("chunks[{index}]");
            let tank = tanks
                .get(raw.tank.as_str())
                .ok_or_else(|| ScenarioError::UnknownReference {
                    owner: owner.clone(),
                    what: "tank",
                    id: raw.tank.clone(),
                })?;
            let mixture = match mixtures.get(raw.mixture.as_str()) {
                Some(m) => m.clone(),
                None => {
                    if !self.mixture_ids().any(|id| id == raw.mixture) {
                        return Err(ScenarioError::UnknownReference {
                            owner,
                            what: "mixture",
                            id: raw.mixture.clone(),
                        });
                    }
                    let m = self.mixture(&raw.mixture)?;
                    mixtures.insert(raw.mixture.as_str(), m.clone());
                    m
                }
            };
            pairs.push((tank.clone(), raw.resolve(&owner, mixture)?));
        }
        Ok(pairs)
    }
}

fn check_unique<'a>(
    what: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), ScenarioError> {
    let mut seen = std::collections::HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ScenarioError::DuplicateId {
                what,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

fn quantity(
    owner: &str,
    field: &'static str,
    kind: QuantityKind,
    text: &str,
) -> Result<Quantity, ScenarioError> {
    parse_quantity(kind, text).map_err(|source| ScenarioError::Field {
        owner: owner.to_string(),
        field,
        source,
    })
}

fn optional_quantity(
    owner: &str,
    field: &'static str,
    kind: QuantityKind,
    text: Option<&String>,
) -> Result<Option<Quantity>, ScenarioError> {
    text.map(|t| quantity(owner, field, kind, t)).transpose()
}

fn date(owner: &str, text: &str) -> Result<NaiveDate, ScenarioError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|_| ScenarioError::InvalidDate {
        owner: owner.to_string(),
        value: text.to_string(),
    })
}

impl RawMaterial {
    fn resolve(&self) -> Result<Material, ScenarioError> {
        let owner = format!("material {}", self.id);
        let correlation = match self.correlation {
            CorrelationKind::Antoine => {
                let c = self.c.ok_or_else(|| ScenarioError::Invalid {
                    owner: owner.clone(),
                    detail: "Antoine 식에는 c가 필요함".to_string(),
                })?;
                let bound = |field, text: Option<&String>| {
                    optional_quantity(&owner, field, QuantityKind::Temperature, text)
                };
                let min = bound("min_temperature", self.min_temperature.as_ref())?;
                let max = bound("max_temperature", self.max_temperature.as_ref())?;
                let valid_range = match (min, max) {
                    (Some(min), Some(max)) => Some(TemperatureRange { min, max }),
                    _ => None,
                };
                VaporPressureCorrelation::Petrochemical {
                    a: self.a,
                    b: self.b,
                    c,
                    valid_range,
                }
            }
            CorrelationKind::Petroleum => VaporPressureCorrelation::PetroleumLiquid {
                a: self.a,
                b: self.b,
            },
        };
        Ok(Material {
            id: self.id.clone(),
            name: self.name.clone().unwrap_or_else(|| self.id.clone()),
            molecular_weight: quantity(
                &owner,
                "molecular_weight",
                QuantityKind::MolarMass,
                &self.molecular_weight,
            )?,
            correlation,
            working_loss_product_factor: self.product_factor.unwrap_or(Decimal::ONE),
        })
    }
}

impl RawPaint {
    fn resolve(&self, owner: &str) -> Result<Paint, ScenarioError> {
        if let Some(alpha) = self.absorptance {
            if alpha < Decimal::ZERO || alpha > Decimal::ONE {
                return Err(ScenarioError::Invalid {
                    owner: owner.to_string(),
                    detail: format!("흡수율 {alpha} 는 0~1 범위여야 함"),
                });
            }
            return Ok(Paint::Absorptance(alpha));
        }
        Ok(Paint::Listed {
            color: self.color.unwrap_or(PaintColor::White),
            condition: self.condition.unwrap_or(PaintCondition::Average),
        })
    }
}

impl RawTank {
    fn resolve(&self) -> Result<TankGeometry, ScenarioError> {
        let owner = format!("tank {}", self.id);
        let length = |field, text: &String| quantity(&owner, field, QuantityKind::Length, text);
        let opt_length = |field, text: Option<&String>| {
            optional_quantity(&owner, field, QuantityKind::Length, text)
        };

        let mut tank = TankGeometry::new(
            self.id.clone(),
            self.name.clone().unwrap_or_else(|| self.id.clone()),
            self.orientation,
            length("shell_height", &self.shell_height)?,
            length("diameter", &self.diameter)?,
        );

        if let Some(roof) = &self.roof {
            let height = opt_length("roof.height", roof.height.as_ref())?;
            tank.roof = Some(match roof.kind {
                RoofKind::Cone => RoofType::Cone {
                    height,
                    slope: roof.slope,
                },
                RoofKind::Dome => RoofType::Dome {
                    height,
                    radius: opt_length("roof.radius", roof.radius.as_ref())?,
                },
            });
        }
        tank.liquid_height = opt_length("liquid_height", self.liquid_height.as_ref())?;
        tank.max_liquid_height = opt_length("max_liquid_height", self.max_liquid_height.as_ref())?;
        tank.min_liquid_height = opt_length("min_liquid_height", self.min_liquid_height.as_ref())?;
        if let Some(paint) = &self.shell_paint {
            tank.shell_paint = paint.resolve(&owner)?;
        }
        if let Some(paint) = &self.roof_paint {
            tank.roof_paint = paint.resolve(&owner)?;
        }

        let defaults = VentSettings::default();
        let gauge = |field, text: Option<&String>| {
            optional_quantity(&owner, field, QuantityKind::PressureDifference, text)
        };
        tank.vents = VentSettings {
            breather: gauge("breather_setting", self.breather_setting.as_ref())?
                .unwrap_or(defaults.breather),
            vacuum: gauge("vacuum_setting", self.vacuum_setting.as_ref())?
                .unwrap_or(defaults.vacuum),
        };
        tank.turnovers = self.turnovers;
        tank.underground = self.underground;
        tank.insulation = self.insulation.unwrap_or(Insulation::None);
        Ok(tank)
    }
}

impl RawChunk {
    fn resolve(&self, owner: &str, mixture: Mixture) -> Result<ReportingChunk, ScenarioError> {
        let min_temperature =
            quantity(owner, "min_temperature", QuantityKind::Temperature, &self.min_temperature)?;
        let max_temperature =
            quantity(owner, "max_temperature", QuantityKind::Temperature, &self.max_temperature)?;
        let average_temperature = match &self.average_temperature {
            Some(text) => quantity(owner, "average_temperature", QuantityKind::Temperature, text)?,
            None => midpoint(owner, &min_temperature, &max_temperature)?,
        };
        let wind_speed = optional_quantity(
            owner,
            "wind_speed",
            QuantityKind::Velocity,
            self.wind_speed.as_ref(),
        )?
        .unwrap_or_else(|| Quantity::new(Decimal::ZERO, VelocityUnit::MilePerHour));

        Ok(ReportingChunk {
            start: date(owner, &self.start)?,
            end: date(owner, &self.end)?,
            meteorology: MeteorologicalChunk {
                average_temperature,
                min_temperature,
                max_temperature,
                wind_speed,
                insolation: quantity(
                    owner,
                    "insolation",
                    QuantityKind::Insolation,
                    &self.insolation,
                )?,
                atmospheric_pressure: quantity(
                    owner,
                    "atmospheric_pressure",
                    QuantityKind::Pressure,
                    &self.atmospheric_pressure,
                )?,
            },
            throughput: quantity(owner, "throughput", QuantityKind::Volume, &self.throughput)?,
            mixture,
        })
    }
}

fn midpoint(owner: &str, min: &Quantity, max: &Quantity) -> Result<Quantity, ScenarioError> {
    let to_rankine = |q: &Quantity| {
        q.value_in(TemperatureUnit::Rankine)
            .map_err(|e| ScenarioError::Field {
                owner: owner.to_string(),
                field: "average_temperature",
                source: e.into(),
            })
    };
    let avg = (to_rankine(min)? + to_rankine(max)?) / dec!(2);
    Ok(Quantity::new(avg, TemperatureUnit::Rankine))
}
