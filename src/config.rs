use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::units::*;

/// 결과 출력에 쓰는 단위. 계산은 항상 기준 단위로 한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputUnits {
    pub mass: MassUnit,
    pub temperature: TemperatureUnit,
    pub pressure: PressureUnit,
}

impl Default for OutputUnits {
    fn default() -> Self {
        Self {
            mass: MassUnit::Pound,
            temperature: TemperatureUnit::Fahrenheit,
            pressure: PressureUnit::Psia,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 출력 소수 자릿수
    pub decimal_places: u32,
    /// `RUST_LOG`가 없을 때 쓰는 로그 필터
    pub log_level: String,
    pub output: OutputUnits,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            decimal_places: 4,
            log_level: "warn".to_string(),
            output: OutputUnits::default(),
            path: None,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정 파일을 만든다.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let mut cfg = if path.exists() {
        let content = fs::read_to_string(path)?;
        toml::from_str::<Config>(&content)?
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        cfg
    };
    cfg.path = Some(path.to_path_buf());
    Ok(cfg)
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 로드한 경로(없으면 config.toml)에 설정을 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from("config.toml"));
        save_config(self, &path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: Config = toml::from_str("decimal_places = 2\n").unwrap();
        assert_eq!(cfg.decimal_places, 2);
        assert_eq!(cfg.log_level, "warn");
        assert_eq!(cfg.output.mass, MassUnit::Pound);
    }

    #[test]
    fn output_units_round_trip_through_toml() {
        let mut cfg = Config::default();
        cfg.output.mass = MassUnit::Kilogram;
        cfg.output.temperature = TemperatureUnit::Celsius;
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn creates_file_when_absent() {
        let path = std::env::temp_dir().join(format!(
            "tank_emissions_config_{}.toml",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        let cfg = load_or_default(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.decimal_places, 4);
        let _ = fs::remove_file(&path);
    }
}
