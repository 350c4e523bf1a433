use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::currency::CurrencyCode;
use crate::units::*;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 각 화면의 초기 선택 단위를 담는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultUnits {
    pub length_from: LengthUnit,
    pub length_to: LengthUnit,
    pub weight_from: MassUnit,
    pub weight_to: MassUnit,
    pub temperature_from: TemperatureUnit,
    pub temperature_to: TemperatureUnit,
    pub currency_from: CurrencyCode,
    pub currency_to: CurrencyCode,
}

impl Default for DefaultUnits {
    fn default() -> Self {
        Self {
            length_from: LengthUnit::Meters,
            length_to: LengthUnit::Meters,
            weight_from: MassUnit::Kilograms,
            weight_to: MassUnit::Kilograms,
            temperature_from: TemperatureUnit::Celsius,
            temperature_to: TemperatureUnit::Celsius,
            currency_from: CurrencyCode::Usd,
            currency_to: CurrencyCode::Usd,
        }
    }
}

/// 환율 서비스 접속 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencySettings {
    /// `/latest?from=..&to=..`를 제공하는 서비스 주소
    pub endpoint: String,
    /// 요청 타임아웃(초)
    pub timeout_secs: u64,
}

impl Default for CurrencySettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.frankfurter.app".to_string(),
            timeout_secs: 30,
        }
    }
}

/// QR 이미지 렌더링 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrSettings {
    /// 모듈 한 칸의 픽셀 크기
    pub module_px: u32,
    /// 가장자리 여백(모듈 수)
    pub quiet_zone: u32,
}

impl Default for QrSettings {
    fn default() -> Self {
        Self {
            module_px: 10,
            quiet_zone: 4,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_units: DefaultUnits,
    pub currency: CurrencySettings,
    pub qr: QrSettings,
    #[serde(skip)]
    path: Option<PathBuf>,
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 돌려준다. 파일은 만들지 않는다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_from(Path::new(DEFAULT_CONFIG_PATH))
}

/// 지정한 경로의 설정을 로드한다. 파일이 없으면 기본값.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let mut cfg = if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        info!(path = %path.display(), "loaded config");
        cfg
    } else {
        debug!(path = %path.display(), "config file not found, using defaults");
        Config::default()
    };
    cfg.path = Some(path.to_path_buf());
    Ok(cfg)
}

impl Config {
    /// 설정을 로드한 경로(없으면 config.toml)에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!(path = %path.display(), "saved config");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults_without_creating_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg.qr, QrSettings::default());
        assert_eq!(cfg.default_units.length_from, LengthUnit::Meters);
        assert!(!path.exists());
    }

    #[test]
    fn partial_file_fills_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[default_units]\nlength_to = \"Feet\"\ncurrency_to = \"EUR\"\n\n[qr]\nmodule_px = 6\n",
        )
        .unwrap();
        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg.default_units.length_to, LengthUnit::Feet);
        assert_eq!(cfg.default_units.currency_to, CurrencyCode::Eur);
        assert_eq!(cfg.default_units.weight_from, MassUnit::Kilograms);
        assert_eq!(cfg.qr.module_px, 6);
        assert_eq!(cfg.qr.quiet_zone, 4);
        assert_eq!(cfg.currency, CurrencySettings::default());
    }

    #[test]
    fn save_writes_back_to_loaded_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        let mut cfg = load_from(&path).unwrap();
        cfg.default_units.temperature_to = TemperatureUnit::Kelvin;
        cfg.save().unwrap();
        let reloaded = load_from(&path).unwrap();
        assert_eq!(reloaded.default_units.temperature_to, TemperatureUnit::Kelvin);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[qr]\nmodule_px = \"big\"\n").unwrap();
        assert!(matches!(load_from(&path), Err(ConfigError::Serde(_))));
    }
}
