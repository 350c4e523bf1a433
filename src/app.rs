use thiserror::Error;
use tracing::warn;

use crate::config::Config;
use crate::conversion::ConversionError;
use crate::currency::{CurrencyError, RateProvider};
use crate::qr::{QrEncoder, QrError};
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] crate::config::ConfigError),
    /// 단위 변환 오류
    #[error("단위 변환 오류: {0}")]
    Conversion(#[from] ConversionError),
    /// 환율 조회 오류
    #[error("환율 조회 오류: {0}")]
    Currency(#[from] CurrencyError),
    /// QR 생성 오류
    #[error("QR 생성 오류: {0}")]
    Qr(#[from] QrError),
    /// 음수 금액/길이 등 입력 범위 위반
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// 한 번의 요청에 국한된 오류인지. 입출력 오류만 루프를 끝낸다.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AppError::Io(_))
    }
}

/// 화면 입력값을 검증한다. 유한한 값만 받고, 음수는 `allow_negative`일 때만 허용한다.
pub fn check_magnitude(value: f64, allow_negative: bool) -> Result<f64, AppError> {
    if !value.is_finite() {
        return Err(AppError::InvalidInput(format!("숫자가 아닌 값: {value}")));
    }
    if value < 0.0 && !allow_negative {
        return Err(AppError::InvalidInput(format!("0 이상이어야 함: {value}")));
    }
    Ok(value)
}

/// 환율 조회와 QR 인코딩 기능 묶음. 호출 측이 만들어 주입한다.
pub struct Services<'a> {
    pub rates: &'a dyn RateProvider,
    pub qr: &'a dyn QrEncoder,
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(config: &Config, services: &Services<'_>) -> Result<(), AppError> {
    loop {
        let choice = ui_cli::main_menu()?;
        let outcome = match choice {
            MenuChoice::Unit(category) => ui_cli::handle_unit_conversion(category, config),
            MenuChoice::Currency => ui_cli::handle_currency(config, services.rates),
            MenuChoice::QrCode => ui_cli::handle_qr(services.qr),
            MenuChoice::Exit => {
                println!("프로그램을 종료합니다.");
                break;
            }
        };
        if let Err(err) = outcome {
            if !err.is_recoverable() {
                return Err(err);
            }
            warn!(error = %err, "request failed");
            println!("오류: {err}");
        }
    }
    Ok(())
}
