use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use unit_converter_toolbox::{
    app::{self, AppError, Services},
    config, conversion,
    currency::{self, CurrencyCode, HttpRateProvider},
    logging,
    qr::{PngQrEncoder, QrEncoder},
    quantity::{ConversionRequest, UnitCategory},
};

/// 길이/무게/온도 변환, 실시간 환율, QR 코드 생성 도구.
#[derive(Debug, Parser)]
#[command(name = "unit_converter_toolbox_cli", version)]
struct Cli {
    /// 설정 파일 경로
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 단위 변환 (length | weight | temperature)
    Convert {
        category: String,
        #[arg(allow_negative_numbers = true)]
        value: f64,
        from: String,
        to: String,
    },
    /// 실시간 환율로 금액 변환
    Currency { amount: f64, from: String, to: String },
    /// 텍스트를 QR 코드 PNG로 저장
    Qr {
        text: String,
        #[arg(short, long, default_value = "qr.png")]
        output: PathBuf,
    },
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    logging::init();
    if let Err(err) = try_run(Cli::parse()) {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let cfg = config::load_from(&cli.config)?;
    match cli.command {
        None => {
            let rates = HttpRateProvider::new(&cfg.currency)?;
            let qr = PngQrEncoder::new(&cfg.qr);
            app::run(
                &cfg,
                &Services {
                    rates: &rates,
                    qr: &qr,
                },
            )
        }
        Some(Command::Convert {
            category,
            value,
            from,
            to,
        }) => {
            let category = conversion::parse_category(&category)?;
            let value = app::check_magnitude(value, category == UnitCategory::Temperature)?;
            let from_unit = conversion::parse_unit(category, &from)?;
            let to_unit = conversion::parse_target_unit(category, &to)?;
            let request = ConversionRequest::new(category, from_unit, to_unit, value);
            let result = conversion::convert_request(&request)?;
            println!(
                "{}",
                conversion::format_result(value, from_unit.name(), result, to_unit.name())
            );
            Ok(())
        }
        Some(Command::Currency { amount, from, to }) => {
            let amount = app::check_magnitude(amount, false)?;
            let from = CurrencyCode::parse(&from)?;
            let to = CurrencyCode::parse(&to)?;
            let rates = HttpRateProvider::new(&cfg.currency)?;
            let converted = currency::convert_currency(&rates, amount, from, to)?;
            println!(
                "{}",
                conversion::format_result(amount, from.as_str(), converted, to.as_str())
            );
            Ok(())
        }
        Some(Command::Qr { text, output }) => {
            let png = PngQrEncoder::new(&cfg.qr).encode_to_image(&text)?;
            fs::write(&output, &png)?;
            info!(path = %output.display(), "QR code written");
            println!("QR 코드를 저장했습니다: {}", output.display());
            Ok(())
        }
    }
}
