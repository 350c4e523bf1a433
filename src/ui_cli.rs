use std::fs;
use std::io::{self, Write};

use crate::app::{self, AppError};
use crate::config::Config;
use crate::conversion;
use crate::currency::{self, CurrencyCode, RateProvider};
use crate::qr::QrEncoder;
use crate::quantity::{ConversionRequest, Unit, UnitCategory};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Unit(UnitCategory),
    Currency,
    QrCode,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu() -> Result<MenuChoice, AppError> {
    println!("\n=== Unit Converter Toolbox ===");
    println!("1) 길이 (Length)");
    println!("2) 무게 (Weight)");
    println!("3) 온도 (Temperature)");
    println!("4) 환율 (Currency Exchange)");
    println!("5) QR 코드 생성 (Generate QR Code)");
    println!("0) 종료");
    loop {
        let sel = read_line("메뉴 선택: ")?;
        match parse_menu_choice(&sel) {
            Some(choice) => return Ok(choice),
            None => println!("잘못된 입력입니다. 다시 선택하세요."),
        }
    }
}

/// 메뉴 번호를 해석한다.
pub fn parse_menu_choice(sel: &str) -> Option<MenuChoice> {
    match sel.trim() {
        "1" => Some(MenuChoice::Unit(UnitCategory::Length)),
        "2" => Some(MenuChoice::Unit(UnitCategory::Weight)),
        "3" => Some(MenuChoice::Unit(UnitCategory::Temperature)),
        "4" => Some(MenuChoice::Currency),
        "5" => Some(MenuChoice::QrCode),
        "0" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// 길이/무게/온도 변환 메뉴를 처리한다.
pub fn handle_unit_conversion(category: UnitCategory, cfg: &Config) -> Result<(), AppError> {
    println!("\n-- {} 변환 --", category.name());
    // 온도만 음수를 허용한다.
    let value = if category == UnitCategory::Temperature {
        read_f64("값 입력: ")?
    } else {
        read_non_negative_f64("값 입력: ")?
    };
    let units = category.units();
    let (default_from, default_to) = default_units(category, cfg);
    let parse = |s: &str| conversion::parse_unit(category, s).ok();
    let from = read_choice("변환 전 단위", &units, default_from, |u| u.name(), parse)?;
    let to = read_choice("변환 후 단위", &units, default_to, |u| u.name(), parse)?;
    let request = ConversionRequest::new(category, from, to, value);
    let result = conversion::convert_request(&request)?;
    println!(
        "{}",
        conversion::format_result(value, from.name(), result, to.name())
    );
    Ok(())
}

/// 환율 변환 메뉴를 처리한다. 조회는 네트워크 응답을 기다리며 블록된다.
pub fn handle_currency(cfg: &Config, rates: &dyn RateProvider) -> Result<(), AppError> {
    println!("\n-- 실시간 환율 변환 --");
    let from = read_choice(
        "기준 통화",
        &CurrencyCode::ALL,
        cfg.default_units.currency_from,
        |c| c.as_str(),
        |s| CurrencyCode::parse(s).ok(),
    )?;
    let to = read_choice(
        "대상 통화",
        &CurrencyCode::ALL,
        cfg.default_units.currency_to,
        |c| c.as_str(),
        |s| CurrencyCode::parse(s).ok(),
    )?;
    let amount = read_non_negative_f64("금액 입력: ")?;
    let converted = currency::convert_currency(rates, amount, from, to)?;
    println!(
        "{}",
        conversion::format_result(amount, from.as_str(), converted, to.as_str())
    );
    Ok(())
}

/// QR 코드 생성 메뉴를 처리한다.
pub fn handle_qr(encoder: &dyn QrEncoder) -> Result<(), AppError> {
    println!("\n-- QR 코드 생성 --");
    let text = read_line("텍스트 또는 URL 입력: ")?;
    let text = text.trim_end_matches(['\r', '\n']);
    let path = read_line("저장할 파일 (엔터 시 qr.png): ")?;
    let path = match path.trim() {
        "" => "qr.png",
        p => p,
    };
    let png = encoder.encode_to_image(text)?;
    fs::write(path, &png)?;
    println!("QR 코드를 저장했습니다: {path} ({} bytes)", png.len());
    Ok(())
}

fn default_units(category: UnitCategory, cfg: &Config) -> (Unit, Unit) {
    let d = &cfg.default_units;
    match category {
        UnitCategory::Length => (Unit::Length(d.length_from), Unit::Length(d.length_to)),
        UnitCategory::Weight => (Unit::Weight(d.weight_from), Unit::Weight(d.weight_to)),
        UnitCategory::Temperature => (
            Unit::Temperature(d.temperature_from),
            Unit::Temperature(d.temperature_to),
        ),
    }
}

/// 번호, 이름 또는 약어로 항목을 고른다. 빈 입력이면 기본값.
///
/// 번호가 아닌 입력은 `parse`로 해석하며 목록에 있는 항목만 받는다.
pub fn pick<T: Copy + PartialEq>(
    input: &str,
    options: &[T],
    default: T,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let input = input.trim();
    if input.is_empty() {
        return Some(default);
    }
    if let Ok(n) = input.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| options.get(i)).copied();
    }
    parse(input).filter(|choice| options.contains(choice))
}

fn read_choice<T: Copy + PartialEq>(
    label: &str,
    options: &[T],
    default: T,
    name: impl Fn(&T) -> &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, AppError> {
    let listing: Vec<String> = options
        .iter()
        .enumerate()
        .map(|(i, o)| format!("{}={}", i + 1, name(o)))
        .collect();
    println!("{label}: {}", listing.join(" "));
    loop {
        let sel = read_line(&format!("선택 (엔터 시 {}): ", name(&default)))?;
        match pick(&sel, options, default, &parse) {
            Some(choice) => return Ok(choice),
            None => println!("목록에 없는 항목입니다."),
        }
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Err(AppError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "입력이 종료되었습니다",
        )));
    }
    Ok(buf)
}

fn read_f64(prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => return Ok(v),
            _ => println!("숫자를 입력하세요."),
        }
    }
}

fn read_non_negative_f64(prompt: &str) -> Result<f64, AppError> {
    loop {
        let v = read_f64(prompt)?;
        match app::check_magnitude(v, false) {
            Ok(v) => return Ok(v),
            Err(_) => println!("0 이상의 값을 입력하세요."),
        }
    }
}
