use thiserror::Error;
use tracing::debug;

use crate::quantity::{ConversionRequest, Unit, UnitCategory};
use crate::units::*;

/// 단위 변환 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// 물리량의 단위 목록에 없는 단위
    #[error("알 수 없는 단위: {0}")]
    UnknownUnit(String),
    /// 섭씨/화씨/켈빈이 아닌 온도 변환 대상
    #[error("지원하지 않는 온도 변환 대상: {0}")]
    InvalidTemperatureTarget(String),
    /// 알 수 없는 물리량 이름
    #[error("알 수 없는 물리량: {0}")]
    UnknownCategory(String),
}

/// 검증을 거친 요청을 해당 물리량의 변환식으로 보낸다.
///
/// 요청의 단위가 `category`에 속하지 않으면 변환하지 않고 오류를 돌려준다.
pub fn convert_request(req: &ConversionRequest) -> Result<f64, ConversionError> {
    let result = match (req.category, req.from, req.to) {
        (UnitCategory::Length, Unit::Length(from), Unit::Length(to)) => {
            convert_length(req.value, from, to)
        }
        (UnitCategory::Weight, Unit::Weight(from), Unit::Weight(to)) => {
            convert_mass(req.value, from, to)
        }
        (UnitCategory::Temperature, Unit::Temperature(from), Unit::Temperature(to)) => {
            convert_temperature(req.value, from, to)
        }
        (UnitCategory::Temperature, Unit::Temperature(_), to) => {
            return Err(ConversionError::InvalidTemperatureTarget(to.name().to_string()))
        }
        (category, from, to) => {
            let offending = if from.category() != category { from } else { to };
            return Err(ConversionError::UnknownUnit(offending.name().to_string()));
        }
    };
    debug!(
        category = %req.category,
        from = %req.from,
        to = %req.to,
        value = req.value,
        result,
        "converted"
    );
    Ok(result)
}

/// 문자열로 전달된 단위명을 enum으로 변환한 뒤 지정된 단위로 환산한다.
///
/// 단위 문자열 예시는 `Meters`, `km`, `lb`, `C`, `kelvin` 등을 사용할 수 있다.
pub fn convert(
    category: UnitCategory,
    value: f64,
    from_unit_str: &str,
    to_unit_str: &str,
) -> Result<f64, ConversionError> {
    let from = parse_unit(category, from_unit_str)?;
    let to = parse_target_unit(category, to_unit_str)?;
    convert_request(&ConversionRequest::new(category, from, to, value))
}

/// 결과 표시 문자열. 결과값만 소수 둘째 자리로 반올림한다.
pub fn format_result(value: f64, from_unit: &str, result: f64, to_unit: &str) -> String {
    format!("{} {from_unit} = {result:.2} {to_unit}", display_value(value))
}

/// 입력값 표시. 최단 왕복 자릿수를 쓰고 지수가 -4 미만이거나 16 이상이면 과학 표기로 바꾼다.
///
/// `10` → `10.0`, `1e16` → `1e+16`, `0.00001` → `1e-05`.
pub fn display_value(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    // `{:e}`는 최단 왕복 가수와 10진 지수를 준다. 예: `1.5e-5`
    let sci = format!("{value:e}");
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    if (-4..16).contains(&exp) {
        let plain = value.to_string();
        if plain.contains('.') {
            plain
        } else {
            format!("{plain}.0")
        }
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
    }
}

/// 물리량 이름을 파싱한다.
pub fn parse_category(s: &str) -> Result<UnitCategory, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "length" | "len" => Ok(UnitCategory::Length),
        "weight" | "mass" => Ok(UnitCategory::Weight),
        "temperature" | "temp" => Ok(UnitCategory::Temperature),
        _ => Err(ConversionError::UnknownCategory(s.to_string())),
    }
}

/// 변환 원본 단위를 파싱한다. 물리량 목록에 없으면 `UnknownUnit`.
pub fn parse_unit(category: UnitCategory, s: &str) -> Result<Unit, ConversionError> {
    let unit = match category {
        UnitCategory::Length => parse_length_unit(s).map(Unit::Length),
        UnitCategory::Weight => parse_mass_unit(s).map(Unit::Weight),
        UnitCategory::Temperature => parse_temperature_unit(s).map(Unit::Temperature),
    };
    unit.ok_or_else(|| ConversionError::UnknownUnit(s.to_string()))
}

/// 변환 대상 단위를 파싱한다. 온도는 `InvalidTemperatureTarget`으로 거부한다.
pub fn parse_target_unit(category: UnitCategory, s: &str) -> Result<Unit, ConversionError> {
    match category {
        UnitCategory::Temperature => parse_temperature_unit(s)
            .map(Unit::Temperature)
            .ok_or_else(|| ConversionError::InvalidTemperatureTarget(s.to_string())),
        _ => parse_unit(category, s),
    }
}

fn parse_length_unit(s: &str) -> Option<LengthUnit> {
    match s.trim().to_lowercase().as_str() {
        "m" | "meter" | "meters" | "metre" | "metres" => Some(LengthUnit::Meters),
        "km" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => {
            Some(LengthUnit::Kilometers)
        }
        "mi" | "mile" | "miles" => Some(LengthUnit::Miles),
        "ft" | "foot" | "feet" => Some(LengthUnit::Feet),
        "in" | "inch" | "inches" => Some(LengthUnit::Inches),
        _ => None,
    }
}

fn parse_mass_unit(s: &str) -> Option<MassUnit> {
    match s.trim().to_lowercase().as_str() {
        "kg" | "kilogram" | "kilograms" => Some(MassUnit::Kilograms),
        "g" | "gram" | "grams" => Some(MassUnit::Grams),
        "lb" | "lbs" | "pound" | "pounds" => Some(MassUnit::Pounds),
        "oz" | "ounce" | "ounces" => Some(MassUnit::Ounces),
        _ => None,
    }
}

fn parse_temperature_unit(s: &str) -> Option<TemperatureUnit> {
    match s.trim().to_lowercase().as_str() {
        "c" | "celsius" | "°c" => Some(TemperatureUnit::Celsius),
        "f" | "fahrenheit" | "°f" => Some(TemperatureUnit::Fahrenheit),
        "k" | "kelvin" => Some(TemperatureUnit::Kelvin),
        _ => None,
    }
}
