use serde::{Deserialize, Serialize};

use super::{convert_ratio, RatioUnit};

/// 길이 단위. 내부 기준은 미터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUnit {
    Meters,
    Kilometers,
    Miles,
    Feet,
    Inches,
}

impl LengthUnit {
    pub const ALL: [LengthUnit; 5] = [
        LengthUnit::Meters,
        LengthUnit::Kilometers,
        LengthUnit::Miles,
        LengthUnit::Feet,
        LengthUnit::Inches,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LengthUnit::Meters => "Meters",
            LengthUnit::Kilometers => "Kilometers",
            LengthUnit::Miles => "Miles",
            LengthUnit::Feet => "Feet",
            LengthUnit::Inches => "Inches",
        }
    }
}

impl RatioUnit for LengthUnit {
    fn per_base(self) -> f64 {
        match self {
            LengthUnit::Meters => 1.0,
            LengthUnit::Kilometers => 0.001,
            LengthUnit::Miles => 0.000621371,
            LengthUnit::Feet => 3.28084,
            LengthUnit::Inches => 39.3701,
        }
    }
}

/// 길이를 다른 단위로 변환한다.
pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    convert_ratio(value, from, to)
}
