use serde::{Deserialize, Serialize};

use super::{convert_ratio, RatioUnit};

/// 질량(무게) 단위. 내부 기준은 kg이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MassUnit {
    Kilograms,
    Grams,
    Pounds,
    Ounces,
}

impl MassUnit {
    pub const ALL: [MassUnit; 4] = [
        MassUnit::Kilograms,
        MassUnit::Grams,
        MassUnit::Pounds,
        MassUnit::Ounces,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MassUnit::Kilograms => "Kilograms",
            MassUnit::Grams => "Grams",
            MassUnit::Pounds => "Pounds",
            MassUnit::Ounces => "Ounces",
        }
    }
}

impl RatioUnit for MassUnit {
    fn per_base(self) -> f64 {
        match self {
            MassUnit::Kilograms => 1.0,
            MassUnit::Grams => 1000.0,
            MassUnit::Pounds => 2.20462,
            MassUnit::Ounces => 35.274,
        }
    }
}

/// 질량을 변환한다.
pub fn convert_mass(value: f64, from: MassUnit, to: MassUnit) -> f64 {
    convert_ratio(value, from, to)
}
