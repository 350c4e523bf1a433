use std::fmt;

use serde::{Deserialize, Serialize};

use crate::units::{LengthUnit, MassUnit, TemperatureUnit};

/// 변환 엔진이 다루는 물리량 종류를 나타낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitCategory {
    Length,
    Weight,
    Temperature,
}

impl UnitCategory {
    pub const ALL: [UnitCategory; 3] = [
        UnitCategory::Length,
        UnitCategory::Weight,
        UnitCategory::Temperature,
    ];

    pub fn name(self) -> &'static str {
        match self {
            UnitCategory::Length => "Length",
            UnitCategory::Weight => "Weight",
            UnitCategory::Temperature => "Temperature",
        }
    }

    /// 해당 물리량에서 선택 가능한 단위 목록.
    pub fn units(self) -> Vec<Unit> {
        match self {
            UnitCategory::Length => LengthUnit::ALL.into_iter().map(Unit::Length).collect(),
            UnitCategory::Weight => MassUnit::ALL.into_iter().map(Unit::Weight).collect(),
            UnitCategory::Temperature => TemperatureUnit::ALL
                .into_iter()
                .map(Unit::Temperature)
                .collect(),
        }
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 물리량별 단위를 하나로 묶은 타입. 다른 물리량의 단위와 섞이지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    Length(LengthUnit),
    Weight(MassUnit),
    Temperature(TemperatureUnit),
}

impl Unit {
    pub fn category(self) -> UnitCategory {
        match self {
            Unit::Length(_) => UnitCategory::Length,
            Unit::Weight(_) => UnitCategory::Weight,
            Unit::Temperature(_) => UnitCategory::Temperature,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Unit::Length(u) => u.name(),
            Unit::Weight(u) => u.name(),
            Unit::Temperature(u) => u.name(),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 한 번의 변환 요청. 요청이 끝나면 버려지며 세션 상태를 갖지 않는다.
///
/// `from`, `to`는 모두 `category`에 속해야 한다. 검증은
/// [`crate::conversion::convert_request`]가 수행한다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionRequest {
    pub category: UnitCategory,
    pub from: Unit,
    pub to: Unit,
    pub value: f64,
}

impl ConversionRequest {
    pub fn new(category: UnitCategory, from: Unit, to: Unit, value: f64) -> Self {
        Self {
            category,
            from,
            to,
            value,
        }
    }
}
