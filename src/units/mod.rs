//! 단위 정의 및 변환 모듈 모음.

pub mod length;
pub mod mass;
pub mod temperature;

pub use length::{convert_length, LengthUnit};
pub use mass::{convert_mass, MassUnit};
pub use temperature::{convert_temperature, TemperatureUnit};

/// 기준 단위 대비 배율(단위/기준단위)로 환산되는 단위.
///
/// 기준 단위의 배율은 1이다. 오프셋이 있는 온도는 해당하지 않는다.
pub trait RatioUnit: Copy {
    /// 기준 단위 1에 해당하는 이 단위의 크기.
    fn per_base(self) -> f64;
}

/// 배율표 기반 공통 변환. `value * (to / from)` 하나로 모든 조합을 처리한다.
pub fn convert_ratio<U: RatioUnit>(value: f64, from: U, to: U) -> f64 {
    value * (to.per_base() / from.per_base())
}
