//! 변환 로직을 라이브러리로 분리하여 CLI와 GUI가 같은 코어를 사용한다.

pub mod app;
pub mod config;
pub mod conversion;
pub mod currency;
pub mod logging;
pub mod qr;
pub mod quantity;
pub mod ui_cli;
pub mod units;
