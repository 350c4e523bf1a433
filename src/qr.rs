//! 텍스트를 QR 코드 PNG 바이트로 변환한다.

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageOutputFormat, Luma};
use qrcode::types::{Color, QrError as SymbolError};
use qrcode::{EcLevel, QrCode};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::QrSettings;

/// 생성 이미지 한 변의 최대 픽셀 수.
pub const MAX_SIDE_PX: u32 = 4_096;

/// QR 생성 오류.
#[derive(Debug, Error)]
pub enum QrError {
    /// 최대 심볼 용량을 넘는 입력
    #[error("QR 코드 용량 초과: {len} 바이트")]
    DataTooLong { len: usize },
    /// 그 밖의 심볼 인코딩 오류
    #[error("QR 인코딩 오류: {0}")]
    Encoding(String),
    /// PNG 쓰기 오류
    #[error("이미지 생성 오류: {0}")]
    Image(#[from] image::ImageError),
}

/// 텍스트를 이미지 바이트로 인코딩하는 기능.
pub trait QrEncoder {
    fn encode_to_image(&self, text: &str) -> Result<Vec<u8>, QrError>;
}

/// `qrcode`로 심볼을 만들고 `image`로 흑백 PNG를 쓴다.
#[derive(Debug, Clone)]
pub struct PngQrEncoder {
    module_px: u32,
    quiet_zone: u32,
}

impl Default for PngQrEncoder {
    fn default() -> Self {
        Self::new(&QrSettings::default())
    }
}

impl PngQrEncoder {
    pub fn new(settings: &QrSettings) -> Self {
        Self {
            module_px: settings.module_px.max(1),
            quiet_zone: settings.quiet_zone,
        }
    }

    /// 여백 포함 한 변의 픽셀 수. 오버플로나 상한 초과 시 `None`.
    fn side_px(&self, width: u32) -> Option<u32> {
        self.quiet_zone
            .checked_mul(2)
            .and_then(|q| q.checked_add(width))
            .and_then(|modules| modules.checked_mul(self.module_px))
            .filter(|side| *side <= MAX_SIDE_PX)
    }

    fn render(&self, code: &QrCode) -> Result<GrayImage, QrError> {
        let width = code.width() as u32;
        let side = self.side_px(width).ok_or_else(|| {
            QrError::Encoding(format!(
                "이미지 크기 초과: 모듈 {width}개, 모듈당 {}px, 여백 {} (최대 {MAX_SIDE_PX}px)",
                self.module_px, self.quiet_zone
            ))
        })?;
        let colors = code.to_colors();
        Ok(GrayImage::from_fn(side, side, |x, y| {
            let mx = (x / self.module_px) as i64 - self.quiet_zone as i64;
            let my = (y / self.module_px) as i64 - self.quiet_zone as i64;
            let inside = mx >= 0 && my >= 0 && mx < width as i64 && my < width as i64;
            let dark = inside && colors[(my as usize) * (width as usize) + mx as usize] == Color::Dark;
            if dark {
                Luma([0u8])
            } else {
                Luma([255u8])
            }
        }))
    }
}

impl QrEncoder for PngQrEncoder {
    fn encode_to_image(&self, text: &str) -> Result<Vec<u8>, QrError> {
        let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::M).map_err(
            |e| {
                warn!(len = text.len(), error = %e, "QR encoding failed");
                match e {
                    SymbolError::DataTooLong => QrError::DataTooLong { len: text.len() },
                    other => QrError::Encoding(other.to_string()),
                }
            },
        )?;
        let img = self.render(&code).inspect_err(|e| warn!(error = %e, "QR render rejected"))?;
        let mut bytes = Vec::new();
        DynamicImage::ImageLuma8(img).write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)?;
        info!(len = text.len(), modules = code.width(), png_bytes = bytes.len(), "QR generated");
        Ok(bytes)
    }
}
