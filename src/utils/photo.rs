use base64::{engine::general_purpose, Engine as _};
use std::path::Path;
use tracing::debug;

use crate::error::{AppError, Result};

/// 允许上传的照片格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoFormat {
    Jpeg,
    Png,
    Webp,
    Gif,
}

impl PhotoFormat {
    /// 根据文件扩展名判断格式
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "webp" => Some(Self::Webp),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }

    pub fn to_mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
            Self::Gif => "image/gif",
        }
    }
}

/// 编码为 `data:` URL，作为植物的图片引用
pub fn encode_data_url(data: &[u8], format: PhotoFormat) -> String {
    let encoded = general_purpose::STANDARD.encode(data);
    format!("data:{};base64,{}", format.to_mime_type(), encoded)
}

/// 读取照片文件并转换为 data URL
pub async fn read_photo_data_url(path: &Path) -> Result<String> {
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(PhotoFormat::from_extension)
        .ok_or_else(|| {
            AppError::Validation(format!("Unsupported photo format: {}", path.display()))
        })?;

    let data = tokio::fs::read(path).await?;
    if data.is_empty() {
        return Err(AppError::validation("Photo file is empty"));
    }

    debug!("Read photo {} ({} bytes)", path.display(), data.len());
    Ok(encode_data_url(&data, format))
}
