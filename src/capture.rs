//! キャプチャサービス境界
//!
//! スクリーンショットの取得はエンジン外部の協力者として扱う。
//! `Ok(None)` は非致命的なキャプチャ失敗を意味し、呼び出し側は
//! ベース画像なしで続行しなければならない。

use crate::error::{FeedbackError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use feedback_widget_common::SourceImage;
use std::path::PathBuf;

pub trait CaptureSource {
    /// 画像を1回だけ取得する。Noneはキャプチャ失敗（続行可）。
    fn capture(&self) -> Result<Option<SourceImage>>;
}

/// ディスク上の画像ファイル（PNG/JPEG）からのキャプチャ
pub struct FileCapture {
    path: PathBuf,
}

impl FileCapture {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CaptureSource for FileCapture {
    fn capture(&self) -> Result<Option<SourceImage>> {
        if !self.path.exists() {
            return Err(FeedbackError::FileNotFound(
                self.path.display().to_string(),
            ));
        }
        let bytes = std::fs::read(&self.path)?;
        let image = SourceImage::from_bytes(&bytes)
            .map_err(|e| FeedbackError::ScreenshotLoad(e.to_string()))?;
        Ok(Some(image))
    }
}

/// キャプチャ無し（常にベース画像なしで続行）
pub struct NoCapture;

impl CaptureSource for NoCapture {
    fn capture(&self) -> Result<Option<SourceImage>> {
        Ok(None)
    }
}

/// `data:image/...;base64,` 形式の文字列から画像をデコードする
///
/// ブラウザ側キャプチャの生の受け渡し形式。
pub fn decode_data_uri(uri: &str) -> Result<SourceImage> {
    let comma = uri
        .find(',')
        .ok_or_else(|| FeedbackError::InvalidDataUri("カンマ区切りがありません".into()))?;
    let (header, payload) = uri.split_at(comma);
    if !header.starts_with("data:image/") || !header.ends_with(";base64") {
        return Err(FeedbackError::InvalidDataUri(format!(
            "未対応のヘッダ: {}",
            header
        )));
    }
    let bytes = STANDARD
        .decode(&payload[1..])
        .map_err(|e| FeedbackError::InvalidDataUri(e.to_string()))?;
    SourceImage::from_bytes(&bytes).map_err(|e| FeedbackError::ScreenshotLoad(e.to_string()))
}
