//! エラー型定義

use thiserror::Error;

/// 注釈エンジン共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("compose error: {0}")]
    Compose(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
