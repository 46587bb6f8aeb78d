//! Feedback Widget Common Library
//!
//! 注釈・合成エンジン本体。CLIや他のフロントエンドから共有される:
//! - geometry: プレビュー座標⇔ネイティブ座標の変換
//! - stroke / text / store: ジェスチャ記録と注釈データ
//! - session: ツールモードとセッションライフサイクル
//! - compositor: ネイティブ解像度への平坦化とPNGエンコード

pub mod annotation;
pub mod compositor;
pub mod error;
pub mod font;
pub mod geometry;
pub mod session;
pub mod store;
pub mod stroke;
pub mod surface;
pub mod text;

pub use annotation::{StrokeAnnotation, TextAnnotation, TextId, TextState, PLACEHOLDER_TEXT};
pub use compositor::{to_png_bytes, to_png_data_uri, Compositor};
pub use error::{Error, Result};
pub use font::FontMetrics;
pub use geometry::{to_native, Dimensions, Point, ScaleFactor};
pub use session::{AnnotationSession, CursorHint, ToolMode};
pub use store::AnnotationStore;
pub use stroke::StrokeRecorder;
pub use surface::{SourceImage, StrokeSurface};
pub use text::{BlurOutcome, TextAnnotationManager};
