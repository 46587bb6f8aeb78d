//! 注釈スクリプト
//!
//! セッションをヘッドレスに再生するためのJSON記述。ストロークは
//! プレビュー座標のサンプル列、テキストはアンカーと内容。適用は
//! 通常のイベントAPI（ジェスチャ・クリック・blur）を経由して行い、
//! ストアを直接書き換えることはない。

use crate::error::{FeedbackError, Result};
use feedback_widget_common::{AnnotationSession, Dimensions, Point, ToolMode};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextEntry {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationScript {
    /// 画面上の表示サイズ（スケール計算の基準）
    pub preview: Dimensions,
    #[serde(default)]
    pub strokes: Vec<Vec<Point>>,
    #[serde(default)]
    pub texts: Vec<TextEntry>,
}

impl AnnotationScript {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FeedbackError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let script: AnnotationScript = serde_json::from_str(&content)?;
        Ok(script)
    }

    /// 注釈なしの空スクリプト
    pub fn empty(preview: Dimensions) -> Self {
        Self {
            preview,
            strokes: Vec::new(),
            texts: Vec::new(),
        }
    }

    /// スクリプトをセッションへ再生する
    ///
    /// 空のストロークは無視される。空白のみのテキストはblur時に
    /// エンジン側で破棄される（スクリプトでも同じ規則）。
    pub fn apply(&self, session: &mut AnnotationSession) {
        if !self.strokes.is_empty() {
            session.activate_tool(ToolMode::Draw);
            for stroke in &self.strokes {
                let mut samples = stroke.iter();
                let Some(&first) = samples.next() else {
                    continue;
                };
                session.pointer_down(first);
                for &sample in samples {
                    session.pointer_move(sample);
                }
                session.pointer_up();
            }
        }

        if !self.texts.is_empty() {
            session.activate_tool(ToolMode::Text);
            for entry in &self.texts {
                if let Some(id) = session.click(Point::new(entry.x, entry.y)) {
                    session.set_text(id, &entry.text);
                    session.blur_text(id);
                }
            }
        }

        session.deactivate_tools();
    }
}
