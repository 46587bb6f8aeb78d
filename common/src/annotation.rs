//! 注釈データモデル
//!
//! ストローク注釈とテキスト注釈の純粋なデータレコード。
//! UI要素のハンドルは一切持たない（編集UIはレコードを参照・更新し、
//! コンポジタはレコードだけを読む）。

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// テキスト注釈の初期プレースホルダ
pub const PLACEHOLDER_TEXT: &str = "Write something";

/// 1回の描画ジェスチャで記録されたストローク
///
/// ジェスチャ終了時に確定され、以後不変。点数は必ず1以上
/// （0点のジェスチャはストアに入らない）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrokeAnnotation {
    points: Vec<Point>,
}

impl StrokeAnnotation {
    /// 作業バッファのコピーから生成する。空のパスはNoneを返す。
    pub fn from_path(path: &[Point]) -> Option<Self> {
        if path.is_empty() {
            return None;
        }
        Some(Self {
            points: path.to_vec(),
        })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// テキスト注釈の識別子（セッション内で一意）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextId(pub(crate) u32);

/// テキスト注釈の編集状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextState {
    /// 編集中（フォーカスあり、blurで確定または破棄）
    Editing,
    /// 確定済み
    Committed,
}

/// テキスト注釈レコード
///
/// アンカーはプレビュー座標。生成直後はプレースホルダ入りで
/// 全選択状態（最初の入力で全文が置き換わる）。
#[derive(Debug, Clone)]
pub struct TextAnnotation {
    pub(crate) id: TextId,
    pub(crate) anchor: Point,
    pub(crate) text: String,
    pub(crate) state: TextState,
    /// 全選択中か（次のset_textが全文置換になる、のUI側ヒント）
    pub(crate) selected: bool,
}

impl TextAnnotation {
    pub(crate) fn new(id: TextId, anchor: Point) -> Self {
        Self {
            id,
            anchor,
            text: PLACEHOLDER_TEXT.to_string(),
            state: TextState::Editing,
            selected: true,
        }
    }

    pub fn id(&self) -> TextId {
        self.id
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn state(&self) -> TextState {
        self.state
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// 内容が「ユーザ入力なし」とみなされるか
    ///
    /// 空白のみ、または手つかずのプレースホルダはblur時に破棄される。
    pub fn is_effectively_blank(&self) -> bool {
        let trimmed = self.text.trim();
        trimmed.is_empty() || trimmed == PLACEHOLDER_TEXT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_from_empty_path_is_none() {
        assert!(StrokeAnnotation::from_path(&[]).is_none());
    }

    #[test]
    fn test_stroke_copies_path() {
        let mut path = vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)];
        let stroke = StrokeAnnotation::from_path(&path).unwrap();
        // 作業バッファを後から書き換えても確定データは変わらない
        path[0] = Point::new(9.0, 9.0);
        path.clear();
        assert_eq!(stroke.len(), 2);
        assert_eq!(stroke.points()[0], Point::new(1.0, 2.0));
    }

    #[test]
    fn test_new_text_annotation_has_placeholder_selected() {
        let text = TextAnnotation::new(TextId(1), Point::new(10.0, 20.0));
        assert_eq!(text.text(), PLACEHOLDER_TEXT);
        assert_eq!(text.state(), TextState::Editing);
        assert!(text.is_selected());
    }

    #[test]
    fn test_blank_detection() {
        let mut text = TextAnnotation::new(TextId(1), Point::new(0.0, 0.0));
        assert!(text.is_effectively_blank(), "プレースホルダは入力なし扱い");

        text.text = "   ".to_string();
        assert!(text.is_effectively_blank());

        text.text = "Fix this".to_string();
        assert!(!text.is_effectively_blank());
    }
}
