//! 注釈ストア
//!
//! 確定済みストロークと配置済みテキストの順序付きコレクション。
//! コンポジタが読む唯一のデータソース。部分削除は存在せず、
//! クリアは全消去のみ。

use crate::annotation::{StrokeAnnotation, TextAnnotation, TextId};
use crate::geometry::Point;

#[derive(Debug, Default)]
pub struct AnnotationStore {
    strokes: Vec<StrokeAnnotation>,
    texts: Vec<TextAnnotation>,
    next_text_id: u32,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// ストロークを追加（ジェスチャ確定時に1回だけ呼ばれる）
    pub fn append_stroke(&mut self, stroke: StrokeAnnotation) {
        self.strokes.push(stroke);
    }

    /// テキストレコードを配置時点で登録し、IDを払い出す
    pub fn insert_text(&mut self, anchor: Point) -> TextId {
        let id = TextId(self.next_text_id);
        self.next_text_id += 1;
        self.texts.push(TextAnnotation::new(id, anchor));
        id
    }

    pub fn get_text(&self, id: TextId) -> Option<&TextAnnotation> {
        self.texts.iter().find(|t| t.id == id)
    }

    pub(crate) fn get_text_mut(&mut self, id: TextId) -> Option<&mut TextAnnotation> {
        self.texts.iter_mut().find(|t| t.id == id)
    }

    /// blur時に内容が空なら該当レコードを完全に取り除く
    ///
    /// 取り除いた場合true。空の注釈は決して残らない。
    pub fn remove_text_if_blank(&mut self, id: TextId) -> bool {
        let blank = self
            .texts
            .iter()
            .any(|t| t.id == id && t.is_effectively_blank());
        if blank {
            self.texts.retain(|t| t.id != id);
        }
        blank
    }

    /// ストロークもテキストも全て消す
    pub fn clear_all(&mut self) {
        self.strokes.clear();
        self.texts.clear();
    }

    pub fn strokes(&self) -> &[StrokeAnnotation] {
        &self.strokes
    }

    /// 配置順のテキストレコード
    pub fn texts(&self) -> &[TextAnnotation] {
        &self.texts
    }

    pub fn len(&self) -> usize {
        self.strokes.len() + self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.texts.is_empty()
    }
}
