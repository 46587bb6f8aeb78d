//! テキスト注釈マネージャ
//!
//! 配置ジェスチャごとに編集可能なテキストレコードを1つ生成し、
//! create → edit → blurで確定/破棄、のライフサイクルを管理する。
//! 確定操作はblurのみ。複数レコードの同時編集は許容される
//! （互いに独立）。

use crate::annotation::{TextId, TextState};
use crate::geometry::Point;
use crate::store::AnnotationStore;

/// blur時の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlurOutcome {
    /// 非空の内容で確定した
    Committed,
    /// 空（またはプレースホルダのまま）だったので破棄した
    Discarded,
}

#[derive(Debug, Default)]
pub struct TextAnnotationManager;

impl TextAnnotationManager {
    pub fn new() -> Self {
        Self
    }

    /// 配置ジェスチャ1回につきレコードを1つ生成する
    ///
    /// プレースホルダ入り・全選択・編集状態で登録され、
    /// 最初の入力で全文が置き換わる。
    pub fn place(&mut self, store: &mut AnnotationStore, anchor: Point) -> TextId {
        store.insert_text(anchor)
    }

    /// 編集中レコードの内容を置き換える
    pub fn set_text(&mut self, store: &mut AnnotationStore, id: TextId, text: &str) {
        if let Some(record) = store.get_text_mut(id) {
            record.text = text.to_string();
            record.selected = false;
        }
    }

    /// フォーカス喪失。空ならレコードごと消え、そうでなければ確定する。
    pub fn blur(&mut self, store: &mut AnnotationStore, id: TextId) -> BlurOutcome {
        if store.remove_text_if_blank(id) {
            return BlurOutcome::Discarded;
        }
        if let Some(record) = store.get_text_mut(id) {
            record.state = TextState::Committed;
            record.selected = false;
        }
        BlurOutcome::Committed
    }
}
