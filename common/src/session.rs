//! 注釈セッションとツールモード制御
//!
//! ウィジェット全体のグローバル状態ではなく、セッションごとに
//! 独立した値として保持する。所有権はセッションにあり、
//! `end()`（= drop）で全て破棄される。複数セッションを並行して
//! 作れるため、テストも互いに干渉しない。
//!
//! ポインタ・クリック・blurの各イベントはこの型のメソッドとして
//! 到着し、アクティブなツールモードに応じて解釈される。

use crate::annotation::TextId;
use crate::geometry::{Dimensions, Point};
use crate::store::AnnotationStore;
use crate::stroke::StrokeRecorder;
use crate::surface::{SourceImage, StrokeSurface};
use crate::text::{BlurOutcome, TextAnnotationManager};

/// ジェスチャ解釈を選ぶ排他的な状態機械
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    #[default]
    None,
    Draw,
    Text,
}

/// 描画サーフェスに表示すべきカーソルのヒント
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    Crosshair,
    Text,
}

/// 1回の注釈・報告インタラクションの寿命を表すセッション
pub struct AnnotationSession {
    source: Option<SourceImage>,
    preview: Dimensions,
    store: AnnotationStore,
    recorder: StrokeRecorder,
    texts: TextAnnotationManager,
    surface: StrokeSurface,
    mode: ToolMode,
}

impl AnnotationSession {
    /// キャプチャ結果とプレビュー表示サイズからセッションを開始する
    ///
    /// キャプチャ失敗（source = None）でもセッションは成立し、
    /// 合成はある分のレイヤだけで行われる。
    pub fn start(source: Option<SourceImage>, preview: Dimensions) -> Self {
        Self {
            source,
            preview,
            store: AnnotationStore::new(),
            recorder: StrokeRecorder::new(),
            texts: TextAnnotationManager::new(),
            surface: StrokeSurface::new(preview),
            mode: ToolMode::None,
        }
    }

    /// セッションを閉じ、全ての状態を破棄する
    pub fn end(self) {}

    pub fn tool_mode(&self) -> ToolMode {
        self.mode
    }

    pub fn cursor_hint(&self) -> CursorHint {
        match self.mode {
            ToolMode::None => CursorHint::Default,
            ToolMode::Draw => CursorHint::Crosshair,
            ToolMode::Text => CursorHint::Text,
        }
    }

    /// ツールを有効化する。別のツールが有効なら暗黙に解除される。
    ///
    /// ストロークジェスチャがモード切替をまたぐことはない。
    /// 進行中なら先に完了させる（点が無ければ結果は捨てられる）。
    pub fn activate_tool(&mut self, mode: ToolMode) {
        self.finish_gesture();
        self.mode = mode;
    }

    /// ツール選択を解除してNoneへ戻す
    pub fn deactivate_tools(&mut self) {
        self.finish_gesture();
        self.mode = ToolMode::None;
    }

    fn finish_gesture(&mut self) {
        if self.recorder.is_active() {
            self.recorder.finish(&mut self.store);
        }
    }

    /// ポインタ押下。Drawモードなら描画ジェスチャを開始する。
    pub fn pointer_down(&mut self, point: Point) {
        if self.mode == ToolMode::Draw {
            self.recorder.begin(point);
        }
    }

    /// ポインタ移動。描画中ならサンプル追加＋ライブ描画。
    pub fn pointer_move(&mut self, point: Point) {
        if self.mode == ToolMode::Draw {
            self.recorder.extend(point, &mut self.surface);
        }
    }

    /// ポインタ解放。描画中ならストロークを確定する。
    pub fn pointer_up(&mut self) {
        if self.recorder.is_active() {
            self.recorder.finish(&mut self.store);
        }
    }

    /// クリック。Textモードならその位置にテキスト注釈を1つ生成する。
    pub fn click(&mut self, point: Point) -> Option<TextId> {
        if self.mode == ToolMode::Text {
            Some(self.texts.place(&mut self.store, point))
        } else {
            None
        }
    }

    /// 編集中テキストの内容を更新する
    pub fn set_text(&mut self, id: TextId, text: &str) {
        self.texts.set_text(&mut self.store, id, text);
    }

    /// テキストのフォーカス喪失（唯一の確定トリガ）
    pub fn blur_text(&mut self, id: TextId) -> BlurOutcome {
        self.texts.blur(&mut self.store, id)
    }

    /// 全注釈を消去し、ライブサーフェスを透明に戻し、
    /// ツール選択も解除する。部分クリアは存在しない。
    pub fn clear_annotations(&mut self) {
        self.finish_gesture();
        self.store.clear_all();
        self.surface.clear();
        self.mode = ToolMode::None;
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn preview(&self) -> Dimensions {
        self.preview
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn surface(&self) -> &StrokeSurface {
        &self.surface
    }
}
