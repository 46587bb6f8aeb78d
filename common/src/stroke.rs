//! ストロークレコーダ
//!
//! 描画ジェスチャ中のポインタサンプルを作業バッファへ蓄積し、
//! サンプルごとにライブサーフェスへ線分を即時描画する。
//! ジェスチャ終了時にパスのコピーをストアへ確定する。

use crate::annotation::StrokeAnnotation;
use crate::geometry::Point;
use crate::store::AnnotationStore;
use crate::surface::StrokeSurface;

/// Idle/Activeの2状態レコーダ
#[derive(Debug, Default)]
pub struct StrokeRecorder {
    path: Vec<Point>,
    active: bool,
}

impl StrokeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// ジェスチャ開始（Drawモード時のみ呼ばれる）
    pub fn begin(&mut self, point: Point) {
        self.active = true;
        self.path.clear();
        self.path.push(point);
    }

    /// サンプル追加。直前サンプルからの線分をサーフェスへ描く。
    pub fn extend(&mut self, point: Point, surface: &mut StrokeSurface) {
        if !self.active {
            return;
        }
        if let Some(&last) = self.path.last() {
            surface.draw_segment(last, point);
        }
        self.path.push(point);
    }

    /// ジェスチャ終了
    ///
    /// 1点以上あればパスのコピーをストアへ確定してtrueを返す。
    /// 結果に関わらず作業バッファは空に戻る。
    pub fn finish(&mut self, store: &mut AnnotationStore) -> bool {
        let committed = if self.active {
            match StrokeAnnotation::from_path(&self.path) {
                Some(stroke) => {
                    store.append_stroke(stroke);
                    true
                }
                None => false,
            }
        } else {
            false
        };
        self.active = false;
        self.path.clear();
        committed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Dimensions;

    fn surface() -> StrokeSurface {
        StrokeSurface::new(Dimensions::new(100, 100))
    }

    #[test]
    fn test_gesture_commits_one_stroke_with_all_samples() {
        let mut recorder = StrokeRecorder::new();
        let mut store = AnnotationStore::new();
        let mut surface = surface();

        recorder.begin(Point::new(10.0, 10.0));
        recorder.extend(Point::new(20.0, 10.0), &mut surface);
        recorder.extend(Point::new(20.0, 20.0), &mut surface);
        assert!(recorder.finish(&mut store));

        assert_eq!(store.strokes().len(), 1);
        let stroke = &store.strokes()[0];
        assert_eq!(stroke.len(), 3);
        assert_eq!(
            stroke.points(),
            &[
                Point::new(10.0, 10.0),
                Point::new(20.0, 10.0),
                Point::new(20.0, 20.0)
            ]
        );
    }

    #[test]
    fn test_finish_without_begin_commits_nothing() {
        let mut recorder = StrokeRecorder::new();
        let mut store = AnnotationStore::new();
        assert!(!recorder.finish(&mut store));
        assert!(store.is_empty());
    }

    #[test]
    fn test_single_point_gesture_is_committed() {
        // 押して動かさず離した場合も1点ストロークとして残る
        let mut recorder = StrokeRecorder::new();
        let mut store = AnnotationStore::new();

        recorder.begin(Point::new(5.0, 5.0));
        assert!(recorder.finish(&mut store));
        assert_eq!(store.strokes()[0].len(), 1);
    }

    #[test]
    fn test_extend_draws_live_preview() {
        let mut recorder = StrokeRecorder::new();
        let mut surface = surface();

        recorder.begin(Point::new(10.0, 10.0));
        recorder.extend(Point::new(50.0, 10.0), &mut surface);
        assert!(surface.has_content());
    }

    #[test]
    fn test_extend_while_idle_is_ignored() {
        let mut recorder = StrokeRecorder::new();
        let mut surface = surface();
        recorder.extend(Point::new(10.0, 10.0), &mut surface);
        assert!(!surface.has_content());
    }

    #[test]
    fn test_buffer_reset_between_gestures() {
        let mut recorder = StrokeRecorder::new();
        let mut store = AnnotationStore::new();
        let mut surface = surface();

        recorder.begin(Point::new(1.0, 1.0));
        recorder.extend(Point::new(2.0, 2.0), &mut surface);
        recorder.finish(&mut store);

        recorder.begin(Point::new(3.0, 3.0));
        recorder.finish(&mut store);

        assert_eq!(store.strokes().len(), 2);
        assert_eq!(store.strokes()[0].len(), 2);
        assert_eq!(store.strokes()[1].len(), 1);
    }
}
