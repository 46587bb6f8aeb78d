//! 注釈合成のエンドツーエンドテスト
//!
//! スクリプト再生 → セッション → コンポジタの経路を、
//! プレビュー縮小表示（1200x800ネイティブ / 600x400プレビュー）で検証する。

use feedback_widget_common::{
    AnnotationSession, Compositor, Dimensions, FontMetrics, Point, ToolMode,
};
use feedback_widget_rust::script::{AnnotationScript, TextEntry};
use image::{Rgba, RgbaImage};

fn white_source(width: u32, height: u32) -> feedback_widget_common::SourceImage {
    feedback_widget_common::SourceImage::from_rgba(RgbaImage::from_pixel(
        width,
        height,
        Rgba([255, 255, 255, 255]),
    ))
}

fn deterministic_compositor() -> Compositor {
    Compositor::with_font(FontMetrics::Approximate)
}

#[test]
fn test_text_annotation_scaled_to_native() {
    // プレビュー(100,50)のテキスト → ネイティブ(200,100)、フォント28px、枠2倍
    let script = AnnotationScript {
        preview: Dimensions::new(600, 400),
        strokes: vec![],
        texts: vec![TextEntry {
            x: 100.0,
            y: 50.0,
            text: "Fix this".to_string(),
        }],
    };

    let mut session = AnnotationSession::start(Some(white_source(1200, 800)), script.preview);
    script.apply(&mut session);
    assert_eq!(session.store().texts().len(), 1);

    let output = deterministic_compositor()
        .compose(
            session.source(),
            session.surface(),
            session.store(),
            session.preview(),
        )
        .expect("合成に失敗");

    assert_eq!(output.width(), 1200);
    assert_eq!(output.height(), 800);

    // 枠の左上: x = 200 - 16/2, y = 100 - 14*2 - 16/2
    assert_eq!(*output.get_pixel(192, 64), Rgba([255, 0, 0, 255]));
    // 枠の内側はベース画像のまま
    assert_eq!(*output.get_pixel(230, 95), Rgba([255, 255, 255, 255]));
}

#[test]
fn test_stroke_gesture_committed_and_composited() {
    let script = AnnotationScript {
        preview: Dimensions::new(600, 400),
        strokes: vec![vec![
            Point::new(10.0, 10.0),
            Point::new(20.0, 10.0),
            Point::new(20.0, 20.0),
        ]],
        texts: vec![],
    };

    let mut session = AnnotationSession::start(Some(white_source(1200, 800)), script.preview);
    script.apply(&mut session);

    let strokes = session.store().strokes();
    assert_eq!(strokes.len(), 1);
    assert_eq!(
        strokes[0].points(),
        &[
            Point::new(10.0, 10.0),
            Point::new(20.0, 10.0),
            Point::new(20.0, 20.0)
        ]
    );

    let output = deterministic_compositor()
        .compose(
            session.source(),
            session.surface(),
            session.store(),
            session.preview(),
        )
        .expect("合成に失敗");

    // プレビュー(15,10)付近の線分 → ネイティブ(30,20)付近が赤くなる
    let px = output.get_pixel(30, 20);
    assert!(px.0[0] > 150, "赤チャンネルが立っているはず: {:?}", px);
    assert!(px.0[1] < 120, "緑は混ざらないはず: {:?}", px);
}

#[test]
fn test_compose_without_screenshot_degrades() {
    // キャプチャ失敗時もプレビューサイズで合成でき、送信を妨げない
    let script = AnnotationScript {
        preview: Dimensions::new(300, 200),
        strokes: vec![vec![Point::new(10.0, 10.0), Point::new(100.0, 100.0)]],
        texts: vec![],
    };

    let mut session = AnnotationSession::start(None, script.preview);
    script.apply(&mut session);

    let output = deterministic_compositor()
        .compose(
            session.source(),
            session.surface(),
            session.store(),
            session.preview(),
        )
        .expect("ベース画像なしの合成に失敗");

    assert_eq!(output.width(), 300);
    assert_eq!(output.height(), 200);
    assert!(output.pixels().any(|p| p.0[3] != 0));
}

#[test]
fn test_compose_is_byte_identical_across_calls() {
    let script = AnnotationScript {
        preview: Dimensions::new(600, 400),
        strokes: vec![vec![Point::new(5.0, 5.0), Point::new(300.0, 200.0)]],
        texts: vec![TextEntry {
            x: 50.0,
            y: 60.0,
            text: "再現性チェック".to_string(),
        }],
    };

    let mut session = AnnotationSession::start(Some(white_source(1200, 800)), script.preview);
    script.apply(&mut session);

    let compositor = deterministic_compositor();
    let first = compositor
        .compose(
            session.source(),
            session.surface(),
            session.store(),
            session.preview(),
        )
        .unwrap();
    let second = compositor
        .compose(
            session.source(),
            session.surface(),
            session.store(),
            session.preview(),
        )
        .unwrap();

    let png_a = feedback_widget_common::to_png_bytes(&first).unwrap();
    let png_b = feedback_widget_common::to_png_bytes(&second).unwrap();
    assert_eq!(png_a, png_b, "同一入力の合成はバイト単位で一致するはず");
}

#[test]
fn test_composed_png_saved_to_disk() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("annotated.png");

    let script = AnnotationScript {
        preview: Dimensions::new(200, 100),
        strokes: vec![vec![Point::new(1.0, 1.0), Point::new(150.0, 80.0)]],
        texts: vec![],
    };
    let mut session = AnnotationSession::start(Some(white_source(400, 200)), script.preview);
    script.apply(&mut session);

    let output = deterministic_compositor()
        .compose(
            session.source(),
            session.surface(),
            session.store(),
            session.preview(),
        )
        .unwrap();
    output.save(&output_path).expect("PNG保存に失敗");

    let metadata = std::fs::metadata(&output_path).expect("ファイルメタデータ取得失敗");
    assert!(metadata.len() > 0, "PNGファイルが空");
}

#[test]
fn test_clear_after_replay_resets_session() {
    let script = AnnotationScript {
        preview: Dimensions::new(100, 100),
        strokes: vec![vec![Point::new(1.0, 1.0), Point::new(50.0, 50.0)]],
        texts: vec![TextEntry {
            x: 10.0,
            y: 10.0,
            text: "メモ".to_string(),
        }],
    };
    let mut session = AnnotationSession::start(None, script.preview);
    script.apply(&mut session);
    assert_eq!(session.store().len(), 2);

    session.clear_annotations();
    assert_eq!(session.store().len(), 0);
    assert_eq!(session.tool_mode(), ToolMode::None);
    assert!(!session.surface().has_content());
}
