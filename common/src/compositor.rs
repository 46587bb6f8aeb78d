//! コンポジタ
//!
//! 撮影元画像・ライブストロークレイヤ・テキスト注釈を、
//! ネイティブ解像度の1枚のラスタへ平坦化する。送信時にのみ
//! 呼ばれ、ストアとソース画像に対して読み取り専用。
//! 入力が同じなら出力はピクセル単位で同一（フォント解決は
//! コンポジタ生成時に1回だけ行う）。

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use std::io::Cursor;

use crate::error::{Error, Result};
use crate::font::FontMetrics;
use crate::geometry::{to_native, Dimensions, ScaleFactor};
use crate::store::AnnotationStore;
use crate::surface::{SourceImage, StrokeSurface, stroke_rect};

/// テキスト注釈の固定スタイル（元のウィジェットのcanvas描画に一致）
const FONT_BASE_SIZE: f32 = 14.0;
const TEXT_BOX_HEIGHT: f32 = 20.0;
const TEXT_PADDING: f32 = 8.0;
const RECT_LINE_WIDTH: f32 = 2.0;
const HIGHLIGHT_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);

pub struct Compositor {
    font: FontMetrics,
}

impl Compositor {
    /// プラットフォームフォントを解決してコンポジタを作る
    pub fn new() -> Self {
        Self {
            font: FontMetrics::resolve(),
        }
    }

    /// フォントを差し替える（決定的なテスト用）
    pub fn with_font(font: FontMetrics) -> Self {
        Self { font }
    }

    /// 全レイヤをネイティブ解像度へ平坦化する
    ///
    /// ソース画像が無い場合（キャプチャ失敗）はプレビューサイズの
    /// ラスタに注釈レイヤだけを焼き込む。送信を妨げない。
    pub fn compose(
        &self,
        source: Option<&SourceImage>,
        strokes: &StrokeSurface,
        store: &AnnotationStore,
        preview: Dimensions,
    ) -> Result<RgbaImage> {
        let native = source.map(|s| s.dimensions()).unwrap_or(preview);
        if native.is_empty() {
            return Err(Error::Compose(
                "出力ラスタのサイズが0です（ソース画像もプレビューサイズもありません）".to_string(),
            ));
        }

        // 1. ネイティブサイズで確保し、ソース画像を等倍で敷く
        let mut output = match source {
            Some(image) => image.image().clone(),
            None => RgbaImage::new(native.width, native.height),
        };

        // 2. プレビュー解像度のストロークレイヤを拡大して重ねる。
        //    ストロークの画質はプレビュー解像度で頭打ちになる
        //    （キャプチャの単純さを優先したトレードオフ）。
        if !preview.is_empty() && strokes.has_content() {
            if preview == native {
                imageops::overlay(&mut output, strokes.image(), 0, 0);
            } else {
                let scaled = imageops::resize(
                    strokes.image(),
                    native.width,
                    native.height,
                    FilterType::Triangle,
                );
                imageops::overlay(&mut output, &scaled, 0, 0);
            }
        }

        // 3. テキスト注釈をストア順に焼き込む
        let scale = if preview.is_empty() {
            ScaleFactor::identity()
        } else {
            ScaleFactor::between(preview, native)
        };
        for text in store.texts() {
            let anchor = if preview.is_empty() {
                text.anchor()
            } else {
                to_native(text.anchor(), preview, native)
            };
            let font_size = FONT_BASE_SIZE * scale.x;
            let padding = TEXT_PADDING * scale.x;
            let text_width = self.font.measure_width(text.text(), font_size);

            stroke_rect(
                &mut output,
                anchor.x - padding / 2.0,
                anchor.y - FONT_BASE_SIZE * scale.y - padding / 2.0,
                text_width + padding,
                TEXT_BOX_HEIGHT * scale.y + padding,
                RECT_LINE_WIDTH * scale.x,
                HIGHLIGHT_COLOR,
            );
            self.font.draw_text(
                &mut output,
                text.text(),
                anchor.x,
                anchor.y,
                font_size,
                HIGHLIGHT_COLOR,
            );
        }

        Ok(output)
    }

    pub fn font(&self) -> &FontMetrics {
        &self.font
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

/// 合成結果をPNGへエンコード
pub fn to_png_bytes(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

/// ネットワーク送信用のdata URI文字列にする
pub fn to_png_data_uri(image: &RgbaImage) -> Result<String> {
    let bytes = to_png_bytes(image)?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(bytes)))
}
