//! フォントメトリクス
//!
//! 合成時のテキスト計測とグリフ描画。プラットフォームの標準的な
//! サンセリフ体を実行時に探して読み込む。見つからない環境では
//! 近似メトリクスへフォールバックする（枠は描けるがグリフは
//! 描けない、既知の品質低下）。

use ab_glyph::{point, Font, FontArc, GlyphId, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use std::path::Path;

use crate::surface::blend_pixel;

/// 探索するフォントファイルの候補（太字優先）
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// 近似メトリクスの1文字あたり幅（フォントサイズ比）
const APPROX_ADVANCE_EM: f32 = 0.6;

/// 読み込み済みフォント、または近似フォールバック
#[derive(Debug, Clone)]
pub enum FontMetrics {
    Loaded(FontArc),
    /// フォントファイルが見つからない環境向け。幅は文字数×0.6emで
    /// 近似し、グリフ描画はスキップする。
    Approximate,
}

impl FontMetrics {
    /// 候補パスから最初に読み込めたフォントを使う
    pub fn resolve() -> Self {
        for candidate in FONT_CANDIDATES {
            if let Some(font) = Self::try_load(Path::new(candidate)) {
                return FontMetrics::Loaded(font);
            }
        }
        FontMetrics::Approximate
    }

    pub fn from_font(font: FontArc) -> Self {
        FontMetrics::Loaded(font)
    }

    fn try_load(path: &Path) -> Option<FontArc> {
        let bytes = std::fs::read(path).ok()?;
        FontArc::try_from_vec(bytes).ok()
    }

    /// 指定サイズで描画したときのテキスト幅（ピクセル）
    pub fn measure_width(&self, text: &str, size: f32) -> f32 {
        match self {
            FontMetrics::Loaded(font) => {
                let scaled = font.as_scaled(PxScale::from(size));
                let mut width = 0.0;
                let mut prev: Option<GlyphId> = None;
                for ch in text.chars() {
                    let id = font.glyph_id(ch);
                    if let Some(prev_id) = prev {
                        width += scaled.kern(prev_id, id);
                    }
                    width += scaled.h_advance(id);
                    prev = Some(id);
                }
                width
            }
            FontMetrics::Approximate => text.chars().count() as f32 * size * APPROX_ADVANCE_EM,
        }
    }

    /// ベースライン(x, y)にテキストを塗る
    ///
    /// フォールバック時は何も描かない（枠だけになる）。
    pub fn draw_text(
        &self,
        img: &mut RgbaImage,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        color: Rgba<u8>,
    ) {
        let font = match self {
            FontMetrics::Loaded(font) => font,
            FontMetrics::Approximate => return,
        };
        let scale = PxScale::from(size);
        let scaled = font.as_scaled(scale);
        let mut caret = x;
        let mut prev: Option<GlyphId> = None;
        for ch in text.chars() {
            let id = font.glyph_id(ch);
            if let Some(prev_id) = prev {
                caret += scaled.kern(prev_id, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, y));
            if let Some(outlined) = font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    blend_pixel(
                        img,
                        bounds.min.x as i64 + gx as i64,
                        bounds.min.y as i64 + gy as i64,
                        color,
                        coverage,
                    );
                });
            }
            caret += scaled.h_advance(id);
            prev = Some(id);
        }
    }
}
