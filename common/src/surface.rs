//! 描画サーフェスとラスタプリミティブ
//!
//! プレビュー解像度のストロークレイヤと、撮影元画像のラッパ。
//! 線分は丸キャップ・丸ジョイント相当になるよう、区間に沿って
//! 円板をスタンプして描く。

use crate::error::Result;
use crate::geometry::Dimensions;
use image::{Pixel, Rgba, RgbaImage};

/// ストロークの固定スタイル（任意の背景に対する視認性優先、設定不可）
pub const STROKE_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);
pub const STROKE_WIDTH: f32 = 3.0;

/// 撮影されたスクリーンショット
///
/// キャプチャ後は不変。セッションが所有し、セッション終了で破棄される。
#[derive(Debug, Clone)]
pub struct SourceImage {
    image: RgbaImage,
}

impl SourceImage {
    pub fn from_rgba(image: RgbaImage) -> Self {
        Self { image }
    }

    /// エンコード済みバイト列（PNG/JPEG等）からデコード
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        Ok(Self { image })
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.image.width(), self.image.height())
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

/// ライブプレビュー用のストロークレイヤ
///
/// プレビューサイズの透明RGBAラスタ。描画中のジェスチャが
/// 逐次ここに線分を描き、合成時にネイティブサイズへ拡大される。
#[derive(Debug, Clone)]
pub struct StrokeSurface {
    image: RgbaImage,
}

impl StrokeSurface {
    pub fn new(preview: Dimensions) -> Self {
        Self {
            image: RgbaImage::new(preview.width, preview.height),
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.image.width(), self.image.height())
    }

    /// 直前サンプルから新サンプルへの線分を即時描画
    pub fn draw_segment(&mut self, from: crate::geometry::Point, to: crate::geometry::Point) {
        draw_thick_segment(&mut self.image, from.x, from.y, to.x, to.y, STROKE_WIDTH, STROKE_COLOR);
    }

    /// 全消去（透明に戻す）
    pub fn clear(&mut self) {
        for px in self.image.pixels_mut() {
            *px = Rgba([0, 0, 0, 0]);
        }
    }

    /// 不透明ピクセルが1つでもあるか
    pub fn has_content(&self) -> bool {
        self.image.pixels().any(|p| p.0[3] != 0)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

/// 太さ付き線分を円板スタンプで描く（丸キャップ・丸ジョイント）
pub(crate) fn draw_thick_segment(
    img: &mut RgbaImage,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    width: f32,
    color: Rgba<u8>,
) {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let length = (dx * dx + dy * dy).sqrt();
    // 半ピクセル刻みで進めれば隙間は出ない
    let steps = (length / 0.5).ceil().max(1.0) as u32;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        fill_disc(img, x0 + dx * t, y0 + dy * t, width / 2.0, color);
    }
}

fn fill_disc(img: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: Rgba<u8>) {
    let min_x = (cx - radius).floor().max(0.0) as i64;
    let min_y = (cy - radius).floor().max(0.0) as i64;
    let max_x = (cx + radius).ceil() as i64;
    let max_y = (cy + radius).ceil() as i64;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
                continue;
            }
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= radius * radius {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// 矩形の枠線を指定線幅で描く（4辺を帯として塗る）
pub(crate) fn stroke_rect(
    img: &mut RgbaImage,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    line_width: f32,
    color: Rgba<u8>,
) {
    // 上下の帯
    fill_rect(img, x, y, w, line_width, color);
    fill_rect(img, x, y + h - line_width, w, line_width, color);
    // 左右の帯
    fill_rect(img, x, y, line_width, h, color);
    fill_rect(img, x + w - line_width, y, line_width, h, color);
}

fn fill_rect(img: &mut RgbaImage, x: f32, y: f32, w: f32, h: f32, color: Rgba<u8>) {
    let min_x = x.round().max(0.0) as i64;
    let min_y = y.round().max(0.0) as i64;
    let max_x = ((x + w).round() as i64).min(img.width() as i64);
    let max_y = ((y + h).round() as i64).min(img.height() as i64);
    for py in min_y..max_y {
        for px in min_x..max_x {
            if px >= 0 && py >= 0 {
                img.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}

/// カバレッジ値(0.0-1.0)でピクセルをブレンドする（グリフ描画用）
pub(crate) fn blend_pixel(img: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>, coverage: f32) {
    if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
        return;
    }
    let alpha = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
    if alpha == 0 {
        return;
    }
    let src = Rgba([color.0[0], color.0[1], color.0[2], alpha]);
    let dst = img.get_pixel_mut(x as u32, y as u32);
    dst.blend(&src);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn test_new_surface_is_transparent() {
        let surface = StrokeSurface::new(Dimensions::new(10, 10));
        assert!(!surface.has_content());
    }

    #[test]
    fn test_draw_segment_leaves_pixels() {
        let mut surface = StrokeSurface::new(Dimensions::new(50, 50));
        surface.draw_segment(Point::new(5.0, 5.0), Point::new(40.0, 40.0));
        assert!(surface.has_content());
        // 線分中央付近は塗られている
        assert_eq!(*surface.image().get_pixel(22, 22), STROKE_COLOR);
    }

    #[test]
    fn test_clear_erases_everything() {
        let mut surface = StrokeSurface::new(Dimensions::new(20, 20));
        surface.draw_segment(Point::new(0.0, 0.0), Point::new(19.0, 19.0));
        surface.clear();
        assert!(!surface.has_content());
    }

    #[test]
    fn test_segment_clipped_at_bounds() {
        // 範囲外へはみ出す線分でもパニックしない
        let mut surface = StrokeSurface::new(Dimensions::new(10, 10));
        surface.draw_segment(Point::new(-5.0, -5.0), Point::new(20.0, 20.0));
        assert!(surface.has_content());
    }

    #[test]
    fn test_stroke_rect_outline_only() {
        let mut img = RgbaImage::new(40, 40);
        stroke_rect(&mut img, 5.0, 5.0, 30.0, 30.0, 2.0, STROKE_COLOR);
        // 枠上は塗られ、内側は透明のまま
        assert_eq!(*img.get_pixel(5, 5), STROKE_COLOR);
        assert_eq!(img.get_pixel(20, 20).0[3], 0);
    }

    #[test]
    fn test_source_image_dimensions() {
        let source = SourceImage::from_rgba(RgbaImage::new(123, 45));
        assert_eq!(source.dimensions(), Dimensions::new(123, 45));
    }
}
