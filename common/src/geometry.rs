//! 座標変換モジュール
//!
//! プレビュー座標系（画面に表示された縮小画像上の座標）と
//! ネイティブ座標系（撮影画像の実ピクセル座標）の相互変換。
//! 軸ごとに独立した倍率を持つ（コンテナ次第でアスペクト比が
//! 保存されない場合があるため、等倍率を仮定しない）。

use serde::{Deserialize, Serialize};

/// プレビュー空間上の座標
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 画像サイズ（プレビュー・ネイティブ共用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// どちらかの軸が0ならtrue（レイアウトサイズ0の画像は注釈対象外）
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// 軸ごとの拡大倍率（ネイティブ / プレビュー）
///
/// 常に正の有限値。スケーリングが無ければ1。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactor {
    pub x: f32,
    pub y: f32,
}

impl ScaleFactor {
    pub fn identity() -> Self {
        Self { x: 1.0, y: 1.0 }
    }

    /// プレビューサイズとネイティブサイズから倍率を計算
    ///
    /// プレビューサイズが0の状態で呼んではならない（呼び出し側の責務）。
    pub fn between(preview: Dimensions, native: Dimensions) -> Self {
        debug_assert!(!preview.is_empty());
        Self {
            x: native.width as f32 / preview.width as f32,
            y: native.height as f32 / preview.height as f32,
        }
    }
}

/// プレビュー座標をネイティブ座標へ変換
pub fn to_native(point: Point, preview: Dimensions, native: Dimensions) -> Point {
    let scale = ScaleFactor::between(preview, native);
    Point::new(point.x * scale.x, point.y * scale.y)
}
