use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// 2次元位置を表す構造体（単位: フィート）
///
/// 射手を原点とし、+yを「12時方向」とする平面座標です。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    #[serde(rename = "x_ft")]
    pub x: f64, // ft
    #[serde(rename = "y_ft")]
    pub y: f64, // ft
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// 原点（射手位置）
    pub fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    /// 2点間のユークリッド距離を計算
    pub fn distance(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// ベクトルの長さ（原点からの距離）
    pub fn magnitude(&self) -> f64 {
        (self.x.powi(2) + self.y.powi(2)).sqrt()
    }

    /// 各座標を小数点以下2桁に丸めた値を返す
    pub fn rounded(&self) -> Self {
        Self::new(math_utils::round2(self.x), math_utils::round2(self.y))
    }
}

impl Add for Point2D {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl std::fmt::Display for Point2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// 数学ユーティリティ関数
pub mod math_utils {
    /// 度をラジアンに変換
    pub fn deg_to_rad(degrees: f64) -> f64 {
        degrees.to_radians()
    }

    /// ラジアンを度に変換
    pub fn rad_to_deg(radians: f64) -> f64 {
        radians.to_degrees()
    }

    /// 方位角を0度〜360度未満の範囲に正規化
    pub fn normalize_direction(direction_deg: f64) -> f64 {
        let normalized = direction_deg.rem_euclid(360.0);
        // rem_euclidは丸めで360.0を返すことがある
        if normalized >= 360.0 { 0.0 } else { normalized }
    }

    /// 逆方位（180度反転）
    pub fn reverse_direction(direction_deg: f64) -> f64 {
        normalize_direction(direction_deg + 180.0)
    }

    /// 方位角1から方位角2への符号付き差（-180度〜180度、時計回りが正）
    pub fn signed_direction_difference(from_deg: f64, to_deg: f64) -> f64 {
        let diff = normalize_direction(to_deg - from_deg);
        if diff > 180.0 { diff - 360.0 } else { diff }
    }

    /// 小数点以下2桁に丸める
    pub fn round2(value: f64) -> f64 {
        (value * 100.0).round() / 100.0
    }
}
