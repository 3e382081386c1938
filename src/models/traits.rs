use crate::models::common::Point2D;

/// 平面上に位置を持つエンティティのインターフェース
pub trait IPositioned {
    /// 現在位置の取得
    fn get_position(&self) -> Point2D;

    /// 指定点までの距離
    fn distance_to(&self, point: &Point2D) -> f64 {
        self.get_position().distance(point)
    }
}

/// 等速直線運動する弾・標的のインターフェース
pub trait IMoving {
    /// 速さ（フィート毎秒）
    fn speed_fps(&self) -> f64;

    /// 進行方位（度）
    fn heading(&self) -> f64;

    /// 指定距離を進むのに要する時間（秒）
    fn travel_time(&self, distance_ft: f64) -> f64 {
        distance_ft / self.speed_fps()
    }

    /// 指定時間に進む距離（フィート）
    fn travel_distance(&self, time_s: f64) -> f64 {
        self.speed_fps() * time_s
    }
}
