use crate::models::{
    common::{Point2D, math_utils},
    error::LeadError,
    traits::{IMoving, IPositioned},
};

/// 散弾の既定初速（フィート毎秒）
pub const DEFAULT_SHOT_VELOCITY_FPS: f64 = 1200.0;

/// 射手
///
/// 射手は常に座標原点に立ちます。`direction` は射台の向きで、現在の計算では使用しません。
#[derive(Debug, Clone, PartialEq)]
pub struct Shooter {
    /// 散弾の初速（フィート毎秒）
    velocity: f64,
    /// 射台の向き（方位角、度）
    direction: f64,
}

impl Shooter {
    /// 新しいShooterインスタンスを作成
    ///
    /// # 引数
    ///
    /// * `velocity` - 散弾の初速（フィート毎秒）。有限の正の値であること
    /// * `direction` - 射台の向き（度）
    pub fn new(velocity: f64, direction: f64) -> Result<Self, LeadError> {
        if !velocity.is_finite() || velocity <= 0.0 {
            return Err(LeadError::InvalidConfiguration(format!(
                "射手の初速は正の値である必要があります: {}",
                velocity
            )));
        }
        if !direction.is_finite() {
            return Err(LeadError::InvalidConfiguration(format!(
                "射台の向きが不正です: {}",
                direction
            )));
        }

        Ok(Self {
            velocity,
            direction: math_utils::normalize_direction(direction),
        })
    }

    /// 初速のみ指定して作成（向きは0度）
    pub fn with_velocity(velocity: f64) -> Result<Self, LeadError> {
        Self::new(velocity, 0.0)
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn direction(&self) -> f64 {
        self.direction
    }

    /// 射手位置（常に原点）
    pub fn position(&self) -> Point2D {
        Point2D::origin()
    }
}

impl Default for Shooter {
    fn default() -> Self {
        Self {
            velocity: DEFAULT_SHOT_VELOCITY_FPS,
            direction: 0.0,
        }
    }
}

impl IPositioned for Shooter {
    fn get_position(&self) -> Point2D {
        self.position()
    }
}

impl IMoving for Shooter {
    fn speed_fps(&self) -> f64 {
        self.velocity
    }

    fn heading(&self) -> f64 {
        self.direction
    }
}
