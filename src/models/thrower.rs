use crate::models::{
    common::{Point2D, math_utils},
    error::LeadError,
    traits::{IMoving, IPositioned},
    trigonometry, units,
};

/// クレー標的の既定速度（マイル毎時）
pub const DEFAULT_TARGET_VELOCITY_MPH: f64 = 41.0;

/// トラップマシン（クレー放出機）
///
/// 放出位置から一定方位へ等速直線運動するクレー標的を放出します。
/// 飛行方位は直接指定するか、到達点から導出します。
#[derive(Debug, Clone, PartialEq)]
pub struct Thrower {
    /// 放出位置（フィート）
    position: Point2D,
    /// 標的の速度（マイル毎時）
    velocity: f64,
    /// 標的の飛行方位（度、0以上360未満）
    direction: f64,
    /// 標的の到達点（指定された場合のみ）
    destination: Option<Point2D>,
}

impl Thrower {
    /// 新しいThrowerインスタンスを作成
    ///
    /// # 引数
    ///
    /// * `position` - 放出位置
    /// * `direction` - 飛行方位（度）。指定時は `destination` より優先
    /// * `destination` - 到達点。`direction` 未指定時に方位を導出
    /// * `velocity` - 標的の速度（マイル毎時）。有限の正の値であること
    ///
    /// # 戻り値
    ///
    /// 飛行方位が導出できない場合は `LeadError::InvalidConfiguration`、
    /// 到達点が放出位置と一致する場合は `LeadError::ZeroDistance`
    pub fn new(
        position: Point2D,
        direction: Option<f64>,
        destination: Option<Point2D>,
        velocity: f64,
    ) -> Result<Self, LeadError> {
        if !velocity.is_finite() || velocity <= 0.0 {
            return Err(LeadError::InvalidConfiguration(format!(
                "標的の速度は正の値である必要があります: {}",
                velocity
            )));
        }
        if !position.x.is_finite() || !position.y.is_finite() {
            return Err(LeadError::InvalidConfiguration(format!(
                "放出位置が不正です: {:?}",
                position
            )));
        }

        let direction = match (direction, destination) {
            (Some(direction), _) if direction.is_finite() => math_utils::normalize_direction(direction),
            (Some(direction), _) => {
                return Err(LeadError::InvalidConfiguration(format!(
                    "飛行方位が不正です: {}",
                    direction
                )));
            }
            (None, Some(destination)) => trigonometry::destination_to_direction(position, destination)?,
            (None, None) => {
                return Err(LeadError::InvalidConfiguration(
                    "飛行方位（direction）または到達点（destination）のいずれかを指定してください".to_string(),
                ));
            }
        };

        Ok(Self {
            position,
            velocity,
            direction,
            destination,
        })
    }

    /// 飛行方位を指定して作成（既定速度）
    pub fn with_direction(position: Point2D, direction: f64) -> Result<Self, LeadError> {
        Self::new(position, Some(direction), None, DEFAULT_TARGET_VELOCITY_MPH)
    }

    /// 到達点を指定して作成（既定速度）
    pub fn with_destination(position: Point2D, destination: Point2D) -> Result<Self, LeadError> {
        Self::new(position, None, Some(destination), DEFAULT_TARGET_VELOCITY_MPH)
    }

    pub fn position(&self) -> Point2D {
        self.position
    }

    /// 標的の速度（マイル毎時）
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn direction(&self) -> f64 {
        self.direction
    }

    pub fn destination(&self) -> Option<Point2D> {
        self.destination
    }

    /// 放出位置から飛行方位に沿って指定距離進んだ点
    pub fn point_along_path(&self, distance: f64) -> Point2D {
        trigonometry::direction_to_destination(self.position, self.direction, distance)
    }
}

impl IPositioned for Thrower {
    fn get_position(&self) -> Point2D {
        self.position
    }
}

impl IMoving for Thrower {
    fn speed_fps(&self) -> f64 {
        units::mph_to_fps(self.velocity)
    }

    fn heading(&self) -> f64 {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_thrower_with_direction() {
        let thrower = Thrower::with_direction(Point2D::new(40.0, 60.0), 270.0).unwrap();
        assert_eq!(thrower.direction(), 270.0);
        assert_eq!(thrower.velocity(), 41.0);
        assert_eq!(thrower.destination(), None);
        assert_abs_diff_eq!(thrower.speed_fps(), 60.133_333_333, epsilon = 1e-8);
    }

    #[test]
    fn test_thrower_direction_normalized() {
        let thrower = Thrower::with_direction(Point2D::origin(), -90.0).unwrap();
        assert_eq!(thrower.direction(), 270.0);
        let thrower = Thrower::with_direction(Point2D::origin(), 720.0).unwrap();
        assert_eq!(thrower.direction(), 0.0);
    }

    #[test]
    fn test_thrower_with_destination() {
        let thrower =
            Thrower::with_destination(Point2D::new(40.0, 40.0), Point2D::new(90.0, 126.602_540_378_443_88))
                .unwrap();
        assert_abs_diff_eq!(thrower.direction(), 30.0, epsilon = 1e-9);
        assert!(thrower.destination().is_some());
    }

    #[test]
    fn test_direction_takes_precedence_over_destination() {
        let thrower = Thrower::new(
            Point2D::origin(),
            Some(90.0),
            Some(Point2D::new(0.0, 10.0)),
            41.0,
        )
        .unwrap();
        assert_eq!(thrower.direction(), 90.0);
    }

    #[test]
    fn test_thrower_validation() {
        assert!(matches!(
            Thrower::new(Point2D::origin(), None, None, 41.0),
            Err(LeadError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Thrower::new(Point2D::origin(), Some(0.0), None, 0.0),
            Err(LeadError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Thrower::new(Point2D::origin(), Some(f64::INFINITY), None, 41.0),
            Err(LeadError::InvalidConfiguration(_))
        ));
        assert_eq!(
            Thrower::with_destination(Point2D::new(5.0, 5.0), Point2D::new(5.0, 5.0)),
            Err(LeadError::ZeroDistance)
        );
    }

    #[test]
    fn test_point_along_path() {
        let thrower = Thrower::with_direction(Point2D::new(40.0, 60.0), 270.0).unwrap();
        let p = thrower.point_along_path(40.0);
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, 60.0, epsilon = 1e-9);
    }
}
