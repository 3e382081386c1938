//! 平面三角法
//!
//! 余弦定理・正弦定理と、方位角（コンパス方式）と直交座標の相互変換を提供します。
//!
//! 方位角は0度=+y（12時方向）、時計回りに増加（90度=+x、180度=-y、270度=-x）です。
//! 数学の標準座標系とはx・yの役割が入れ替わるため、x方向の変位には正弦、
//! y方向の変位には余弦を用います。

use crate::models::common::{Point2D, math_utils};
use crate::models::error::LeadError;

/// 余弦定理の引数が[-1, 1]をはみ出しても丸め誤差とみなす許容幅
const COSINE_TOLERANCE: f64 = 1e-9;
/// これ未満の正弦は0とみなす
const SINE_EPSILON: f64 = 1e-12;

/// 3辺の長さから角C（辺cの対角）を求める（余弦定理）
///
/// # 戻り値
///
/// 角C（度、0〜180）。辺a・bが0、辺が負または非有限、三角不等式を満たさない場合は
/// `LeadError::DegenerateTriangle`
pub fn angle_by_sides(a: f64, b: f64, c: f64) -> Result<f64, LeadError> {
    let degenerate = LeadError::DegenerateTriangle { a, b, c };

    if ![a, b, c].iter().all(|side| side.is_finite() && *side >= 0.0) {
        return Err(degenerate);
    }
    if a == 0.0 || b == 0.0 {
        return Err(degenerate);
    }

    let cos_c = (c.powi(2) - a.powi(2) - b.powi(2)) / (-2.0 * a * b);
    if !cos_c.is_finite() || cos_c.abs() > 1.0 + COSINE_TOLERANCE {
        return Err(degenerate);
    }

    Ok(math_utils::rad_to_deg(cos_c.clamp(-1.0, 1.0).acos()))
}

/// 辺aと角A・角Bから辺b（角Bの対辺）を求める（正弦定理）
///
/// 角Aが0度・180度（正弦が0）の場合は `LeadError::ZeroSine`
pub fn side_by_angles_and_side(a: f64, angle_a: f64, angle_b: f64) -> Result<f64, LeadError> {
    let sin_a = math_utils::deg_to_rad(angle_a).sin();
    if !sin_a.is_finite() || sin_a.abs() < SINE_EPSILON {
        return Err(LeadError::ZeroSine { angle: angle_a });
    }

    Ok(a * math_utils::deg_to_rad(angle_b).sin() / sin_a)
}

/// 起点から方位角・距離で指定される点の座標を計算（極座標→直交座標）
pub fn direction_to_destination(origin: Point2D, direction: f64, distance: f64) -> Point2D {
    let direction = math_utils::normalize_direction(direction);

    let (x_diff, y_diff) = if direction > 270.0 {
        // 第4象限（北西）
        let rads = math_utils::deg_to_rad(360.0 - direction);
        (-rads.sin() * distance, rads.cos() * distance)
    } else if direction > 180.0 {
        // 第3象限（南西）
        let rads = math_utils::deg_to_rad(direction - 180.0);
        (-rads.sin() * distance, -rads.cos() * distance)
    } else if direction > 90.0 {
        // 第2象限（南東）
        let rads = math_utils::deg_to_rad(180.0 - direction);
        (rads.sin() * distance, -rads.cos() * distance)
    } else {
        // 第1象限（北東）
        let rads = math_utils::deg_to_rad(direction);
        (rads.sin() * distance, rads.cos() * distance)
    };

    Point2D::new(origin.x + x_diff, origin.y + y_diff)
}

/// 起点から目的点への方位角を計算（直交座標→極座標）
///
/// # 戻り値
///
/// 方位角（度、0以上360未満）。2点が一致する場合は `LeadError::ZeroDistance`
pub fn destination_to_direction(origin: Point2D, destination: Point2D) -> Result<f64, LeadError> {
    let x_diff = destination.x - origin.x;
    let y_diff = destination.y - origin.y;
    let hypotenuse = (x_diff.powi(2) + y_diff.powi(2)).sqrt();

    if !hypotenuse.is_finite() || hypotenuse == 0.0 {
        return Err(LeadError::ZeroDistance);
    }

    let cos_angle = (y_diff.abs() / hypotenuse).clamp(0.0, 1.0);
    let angle = math_utils::rad_to_deg(cos_angle.acos());

    let direction = match (x_diff >= 0.0, y_diff >= 0.0) {
        (true, true) => angle,           // 第1象限
        (true, false) => 180.0 - angle,  // 第2象限
        (false, false) => 180.0 + angle, // 第3象限
        (false, true) => 360.0 - angle,  // 第4象限
    };

    Ok(math_utils::normalize_direction(direction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_angle_by_sides_right_triangle() {
        assert_relative_eq!(angle_by_sides(3.0, 4.0, 5.0).unwrap(), 90.0, epsilon = 1e-9);
        assert_relative_eq!(angle_by_sides(1.0, 1.0, 1.0).unwrap(), 60.0, epsilon = 1e-9);
    }

    #[test]
    fn test_angle_by_sides_collinear() {
        // 一直線上の3点は0度または180度
        assert_abs_diff_eq!(angle_by_sides(2.0, 3.0, 1.0).unwrap(), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(angle_by_sides(2.0, 3.0, 5.0).unwrap(), 180.0, epsilon = 1e-6);
    }

    #[test]
    fn test_angle_by_sides_degenerate() {
        assert!(matches!(angle_by_sides(1.0, 1.0, 3.0), Err(LeadError::DegenerateTriangle { .. })));
        assert!(matches!(angle_by_sides(0.0, 1.0, 1.0), Err(LeadError::DegenerateTriangle { .. })));
        assert!(matches!(angle_by_sides(1.0, 0.0, 1.0), Err(LeadError::DegenerateTriangle { .. })));
        assert!(matches!(angle_by_sides(-1.0, 2.0, 2.0), Err(LeadError::DegenerateTriangle { .. })));
        assert!(matches!(angle_by_sides(f64::NAN, 2.0, 2.0), Err(LeadError::DegenerateTriangle { .. })));
    }

    #[test]
    fn test_side_by_angles_and_side() {
        // 30-60-90の三角形: 斜辺2、30度の対辺1
        let b = side_by_angles_and_side(2.0, 90.0, 30.0).unwrap();
        assert_relative_eq!(b, 1.0, epsilon = 1e-12);
        let b = side_by_angles_and_side(1.0, 30.0, 60.0).unwrap();
        assert_relative_eq!(b, 3.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_side_by_angles_and_side_zero_sine() {
        assert_eq!(side_by_angles_and_side(1.0, 0.0, 30.0), Err(LeadError::ZeroSine { angle: 0.0 }));
        assert_eq!(
            side_by_angles_and_side(1.0, 180.0, 30.0),
            Err(LeadError::ZeroSine { angle: 180.0 })
        );
    }

    #[test]
    fn test_direction_to_destination_cardinal() {
        let origin = Point2D::new(10.0, -5.0);
        let cases = [
            (0.0, (10.0, 5.0)),
            (90.0, (20.0, -5.0)),
            (180.0, (10.0, -15.0)),
            (270.0, (0.0, -5.0)),
            (360.0, (10.0, 5.0)),
        ];
        for (direction, (x, y)) in cases {
            let p = direction_to_destination(origin, direction, 10.0);
            assert_abs_diff_eq!(p.x, x, epsilon = 1e-9);
            assert_abs_diff_eq!(p.y, y, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_direction_to_destination_diagonal() {
        let p = direction_to_destination(Point2D::origin(), 135.0, 2.0_f64.sqrt());
        assert_abs_diff_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, -1.0, epsilon = 1e-12);
        let p = direction_to_destination(Point2D::origin(), 315.0, 2.0_f64.sqrt());
        assert_abs_diff_eq!(p.x, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_direction_to_destination_continuity() {
        // 0.01度刻みで一周し、隣接点間の距離が弧長を大きく超えないこと
        let origin = Point2D::new(40.0, 60.0);
        let distance = 100.0;
        let step = 0.01;
        let max_chord = distance * math_utils::deg_to_rad(step) * 1.0001;
        let mut previous = direction_to_destination(origin, 0.0, distance);
        let mut direction = step;
        while direction <= 360.0 + 1e-9 {
            let current = direction_to_destination(origin, direction, distance);
            assert!(
                previous.distance(&current) <= max_chord,
                "{}度付近で不連続: {} -> {}",
                direction,
                previous,
                current
            );
            assert_relative_eq!(current.distance(&origin), distance, epsilon = 1e-9);
            previous = current;
            direction += step;
        }
    }

    #[test]
    fn test_destination_to_direction_quadrants() {
        let o = Point2D::origin();
        let cases = [
            (Point2D::new(0.0, 1.0), 0.0),
            (Point2D::new(1.0, 1.0), 45.0),
            (Point2D::new(1.0, 0.0), 90.0),
            (Point2D::new(1.0, -1.0), 135.0),
            (Point2D::new(0.0, -1.0), 180.0),
            (Point2D::new(-1.0, -1.0), 225.0),
            (Point2D::new(-1.0, 0.0), 270.0),
            (Point2D::new(-1.0, 1.0), 315.0),
        ];
        for (destination, expected) in cases {
            let direction = destination_to_direction(o, destination).unwrap();
            assert_abs_diff_eq!(direction, expected, epsilon = 1e-9);
            assert!((0.0..360.0).contains(&direction));
        }
    }

    #[test]
    fn test_destination_to_direction_coincident() {
        let p = Point2D::new(3.0, 4.0);
        assert_eq!(destination_to_direction(p, p), Err(LeadError::ZeroDistance));
    }

    #[test]
    fn test_polar_cartesian_round_trip() {
        let origins = [Point2D::origin(), Point2D::new(40.0, 60.0), Point2D::new(-12.5, 7.25)];
        let mut directions: Vec<f64> = vec![0.0, 90.0, 180.0, 270.0];
        directions.extend((0..72).map(|i| i as f64 * 5.0 + 1.7));
        for origin in origins {
            for &direction in &directions {
                for distance in [0.5, 1.855, 40.0, 250.0] {
                    let destination = direction_to_destination(origin, direction, distance);
                    let back = destination_to_direction(origin, destination).unwrap();
                    let diff = math_utils::signed_direction_difference(direction, back);
                    assert_abs_diff_eq!(diff, 0.0, epsilon = 1e-6);
                }
            }
        }
    }
}
