//! 単位換算ユーティリティ
//!
//! 射撃計算で使う速度（fps ⇔ mph）と視覚的リード量（サム幅）の換算を提供します。

/// 1マイルあたりのフィート数
pub const FEET_PER_MILE: f64 = 5280.0;
/// 1時間あたりの秒数
pub const SECONDS_PER_HOUR: f64 = 3600.0;
/// 親指1本分の幅が覆う視角（度）。射手の経験則による値
pub const DEGREES_PER_THUMB: f64 = 2.0;

/// フィート毎秒をマイル毎時に換算
pub fn fps_to_mph(fps: f64) -> f64 {
    fps / FEET_PER_MILE * SECONDS_PER_HOUR
}

/// マイル毎時をフィート毎秒に換算
pub fn mph_to_fps(mph: f64) -> f64 {
    mph * FEET_PER_MILE / SECONDS_PER_HOUR
}

/// 角度（度）をサム幅に換算
///
/// 範囲チェックは行いません。負の角度や360度を超える角度もそのまま換算されます。
pub fn angle_to_thumbs(angle_deg: f64) -> f64 {
    angle_deg / DEGREES_PER_THUMB
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_speed_round_trip() {
        for v in [0.5, 1.0, 41.0, 60.0, 1100.0, 1200.0, 1300.0, 98765.4321] {
            assert_relative_eq!(mph_to_fps(fps_to_mph(v)), v, max_relative = 1e-12);
            assert_relative_eq!(fps_to_mph(mph_to_fps(v)), v, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_known_speeds() {
        // 60mph = 88fps
        assert_relative_eq!(mph_to_fps(60.0), 88.0, epsilon = 1e-12);
        assert_relative_eq!(fps_to_mph(88.0), 60.0, epsilon = 1e-12);
        assert_relative_eq!(mph_to_fps(41.0), 60.133_333_333, epsilon = 1e-8);
    }

    #[test]
    fn test_angle_to_thumbs() {
        assert_eq!(angle_to_thumbs(90.0), 45.0);
        assert_eq!(angle_to_thumbs(-4.0), -2.0);
        assert_eq!(angle_to_thumbs(720.0), 360.0);
    }
}
