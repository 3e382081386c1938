//! # リード計算
//!
//! 射手・トラップマシン・照準点から、射手が標的に対して取るべきリード（先行量）を計算します。
//!
//! 射手位置、ブレークポイント（散弾と標的が出会う点）、プルポイント（引き金を引いた瞬間の
//! 標的位置）の3点が作る三角形を解き、角度・直線距離・視覚上の横ずれとしてリードを求めます。
//!
//! ## 入口
//!
//! - [`lead_by_breakpoint_location`]: ブレークポイントを直接指定
//! - [`lead_by_shooter_angle`]: 射手の照準方位を指定し、照準線と飛行経路の交点をブレークポイントとする
//!
//! 散弾・標的ともに等速直線運動とし、重力・空気抵抗・散弾の広がりは考慮しません。

use serde::Serialize;
use tracing::{debug, trace};

use crate::models::{
    common::{Point2D, math_utils},
    error::LeadError,
    shooter::Shooter,
    thrower::Thrower,
    traits::{IMoving, IPositioned},
    trigonometry, units,
};

/// これ未満の射距離は0とみなす（フィート）
const MIN_SHOT_DISTANCE_FT: f64 = 1e-9;
/// これ以下のブレークポイント角は照準線と飛行経路が平行とみなす（度）
const MIN_BREAKPOINT_ANGLE_DEG: f64 = 1e-9;

/// リード計算結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadReport {
    /// 実リード: 散弾の飛翔時間中に標的が進む距離（フィート）
    pub lead_ft: f64,
    /// リード角（度）
    pub lead_angle: f64,
    /// リード角のサム幅換算
    pub lead_thumbs: f64,
    /// 射手から見た横方向の視覚的リード（フィート）
    pub visual_lead_ft: f64,
    pub breakpoint: Point2D,
    /// 引き金を引いた瞬間の標的位置
    pub pullpoint: Point2D,
    /// 射手からブレークポイントまでの距離（フィート）
    pub shot_distance: f64,
    /// 射手からプルポイントまでの距離（フィート）
    pub target_distance: f64,
    /// 散弾の飛翔時間（秒）
    pub shot_time: f64,
    /// 標的の飛行方位（度）
    pub trajectory: f64,
}

impl LeadReport {
    /// 全ての数値を小数点以下2桁に丸めた出力用のコピー
    pub fn rounded(&self) -> Self {
        Self {
            lead_ft: math_utils::round2(self.lead_ft),
            lead_angle: math_utils::round2(self.lead_angle),
            lead_thumbs: math_utils::round2(self.lead_thumbs),
            visual_lead_ft: math_utils::round2(self.visual_lead_ft),
            breakpoint: self.breakpoint.rounded(),
            pullpoint: self.pullpoint.rounded(),
            shot_distance: math_utils::round2(self.shot_distance),
            target_distance: math_utils::round2(self.target_distance),
            shot_time: math_utils::round2(self.shot_time),
            trajectory: math_utils::round2(self.trajectory),
        }
    }
}

impl std::fmt::Display for LeadReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "リード: {:.2}ft ({:.2}度, {:.2}サム)", self.lead_ft, self.lead_angle, self.lead_thumbs)?;
        writeln!(f, "視覚的リード: {:.2}ft", self.visual_lead_ft)?;
        writeln!(f, "ブレークポイント: {} (射距離 {:.2}ft, 飛翔時間 {:.3}秒)", self.breakpoint, self.shot_distance, self.shot_time)?;
        writeln!(f, "プルポイント: {} (標的距離 {:.2}ft)", self.pullpoint, self.target_distance)?;
        write!(f, "飛行方位: {:.2}度", self.trajectory)
    }
}

/// ブレークポイントを指定してリードを計算
///
/// # 引数
///
/// * `shooter` - 射手
/// * `thrower` - トラップマシン
/// * `breakpoint` - 射手が標的を撃ち抜くつもりの点
///
/// # 戻り値
///
/// 計算結果。ブレークポイントが射手位置と一致する場合は `LeadError::ZeroDistance`
pub fn lead_by_breakpoint_location(
    shooter: &Shooter,
    thrower: &Thrower,
    breakpoint: Point2D,
) -> Result<LeadReport, LeadError> {
    debug!(
        breakpoint = %breakpoint,
        trajectory = thrower.direction(),
        "ブレークポイント指定でリード計算"
    );
    solve_from_breakpoint(shooter, thrower, breakpoint)
}

/// 射手の照準方位を指定してリードを計算
///
/// 射手・トラップマシン・ブレークポイントの三角形を、射手とマシン間の距離と
/// 両端の角度から正弦定理で解き、ブレークポイントを求めます。
///
/// # 戻り値
///
/// 計算結果。照準線が飛行経路と交差しない場合は `LeadError::NonIntersectingAim`
pub fn lead_by_shooter_angle(
    shooter: &Shooter,
    thrower: &Thrower,
    shot_angle: f64,
) -> Result<LeadReport, LeadError> {
    if !shot_angle.is_finite() {
        return Err(LeadError::InvalidConfiguration(format!("照準角が不正です: {}", shot_angle)));
    }
    let shot_angle = math_utils::normalize_direction(shot_angle);
    let trajectory = thrower.direction();

    // 射手→マシンの方位と距離
    let angle_to_thrower = trigonometry::destination_to_direction(shooter.get_position(), thrower.get_position())?;
    let thrower_shooter_distance = shooter.distance_to(&thrower.get_position());

    // 基線（射手–マシン）から照準線・飛行経路がそれぞれどちら側へ開くか
    let shooter_turn = math_utils::signed_direction_difference(angle_to_thrower, shot_angle);
    let thrower_to_shooter_angle = math_utils::reverse_direction(angle_to_thrower);
    let thrower_turn = math_utils::signed_direction_difference(thrower_to_shooter_angle, trajectory);

    let broad_shooter_angle = shooter_turn.abs();
    let broad_thrower_angle = thrower_turn.abs();
    let broad_breakpoint_angle = 180.0 - (broad_thrower_angle + broad_shooter_angle);

    trace!(
        angle_to_thrower,
        thrower_shooter_distance,
        broad_shooter_angle,
        broad_thrower_angle,
        broad_breakpoint_angle,
        "射手–マシン–ブレークポイント三角形"
    );

    // 同じ側へ開く場合、または内角の和が180度以上の場合は交差しない
    if shooter_turn * thrower_turn > 0.0 || broad_breakpoint_angle <= MIN_BREAKPOINT_ANGLE_DEG {
        return Err(LeadError::NonIntersectingAim { shot_angle, trajectory });
    }

    let shot_distance = trigonometry::side_by_angles_and_side(
        thrower_shooter_distance,
        broad_breakpoint_angle,
        broad_thrower_angle,
    )?;
    let breakpoint_distance_from_thrower = trigonometry::side_by_angles_and_side(
        thrower_shooter_distance,
        broad_breakpoint_angle,
        broad_shooter_angle,
    )?;
    let breakpoint = thrower.point_along_path(breakpoint_distance_from_thrower);

    debug!(
        shot_angle,
        shot_distance,
        breakpoint_distance_from_thrower,
        breakpoint = %breakpoint,
        "照準方位からブレークポイントを算出"
    );

    solve_from_breakpoint(shooter, thrower, breakpoint)
}

/// ブレークポイントが決まった後の共通計算
///
/// 散弾の飛翔時間から標的の移動距離を求め、飛行経路を遡ってプルポイントを決定し、
/// 射手・ブレークポイント・プルポイントの三角形からリード角を求めます。
fn solve_from_breakpoint(
    shooter: &Shooter,
    thrower: &Thrower,
    breakpoint: Point2D,
) -> Result<LeadReport, LeadError> {
    if !breakpoint.x.is_finite() || !breakpoint.y.is_finite() {
        return Err(LeadError::InvalidConfiguration(format!(
            "ブレークポイントが不正です: {:?}",
            breakpoint
        )));
    }

    let shot_distance = shooter.distance_to(&breakpoint);
    if shot_distance < MIN_SHOT_DISTANCE_FT {
        return Err(LeadError::ZeroDistance);
    }

    let shot_time = shooter.travel_time(shot_distance);
    let target_diff = units::mph_to_fps(thrower.velocity()) * shot_time;

    // 標的は飛翔時間分だけ上流にいたはず
    let reverse_direction = math_utils::reverse_direction(thrower.direction());
    let pullpoint = trigonometry::direction_to_destination(breakpoint, reverse_direction, target_diff);
    let target_distance = shooter.distance_to(&pullpoint);

    let lead_angle = trigonometry::angle_by_sides(shot_distance, target_distance, target_diff)?;
    let lead_thumbs = units::angle_to_thumbs(lead_angle);
    let visual_lead_ft = target_distance * math_utils::deg_to_rad(lead_angle).sin();

    trace!(
        shot_distance,
        shot_time,
        target_diff,
        target_distance,
        lead_angle,
        "リード三角形を解決"
    );

    Ok(LeadReport {
        lead_ft: target_diff,
        lead_angle,
        lead_thumbs,
        visual_lead_ft,
        breakpoint,
        pullpoint,
        shot_distance,
        target_distance,
        shot_time,
        trajectory: thrower.direction(),
    })
}
