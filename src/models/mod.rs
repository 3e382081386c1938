// 基本的なデータ型と数学ユーティリティ
pub mod common;
pub mod error;
pub mod units;
pub mod trigonometry;

// エンティティの基本インターフェース（trait）定義
pub mod traits;

// 射手・トラップマシン
pub mod shooter;
pub mod thrower;

// リード計算
pub mod lead;

// 便利な re-export
pub use common::*;
pub use error::LeadError;
pub use traits::*;
pub use shooter::{Shooter, DEFAULT_SHOT_VELOCITY_FPS};
pub use thrower::{Thrower, DEFAULT_TARGET_VELOCITY_MPH};
pub use lead::{LeadReport, lead_by_breakpoint_location, lead_by_shooter_angle};
pub use trigonometry::{angle_by_sides, side_by_angles_and_side, direction_to_destination, destination_to_direction};
pub use units::{fps_to_mph, mph_to_fps, angle_to_thumbs};
