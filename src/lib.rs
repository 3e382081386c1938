//! # leadcalc
//!
//! クレー射撃で移動する標的に対して射手が取るべきリードを計算するライブラリです。
//!
//! - [`models`]: 座標・単位換算・三角法・射手/トラップマシン・リード計算本体
//! - [`scenario`]: YAMLシナリオの読み込みと検証
//! - [`calculation`]: シナリオに基づく一括計算エンジン
//! - [`logging`]: tracingによるログ出力の初期化
//!
//! ```rust
//! use leadcalc::models::{Point2D, Shooter, Thrower, lead_by_breakpoint_location};
//!
//! let shooter = Shooter::with_velocity(1300.0)?;
//! let thrower = Thrower::with_direction(Point2D::new(40.0, 60.0), 270.0)?;
//! let report = lead_by_breakpoint_location(&shooter, &thrower, Point2D::new(0.0, 60.0))?;
//! assert!(report.lead_angle > 2.0 && report.lead_angle < 3.0);
//! # Ok::<(), leadcalc::models::LeadError>(())
//! ```

pub mod calculation;
pub mod logging;
pub mod models;
pub mod scenario;
