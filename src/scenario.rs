use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::models::{DEFAULT_SHOT_VELOCITY_FPS, DEFAULT_TARGET_VELOCITY_MPH, LeadError, Point2D};

/// シナリオメタデータ
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScenarioMeta {
    pub version: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// 射手設定
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ShooterConfig {
    pub id: String,
    #[serde(default = "default_shot_velocity")]
    pub velocity_fps: f64,
    #[serde(default)]
    pub direction_deg: f64,
}

/// トラップマシン設定
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThrowerConfig {
    pub id: String,
    pub position: Point2D,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction_deg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<Point2D>,
    #[serde(default = "default_target_velocity")]
    pub velocity_mph: f64,
}

/// 1回分のリード計算設定
///
/// `breakpoint` と `shot_angle_deg` のどちらか一方のみを指定します。
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CalculationConfig {
    pub shooter: String,
    pub thrower: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakpoint: Option<Point2D>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot_angle_deg: Option<f64>,
}

/// 計算の指定方法
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum CalculationRequest {
    Breakpoint(Point2D),
    ShotAngle(f64),
}

impl std::fmt::Display for CalculationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalculationRequest::Breakpoint(point) => write!(f, "ブレークポイント {}", point),
            CalculationRequest::ShotAngle(angle) => write!(f, "照準角 {:.2}度", angle),
        }
    }
}

impl CalculationConfig {
    /// 指定方法を取り出す（検証済みの設定に対して使用）
    pub fn request(&self) -> Option<CalculationRequest> {
        match (self.breakpoint, self.shot_angle_deg) {
            (Some(point), None) => Some(CalculationRequest::Breakpoint(point)),
            (None, Some(angle)) => Some(CalculationRequest::ShotAngle(angle)),
            _ => None,
        }
    }
}

fn default_shot_velocity() -> f64 {
    DEFAULT_SHOT_VELOCITY_FPS
}

fn default_target_velocity() -> f64 {
    DEFAULT_TARGET_VELOCITY_MPH
}

/// 完全なシナリオ設定
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScenarioConfig {
    pub meta: ScenarioMeta,
    pub shooters: Vec<ShooterConfig>,
    pub throwers: Vec<ThrowerConfig>,
    pub calculations: Vec<CalculationConfig>,
}

impl ScenarioConfig {
    /// YAMLファイルからシナリオ設定を読み込み
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let path = path.as_ref();

        // ファイル存在チェック
        if !path.exists() {
            return Err(ScenarioError::FileNotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| ScenarioError::IoError(path.to_path_buf(), e))?;

        let config: ScenarioConfig = serde_yaml::from_str(&contents)
            .map_err(|e| ScenarioError::ParseError(path.to_path_buf(), e))?;

        config.validate()?;

        Ok(config)
    }

    /// YAML文字列からシナリオ設定を読み込み
    pub fn from_yaml_str(contents: &str) -> Result<Self, ScenarioError> {
        let config: ScenarioConfig = serde_yaml::from_str(contents)
            .map_err(|e| ScenarioError::ParseError(Path::new("<string>").to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// 組み込みのサンプルシナリオ
    ///
    /// 初速1300/1200/1100fpsの射手3名と、x=40ftから西向き（270度）に標的を放出する
    /// マシン4基の全組み合わせについて、マシンと同じ高さのx=0にブレークポイントを置きます。
    pub fn sample() -> Self {
        let shooters = [("S1300", 1300.0), ("S1200", 1200.0), ("S1100", 1100.0)]
            .into_iter()
            .map(|(id, velocity)| ShooterConfig {
                id: id.to_string(),
                velocity_fps: velocity,
                direction_deg: 0.0,
            })
            .collect::<Vec<_>>();

        let throwers = [150.0, 120.0, 90.0, 60.0]
            .into_iter()
            .map(|y| ThrowerConfig {
                id: format!("T{:03}", y as u32),
                position: Point2D::new(40.0, y),
                direction_deg: Some(270.0),
                destination: None,
                velocity_mph: DEFAULT_TARGET_VELOCITY_MPH,
            })
            .collect::<Vec<_>>();

        let calculations = shooters
            .iter()
            .flat_map(|shooter| {
                throwers.iter().map(move |thrower| CalculationConfig {
                    shooter: shooter.id.clone(),
                    thrower: thrower.id.clone(),
                    breakpoint: Some(Point2D::new(0.0, thrower.position.y)),
                    shot_angle_deg: None,
                })
            })
            .collect();

        Self {
            meta: ScenarioMeta {
                version: "1.0".to_string(),
                name: "sample".to_string(),
                description: "西向きに飛ぶ標的をx=0で撃つ場合のリード比較".to_string(),
            },
            shooters,
            throwers,
            calculations,
        }
    }

    /// 設定の基本的な検証
    pub fn validate(&self) -> Result<(), ScenarioError> {
        let mut shooter_ids = HashSet::new();
        for shooter in &self.shooters {
            if shooter.id.trim().is_empty() {
                return Err(ScenarioError::ValidationError("shooter id must not be empty".to_string()));
            }
            if !shooter_ids.insert(shooter.id.as_str()) {
                return Err(ScenarioError::ValidationError(format!("duplicate shooter id {}", shooter.id)));
            }
            if !shooter.velocity_fps.is_finite() || shooter.velocity_fps <= 0.0 {
                return Err(ScenarioError::ValidationError(format!(
                    "shooter {} velocity_fps must be positive",
                    shooter.id
                )));
            }
        }

        let mut thrower_ids = HashSet::new();
        for thrower in &self.throwers {
            if thrower.id.trim().is_empty() {
                return Err(ScenarioError::ValidationError("thrower id must not be empty".to_string()));
            }
            if !thrower_ids.insert(thrower.id.as_str()) {
                return Err(ScenarioError::ValidationError(format!("duplicate thrower id {}", thrower.id)));
            }
            if !thrower.velocity_mph.is_finite() || thrower.velocity_mph <= 0.0 {
                return Err(ScenarioError::ValidationError(format!(
                    "thrower {} velocity_mph must be positive",
                    thrower.id
                )));
            }
            if thrower.direction_deg.is_none() && thrower.destination.is_none() {
                return Err(ScenarioError::ValidationError(format!(
                    "thrower {} requires direction_deg or destination",
                    thrower.id
                )));
            }
        }

        for (index, calculation) in self.calculations.iter().enumerate() {
            if !shooter_ids.contains(calculation.shooter.as_str()) {
                return Err(ScenarioError::ValidationError(format!(
                    "calculation #{} references unknown shooter {}",
                    index + 1,
                    calculation.shooter
                )));
            }
            if !thrower_ids.contains(calculation.thrower.as_str()) {
                return Err(ScenarioError::ValidationError(format!(
                    "calculation #{} references unknown thrower {}",
                    index + 1,
                    calculation.thrower
                )));
            }
            if calculation.request().is_none() {
                return Err(ScenarioError::ValidationError(format!(
                    "calculation #{} requires exactly one of breakpoint or shot_angle_deg",
                    index + 1
                )));
            }
        }

        Ok(())
    }

    /// シナリオの概要を表示
    pub fn print_summary(&self) {
        println!("=== シナリオ情報 ===");
        println!("名前: {}", self.meta.name);
        println!("説明: {}", self.meta.description);
        println!("バージョン: {}", self.meta.version);
        println!();

        println!("=== 射手 ===");
        for shooter in &self.shooters {
            println!("  {}: 初速 {:.0}fps", shooter.id, shooter.velocity_fps);
        }
        println!();

        println!("=== トラップマシン ===");
        for thrower in &self.throwers {
            match (thrower.direction_deg, thrower.destination) {
                (Some(direction), _) => println!(
                    "  {}: 位置 {} 方位 {:.1}度 速度 {:.0}mph",
                    thrower.id, thrower.position, direction, thrower.velocity_mph
                ),
                (None, Some(destination)) => println!(
                    "  {}: 位置 {} 到達点 {} 速度 {:.0}mph",
                    thrower.id, thrower.position, destination, thrower.velocity_mph
                ),
                (None, None) => println!("  {}: 位置 {} (飛行方位未指定)", thrower.id, thrower.position),
            }
        }
        println!();

        println!("=== 計算 ===");
        println!("計算数: {}", self.calculations.len());
    }
}

/// シナリオ読み込みエラー
#[derive(Debug)]
pub enum ScenarioError {
    FileNotFound(std::path::PathBuf),
    IoError(std::path::PathBuf, std::io::Error),
    ParseError(std::path::PathBuf, serde_yaml::Error),
    ValidationError(String),
    /// エンティティ生成時のエラー
    EntityError(String, LeadError),
}

impl std::fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioError::FileNotFound(path) => {
                write!(f, "シナリオファイルが見つかりません: {}", path.display())
            }
            ScenarioError::IoError(path, err) => {
                write!(f, "ファイル読み込みエラー {}: {}", path.display(), err)
            }
            ScenarioError::ParseError(path, err) => {
                write!(f, "YAML解析エラー {}: {}", path.display(), err)
            }
            ScenarioError::ValidationError(msg) => {
                write!(f, "設定検証エラー: {}", msg)
            }
            ScenarioError::EntityError(id, err) => {
                write!(f, "エンティティ {} の生成に失敗: {}", id, err)
            }
        }
    }
}

impl std::error::Error for ScenarioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScenarioError::IoError(_, err) => Some(err),
            ScenarioError::ParseError(_, err) => Some(err),
            ScenarioError::EntityError(_, err) => Some(err),
            _ => None,
        }
    }
}
