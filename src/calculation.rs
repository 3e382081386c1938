//! # Calculation モジュール
//!
//! シナリオに記述された射手・トラップマシン・計算指定から、リード計算を一括実行する
//! エンジンを提供します。
//!
//! エンティティの生成に失敗した場合は初期化エラーとして即座に報告しますが、個々の計算の
//! 失敗（交差しない照準、退化した三角形など）は計算単位で記録し、残りの計算を継続します。
//!
//! ## 使用例
//!
//! ```rust
//! use leadcalc::calculation::CalculationEngine;
//! use leadcalc::scenario::ScenarioConfig;
//!
//! let mut engine = CalculationEngine::new(ScenarioConfig::sample(), 0);
//! engine.initialize()?;
//! let outcomes = engine.run();
//! assert_eq!(outcomes.len(), 12);
//! # Ok::<(), leadcalc::scenario::ScenarioError>(())
//! ```

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::models::*;
use crate::scenario::*;

/// 1回分の計算結果
#[derive(Debug, Clone)]
pub struct CalculationOutcome {
    pub shooter_id: String,
    pub thrower_id: String,
    pub request: CalculationRequest,
    pub result: Result<LeadReport, LeadError>,
}

/// 出力用に丸めた計算結果
#[derive(Debug, Serialize)]
pub struct OutcomeRecord {
    pub shooter: String,
    pub thrower: String,
    pub request: CalculationRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<LeadReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CalculationOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// 数値を小数点以下2桁に丸めた出力用レコードに変換
    pub fn to_record(&self) -> OutcomeRecord {
        let (report, error) = match &self.result {
            Ok(report) => (Some(report.rounded()), None),
            Err(err) => (None, Some(err.to_string())),
        };
        OutcomeRecord {
            shooter: self.shooter_id.clone(),
            thrower: self.thrower_id.clone(),
            request: self.request,
            report,
            error,
        }
    }
}

/// 一括実行の統計
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CalculationSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

pub struct CalculationEngine {
    pub shooters: HashMap<String, Shooter>,
    pub throwers: HashMap<String, Thrower>,
    pub outcomes: Vec<CalculationOutcome>,

    pub scenario_config: ScenarioConfig,
    pub verbose_level: u8,
}

impl CalculationEngine {
    pub fn new(scenario: ScenarioConfig, verbose_level: u8) -> Self {
        Self {
            shooters: HashMap::new(),
            throwers: HashMap::new(),
            outcomes: Vec::new(),
            scenario_config: scenario,
            verbose_level,
        }
    }

    pub fn initialize(&mut self) -> Result<(), ScenarioError> {
        if self.verbose_level > 0 {
            info!("計算エンジンを初期化中...");
        }

        self.initialize_shooters()?;
        self.initialize_throwers()?;

        if self.verbose_level > 0 {
            info!("初期化完了:");
            info!("  射手: {}名", self.shooters.len());
            info!("  トラップマシン: {}基", self.throwers.len());
            info!("  計算: {}件", self.scenario_config.calculations.len());
        }

        Ok(())
    }

    fn initialize_shooters(&mut self) -> Result<(), ScenarioError> {
        for shooter_config in &self.scenario_config.shooters {
            let shooter = Shooter::new(shooter_config.velocity_fps, shooter_config.direction_deg)
                .map_err(|e| ScenarioError::EntityError(shooter_config.id.clone(), e))?;

            if self.verbose_level > 1 {
                debug!("射手初期化: {} (初速: {:.0}fps)", shooter_config.id, shooter.velocity());
            }

            self.shooters.insert(shooter_config.id.clone(), shooter);
        }

        Ok(())
    }

    fn initialize_throwers(&mut self) -> Result<(), ScenarioError> {
        for thrower_config in &self.scenario_config.throwers {
            let thrower = Thrower::new(
                thrower_config.position,
                thrower_config.direction_deg,
                thrower_config.destination,
                thrower_config.velocity_mph,
            )
            .map_err(|e| ScenarioError::EntityError(thrower_config.id.clone(), e))?;

            if self.verbose_level > 1 {
                debug!(
                    "トラップマシン初期化: {} (位置: {}, 方位: {:.1}度)",
                    thrower_config.id,
                    thrower.position(),
                    thrower.direction()
                );
            }

            self.throwers.insert(thrower_config.id.clone(), thrower);
        }

        Ok(())
    }

    /// 全ての計算を実行
    ///
    /// 個々の計算の失敗は結果に記録し、処理は継続します。
    pub fn run(&mut self) -> &[CalculationOutcome] {
        info!("=== リード計算開始 ===");

        self.outcomes.clear();
        for (index, calculation) in self.scenario_config.calculations.iter().enumerate() {
            let outcome = self.calculate(calculation);

            match &outcome.result {
                Ok(report) => {
                    if self.verbose_level > 1 {
                        debug!(
                            "計算 #{} 完了: {} / {} リード角 {:.2}度",
                            index + 1,
                            outcome.shooter_id,
                            outcome.thrower_id,
                            report.lead_angle
                        );
                    }
                }
                Err(err) => {
                    warn!(
                        "計算 #{} 失敗: {} / {} ({}): {}",
                        index + 1,
                        outcome.shooter_id,
                        outcome.thrower_id,
                        outcome.request,
                        err
                    );
                }
            }

            self.outcomes.push(outcome);
        }

        let summary = self.summary();
        info!("=== リード計算完了 ===");
        info!("成功: {}件 / 失敗: {}件", summary.succeeded, summary.failed);

        &self.outcomes
    }

    fn calculate(&self, calculation: &CalculationConfig) -> CalculationOutcome {
        // 検証済みのシナリオでは必ずどちらか一方が指定されている
        let request = calculation
            .request()
            .unwrap_or(CalculationRequest::ShotAngle(f64::NAN));

        let result = match (
            self.shooters.get(&calculation.shooter),
            self.throwers.get(&calculation.thrower),
            request,
        ) {
            (Some(shooter), Some(thrower), CalculationRequest::Breakpoint(point)) => {
                lead_by_breakpoint_location(shooter, thrower, point)
            }
            (Some(shooter), Some(thrower), CalculationRequest::ShotAngle(angle)) => {
                lead_by_shooter_angle(shooter, thrower, angle)
            }
            _ => Err(LeadError::InvalidConfiguration(format!(
                "未初期化のエンティティ: {} / {}",
                calculation.shooter, calculation.thrower
            ))),
        };

        CalculationOutcome {
            shooter_id: calculation.shooter.clone(),
            thrower_id: calculation.thrower.clone(),
            request,
            result,
        }
    }

    pub fn summary(&self) -> CalculationSummary {
        let succeeded = self.outcomes.iter().filter(|o| o.is_success()).count();
        CalculationSummary {
            total: self.outcomes.len(),
            succeeded,
            failed: self.outcomes.len() - succeeded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn scenario_with(calculations: Vec<CalculationConfig>) -> ScenarioConfig {
        let mut scenario = ScenarioConfig::sample();
        scenario.calculations = calculations;
        scenario
    }

    #[test]
    fn test_sample_batch() {
        let mut engine = CalculationEngine::new(ScenarioConfig::sample(), 0);
        engine.initialize().unwrap();
        let outcomes = engine.run();
        assert_eq!(outcomes.len(), 12);
        assert!(outcomes.iter().all(|o| o.is_success()));

        // 遅い散弾ほど、遠い標的ほどリードは大きい
        let lead = |shooter: &str, thrower: &str| {
            outcomes
                .iter()
                .find(|o| o.shooter_id == shooter && o.thrower_id == thrower)
                .and_then(|o| o.result.as_ref().ok())
                .map(|r| r.lead_ft)
                .unwrap()
        };
        assert!(lead("S1100", "T060") > lead("S1300", "T060"));
        assert!(lead("S1300", "T150") > lead("S1300", "T060"));
        assert_abs_diff_eq!(lead("S1300", "T060"), 2.7754, epsilon = 1e-3);

        assert_eq!(
            engine.summary(),
            CalculationSummary { total: 12, succeeded: 12, failed: 0 }
        );
    }

    #[test]
    fn test_failures_do_not_abort_batch() {
        let scenario = scenario_with(vec![
            CalculationConfig {
                shooter: "S1300".to_string(),
                thrower: "T060".to_string(),
                breakpoint: Some(Point2D::origin()),
                shot_angle_deg: None,
            },
            CalculationConfig {
                shooter: "S1300".to_string(),
                thrower: "T060".to_string(),
                breakpoint: None,
                shot_angle_deg: Some(90.0),
            },
            CalculationConfig {
                shooter: "S1300".to_string(),
                thrower: "T060".to_string(),
                breakpoint: None,
                shot_angle_deg: Some(0.0),
            },
        ]);

        let mut engine = CalculationEngine::new(scenario, 2);
        engine.initialize().unwrap();
        let outcomes = engine.run();
        assert_eq!(outcomes[0].result, Err(LeadError::ZeroDistance));
        assert!(matches!(outcomes[1].result, Err(LeadError::NonIntersectingAim { .. })));
        assert!(outcomes[2].is_success());

        let summary = engine.summary();
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 2);
    }

    #[test]
    fn test_entity_error_on_initialize() {
        let mut scenario = ScenarioConfig::sample();
        scenario.throwers[0].direction_deg = None;
        scenario.throwers[0].destination = Some(scenario.throwers[0].position);

        let mut engine = CalculationEngine::new(scenario, 0);
        match engine.initialize() {
            Err(ScenarioError::EntityError(id, LeadError::ZeroDistance)) => assert_eq!(id, "T150"),
            other => panic!("unexpected result: {:?}", other.err()),
        }
    }

    #[test]
    fn test_outcome_record_is_rounded() {
        let mut engine = CalculationEngine::new(ScenarioConfig::sample(), 0);
        engine.initialize().unwrap();
        engine.run();
        let record = engine.outcomes.last().unwrap().to_record();
        let report = record.report.unwrap();
        assert_eq!(report.lead_ft, 3.28);
        assert!(record.error.is_none());
    }
}
