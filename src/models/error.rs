/// リード計算エラー
///
/// 1回の計算に閉じたエラーで、再試行しても結果は変わりません（入力幾何が不正）。
/// バッチ処理では計算単位で報告し、処理全体は継続します。
#[derive(Debug, Clone, PartialEq)]
pub enum LeadError {
    /// エンティティの構成が不正（飛行方向が導出できない、速度が正でない等）
    InvalidConfiguration(String),
    /// 3辺から三角形が構成できない（余弦定理の引数が[-1, 1]の範囲外、辺長が0等）
    DegenerateTriangle { a: f64, b: f64, c: f64 },
    /// 2点が一致しており距離または方向が定義できない
    ZeroDistance,
    /// 正弦定理の分母となる角度の正弦が0
    ZeroSine { angle: f64 },
    /// 照準線がターゲットの飛行経路と交差しない
    NonIntersectingAim { shot_angle: f64, trajectory: f64 },
}

impl std::fmt::Display for LeadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeadError::InvalidConfiguration(msg) => {
                write!(f, "構成エラー: {}", msg)
            }
            LeadError::DegenerateTriangle { a, b, c } => {
                write!(f, "三角形が構成できません: a={}, b={}, c={}", a, b, c)
            }
            LeadError::ZeroDistance => {
                write!(f, "2点が一致しているため距離・方向が定義できません")
            }
            LeadError::ZeroSine { angle } => {
                write!(f, "角度{}度の正弦が0のため正弦定理を適用できません", angle)
            }
            LeadError::NonIntersectingAim { shot_angle, trajectory } => {
                write!(
                    f,
                    "照準角{:.2}度はターゲット飛行経路（方位{:.2}度）と交差しません",
                    shot_angle, trajectory
                )
            }
        }
    }
}

impl std::error::Error for LeadError {}
