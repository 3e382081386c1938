use clap::{Arg, Command};
use leadcalc::calculation::{CalculationEngine, CalculationOutcome};
use leadcalc::logging::{self, LogConfig, LogOutput};
use leadcalc::scenario::ScenarioConfig;
use tracing::error;

/// 計算結果の出力形式
#[derive(Debug, Clone, Copy, PartialEq)]
enum OutputFormat {
    Text,
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            _ => Err(format!("無効な出力形式: {}. 利用可能: text, yaml", s)),
        }
    }
}

fn main() {
    // コマンドライン引数の解析
    let matches = Command::new("leadcalc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("クレー射撃リード計算 (Shotgun Lead Calculator)")
        .long_about("射手・トラップマシン・ブレークポイント（または照準角）から\n\
                     移動する標的に対するリード（角度・距離・サム幅）を計算します。")
        .arg(
            Arg::new("scenario")
                .short('s')
                .long("scenario")
                .value_name("FILE")
                .help("シナリオファイル(.yaml)のパスを指定")
                .conflicts_with("demo")
        )
        .arg(
            Arg::new("info")
                .short('i')
                .long("info")
                .action(clap::ArgAction::SetTrue)
                .help("シナリオの情報のみ表示して終了")
        )
        .arg(
            Arg::new("demo")
                .short('d')
                .long("demo")
                .action(clap::ArgAction::SetTrue)
                .help("組み込みのサンプルシナリオを実行")
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .default_value("text")
                .value_parser(|s: &str| s.parse::<OutputFormat>())
                .help("出力形式 (text, yaml)")
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(clap::ArgAction::Count)
                .help("詳細出力レベル (-v: 基本, -vv: 詳細, -vvv: 計算過程)")
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("ログレベル (trace, debug, info, warn, error)。-vより優先")
        )
        .arg(
            Arg::new("log-output")
                .long("log-output")
                .value_name("TARGET")
                .default_value("console")
                .value_parser(|s: &str| s.parse::<LogOutput>())
                .help("ログ出力先 (console, file, both)")
        )
        .get_matches();

    let verbose_level = matches.get_count("verbose");
    let level = matches
        .get_one::<String>("log-level")
        .map(|s| logging::parse_log_level(s))
        .unwrap_or_else(|| logging::level_from_verbosity(verbose_level));
    let log_config = LogConfig {
        level,
        output: *matches.get_one::<LogOutput>("log-output").unwrap_or(&LogOutput::Console),
        ..LogConfig::default()
    };
    let _log_guard = match logging::init_logging(log_config) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("警告: ログ初期化に失敗しました: {}", e);
            None
        }
    };

    let format = *matches.get_one::<OutputFormat>("format").unwrap_or(&OutputFormat::Text);
    let info_only = matches.get_flag("info");

    let scenario = if matches.get_flag("demo") {
        Ok(ScenarioConfig::sample())
    } else if let Some(scenario_path) = matches.get_one::<String>("scenario") {
        ScenarioConfig::from_file(scenario_path)
    } else {
        show_default_help();
        return;
    };

    let result = match scenario {
        Ok(scenario) => run_scenario(scenario, info_only, format, verbose_level),
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        error!("{}", e);
        eprintln!("エラー: {}", e);
        std::process::exit(1);
    }
}

/// シナリオを実行して結果を出力
fn run_scenario(
    scenario: ScenarioConfig,
    info_only: bool,
    format: OutputFormat,
    verbose_level: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    if info_only {
        scenario.print_summary();
        return Ok(());
    }

    let mut engine = CalculationEngine::new(scenario, verbose_level);
    engine.initialize()?;
    engine.run();

    match format {
        OutputFormat::Text => print_text(&engine.outcomes),
        OutputFormat::Yaml => {
            let records: Vec<_> = engine.outcomes.iter().map(|o| o.to_record()).collect();
            print!("{}", serde_yaml::to_string(&records)?);
        }
    }

    let summary = engine.summary();
    if verbose_level > 0 || summary.failed > 0 {
        eprintln!("計算: {}件 (成功 {}件, 失敗 {}件)", summary.total, summary.succeeded, summary.failed);
    }

    Ok(())
}

fn print_text(outcomes: &[CalculationOutcome]) {
    for (index, outcome) in outcomes.iter().enumerate() {
        println!(
            "=== 計算 #{}: 射手 {} / マシン {} ({}) ===",
            index + 1,
            outcome.shooter_id,
            outcome.thrower_id,
            outcome.request
        );
        match &outcome.result {
            Ok(report) => println!("{}", report.rounded()),
            Err(e) => println!("エラー: {}", e),
        }
        println!();
    }
}

/// デフォルトヘルプを表示
fn show_default_help() {
    println!("使用方法:");
    println!("  leadcalc [オプション]");
    println!();
    println!("オプション:");
    println!("  -s, --scenario <FILE>  シナリオファイルを指定して実行");
    println!("  -i, --info             シナリオ情報のみ表示");
    println!("  -d, --demo             サンプルシナリオを実行");
    println!("  -f, --format <FORMAT>  出力形式 (text, yaml)");
    println!("  -v, --verbose          詳細出力 (複数指定で詳細レベル上昇)");
    println!("  -h, --help             このヘルプを表示");
    println!();
    println!("例:");
    println!("  leadcalc -s scenarios/station_crossers.yaml");
    println!("  leadcalc -s scenarios/station_crossers.yaml -f yaml");
    println!("  leadcalc --demo -vv");
}
