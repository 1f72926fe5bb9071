use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use stats_recorder::config::cli::{program_name, usage};
use stats_recorder::utils::logger;
use stats_recorder::{
    CliConfig, SqlStatisticsStore, StatisticsEngine, StatisticsPipeline, StatsError,
};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let program = program_name(args.first().map(String::as_str));

    let config = match CliConfig::try_parse_from(&args) {
        Ok(config) => config,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let err = StatsError::from(e);
            eprintln!("❌ {}", err.user_friendly_message());
            println!("{}", usage(&program));
            std::process::exit(err.exit_code());
        }
    };

    // 初始化日誌
    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    // 單執行緒 runtime，整個流程依序執行
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the tokio runtime")?;

    let exit_code = runtime.block_on(run(config, &program));
    std::process::exit(exit_code);
}

async fn run(config: CliConfig, program: &str) -> i32 {
    // 資料庫設定在寫入時才載入，設定錯誤不影響統計結果的輸出
    let store = SqlStatisticsStore::from_config_path(config.config.clone());

    let pipeline = match StatisticsPipeline::from_config(&config, store) {
        Ok(pipeline) => pipeline,
        Err(e) => return report_failure(&e, program),
    };

    let engine = StatisticsEngine::new(pipeline);

    match engine.run().await {
        Ok(outcome) => {
            if let Some(e) = outcome.storage.error() {
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            }
            println!("{}", outcome.report());
            0
        }
        Err(e) => report_failure(&e, program),
    }
}

fn report_failure(err: &StatsError, program: &str) -> i32 {
    tracing::error!(
        "Run failed: {} (Category: {:?}, Severity: {:?})",
        err,
        err.category(),
        err.severity()
    );

    if err.shows_usage() {
        println!("{}", usage(program));
    } else {
        eprintln!("❌ {}", err.user_friendly_message());
        eprintln!("💡 Suggestion: {}", err.recovery_suggestion());
    }

    err.exit_code()
}
