use clap::Parser;
use csv_normalizer::utils::logger;
use csv_normalizer::{CliConfig, EtlEngine, LocalStorage, NormalizePipeline, StderrSink};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌前先解析設定，才能決定日誌格式
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose, Default::default());
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    logger::init_cli_logger(cli.verbose, config.log_format);
    tracing::debug!("Run config: {:?}", config);

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.input.clone(), config.output.clone());
    let monitor_enabled = config.monitor;
    let name = config.name.clone();
    let pipeline = NormalizePipeline::new(storage, config, StderrSink);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled).with_name(name);

    match engine.run() {
        Ok(summary) => {
            tracing::info!(
                "✅ Wrote {} rows, dropped {}",
                summary.rows_written,
                summary.rows_dropped()
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ Normalization failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());

            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
