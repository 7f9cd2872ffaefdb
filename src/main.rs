use clap::Parser;
use mentor_export::core::ConfigProvider;
use mentor_export::utils::{logger, validation::Validate};
use mentor_export::{
    CliConfig, EtlEngine, EtlError, ExportSummary, LocalStorage, MentorPipeline, TomlConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    let outcome = match config.config.clone() {
        Some(path) => {
            tracing::info!("Loading settings from {}", path);
            match TomlConfig::from_file(&path) {
                Ok(file_config) => export(file_config).await,
                Err(e) => Err(e),
            }
        }
        None => export(config).await,
    };

    match outcome {
        Ok(summary) => {
            println!("處理完成：");
            println!("- 原始資料: {} 筆", summary.fetched);
            println!("- 排除: {} 位", summary.excluded);
            if summary.skipped > 0 {
                println!("- 略過 (無姓名): {} 位", summary.skipped);
            }
            println!("- 最終保存: {} 位", summary.kept);
            println!("- 數據已保存至: {}", summary.output_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Export failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("{}", e.report());

            std::process::exit(e.exit_code());
        }
    }
}

async fn export<C>(config: C) -> Result<ExportSummary, EtlError>
where
    C: ConfigProvider + Validate,
{
    // 驗證配置
    config.validate()?;

    let pipeline = MentorPipeline::new(LocalStorage::current_dir(), config)?;
    let engine = EtlEngine::new(pipeline);
    engine.run().await
}
