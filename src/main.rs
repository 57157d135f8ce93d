use clap::Parser;
use mxmc_export::core::RemoteControl;
use mxmc_export::utils::logger;
use mxmc_export::{
    CliConfig, DryRunRemote, ExportConfig, ExportEngine, ExportError, MxmcClient,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting mxmc-export");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 解析並驗證配置
    let config = match cli.resolve().and_then(|config| {
        config.check_paths()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    let result = if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - URLs are printed, nothing is sent");
        run(DryRunRemote::new(config.base_url.clone()), &config).await
    } else {
        match MxmcClient::with_tls_verification(
            config.base_url.clone(),
            !config.accept_invalid_certs,
        ) {
            Ok(client) => run(client, &config).await,
            Err(e) => Err(e),
        }
    };

    match result {
        Ok(summary) => {
            tracing::info!("✅ Export process completed successfully!");
            println!(
                "✅ Exported {} day(s), {} window(s) to {}",
                summary.days, summary.windows, config.export_path
            );
        }
        Err(e) => exit_with(e),
    }

    Ok(())
}

async fn run<R: RemoteControl>(
    remote: R,
    config: &ExportConfig,
) -> mxmc_export::Result<mxmc_export::core::ExportSummary> {
    let profile = config.load_profile()?;
    if let Some(quality) = profile.quality() {
        tracing::info!("🎞️ Profile '{}' exports at '{}' quality", profile.name(), quality);
    }

    let schedule = config.schedule()?;
    let engine = ExportEngine::from_config(remote, profile, schedule, config);
    engine.run(config.date_start, config.date_finish).await
}

fn exit_with(e: ExportError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Export failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}
