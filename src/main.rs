use clap::Parser;
use quake_map::core::ConfigProvider;
use quake_map::utils::{logger, validation::Validate};
use quake_map::{CliConfig, HttpFeedSource, LocalStorage, MapError, RenderEngine, RenderState, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting quake-map");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let exit_code = match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(&path) {
                Ok(config) => {
                    let monitor = cli.monitor || config.monitoring_enabled();
                    run(config, monitor, cli.dry_run).await
                }
                Err(e) => report_error(&format!("Failed to load config file '{}'", path), &e),
            }
        }
        None => {
            let monitor = cli.monitor;
            let dry_run = cli.dry_run;
            run(cli, monitor, dry_run).await
        }
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

async fn run<C: ConfigProvider + Validate>(config: C, monitor: bool, dry_run: bool) -> i32 {
    // 驗證配置
    if let Err(e) = config.validate() {
        return report_error("Configuration validation failed", &e);
    }

    display_config_summary(&config);

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing fetched or written");
        return 0;
    }

    if monitor {
        tracing::info!("🔍 Process monitoring enabled");
    }

    let feed = HttpFeedSource::new(config.feed_url());
    let storage = LocalStorage::new(config.output_path());
    let engine = RenderEngine::new_with_monitoring(feed, storage, config, monitor);

    match engine.run().await {
        Ok(report) => {
            match report.state {
                RenderState::Rendered => {
                    println!("✅ Rendered {} earthquakes", report.marker_count);
                }
                _ => {
                    // 地圖與圖例仍會輸出，只是沒有地震標記
                    println!("⚠️ Map written without earthquake markers (see log)");
                }
            }
            for output in &report.outputs {
                println!("📁 Output saved to: {}", output);
            }
            0
        }
        Err(e) => report_error("Rendering failed", &e),
    }
}

fn report_error(context: &str, e: &MapError) -> i32 {
    tracing::error!(
        "❌ {}: {} (Category: {:?}, Severity: {:?})",
        context,
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    e.exit_code()
}

fn display_config_summary<C: ConfigProvider>(config: &C) {
    let viewport = config.viewport();
    tracing::info!("📋 Configuration summary:");
    tracing::info!("  🌐 Feed: {}", config.feed_url());
    tracing::info!(
        "  🗺️ Center: ({}, {}), zoom {}",
        viewport.center.lat,
        viewport.center.lon,
        viewport.zoom
    );
    tracing::info!("  🧱 Tiles: {}", config.tile_layer().url_template);
    tracing::info!("  📁 Output: {} [{}]", config.output_path(), config.output_formats().join(", "));
    tracing::info!("  🩹 Malformed records: {:?}", config.malformed_policy());
}
