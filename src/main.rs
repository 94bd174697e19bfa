// src/main.rs

use dotenvy::dotenv;
use proctor_core::api::{HttpScoringApi, ScoringApi};
use proctor_core::config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Thin CLI over the session core: lists past scored attempts from the
/// configured scoring service. Exam sessions themselves are driven by an
/// embedding surface feeding the controller.
#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let api = match HttpScoringApi::new(&config.scoring_base_url) {
        Ok(api) => api,
        Err(e) => {
            tracing::error!("Invalid SCORING_BASE_URL: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Fetching attempt history from {}", config.scoring_base_url);

    match api.history().await {
        Ok(attempts) if attempts.is_empty() => {
            println!("No completed attempts.");
        }
        Ok(attempts) => {
            for item in attempts {
                println!(
                    "{}  {:<30}  {:>5.1}%  {}/{}  [{}]",
                    item.created_at.format("%Y-%m-%d %H:%M"),
                    item.test_name,
                    item.accuracy,
                    item.total_score,
                    item.max_score,
                    item.status
                );
                println!("    report: {}", api.report_download_url(&item.session_id));
            }
        }
        Err(e) => {
            tracing::error!("Failed to fetch history: {}", e);
            std::process::exit(1);
        }
    }
}
