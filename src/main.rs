use anyhow::Result;
use mcp_weather_guidance::config::GuidanceConfig;
use mcp_weather_guidance::WeatherGuidance;
use rmcp::ServiceExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = GuidanceConfig::load()?;

    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(
        "Starting MCP weather guidance server (default window: {} hours)",
        config.default_window_hours
    );

    let guidance = WeatherGuidance::new(config);
    let server = guidance.serve(rmcp::transport::stdio()).await?;
    server.waiting().await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
