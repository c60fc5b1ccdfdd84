use home_dashboard::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting dashboard");

    // Load configuration
    let config = startup::load_config().await?;

    // Serve until a shutdown signal arrives
    startup::start_server(config).await
}
