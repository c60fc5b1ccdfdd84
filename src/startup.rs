use crate::components::{EventSource, GoogleCalendarHandle, QuoteSource, WeatherClient};
use crate::config::Config;
use crate::error::Error;
use crate::shutdown;
use crate::web::{self, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub async fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Start the calendar actor and serve the dashboard until a shutdown signal
pub async fn start_server(config: Arc<RwLock<Config>>) -> miette::Result<()> {
    let (port, quotes_path, calendar_id) = {
        let config_read = config.read().await;
        (
            config_read.port,
            config_read.quotes_path.clone(),
            config_read.google_calendar_id.clone(),
        )
    };

    info!("Showing events from calendar {}", calendar_id);
    let calendar = GoogleCalendarHandle::new(Arc::clone(&config)).await;
    let events: Arc<dyn EventSource> = Arc::new(calendar);

    let state = AppState {
        config,
        events: Arc::clone(&events),
        weather: WeatherClient::new(),
        quotes: QuoteSource::new(quotes_path),
    };

    let app = web::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await.map_err(Error::from)?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::wait_for_signal())
        .await
        .map_err(Error::from)?;

    shutdown::shutdown_components(events).await;
    Ok(())
}
