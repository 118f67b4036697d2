use playground_axum::{
    error::PlaygroundError,
    settings::Settings,
    telemetry::{get_tracing_subscriber, init_tracing_subscriber},
};
use tracing::level_filters::LevelFilter;

#[tokio::main]
async fn main() -> Result<(), PlaygroundError> {
    let tracing_subscriber = get_tracing_subscriber(LevelFilter::INFO, std::io::stdout);
    init_tracing_subscriber(tracing_subscriber);

    let settings = Settings::get_settings()?;
    let server = settings.build_server().await?;

    tracing::info!("Starting Server");
    server.run().await?;

    Ok(())
}
