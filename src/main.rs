use std::sync::Arc;

use clap::Parser;
use cmcs_backend::api::build_routes;
use cmcs_backend::cli::{execute_command, Cli, Commands};
use cmcs_backend::config::{init_logging, AppSettings, SystemEnvironment};
use cmcs_backend::AppData;
use poem::{listener::TcpListener, Server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging(&SystemEnvironment)?;

    let settings = AppSettings::from_env()?;
    tracing::debug!("Loaded settings: {:?}", settings);

    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(settings).await?,
        command => execute_command(command, settings).await?,
    }

    Ok(())
}

async fn serve(settings: AppSettings) -> Result<(), Box<dyn std::error::Error>> {
    let address = settings.server_address();
    let port = settings.server_port();
    let public_url = format!("http://localhost:{}/api", port);

    let app_data = Arc::new(AppData::init(settings).await?);
    let app = build_routes(app_data, &public_url);

    tracing::info!("Starting server on http://{}", address);
    tracing::info!("Swagger UI available at http://localhost:{}/swagger", port);
    tracing::info!("API endpoints available at {}", public_url);

    Server::new(TcpListener::bind(address)).run(app).await?;
    Ok(())
}
