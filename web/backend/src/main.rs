mod application;
mod infrastructure;

use std::sync::Arc;
use actix_web::{web, App, HttpServer, middleware};
use actix_cors::Cors;
use anyhow::Result;
use tracing::{info, error};
use tracing_subscriber::FmtSubscriber;

use application::services::AnalysisService;
use infrastructure::config::AppConfig;
use infrastructure::driving::web::api::{api_routes, health};
use infrastructure::driving::web::dashboard::dashboard_routes;
use infrastructure::driving::web::AppState;

#[actix_web::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Err(e) = dotenvy::dotenv() {
        info!("No .env file loaded: {}", e);
    }

    info!("Starting FraudShield...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Configuration loaded successfully");

    let server_config = config.server.clone();
    let max_file_bytes = config.upload.max_file_bytes;
    let app_state = web::Data::new(AppState {
        analysis_service: Arc::new(AnalysisService::new()),
        upload: config.upload.clone(),
        render: config.render.clone(),
    });

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(middleware::Logger::default())
            .wrap(cors)
            .app_data(app_state.clone())
            // Bounds the raw CSV body of the JSON API
            .app_data(web::PayloadConfig::new(max_file_bytes))
            .configure(dashboard_routes::<AnalysisService>)
            .service(api_routes::<AnalysisService>())
            .route("/health", web::get().to(health))
    })
    .bind((server_config.host.clone(), server_config.port))?
    .run();

    info!("Dashboard listening on {}:{}", server_config.host, server_config.port);

    server.await?;

    info!("Application shutting down");
    Ok(())
}
