use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use actix_web_prometheus::PrometheusMetricsBuilder;
use anyhow::Context;
use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod config;
pub mod mcp;
pub mod messaging;
pub mod tax;

pub use crate::config::AppConfig;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new("NotFound", message)
    }
}

/// GET /health
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> impl Responder {
    HttpResponse::NotFound().json(ErrorResponse::not_found(
        "Unknown route. MCP endpoint is POST /mcp",
    ))
}

/// Register MCP, health and fallback routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(mcp::config)
        .service(web::resource("/health").route(web::get().to(health)))
        .default_service(web::to(not_found));
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    log::info!("Catalog data directory: {}", config.data_dir.display());

    let registry = mcp::tools::ToolRegistry::from_config(&config)
        .context("failed to initialise tool registry")?;
    let mcp_state = web::Data::new(Arc::new(mcp::McpState::new(mcp::McpService::new(registry))));

    let prometheus = PrometheusMetricsBuilder::new("nalog_mcp_server")
        .endpoint("/metrics")
        .build()
        .map_err(|err| anyhow::anyhow!("failed to create Prometheus metrics middleware: {err:?}"))?;

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus.clone())
            .wrap(cors)
            .app_data(mcp_state.clone())
            .configure(configure)
    })
    .keep_alive(actix_web::http::KeepAlive::Os)
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?
    .run()
    .await
    .context("server error")?;

    log::info!("Server stopped");
    Ok(())
}
