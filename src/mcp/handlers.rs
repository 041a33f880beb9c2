//! MCP Stateless HTTP Handlers for Actix-Web.
//!
//! Each POST carries one JSON-RPC request; no session or SSE stream is kept.

use actix_web::{error, web, HttpResponse, Responder};
use std::sync::Arc;

use crate::mcp::rpc::{OutboundResponse, RpcRequest};
use crate::mcp::service::McpService;

/// MCP State for Actix-Web (stateless version)
pub struct McpState {
    pub service: McpService,
}

impl McpState {
    pub fn new(service: McpService) -> Self {
        Self { service }
    }
}

/// RPC handler - POST /mcp
pub async fn rpc_handler(
    state: web::Data<Arc<McpState>>,
    body: web::Json<RpcRequest>,
) -> impl Responder {
    log::info!("Received MCP request: {}", body.method);

    if let Some(response) = state.service.handle_request(body.into_inner()).await {
        return HttpResponse::Ok()
            .content_type("application/json")
            .json(response);
    }

    // Notifications return 202 Accepted
    HttpResponse::Accepted().finish()
}

/// Malformed bodies are answered with a JSON-RPC parse error instead of plain text.
fn json_error_handler(err: error::JsonPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    log::warn!("Rejected malformed MCP request: {}", err);
    let response = HttpResponse::BadRequest().json(OutboundResponse::parse_error(err.to_string()));
    error::InternalError::from_response(err, response).into()
}

/// Configure MCP routes (stateless)
pub fn config(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .limit(256 * 1024)
        .error_handler(json_error_handler);

    cfg.service(
        web::resource("/mcp")
            .app_data(json_config.clone())
            .route(web::post().to(rpc_handler)),
    );

    // Same handler under /sse for clients configured with the legacy path
    cfg.service(
        web::resource("/sse")
            .app_data(json_config)
            .route(web::post().to(rpc_handler)),
    );
}
