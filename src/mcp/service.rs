//! MCP Service - Core JSON-RPC 2.0 request handler.
//!
//! The server is tools-only: `resources/*` and `prompts/*` answer with empty
//! listings (and "not found" on lookup) so generic clients can probe them.

use crate::mcp::rpc::{OutboundResponse, RpcRequest, INVALID_REQUEST};
use crate::mcp::tools::{ToolDescriptor, ToolRegistry};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

pub const PROTOCOL_VERSION: &str = "2024-11-05";

const RESOURCE_NOT_FOUND: i64 = -32002;

const SERVER_INSTRUCTIONS: &str = concat!(
    "Калькулятор НДФЛ и транспортного налога РФ, поиск по каталогам товаров и автомобилей. ",
    "Для расчёта налога на автомобиль из каталога сначала найдите его мощность через search_catalog."
);

/// Core MCP request handler.
#[derive(Clone)]
pub struct McpService {
    registry: Arc<ToolRegistry>,
}

impl McpService {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub async fn handle_request(&self, request: RpcRequest) -> Option<OutboundResponse> {
        if request.jsonrpc != "2.0" {
            warn!("received unsupported jsonrpc version: {}", request.jsonrpc);
            return Some(OutboundResponse::error(
                request.id.clone(),
                INVALID_REQUEST,
                "Unsupported jsonrpc version (expected 2.0)",
            ));
        }

        let RpcRequest {
            method, params, id, ..
        } = request;

        match method.as_str() {
            "initialize" => Some(self.handle_initialize(id, params)),
            "tools/list" => Some(self.handle_list_tools(id)),
            "tools/call" => Some(self.handle_call_tool(id, params).await),
            "resources/list" => Some(OutboundResponse::from_serializable(
                id,
                &ListResourcesResult::default(),
            )),
            "resources/read" => Some(self.handle_resources_read(id, params)),
            "resources/templates/list" => Some(OutboundResponse::from_serializable(
                id,
                &ResourceTemplateListResult::default(),
            )),
            "prompts/list" => Some(OutboundResponse::from_serializable(
                id,
                &PromptListResult::default(),
            )),
            "prompts/get" => Some(self.handle_prompts_get(id, params)),
            "ping" => Some(OutboundResponse::success(id, json!({}))),
            method if method.starts_with("notifications/") => {
                info!("received client notification: {}", method);
                None
            }
            other => Some(OutboundResponse::method_not_found(id, other)),
        }
    }

    fn handle_initialize(&self, id: Option<Value>, params: Option<Value>) -> OutboundResponse {
        let parsed: InitializeParams = match parse_params(params) {
            Ok(value) => value,
            Err(message) => return OutboundResponse::invalid_params(id, message),
        };

        info!(
            "client requested initialization: {} v{} (protocol {})",
            parsed.client_info.name,
            parsed
                .client_info
                .version
                .clone()
                .unwrap_or_else(|| "unknown".into()),
            parsed.protocol_version
        );

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            server_info: ImplementationInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("Nalog MCP Server".to_string()),
            },
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
        };

        OutboundResponse::from_serializable(id, &result)
    }

    fn handle_list_tools(&self, id: Option<Value>) -> OutboundResponse {
        let payload = ListToolsResult {
            tools: self.registry.list_tools(),
            next_cursor: None,
        };

        OutboundResponse::from_serializable(id, &payload)
    }

    async fn handle_call_tool(&self, id: Option<Value>, params: Option<Value>) -> OutboundResponse {
        let parsed: CallToolParams = match parse_params(params) {
            Ok(value) => value,
            Err(message) => return OutboundResponse::invalid_params(id, message),
        };

        let result = self.registry.call_tool(&parsed.name, parsed.arguments).await;
        OutboundResponse::from_serializable(id, &result)
    }

    fn handle_resources_read(&self, id: Option<Value>, params: Option<Value>) -> OutboundResponse {
        let parsed: ResourceReadParams = match parse_params(params) {
            Ok(value) => value,
            Err(message) => return OutboundResponse::invalid_params(id, message),
        };

        let message = format!("Resource '{}' not found.", parsed.uri);
        OutboundResponse::error(id, RESOURCE_NOT_FOUND, message)
    }

    fn handle_prompts_get(&self, id: Option<Value>, params: Option<Value>) -> OutboundResponse {
        let parsed: PromptGetParams = match parse_params(params) {
            Ok(value) => value,
            Err(message) => return OutboundResponse::invalid_params(id, message),
        };

        let message = format!("Prompt '{}' is not available.", parsed.name);
        OutboundResponse::invalid_params(id, message)
    }
}

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
struct InitializeParams {
    #[serde(rename = "protocolVersion")]
    protocol_version: String,
    #[serde(rename = "clientInfo")]
    client_info: ClientInfo,
}

#[derive(Debug, Deserialize)]
struct ClientInfo {
    name: String,
    #[serde(default)]
    version: Option<String>,
}

#[derive(Debug, Serialize)]
struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    protocol_version: String,
    #[serde(rename = "serverInfo")]
    server_info: ImplementationInfo,
    capabilities: ServerCapabilities,
    #[serde(skip_serializing_if = "Option::is_none")]
    instructions: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImplementationInfo {
    name: String,
    version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
}

#[derive(Debug, Serialize)]
struct ServerCapabilities {
    tools: ToolsCapability,
}

#[derive(Debug, Serialize)]
struct ToolsCapability {
    #[serde(rename = "listChanged")]
    list_changed: bool,
}

#[derive(Debug, Serialize)]
struct ListToolsResult {
    tools: Vec<ToolDescriptor>,
    #[serde(rename = "nextCursor")]
    #[serde(skip_serializing_if = "Option::is_none")]
    next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

// This server exposes tools only; resource and prompt listings are empty.

#[derive(Debug, Default, Serialize)]
struct ListResourcesResult {
    resources: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct ResourceReadParams {
    uri: String,
}

#[derive(Debug, Default, Serialize)]
struct ResourceTemplateListResult {
    #[serde(rename = "resourceTemplates")]
    resource_templates: Vec<Value>,
}

#[derive(Debug, Default, Serialize)]
struct PromptListResult {
    prompts: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct PromptGetParams {
    name: String,
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, String> {
    serde_json::from_value(params.unwrap_or(Value::Null)).map_err(|err| err.to_string())
}
