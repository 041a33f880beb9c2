//! Tool registry - central routing for MCP tools.
//!
//! Provides `list_tools()` and `call_tool()` functionality for MCP clients.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::{
    self, CatalogCache, CatalogError, CatalogRecord, CatalogStore, Product, Vehicle,
};
use crate::config::AppConfig;
use crate::mcp::content::ToolResult;
use crate::messaging::{DisabledMessenger, Messenger, MessagingError, TelegramMessenger};

use super::income_tax::{self, IncomeTaxRequest};
use super::search_catalog::{self, CatalogKind, SearchCatalogRequest};
use super::send_message::{self, SendMessageRequest};
use super::vehicle_tax::{self, VehicleTaxRequest};

/// Tool descriptor as advertised by `tools/list`.
#[derive(Debug, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Central registry for all MCP tools.
pub struct ToolRegistry {
    products: CatalogCache<Product>,
    vehicles: CatalogCache<Vehicle>,
    products_file: PathBuf,
    vehicles_file: PathBuf,
    messenger: Arc<dyn Messenger>,
}

impl ToolRegistry {
    /// Registry over catalogs in `store`, with default file names and
    /// messaging disabled.
    pub fn new(store: CatalogStore, cache_enabled: bool) -> Self {
        Self {
            products: CatalogCache::new(store.clone(), cache_enabled),
            vehicles: CatalogCache::new(store, cache_enabled),
            products_file: PathBuf::from("products.csv"),
            vehicles_file: PathBuf::from("vehicles.csv"),
            messenger: Arc::new(DisabledMessenger),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, MessagingError> {
        let messenger: Arc<dyn Messenger> = match &config.telegram {
            Some(telegram) => Arc::new(TelegramMessenger::new(telegram.clone())?),
            None => Arc::new(DisabledMessenger),
        };

        Ok(
            Self::new(CatalogStore::new(&config.data_dir), config.catalog_cache_enabled)
                .with_catalog_files(&config.products_file, &config.vehicles_file)
                .with_messenger(messenger),
        )
    }

    pub fn with_catalog_files(
        mut self,
        products: impl Into<PathBuf>,
        vehicles: impl Into<PathBuf>,
    ) -> Self {
        self.products_file = products.into();
        self.vehicles_file = vehicles.into();
        self
    }

    pub fn with_messenger(mut self, messenger: Arc<dyn Messenger>) -> Self {
        self.messenger = messenger;
        self
    }

    /// List all available tools.
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        vec![
            income_tax::descriptor(),
            vehicle_tax::descriptor(),
            search_catalog::descriptor(),
            send_message::descriptor(),
        ]
    }

    /// Call a tool by name with the given arguments.
    pub async fn call_tool(&self, name: &str, arguments: Option<Value>) -> ToolResult {
        info!("Calling tool '{}'", name);
        match name {
            income_tax::TOOL_NAME => match parse_arguments::<IncomeTaxRequest>(arguments) {
                Ok(request) => income_tax::run(request),
                Err(err) => ToolResult::error(err),
            },
            vehicle_tax::TOOL_NAME => match parse_arguments::<VehicleTaxRequest>(arguments) {
                Ok(request) => vehicle_tax::run(request),
                Err(err) => ToolResult::error(err),
            },
            search_catalog::TOOL_NAME => self.call_search_catalog(arguments).await,
            send_message::TOOL_NAME => self.call_send_message(arguments).await,
            _ => ToolResult::error(format!(
                "Инструмент '{}' недоступен. Доступные инструменты: {}, {}, {}, {}",
                name,
                income_tax::TOOL_NAME,
                vehicle_tax::TOOL_NAME,
                search_catalog::TOOL_NAME,
                send_message::TOOL_NAME,
            )),
        }
    }

    async fn call_search_catalog(&self, arguments: Option<Value>) -> ToolResult {
        let request = match parse_arguments::<SearchCatalogRequest>(arguments) {
            Ok(req) => req,
            Err(err) => return ToolResult::error(err),
        };

        match request.catalog {
            CatalogKind::Products => {
                search_in(&self.products, &self.products_file, &request).await
            }
            CatalogKind::Vehicles => {
                search_in(&self.vehicles, &self.vehicles_file, &request).await
            }
        }
    }

    async fn call_send_message(&self, arguments: Option<Value>) -> ToolResult {
        let request = match parse_arguments::<SendMessageRequest>(arguments) {
            Ok(req) => req,
            Err(err) => return ToolResult::error(err),
        };

        let destination = request.chat_id.map(|id| id.into_string());
        match self.messenger.send(&request.text, destination.as_deref()).await {
            Ok(()) => ToolResult::success_text("ok"),
            Err(err) => {
                warn!("send_message failed: {}", err);
                ToolResult::error(format!("error: {}", err))
            }
        }
    }
}

async fn search_in<R: CatalogRecord>(
    cache: &CatalogCache<R>,
    file: &Path,
    request: &SearchCatalogRequest,
) -> ToolResult {
    if request.query.trim().is_empty() {
        return ToolResult::success_json(&Vec::<Value>::new());
    }

    match cache.get_or_load(file).await {
        Ok(loaded) => {
            let found = catalog::search(&request.query, request.limit, loaded.as_ref());
            ToolResult::success_json(&found)
        }
        Err(err @ CatalogError::NotFound(_)) => {
            ToolResult::error(format!("Каталог недоступен: {}", err))
        }
        Err(err) => ToolResult::error(format!("Не удалось загрузить каталог: {}", err)),
    }
}

fn parse_arguments<T: for<'de> Deserialize<'de>>(arguments: Option<Value>) -> Result<T, String> {
    let value = arguments.unwrap_or(Value::Null);
    serde_json::from_value(value).map_err(|err| format!("Неверные аргументы: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> ToolRegistry {
        ToolRegistry::new(CatalogStore::new("/nonexistent"), false)
    }

    #[test]
    fn test_list_tools() {
        let names: Vec<_> = registry().list_tools().into_iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec!["income_tax", "vehicle_tax", "search_catalog", "send_message"]
        );
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let result = registry().call_tool("echo", None).await;
        assert!(result.is_error);
        assert!(result.first_text().unwrap().contains("echo"));
    }

    #[tokio::test]
    async fn test_missing_arguments() {
        let result = registry().call_tool(income_tax::TOOL_NAME, None).await;
        assert!(result.is_error);
        assert!(result.first_text().unwrap().starts_with("Неверные аргументы"));
    }

    #[tokio::test]
    async fn test_missing_catalog_file() {
        let result = registry()
            .call_tool(search_catalog::TOOL_NAME, Some(json!({ "query": "x" })))
            .await;
        assert!(result.is_error);
        assert!(result.first_text().unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn test_blank_query_skips_missing_catalog() {
        let result = registry()
            .call_tool(search_catalog::TOOL_NAME, Some(json!({ "query": "  " })))
            .await;
        assert!(!result.is_error);
        assert_eq!(result.structured_content, Some(json!({ "result": [] })));
    }

    #[tokio::test]
    async fn test_integral_float_limit_is_accepted() {
        let result = registry()
            .call_tool(
                search_catalog::TOOL_NAME,
                Some(json!({ "query": "", "limit": 5.0 })),
            )
            .await;
        assert!(!result.is_error);
    }

    #[tokio::test]
    async fn test_send_message_disabled() {
        let result = registry()
            .call_tool(send_message::TOOL_NAME, Some(json!({ "text": "hi" })))
            .await;
        assert!(result.is_error);
        assert!(result.first_text().unwrap().starts_with("error:"));
    }
}
