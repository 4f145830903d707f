use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde::Serialize;

use crate::{
    config::{Config, load_config},
    core::Resolver,
};

use super::types::{
    ConfigDto, ConfigValues, DictionariesResult, DictionaryInfo, FindLanguageStringsParams,
    GetConfigParams, GetTranslationParams, LanguageStringsResult, ListDictionariesParams,
    MatchItem, Pagination, TranslationResult,
};

const DEFAULT_LIMIT: usize = 50;
const MAX_LIMIT: usize = 200;

#[derive(Clone)]
pub struct LangLspMcpServer {
    tool_router: ToolRouter<Self>,
    /// One resolver per project root, so caches survive between tool calls.
    resolvers: Arc<Mutex<HashMap<PathBuf, Arc<Resolver>>>>,
}

impl Default for LangLspMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

fn load_project_config(root: &Path) -> Result<Config, McpError> {
    load_config(root)
        .map(|result| result.config)
        .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None))
}

/// Text to scan: inline `text` wins over `file_path`.
async fn source_text(
    root: &Path,
    file_path: Option<&str>,
    text: Option<String>,
) -> Result<String, McpError> {
    if let Some(text) = text {
        return Ok(text);
    }
    let Some(file_path) = file_path else {
        return Err(McpError::invalid_params(
            "either filePath or text must be provided",
            None,
        ));
    };
    let path = root.join(file_path);
    tokio::fs::read_to_string(&path).await.map_err(|e| {
        McpError::invalid_params(format!("Failed to read {}: {}", path.display(), e), None)
    })
}

#[tool_router]
impl LangLspMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
            resolvers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn resolver(&self, root: &Path) -> Result<Arc<Resolver>, McpError> {
        let mut resolvers = self.resolvers.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(resolver) = resolvers.get(root) {
            return Ok(Arc::clone(resolver));
        }
        let config = load_project_config(root)?;
        let resolver = Arc::new(Resolver::from_config(root, &config));
        resolvers.insert(root.to_path_buf(), Arc::clone(&resolver));
        Ok(resolver)
    }

    /// Find every translated key in a source file
    #[tool(
        description = "Find every quoted translation key in a source file (or inline text) that has an English translation. Returns a paginated list with positions, translations and namespaces."
    )]
    pub async fn find_language_strings(
        &self,
        params: Parameters<FindLanguageStringsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let root = PathBuf::from(&params.project_root_path);
        let limit = params
            .limit
            .map(|v| v as usize)
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT);
        let offset = params.offset.map(|v| v as usize).unwrap_or(0);

        let resolver = self.resolver(&root)?;
        let text = source_text(&root, params.file_path.as_deref(), params.text).await?;

        let matches = resolver.scan_document(&text).await;
        let total_count = matches.len();

        // Apply pagination
        let items: Vec<MatchItem> = matches
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(MatchItem::from)
            .collect();
        let has_more = offset + items.len() < total_count;

        to_json_result(&LanguageStringsResult {
            total_count,
            items,
            pagination: Pagination {
                offset,
                limit,
                has_more,
            },
        })
    }

    /// Resolve the translation key at a position
    #[tool(
        description = "Get the English translation of the quoted key at a zero-based line and UTF-16 character position, as an editor hover would."
    )]
    pub async fn get_translation(
        &self,
        params: Parameters<GetTranslationParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let root = PathBuf::from(&params.project_root_path);

        let resolver = self.resolver(&root)?;
        let text = source_text(&root, params.file_path.as_deref(), params.text).await?;

        let found = resolver
            .resolve_at(&text, params.line as usize, params.character as usize)
            .await;

        to_json_result(&TranslationResult {
            found: found.is_some(),
            item: found.map(MatchItem::from),
        })
    }

    /// List the dictionaries used for lookups
    #[tool(
        description = "List the translation dictionaries found under the project root, in lookup precedence order, with their namespaces and key counts."
    )]
    pub async fn list_dictionaries(
        &self,
        params: Parameters<ListDictionariesParams>,
    ) -> Result<CallToolResult, McpError> {
        let root = PathBuf::from(&params.0.project_root_path);
        let resolver = self.resolver(&root)?;

        let paths = resolver.discoverer().list_candidate_files(&root).await;
        let mut dictionaries = Vec::with_capacity(paths.len());
        for path in paths.iter() {
            let loaded = resolver
                .dictionaries()
                .load_dictionaries(std::slice::from_ref(path))
                .await;
            if let Some(entry) = loaded.first() {
                dictionaries.push(DictionaryInfo {
                    file_path: path.to_string_lossy().to_string(),
                    namespace: entry.namespace.clone(),
                    key_count: entry.messages.len(),
                });
            }
        }

        to_json_result(&DictionariesResult {
            project_root_path: params.0.project_root_path,
            dictionaries,
        })
    }

    /// Get the current lang-lsp configuration
    #[tool(description = "Get the lang-lsp configuration in effect for a project root.")]
    pub async fn get_config(
        &self,
        params: Parameters<GetConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = Path::new(&params.0.project_root_path);

        let result = load_config(path)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None))?;

        to_json_result(&ConfigDto {
            from_file: result.from_file,
            config: ConfigValues::from(result.config),
        })
    }
}

#[tool_handler]
impl ServerHandler for LangLspMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "lang-lsp MCP looks up English translations for i18n keys used in source code.\n\n\
                 Dictionaries are JSON files named <namespace>_en.json anywhere under the project root.\n\n\
                 Available tools:\n\
                 1. get_config - Get project configuration\n\
                 2. list_dictionaries - List dictionaries in lookup order with key counts\n\
                 3. find_language_strings - List every translated key in a file (paginated)\n\
                 4. get_translation - Translate the key at a line/character position\n\n\
                 When two dictionaries define the same key, the first one listed by\n\
                 list_dictionaries wins."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = LangLspMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
