use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use serde_json::Value;
use tokio::sync::RwLock;
use tower_lsp::{
    Client, LanguageServer,
    jsonrpc::Result,
    lsp_types::{
        ConfigurationItem, DidChangeConfigurationParams, DidChangeTextDocumentParams,
        DidChangeWatchedFilesParams, DidChangeWatchedFilesRegistrationOptions,
        DidCloseTextDocumentParams, DidOpenTextDocumentParams, FileSystemWatcher, GlobPattern,
        Hover, HoverParams, HoverProviderCapability, InitializeParams, InitializeResult,
        InitializedParams, MessageType, Registration, ServerCapabilities, ServerInfo,
        TextDocumentSyncCapability, TextDocumentSyncKind, Url, WorkspaceFoldersServerCapabilities,
        WorkspaceServerCapabilities,
    },
};
use tracing::{debug, info, warn};

use super::{
    document::apply_change,
    protocol::{LangLspSettings, SERVER_NAME, SETTINGS_SECTION, to_diagnostics, to_hover},
};
use crate::{
    config::{Config, load_config},
    core::Resolver,
};

/// What the client told us it can do during `initialize`.
#[derive(Debug, Clone, Copy, Default)]
struct ClientSupport {
    configuration: bool,
    workspace_folders: bool,
    watched_files_registration: bool,
}

/// Per-workspace state created in `initialize`.
struct Workspace {
    resolver: Resolver,
    config: Config,
    client: ClientSupport,
}

#[derive(Default)]
struct SettingsStore {
    /// Last pushed settings, used when the client cannot be asked.
    global: Option<LangLspSettings>,
    /// Settings pulled per document via `workspace/configuration`.
    documents: HashMap<Url, LangLspSettings>,
}

pub struct Backend {
    client: Client,
    workspace: OnceLock<Workspace>,
    documents: RwLock<HashMap<Url, String>>,
    settings: RwLock<SettingsStore>,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            workspace: OnceLock::new(),
            documents: RwLock::new(HashMap::new()),
            settings: RwLock::new(SettingsStore::default()),
        }
    }

    fn default_settings(&self) -> LangLspSettings {
        LangLspSettings {
            enable_diagnostics: self
                .workspace
                .get()
                .is_none_or(|ws| ws.config.enable_diagnostics),
        }
    }

    async fn document_settings(&self, uri: &Url) -> LangLspSettings {
        let defaults = self.default_settings();
        let supports_configuration = self
            .workspace
            .get()
            .is_some_and(|ws| ws.client.configuration);

        if !supports_configuration {
            return self.settings.read().await.global.unwrap_or(defaults);
        }

        if let Some(cached) = self.settings.read().await.documents.get(uri) {
            return *cached;
        }

        let item = ConfigurationItem {
            scope_uri: Some(uri.clone()),
            section: Some(SETTINGS_SECTION.to_string()),
        };
        match self.client.configuration(vec![item]).await {
            Ok(values) => {
                let settings = defaults.merged(values.first().unwrap_or(&Value::Null));
                self.settings
                    .write()
                    .await
                    .documents
                    .insert(uri.clone(), settings);
                settings
            }
            Err(err) => {
                warn!(uri = %uri, error = %err, "failed to fetch client settings");
                defaults
            }
        }
    }

    async fn validate_document(&self, uri: Url) {
        let Some(workspace) = self.workspace.get() else {
            return;
        };
        if !self.document_settings(&uri).await.enable_diagnostics {
            return;
        }
        let Some(text) = self.documents.read().await.get(&uri).cloned() else {
            return;
        };

        let matches = workspace.resolver.scan_document(&text).await;
        debug!(uri = %uri, count = matches.len(), "publishing translation diagnostics");
        let diagnostics = to_diagnostics(&matches, &workspace.config.locale_label);
        self.client.publish_diagnostics(uri, diagnostics, None).await;
    }

    async fn validate_all(&self) {
        let uris: Vec<Url> = self.documents.read().await.keys().cloned().collect();
        for uri in uris {
            self.validate_document(uri).await;
        }
    }
}

/// Workspace root from the initialize request, falling back to the current
/// directory.
#[allow(deprecated)]
fn workspace_root(params: &InitializeParams) -> PathBuf {
    params
        .root_uri
        .as_ref()
        .and_then(|uri| uri.to_file_path().ok())
        .or_else(|| params.root_path.as_ref().map(PathBuf::from))
        .or_else(|| {
            params
                .workspace_folders
                .as_ref()
                .and_then(|folders| folders.first())
                .and_then(|folder| folder.uri.to_file_path().ok())
        })
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn client_support(params: &InitializeParams) -> ClientSupport {
    let workspace = params.capabilities.workspace.as_ref();
    ClientSupport {
        configuration: workspace.and_then(|w| w.configuration).unwrap_or(false),
        workspace_folders: workspace.and_then(|w| w.workspace_folders).unwrap_or(false),
        watched_files_registration: workspace
            .and_then(|w| w.did_change_watched_files.as_ref())
            .and_then(|c| c.dynamic_registration)
            .unwrap_or(false),
    }
}

fn load_workspace_config(root: &Path) -> Config {
    match load_config(root) {
        Ok(result) => result.config,
        Err(err) => {
            warn!(root = %root.display(), error = %err, "invalid config; using defaults");
            Config::default()
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let root = workspace_root(&params);
        let client = client_support(&params);
        let config = load_workspace_config(&root);
        info!(root = %root.display(), "initializing");

        let workspace = Workspace {
            resolver: Resolver::from_config(&root, &config),
            config,
            client,
        };
        if self.workspace.set(workspace).is_err() {
            warn!("initialize received more than once; keeping the first workspace");
        }

        let mut capabilities = ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Kind(
                TextDocumentSyncKind::INCREMENTAL,
            )),
            hover_provider: Some(HoverProviderCapability::Simple(true)),
            ..Default::default()
        };
        if client.workspace_folders {
            capabilities.workspace = Some(WorkspaceServerCapabilities {
                workspace_folders: Some(WorkspaceFoldersServerCapabilities {
                    supported: Some(true),
                    change_notifications: None,
                }),
                file_operations: None,
            });
        }

        Ok(InitializeResult {
            capabilities,
            server_info: Some(ServerInfo {
                name: SERVER_NAME.to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        let Some(workspace) = self.workspace.get() else {
            return;
        };

        let mut registrations = Vec::new();
        if workspace.client.configuration {
            registrations.push(Registration {
                id: "lang-lsp-configuration".to_string(),
                method: "workspace/didChangeConfiguration".to_string(),
                register_options: None,
            });
        }
        if workspace.client.watched_files_registration {
            let options = DidChangeWatchedFilesRegistrationOptions {
                watchers: vec![FileSystemWatcher {
                    glob_pattern: GlobPattern::String(format!(
                        "**/*{}",
                        workspace.config.dictionary_suffix
                    )),
                    kind: None,
                }],
            };
            registrations.push(Registration {
                id: "lang-lsp-dictionaries".to_string(),
                method: "workspace/didChangeWatchedFiles".to_string(),
                register_options: serde_json::to_value(options).ok(),
            });
        }

        if !registrations.is_empty()
            && let Err(err) = self.client.register_capability(registrations).await
        {
            warn!(error = %err, "capability registration failed");
        }

        self.client
            .log_message(
                MessageType::INFO,
                format!(
                    "{} ready for {}",
                    SERVER_NAME,
                    workspace.resolver.root().display()
                ),
            )
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        self.documents
            .write()
            .await
            .insert(uri.clone(), params.text_document.text);
        self.validate_document(uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        {
            let mut documents = self.documents.write().await;
            let Some(text) = documents.get_mut(&uri) else {
                warn!(uri = %uri, "change for a document that is not open");
                return;
            };
            for change in params.content_changes {
                apply_change(text, change);
            }
        }
        self.validate_document(uri).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.documents.write().await.remove(&uri);
        self.settings.write().await.documents.remove(&uri);
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        let supports_configuration = self
            .workspace
            .get()
            .is_some_and(|ws| ws.client.configuration);
        {
            let mut settings = self.settings.write().await;
            if supports_configuration {
                settings.documents.clear();
            } else {
                let pushed = params
                    .settings
                    .get(SETTINGS_SECTION)
                    .unwrap_or(&Value::Null);
                settings.global = Some(self.default_settings().merged(pushed));
            }
        }
        self.validate_all().await;
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        let Some(workspace) = self.workspace.get() else {
            return;
        };
        debug!(count = params.changes.len(), "dictionary files changed");
        workspace
            .resolver
            .discoverer()
            .invalidate(workspace.resolver.root());
        self.validate_all().await;
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let Some(workspace) = self.workspace.get() else {
            return Ok(None);
        };
        let position = params.text_document_position_params;
        let Some(text) = self
            .documents
            .read()
            .await
            .get(&position.text_document.uri)
            .cloned()
        else {
            return Ok(None);
        };

        let found = workspace
            .resolver
            .resolve_at(
                &text,
                position.position.line as usize,
                position.position.character as usize,
            )
            .await;
        Ok(found.map(|m| to_hover(&m, &workspace.config.locale_label)))
    }
}
