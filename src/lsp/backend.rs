use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::debounce::CoalescingTrigger;
use crate::lsp::document::DocumentState;
use crate::lsp::handlers::{
    publish_document_diagnostics, HandleDiagnostics, HandleDocumentSymbol, HandleHover,
};
use crate::rules::RuleBook;
use crate::Config;

pub type Documents = Arc<Mutex<HashMap<Url, DocumentState>>>;

type Triggers = HashMap<Url, CoalescingTrigger<Url>>;

/// Abort every pending re-validation without publishing it
fn cancel_pending(triggers: &mut Triggers) -> usize {
    let mut cancelled = 0;
    for (_, trigger) in triggers.drain() {
        trigger.cancel();
        cancelled += 1;
    }
    cancelled
}

/// The main LSP backend that holds state and implements the Language Server Protocol
pub struct Backend {
    pub client: Client,
    pub rules: Arc<RuleBook>,
    pub documents: Documents,
    /// One debounced re-validation per open document
    pub triggers: Mutex<Triggers>,
    pub config: Config,
}

impl Backend {
    pub fn new(client: Client, config: Config, rules: RuleBook) -> Self {
        Self {
            client,
            rules: Arc::new(rules),
            documents: Arc::new(Mutex::new(HashMap::new())),
            triggers: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// Re-validate `uri` once edits have paused
    async fn schedule_diagnostics(&self, uri: Url) {
        let mut triggers = self.triggers.lock().await;
        let trigger = triggers.entry(uri.clone()).or_insert_with(|| {
            let client = self.client.clone();
            let documents = self.documents.clone();
            let rules = self.rules.clone();
            CoalescingTrigger::new(self.config.debounce, move |uri: Url| {
                let client = client.clone();
                let documents = documents.clone();
                let rules = rules.clone();
                async move { publish_document_diagnostics(&client, &documents, &rules, uri).await }
            })
        });
        trigger.fire(uri);
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(
        &self,
        _: InitializeParams,
    ) -> tower_lsp::jsonrpc::Result<InitializeResult> {
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                document_symbol_provider: Some(OneOf::Left(true)),
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "kahani-ls".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(
                MessageType::INFO,
                format!("kahani-ls initialized with rule profile '{}'", self.rules.name),
            )
            .await;
    }

    async fn shutdown(&self) -> tower_lsp::jsonrpc::Result<()> {
        let cancelled = cancel_pending(&mut *self.triggers.lock().await);
        log::debug!("Cancelled {} pending re-validations on shutdown", cancelled);
        Ok(())
    }

    async fn hover(&self, params: HoverParams) -> tower_lsp::jsonrpc::Result<Option<Hover>> {
        self.handle_hover(params).await
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> tower_lsp::jsonrpc::Result<Option<DocumentSymbolResponse>> {
        self.handle_document_symbol(params).await
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let doc_state = DocumentState::new(&uri, params.text_document.text);

        let mut docs = self.documents.lock().await;
        docs.insert(uri.clone(), doc_state);
        drop(docs); // Release the lock before calling publish_diagnostics

        // Opening is not typing, report right away
        self.publish_diagnostics(uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        if let Some(change) = params.content_changes.into_iter().last() {
            let doc_state = DocumentState::new(&uri, change.text);

            let mut docs = self.documents.lock().await;
            docs.insert(uri.clone(), doc_state);
            drop(docs);

            self.schedule_diagnostics(uri).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;

        if let Some(trigger) = self.triggers.lock().await.remove(&uri) {
            trigger.cancel();
        }
        self.documents.lock().await.remove(&uri);

        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }
}
