use anyhow::{Context, Result};
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};

use crate::lsp::backend::Backend;
use crate::Config;

/// Start the LSP server on stdio
pub async fn serve() -> Result<()> {
    let config = Config::from_args_and_env()?;
    config.init_logging();

    let registry = config.load_rules()?;
    let rules = registry
        .get_active_profile()
        .cloned()
        .context("no active rule profile")?;

    log::info!(
        "Starting kahani-ls with profile '{}' ({} ms debounce)",
        rules.name,
        config.debounce.as_millis()
    );

    let (service, socket) =
        LspService::build(move |client| Backend::new(client, config.clone(), rules.clone()))
            .finish();

    Server::new(stdin(), stdout(), socket).serve(service).await;

    Ok(())
}
