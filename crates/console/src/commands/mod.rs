//! Subcommand handlers.

mod account;
mod content;
mod site;

use std::sync::Arc;

use anyhow::Context as _;

use folio_client::{AdminSession, ClientConfig, CmsApi, FileTokenStore};

use crate::cli::{Cli, Command};

/// Everything a command needs: configuration, the API client and the
/// admin session backed by the token file.
pub struct Context {
    pub config: ClientConfig,
    pub api: Arc<CmsApi>,
    pub session: AdminSession,
    pub json: bool,
}

impl Context {
    pub fn new(config: ClientConfig, json: bool) -> anyhow::Result<Self> {
        let api = Arc::new(CmsApi::from_config(&config)?);
        let store = Arc::new(FileTokenStore::new(config.token_file.clone()));
        let session = AdminSession::new(Arc::clone(&api), store);
        Ok(Self {
            config,
            api,
            session,
            json,
        })
    }

    /// Print a record as JSON when `--json` is set, else as text.
    pub(crate) fn emit<T: serde::Serialize + ?Sized>(
        &self,
        value: &T,
        text: impl FnOnce(&T) -> String,
    ) -> anyhow::Result<()> {
        if self.json {
            println!("{}", crate::render::json(value)?);
        } else {
            println!("{}", text(value));
        }
        Ok(())
    }

    /// Print one line per item, or the whole list as JSON.
    pub(crate) fn emit_list<T: serde::Serialize>(
        &self,
        items: &[T],
        line: impl Fn(&T) -> String,
    ) -> anyhow::Result<()> {
        if self.json {
            println!("{}", crate::render::json(items)?);
        } else if items.is_empty() {
            println!("(none)");
        } else {
            for item in items {
                println!("{}", line(item));
            }
        }
        Ok(())
    }
}

/// Run a parsed command line.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ClientConfig::from_env().context("Failed to load configuration")?;
    if let Some(api_url) = cli.api_url {
        config.api_url = folio_client::config::resolve_api_url(Some(api_url), None, None);
    }
    tracing::debug!(api_url = %config.api_url, "Loaded client configuration");

    let ctx = Context::new(config, cli.json)?;
    dispatch(&ctx, cli.command).await
}

async fn dispatch(ctx: &Context, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { username, password } => account::login(ctx, &username, &password).await,
        Command::Logout => account::logout(ctx),
        Command::Status => account::status(ctx),
        Command::Overview => account::overview(ctx).await,
        Command::Stats => site::stats(ctx).await,
        Command::Blogs { action } => content::blogs(ctx, action).await,
        Command::Projects { action } => content::projects(ctx, action).await,
        Command::Services { action } => content::services(ctx, action).await,
        Command::Tools { action } => site::tools(ctx, action).await,
        Command::Contact(args) => site::contact(ctx, args).await,
        Command::Resume { action } => site::resume(ctx, action).await,
    }
}
