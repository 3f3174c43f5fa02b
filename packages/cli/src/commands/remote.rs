use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_sync::{EditorSession, HttpSiteStore, SiteStore, StaticToken};
use std::sync::Arc;

/// Arguments shared by commands that talk to the site API
#[derive(Debug, Args)]
pub struct RemoteArgs {
    /// Site id
    pub site: String,

    /// API bearer token
    #[arg(long, env = "PAGECRAFT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

impl RemoteArgs {
    fn store(&self, config: &Config) -> Result<Arc<HttpSiteStore>> {
        let credentials = match &self.token {
            Some(token) => StaticToken::new(token.clone()),
            None => StaticToken::none(),
        };
        let store = HttpSiteStore::with_timeout(
            config.api_base_url.clone(),
            Arc::new(credentials),
            config.request_timeout(),
        )?;
        Ok(Arc::new(store))
    }

    async fn open(&self, config: &Config) -> Result<EditorSession> {
        let store = self.store(config)?;
        let session = EditorSession::open(store, self.site.clone(), config.session_options()).await?;
        Ok(session)
    }
}

#[derive(Debug, Args)]
pub struct RevertArgs {
    #[command(flatten)]
    pub remote: RemoteArgs,

    /// Version id to restore
    pub version: String,
}

pub async fn versions(args: RemoteArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let versions = args.store(&config)?.list_versions(&args.site).await?;

    if versions.is_empty() {
        println!("No saved versions for {}", args.site.bright_white());
        return Ok(());
    }

    println!("{} version(s) for {}", versions.len(), args.site.bright_white());
    for version in versions {
        let saved_at = version
            .saved_at
            .as_ref()
            .and_then(|t| t.to_datetime())
            .map_or_else(|| "unknown time".to_string(), |t| t.to_rfc3339());
        println!(
            "  {}  {}  {} node(s)",
            version.id.bright_white(),
            saved_at,
            version.to_document().node_count()
        );
    }
    Ok(())
}

pub async fn save_version(args: RemoteArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let session = args.open(&config).await?;

    let id = session.save_version().await?;
    session.close().await?;

    println!("{} Saved version {}", "✓".green(), id.bright_white());
    Ok(())
}

pub async fn revert(args: RevertArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut session = args.remote.open(&config).await?;

    session.revert_to_version(&args.version).await?;
    session.close().await?;

    println!(
        "{} Draft of {} restored from {}",
        "✓".green(),
        args.remote.site.bright_white(),
        args.version.bright_white()
    );
    Ok(())
}

pub async fn publish(args: RemoteArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut session = args.open(&config).await?;

    session.publish().await?;
    session.close().await?;

    println!("🚀 {} {}", "Published".green().bold(), args.site.bright_white());
    Ok(())
}
