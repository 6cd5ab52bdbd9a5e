//! CLI command implementations

use anyhow::Context;
use callouts_core::{
    format_date_de, ColumnLayout, Config, CurrentDiagram, RecordStore, SessionId, Summary,
    CONFIG_FILE,
};
use callouts_server::{CalloutsServer, ServerConfig};
use std::path::{Path, PathBuf};

/// Explicit config path, or `callouts.toml` beside the dataset.
pub fn config_path(data: &Path, explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        data.parent()
            .unwrap_or_else(|| Path::new("."))
            .join(CONFIG_FILE)
    })
}

fn load_store(data: &Path) -> anyhow::Result<RecordStore> {
    RecordStore::load(data).with_context(|| format!("cannot load dataset {}", data.display()))
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    Config::load(path).with_context(|| format!("cannot load config {}", path.display()))
}

pub async fn serve(
    data: &Path,
    config: &Path,
    host: String,
    port: u16,
    open: bool,
) -> anyhow::Result<()> {
    let store = load_store(data)?;
    let config = load_config(config)?;

    tracing::info!("Starting callouts server on {}:{}", host, port);
    let url = format!("http://{}:{}", host, port);
    let server = CalloutsServer::new(store, config, ServerConfig { host, port });

    if open {
        if let Err(e) = open::that(&url) {
            tracing::warn!("Could not open browser: {}", e);
        }
    }

    server.start().await
}

pub fn summary(data: &Path) -> anyhow::Result<()> {
    let store = load_store(data)?;
    println!("{}", Summary::from_store(&store).text);
    Ok(())
}

pub fn sessions(data: &Path) -> anyhow::Result<()> {
    let store = load_store(data)?;
    for &(session, date) in store.session_dates() {
        println!("{}\t{}", session, format_date_de(date));
    }
    Ok(())
}

pub fn diagram(data: &Path, config: &Path, selector: &str) -> anyhow::Result<()> {
    let session: SessionId = selector.parse()?;
    let store = load_store(data)?;
    let config = load_config(config)?;

    let current = CurrentDiagram::build(&store, session, &ColumnLayout, config.layout.params(), 0)?;
    tracing::info!("{}", current.headline);
    println!("{}", serde_json::to_string_pretty(&current.diagram)?);
    Ok(())
}
