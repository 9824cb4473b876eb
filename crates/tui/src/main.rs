use std::{fs::OpenOptions, path::Path, sync::Mutex};

use finbot_tui::{app::App, config, error::Result};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    init_tracing(&config.log_file, &config.log_level)?;

    tracing::info!(base_url = %config.base_url, "starting");
    let mut app = App::new(config)?;
    app.run().await?;
    Ok(())
}

/// Logs go to a file; stdout belongs to the terminal UI.
fn init_tracing(log_file: &str, level: &str) -> Result<()> {
    if let Some(parent) = Path::new(log_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!("finbot_tui={level},finbot={level}"))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
