mod command;
mod config;
mod render;

use anyhow::Context;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use relaychat::{
    ChatEvent, CompletionClient, FileStore, SessionController, SessionError, SessionStore,
};

use crate::command::{Command, HELP};
use crate::config::{ClientConfig, LoggingConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ClientConfig::load().context("Failed to load configuration")?;
    init_logging(&config.logging);

    let client = CompletionClient::new(&config.transport).context("Failed to build HTTP client")?;
    tracing::info!(endpoint = ?client.selector().endpoint(), "Transport resolved");

    let durable = FileStore::open(&config.storage.path)
        .await
        .with_context(|| format!("Failed to open {}", config.storage.path.display()))?;
    let store = SessionStore::new(Arc::new(durable));

    let (tx, rx) = mpsc::unbounded_channel::<ChatEvent>();
    let printer = tokio::spawn(render::print_events(rx));

    let controller = SessionController::builder()
        .client(Arc::new(client))
        .store(store)
        .sink(Arc::new(tx))
        .config(config.session.clone())
        .build()?;

    println!("{}", HELP);
    controller
        .initialize()
        .await
        .context("Failed to load the saved conversation")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let result = match Command::parse(&line) {
            Command::Quit => break,
            Command::Submit(text) => controller.submit(&text).await.map(|_| ()),
            Command::Clear => controller.clear().await,
            Command::Reset => controller.reset().await,
            Command::Dismiss => controller.dismiss_config_banner().await,
            Command::Help => {
                println!("{}", HELP);
                Ok(())
            }
            Command::Unknown(cmd) => {
                println!("Unknown command {}. {}", cmd, HELP);
                Ok(())
            }
        };

        match result {
            Ok(()) => {}
            Err(SessionError::Busy) => println!("Still waiting for the last reply."),
            Err(e) => tracing::error!(error = %e, "Command failed"),
        }
    }

    // Dropping the controller drops the last sender and ends the printer
    drop(controller);
    printer.await?;

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let registry = tracing_subscriber::registry().with(env_filter);

    // stderr keeps log lines out of the conversation on stdout
    match config.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
