use std::{path::PathBuf, process::ExitCode, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{ClientEvent, NavigatorClient};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::{self, error::RecvError},
};
use tokio_stream::{wrappers::LinesStream, StreamExt};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{parse_command, Command, HELP};
use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "navigator", about = "Find routes between rooms of a multi-floor building")]
struct Args {
    #[arg(long, default_value = "navigator.toml")]
    config: PathBuf,
    #[arg(long)]
    service_url: Option<String>,
    /// Per-request timeout; must be at least one second.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,
    /// Skip loading the map on startup.
    #[arg(long)]
    no_initial_map: bool,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Run a single route lookup and print the result.
    Route { start: String, end: String },
    /// Fetch and print the map.
    Map,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config);
    if let Some(service_url) = args.service_url {
        settings.service_url = service_url;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        settings.request_timeout_secs = timeout_secs;
    }
    if args.no_initial_map {
        settings.fetch_map_on_start = false;
    }

    let client = NavigatorClient::connect(
        &settings.service_url,
        Duration::from_secs(settings.request_timeout_secs),
    )
    .with_context(|| format!("failed to set up client for {}", settings.service_url))?;
    info!(service_url = %settings.service_url, "navigator: client ready");

    match args.mode {
        Some(Mode::Route { start, end }) => {
            if settings.fetch_map_on_start {
                client.fetch_map().await;
            }
            client.find_route(&start, &end).await;
            print!("{}", client.view().await);
            let failed = client.snapshot().await.error.is_some();
            Ok(if failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Some(Mode::Map) => {
            let mut events = client.subscribe_events();
            client.fetch_map().await;
            print!("{}", client.view().await.map);
            match events.try_recv() {
                Ok(ClientEvent::MapFetchFailed(message)) => {
                    eprintln!("map: {message}");
                    Ok(ExitCode::FAILURE)
                }
                _ => Ok(ExitCode::SUCCESS),
            }
        }
        None => {
            run_interactive(client, settings.fetch_map_on_start).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_interactive(client: Arc<NavigatorClient>, fetch_map_on_start: bool) -> Result<()> {
    let renderer = tokio::spawn(render_loop(client.clone(), client.subscribe_events()));
    if fetch_map_on_start {
        let client = client.clone();
        tokio::spawn(async move { client.fetch_map().await });
    }
    println!("{HELP}");

    let mut lines = LinesStream::new(BufReader::new(tokio::io::stdin()).lines());
    while let Some(line) = lines.next().await {
        let line = line.context("failed to read command")?;
        match parse_command(&line) {
            Ok(Command::Route { start, end }) => {
                let client = client.clone();
                tokio::spawn(async move { client.find_route(&start, &end).await });
            }
            Ok(Command::Map) => {
                let client = client.clone();
                tokio::spawn(async move { client.fetch_map().await });
            }
            Ok(Command::Show) => print!("{}", client.view().await),
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::Quit) => break,
            Ok(Command::Empty) => {}
            Err(message) => eprintln!("{message}"),
        }
    }

    renderer.abort();
    Ok(())
}

async fn render_loop(client: Arc<NavigatorClient>, mut events: broadcast::Receiver<ClientEvent>) {
    loop {
        match events.recv().await {
            Ok(ClientEvent::MapFetchFailed(message)) => eprintln!("map: {message}"),
            Ok(_) => print!("{}", client.view().await),
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "render: missed state updates");
                print!("{}", client.view().await);
            }
            Err(RecvError::Closed) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_flag_rejects_zero() {
        assert!(Args::try_parse_from(["navigator", "--timeout-secs", "0"]).is_err());
        let args = Args::try_parse_from(["navigator", "--timeout-secs", "3", "map"]).expect("args");
        assert_eq!(args.timeout_secs, Some(3));
        assert!(matches!(args.mode, Some(Mode::Map)));
    }
}
