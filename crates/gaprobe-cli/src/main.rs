//! gaprobe — authenticate with a service-account key, run one analytics
//! query, print the rows.

use std::io::Write;

use clap::Parser;
use gaprobe_auth::{locate_key_file, ServiceAccountKey};
use gaprobe_client::flows::{resolve_view, run_realtime, run_report};
use gaprobe_client::{build_http_client, RealtimeOutput};
use gaprobe_core::{Error, ProbeConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Command};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs on stderr; stdout carries only report lines.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("{}", e);
        return Err(e.into());
    }
    Ok(())
}

async fn run(cli: Cli) -> gaprobe_core::Result<()> {
    let mut config = ProbeConfig::load(&cli.config)?;
    config.apply_overrides(&cli.overrides());

    let key_path = locate_key_file(config.key_file.as_deref());
    info!("Using key file {}", key_path.display());
    let key = ServiceAccountKey::from_file(&key_path)?;

    let http = build_http_client()?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Realtime(args) => {
            let output = if args.all_columns {
                RealtimeOutput::AllColumns
            } else {
                RealtimeOutput::Labelled
            };
            run_realtime(&http, &key, &config, output, &mut out).await?;
        }
        Command::Report(args) => {
            run_report(&http, &key, &config, args.resolve_view, &mut out).await?;
        }
        Command::Profile => {
            let profile = resolve_view(&http, &key, &config)
                .await?
                .ok_or_else(|| Error::Config("no view (profile) is reachable with this key".into()))?;
            writeln!(out, "First Profile Id: {}", profile.profile_id)?;
        }
    }

    out.flush()?;
    Ok(())
}
