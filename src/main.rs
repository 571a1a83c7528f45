use clap::Parser;
use log::{error, info};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use crate::config::Config;
use crate::render::render;
use crate::record::save_records;
use crate::search::{ConsoleNotifier, Session};
use crate::viacep::ViaCepClient;

mod config;
mod query;
mod record;
mod render;
mod search;
mod viacep;

const PROMPT: &str = "UF,Cidade,Rua e número (ou CEP) > ";

#[tokio::main]
async fn main() {
    if let Err(e) = init_tracing() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }

    match run(Config::parse()).await {
        Err(e) => {
            error!("Error: {:?}", e);
            std::process::exit(1);
        }
        Ok(false) => std::process::exit(1),
        Ok(true) => {}
    }
}

fn init_tracing() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(ErrorLayer::default())
        .try_init()?;
    Ok(())
}

/// returns `false` when a one-shot search failed
async fn run(config: Config) -> color_eyre::Result<bool> {
    info!("using lookup service at [{}]", config.base_url);
    let client = ViaCepClient::new(config.base_url.clone())?;
    let mut notifier = ConsoleNotifier;
    let mut session = Session::new();

    if let Some(query) = config.one_shot_query() {
        session.input = query;
        let found = session.search(&client, &mut notifier).await.is_ok();
        finish_search(&session, &config, found)?;
        return Ok(found);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{PROMPT}");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        session.input = line;
        let found = session.search(&client, &mut notifier).await.is_ok();
        finish_search(&session, &config, found)?;
    }
    println!();
    Ok(true)
}

/// print the current result set and export it when asked to
fn finish_search(session: &Session, config: &Config, found: bool) -> color_eyre::Result<()> {
    print!("{}", render(&session.results));
    if let (true, Some(out_file)) = (found, &config.csv) {
        info!("saving [{}] record(s) to [{}]", session.results.len(), out_file.display());
        save_records(&session.results, out_file)?;
    }
    Ok(())
}
