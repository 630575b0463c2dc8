use std::io::Write;

use anyhow::Context;
use clap::Parser;
use market_client::MarketClient;
use market_hex::config::Config;
use market_hex::inbound::terminal::{Outcome, Session};
use market_hex::ports::market_api::{AdvertisementApi, OrderApi};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

/// Terminal front end for the marketplace API.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the marketplace API (overrides MARKET_API_URL)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Path opened on start
    #[arg(long, value_name = "PATH", default_value = "/advertisements")]
    start: String,

    /// Browse built-in sample data instead of a remote API
    #[arg(long)]
    demo: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env for MARKET_API_URL / MARKET_PAGE_SIZE when present.
    let _ = dotenvy::dotenv();
    // Logs go to stderr; stdout is the screen.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = Config::from_env()?;
    if let Some(url) = args.api_url {
        config.api_base_url = url;
    }

    if args.demo {
        tracing::info!("using built-in sample data");
        let market = market_repo::fixtures::demo_market();
        return run(Session::new(market, config.page_size), &args.start).await;
    }

    let mut builder = MarketClient::builder(&config.api_base_url)?;
    if let Some(timeout) = config.request_timeout {
        builder = builder.with_timeout(timeout);
    }
    let client = builder.build()?;
    tracing::info!(api = %client.base_url(), page_size = config.page_size.get(), "starting session");
    run(Session::new(client, config.page_size), &args.start).await
}

async fn run<A>(mut session: Session<A>, start: &str) -> anyhow::Result<()>
where
    A: AdvertisementApi + OrderApi + Clone,
{
    session.open(start).await;
    show(&session.render())?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        match session.handle_line(&line).await {
            Outcome::Continue(screen) => show(&screen)?,
            Outcome::Quit => break,
        }
    }
    Ok(())
}

fn show(screen: &str) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{screen}\n")?;
    write!(out, "> ")?;
    out.flush().context("writing to stdout")
}
