use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;

mod brief;
mod config;
mod ingestion;
mod llm;
mod slack;
mod summary;
mod telemetry;

#[derive(Parser)]
#[command(name = "brief", about = "Coindesk RSS briefing: summarize, translate, post to Slack")]
struct Cli {
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::config::set_json_mode(cli.json);

    // initialize logging/tracing (stderr). Respect RUST_LOG and BRIEF_LOG_FORMAT
    telemetry::config::init_tracing();

    let cfg = config::Config::from_env()?;
    brief::run(&cfg).await?;

    Ok(())
}
