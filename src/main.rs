//! Binary entry point.
//!
//! Orchestrates the one-shot run and is the sole place a [`FetchError`] is
//! turned into a diagnostic line and a process exit code.

use clap::Parser;
use log::debug;
use std::path::PathBuf;

use bqsnap::api::{BitqueryClient, FetchError};
use bqsnap::auth::resolve_api_token;
use bqsnap::output::write_pretty;

#[derive(Parser, Debug)]
#[command(
    name = "bqsnap",
    about = "Fetch a fixed Solana DEX trades snapshot from the Bitquery EAP API",
    version
)]
struct Args {
    /// API token, overriding the BITQUERY_API_TOKEN environment variable
    #[arg(long, value_name = "TOKEN")]
    token: Option<String>,
    /// File the JSON response is written to
    #[arg(long, value_name = "FILE", default_value = "response.json")]
    output: PathBuf,
}

async fn run(args: Args) -> Result<(), FetchError> {
    // The credential check happens before the client exists, so a missing
    // token can never reach the network.
    let token = resolve_api_token(args.token.as_deref()).ok_or(FetchError::MissingToken)?;
    let client = BitqueryClient::new(&token);
    let data = client.fetch().await?;
    write_pretty(&args.output, &data)?;
    debug!("wrote {}", args.output.display());
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();
    if let Err(e) = run(Args::parse()).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
