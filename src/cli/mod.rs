//! Operator CLI: thin HTTP client over the trigger and health endpoints.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::Value;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "shamiri")]
#[command(about = "Shamiri Hub CLI - trigger payout runs and check service health")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        default_value = "http://127.0.0.1:3000",
        help = "Base URL of the Shamiri Hub API"
    )]
    pub base_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Check service and database health")]
    Health,

    #[command(about = "Trigger a payout run (one implementer, or all when omitted)")]
    Payout {
        #[arg(long, help = "Implementer id; omit to fan out over all active implementers")]
        implementer: Option<Uuid>,

        #[arg(long, default_value = "M", help = "Day code: M (mid-month) or R (end-of-month)")]
        day: String,
    },

    #[command(about = "Trigger a repayment reconciliation run for one implementer")]
    Repayment {
        #[arg(long)]
        implementer: Uuid,
    },
}

fn trigger_secret() -> anyhow::Result<String> {
    std::env::var("PAYOUT_TRIGGER_SECRET")
        .context("PAYOUT_TRIGGER_SECRET is not set; trigger commands need the shared secret")
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Health => {
            let url = format!("{}/health", cli.base_url);
            let resp = client.get(&url).send().await.context("health request failed")?;
            print_response(resp).await
        }
        Commands::Payout { implementer, day } => {
            let secret = trigger_secret()?;
            let url = match implementer {
                Some(id) => format!("{}/api/payouts/{}?day={}", cli.base_url, id, day),
                None => format!("{}/api/payouts?day={}", cli.base_url, day),
            };
            let resp = client
                .post(&url)
                .bearer_auth(secret)
                .send()
                .await
                .context("payout trigger failed")?;
            print_response(resp).await
        }
        Commands::Repayment { implementer } => {
            let secret = trigger_secret()?;
            let url = format!("{}/api/repayments/{}", cli.base_url, implementer);
            let resp = client
                .post(&url)
                .bearer_auth(secret)
                .send()
                .await
                .context("repayment trigger failed")?;
            print_response(resp).await
        }
    }
}

async fn print_response(resp: reqwest::Response) -> anyhow::Result<()> {
    let status = resp.status();
    let body: Value = resp.json().await.context("response was not JSON")?;
    println!("{}", serde_json::to_string_pretty(&body)?);

    if !status.is_success() {
        bail!("request failed with status {}", status);
    }
    Ok(())
}
