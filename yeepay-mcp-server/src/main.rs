//! Yeepay MCP server: stdio MCP server binary for Yeepay payment tools.
//!
//! Loads merchant configuration from the environment (with `.env` support),
//! wires the gateway HTTP client into the payment tool service, and serves
//! it over stdio for MCP-compatible callers.

#![allow(
    clippy::multiple_crate_versions,
    reason = "transitive dependencies from rmcp and reqwest"
)]

mod observability;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tracing::{error, info};
use yeepay_mcp_bridge::{PaymentService, YeepayConfig, yop::YopHttpClient};

use crate::observability::{LogFormat, init_observability};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional; real deployments set variables directly.
    let _ = dotenvy::dotenv();

    init_observability(LogFormat::from_env());

    let config = YeepayConfig::from_env().inspect_err(|e| {
        error!(%e, "refusing to start with incomplete configuration");
    })?;

    let gateway = Arc::new(YopHttpClient::new(&config)?);
    let service = PaymentService::new(config, gateway);

    info!("starting Yeepay MCP server on stdio");
    let running = service.serve(stdio()).await?;
    running.waiting().await?;

    Ok(())
}
