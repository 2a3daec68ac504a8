//! Yeepay-MCP Bridge
//!
//! A bridge library that integrates the Yeepay (YOP) payment gateway with
//! the Model Context Protocol (MCP), enabling AI agents and orchestration
//! clients to create payment orders and query their status through
//! structured tool calls.
//!
//! # Overview
//!
//! The gateway signals success on two layers: a transport-level `state`
//! field and a business-level `code` nested inside the result. A `SUCCESS`
//! envelope can still carry a business error, so every response goes
//! through a single classification step that checks both layers. Checking
//! only `state` is the one bug this design exists to prevent.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   AI Agent      │  MCP-compatible caller
//! └────────┬────────┘
//!          │ MCP Protocol (JSON-RPC 2.0)
//! ┌────────▼────────────────────────────────────────┐
//! │         Yeepay-MCP Bridge (this crate)          │
//! │  ┌──────────────┐      ┌──────────────────┐     │
//! │  │  MCP tools   │──────│  payment ops     │     │
//! │  │  (mcp)       │      │  (payment)       │     │
//! │  └──────────────┘      └────────┬─────────┘     │
//! │                                 │               │
//! │                        ┌────────▼─────────┐     │
//! │                        │  gateway client  │     │
//! │                        │  (yop)           │     │
//! │                        └──────────────────┘     │
//! └────────┬────────────────────────────────────────┘
//!          │ HTTPS
//! ┌────────▼────────┐
//! │  Yeepay (YOP)   │  openapi.yeepay.com
//! └─────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use rust_decimal::Decimal;
//! use yeepay_mcp_bridge::{
//!     YeepayConfig,
//!     payment::{PaymentRequest, create_payment},
//!     yop::YopHttpClient,
//! };
//!
//! # async fn example() -> yeepay_mcp_bridge::error::Result<()> {
//! let config = YeepayConfig::from_env()?;
//! let gateway = YopHttpClient::new(&config)?;
//!
//! let request = PaymentRequest::new("ORDER-1", Decimal::new(1, 2), "Widget");
//! let result = create_payment(&request, &config, &gateway).await?;
//!
//! println!("pre-pay token: {}", result.pre_pay_tn);
//! println!("gateway order: {}", result.unique_order_no);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`config`]: merchant configuration loaded once from the environment
//! - [`yop`]: gateway client seam, response envelope, classification
//! - [`payment`]: create and query operations
//! - [`mcp`]: MCP tool dispatch adapter
//! - [`error`]: the error taxonomy
//!
//! # Error Handling
//!
//! All operations return [`Result<T, YeepayError>`](error::Result). The
//! variants form a closed set (configuration, validation, business
//! failure, gateway API failure, unknown protocol state, HTTP failure) so
//! callers can branch on kind without parsing messages. Gateway error codes
//! are carried verbatim; the gateway does not guarantee disjoint code
//! namespaces across endpoints, so codes are data, not structure.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(
    clippy::multiple_crate_versions,
    reason = "transitive dependencies from rmcp and reqwest"
)]

pub mod config;
pub mod error;
pub mod mcp;
pub mod payment;
pub mod yop;

pub use config::YeepayConfig;
pub use error::{Result, YeepayError};
pub use mcp::PaymentService;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify public API is accessible
        let _ = std::marker::PhantomData::<YeepayError>;
    }
}
