//! Model Context Protocol (MCP) integration.
//!
//! Exposes the payment operations as MCP tools with declared input
//! schemas:
//!
//! - `create_webpage_yeepay_payment`: create a payment order, returning the
//!   pre-payment token, order id, and gateway order number.
//! - `query_yeepay_payment_status`: query the payment status of an order by
//!   merchant order id.
//!
//! ```text
//! AI agent / orchestration client
//!     │  MCP protocol (JSON-RPC 2.0)
//!     ▼
//! PaymentService (this module)
//!     │  schema validation
//!     ▼
//! payment operations (payment module)
//!     │  HTTPS
//!     ▼
//! Yeepay gateway (yop module)
//! ```

pub mod tools;

pub use tools::{CreatePaymentParams, PaymentService, QueryPaymentParams};
