//! YOP gateway integration.
//!
//! The gateway is consumed through two capabilities, [`YopGateway::post`]
//! for the pre-payment endpoint and [`YopGateway::get`] for the order-query
//! endpoint, both returning the common [`ResponseEnvelope`]. The
//! [`classify`] function is the single place that turns an envelope into a
//! business payload or a typed error; both payment operations go through
//! it.

pub mod client;
pub mod envelope;

pub use client::{YopGateway, YopHttpClient};
pub use envelope::{ErrorPayload, ResponseEnvelope, classify};
