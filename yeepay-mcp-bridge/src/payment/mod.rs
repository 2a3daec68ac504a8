//! Payment operations.
//!
//! Two independent operations, each a single gateway call followed by the
//! shared envelope classification: [`create_payment`] submits a pre-payment
//! order and narrows the response to its three-field contract;
//! [`query_payment_status`] looks an order up by identifier and passes the
//! gateway's result through.
//!
//! Nothing here retries, caches, or coordinates concurrent calls for the
//! same order: the caller owns retry policy and create-once-per-order
//! correctness.

pub mod create;
pub mod query;

pub use create::{
    CREATE_SUCCESS_CODE, PRE_PAY_PATH, PaymentCreationResult, PaymentRequest, create_payment,
};
pub use query::{
    ORDER_QUERY_PATH, QUERY_SUCCESS_CODE, QueryRequest, QueryResult, query_payment_status,
};
