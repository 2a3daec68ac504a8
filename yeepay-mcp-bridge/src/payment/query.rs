//! Order status lookup against the trade order-query endpoint.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    config::YeepayConfig,
    error::{Result, YeepayError},
    yop::{YopGateway, classify},
};

/// Gateway path for querying an order.
pub const ORDER_QUERY_PATH: &str = "/rest/v1.0/trade/order/query";

/// Business-success code returned by the order-query endpoint. Differs from
/// the pre-payment success code by gateway convention.
pub const QUERY_SUCCESS_CODE: &str = "OPR00000";

/// Input for [`query_payment_status`]: the gateway resolves the transaction
/// by order identifier alone.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    /// Merchant order identifier used at creation time.
    pub order_id: String,
}

/// Result of an order-status query, passed through from the gateway with
/// only the envelope stripped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    /// Business response code (`OPR00000` on success).
    pub code: String,
    /// Gateway message accompanying the code.
    #[serde(default)]
    pub message: String,
    /// Echo of the merchant order identifier.
    pub order_id: String,
    /// Gateway-assigned unique order number.
    pub unique_order_no: String,
    /// Payment status. An open enumeration (at least `PROCESSING`,
    /// `SUCCESS`, `FAILED`) treated as opaque and passed through.
    pub status: String,
}

/// Wire parameters for the order-query endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderQueryRequest<'a> {
    parent_merchant_no: &'a str,
    merchant_no: &'a str,
    order_id: &'a str,
}

/// Queries the payment status of an order.
///
/// Builds the query from configuration-derived merchant identifiers plus
/// the caller's order identifier only, issues a single `get` against the
/// order-query endpoint, and classifies the envelope with
/// [`QUERY_SUCCESS_CODE`].
///
/// # Errors
///
/// Returns [`YeepayError::Business`], [`YeepayError::ApiFailure`], or
/// [`YeepayError::Protocol`] per the envelope classification, or
/// [`YeepayError::Http`] if the gateway call itself fails.
#[instrument(skip(request, config, gateway), fields(order_id = %request.order_id))]
pub async fn query_payment_status(
    request: &QueryRequest,
    config: &YeepayConfig,
    gateway: &dyn YopGateway,
) -> Result<QueryResult> {
    let params = OrderQueryRequest {
        parent_merchant_no: &config.parent_merchant_no,
        merchant_no: &config.merchant_no,
        order_id: &request.order_id,
    };

    let params = serde_json::to_value(&params).map_err(|e| {
        YeepayError::Unexpected(format!("order query serialization failed: {e}"))
    })?;

    let envelope = gateway.get(ORDER_QUERY_PATH, &params).await?;
    let result = classify(envelope, QUERY_SUCCESS_CODE)?;

    let query: QueryResult = serde_json::from_value(result)
        .map_err(|e| YeepayError::Unexpected(format!("malformed order query result: {e}")))?;

    info!(status = %query.status, "order status retrieved");
    Ok(query)
}
