//! Payment creation against the aggregate pre-payment endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{
    config::YeepayConfig,
    error::{Result, YeepayError},
    yop::{YopGateway, classify},
};

/// Gateway path for creating an aggregate pre-payment order.
pub const PRE_PAY_PATH: &str = "/rest/v1.0/aggpay/pre-pay";

/// Business-success code returned by the pre-payment endpoint.
pub const CREATE_SUCCESS_CODE: &str = "00000";

/// Scene marker sent with every pre-payment request.
const SCENE_ONLINE: &str = "ONLINE";

/// Loopback placeholder used when the caller does not supply a user IP.
const FALLBACK_USER_IP: &str = "127.0.0.1";

/// Normalized input for [`create_payment`].
///
/// The order identifier is caller-assigned and must stay stable across
/// create and query for one logical transaction; this layer neither
/// generates nor dedupes it.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    /// Merchant order identifier.
    pub order_id: String,
    /// Order amount, positive, currency-implicit (CNY).
    pub amount: Decimal,
    /// Goods description shown to the payer.
    pub goods_name: String,
    /// Payment method override; the configured default applies when unset.
    pub pay_way: Option<String>,
    /// Payment channel override; the configured default applies when unset.
    pub channel: Option<String>,
    /// Payer network address.
    pub user_ip: Option<String>,
    /// Payer identifier, forwarded only when present.
    pub user_id: Option<String>,
}

impl PaymentRequest {
    /// Builds a request with only the required fields set.
    #[must_use]
    pub fn new(order_id: impl Into<String>, amount: Decimal, goods_name: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            amount,
            goods_name: goods_name.into(),
            pay_way: None,
            channel: None,
            user_ip: None,
            user_id: None,
        }
    }
}

/// The three-field success contract of payment creation.
///
/// Everything else the gateway returns alongside these fields is dropped on
/// purpose, so new gateway fields never break callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCreationResult {
    /// Pre-payment token the payer's client uses to complete the payment.
    pub pre_pay_tn: String,
    /// Echo of the caller's order identifier.
    pub order_id: String,
    /// Gateway-assigned unique order number.
    pub unique_order_no: String,
}

/// Wire body for the pre-payment endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrePayRequest<'a> {
    parent_merchant_no: &'a str,
    merchant_no: &'a str,
    order_id: &'a str,
    order_amount: String,
    goods_name: &'a str,
    pay_way: &'a str,
    channel: &'a str,
    scene: &'a str,
    user_ip: &'a str,
    notify_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<&'a str>,
}

/// Creates a payment order and returns the pre-payment token.
///
/// Merges the caller's fields with configuration-derived merchant
/// identifiers and defaults, issues a single `post` against the pre-payment
/// endpoint, and classifies the envelope. The notification URL always comes
/// from configuration, so caller input cannot redirect callbacks.
///
/// No retries, no partial success: every non-ideal path is an error,
/// because payment creation must never report success on ambiguous input.
///
/// # Errors
///
/// Returns [`YeepayError::Business`], [`YeepayError::ApiFailure`], or
/// [`YeepayError::Protocol`] per the envelope classification, or
/// [`YeepayError::Http`] if the gateway call itself fails.
#[instrument(skip(request, config, gateway), fields(order_id = %request.order_id))]
pub async fn create_payment(
    request: &PaymentRequest,
    config: &YeepayConfig,
    gateway: &dyn YopGateway,
) -> Result<PaymentCreationResult> {
    let body = PrePayRequest {
        parent_merchant_no: &config.parent_merchant_no,
        merchant_no: &config.merchant_no,
        order_id: &request.order_id,
        order_amount: format_order_amount(request.amount),
        goods_name: &request.goods_name,
        pay_way: request.pay_way.as_deref().unwrap_or(&config.pay_way),
        channel: request.channel.as_deref().unwrap_or(&config.channel),
        scene: SCENE_ONLINE,
        user_ip: request.user_ip.as_deref().unwrap_or(FALLBACK_USER_IP),
        notify_url: &config.notify_url,
        user_id: request.user_id.as_deref(),
    };
    debug!(pay_way = body.pay_way, channel = body.channel, "submitting pre-pay request");

    let body = serde_json::to_value(&body)
        .map_err(|e| YeepayError::Unexpected(format!("pre-pay request serialization failed: {e}")))?;

    let envelope = gateway.post(PRE_PAY_PATH, &body).await?;
    let result = classify(envelope, CREATE_SUCCESS_CODE)?;

    let creation: PaymentCreationResult = serde_json::from_value(result)
        .map_err(|e| YeepayError::Unexpected(format!("malformed pre-pay result: {e}")))?;

    info!(unique_order_no = %creation.unique_order_no, "payment order created");
    Ok(creation)
}

/// Formats an amount the way the gateway wire format requires: a decimal
/// string with exactly two fractional digits.
fn format_order_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}
