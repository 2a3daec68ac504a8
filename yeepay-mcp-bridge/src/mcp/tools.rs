//! MCP tools exposing the payment operations.
//!
//! [`PaymentService`] is the tool dispatch adapter: it declares the input
//! schema for each tool, validates the call structurally, delegates to the
//! payment operation layer, and serializes the normalized result as the
//! tool output. Operation errors cross this layer with their message
//! intact: nothing is swallowed or translated here.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router,
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::{
    config::YeepayConfig,
    error::{Result as BridgeResult, YeepayError},
    payment::{self, PaymentRequest, QueryRequest},
    yop::YopGateway,
};

/// Input schema for the payment-creation tool.
#[derive(Debug, Clone, serde::Deserialize, schemars::JsonSchema)]
#[schemars(crate = "rmcp::schemars")]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentParams {
    /// Merchant order identifier, unique per logical transaction.
    pub order_id: String,
    /// Order amount in CNY.
    pub amount: f64,
    /// Goods description shown to the payer.
    pub goods_name: String,
    /// Payer network address; a loopback placeholder is used when omitted.
    #[serde(default)]
    pub user_ip: Option<String>,
}

impl CreatePaymentParams {
    /// Validates the parameters and converts them into an operation-layer
    /// request.
    ///
    /// # Errors
    ///
    /// Returns [`YeepayError::Validation`] on empty/oversized/malformed
    /// fields or a non-positive amount.
    pub fn into_request(self) -> BridgeResult<PaymentRequest> {
        validate_order_id(&self.order_id)?;

        if self.goods_name.is_empty() {
            return Err(YeepayError::Validation("goodsName cannot be empty".to_owned()));
        }

        let amount = Decimal::try_from(self.amount)
            .map_err(|e| YeepayError::Validation(format!("amount is not a valid decimal: {e}")))?;
        if amount <= Decimal::ZERO {
            return Err(YeepayError::Validation("amount must be positive".to_owned()));
        }

        let mut request = PaymentRequest::new(self.order_id, amount, self.goods_name);
        request.user_ip = self.user_ip;
        Ok(request)
    }
}

/// Input schema for the status-query tool.
#[derive(Debug, Clone, serde::Deserialize, schemars::JsonSchema)]
#[schemars(crate = "rmcp::schemars")]
#[serde(rename_all = "camelCase")]
pub struct QueryPaymentParams {
    /// Merchant order identifier used at creation time.
    pub order_id: String,
}

impl QueryPaymentParams {
    /// Validates the parameters and converts them into an operation-layer
    /// request.
    ///
    /// # Errors
    ///
    /// Returns [`YeepayError::Validation`] if the order identifier is
    /// malformed.
    pub fn into_request(self) -> BridgeResult<QueryRequest> {
        validate_order_id(&self.order_id)?;
        Ok(QueryRequest { order_id: self.order_id })
    }
}

/// Validates a merchant order identifier.
pub(crate) fn validate_order_id(order_id: &str) -> BridgeResult<()> {
    if order_id.is_empty() {
        return Err(YeepayError::Validation("orderId cannot be empty".to_owned()));
    }

    if order_id.len() > 64 {
        return Err(YeepayError::Validation("orderId must be 64 characters or less".to_owned()));
    }

    if !order_id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(YeepayError::Validation(
            "orderId must contain only alphanumeric characters, hyphens, and underscores"
                .to_owned(),
        ));
    }

    Ok(())
}

/// MCP service exposing the Yeepay payment tools.
#[derive(Clone)]
pub struct PaymentService {
    config: Arc<YeepayConfig>,
    gateway: Arc<dyn YopGateway>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl PaymentService {
    /// Creates the service from loaded configuration and a gateway client.
    pub fn new(config: YeepayConfig, gateway: Arc<dyn YopGateway>) -> Self {
        Self { config: Arc::new(config), gateway, tool_router: Self::tool_router() }
    }

    /// Creates a Yeepay payment order for the given merchant order.
    #[tool(
        name = "create_webpage_yeepay_payment",
        description = "Create a Yeepay mobile payment order and return the pre-payment token"
    )]
    pub async fn create_payment(
        &self,
        Parameters(params): Parameters<CreatePaymentParams>,
    ) -> std::result::Result<CallToolResult, McpError> {
        info!(order_id = %params.order_id, "create payment tool invoked");

        let request = params.into_request().map_err(tool_error)?;
        let result = payment::create_payment(&request, &self.config, self.gateway.as_ref())
            .await
            .map_err(tool_error)?;

        tool_result(&result)
    }

    /// Queries the payment status of a previously created order.
    #[tool(
        name = "query_yeepay_payment_status",
        description = "Query the payment status of a Yeepay order by merchant order id"
    )]
    pub async fn query_payment_status(
        &self,
        Parameters(params): Parameters<QueryPaymentParams>,
    ) -> std::result::Result<CallToolResult, McpError> {
        info!(order_id = %params.order_id, "query payment status tool invoked");

        let request = params.into_request().map_err(tool_error)?;
        let result = payment::query_payment_status(&request, &self.config, self.gateway.as_ref())
            .await
            .map_err(tool_error)?;

        tool_result(&result)
    }
}

#[tool_handler]
impl ServerHandler for PaymentService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "yeepay-mcp".into(),
                version: "0.3.3".into(),
                ..Default::default()
            },
            instructions: Some(
                "Yeepay payment gateway integration. Use create_webpage_yeepay_payment to \
                 create a payment order and query_yeepay_payment_status to check its status."
                    .to_owned(),
            ),
            ..Default::default()
        }
    }
}

/// Serializes a tool result as pretty-printed JSON text content.
fn tool_result<T: Serialize>(result: &T) -> std::result::Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(result)
        .map_err(|e| McpError::internal_error(format!("result serialization failed: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Maps a bridge error onto the MCP error surface, preserving the message.
fn tool_error(err: YeepayError) -> McpError {
    match &err {
        YeepayError::Validation(message) => McpError::invalid_params(message.clone(), None),
        _ => McpError::internal_error(err.to_string(), None),
    }
}

impl std::fmt::Debug for PaymentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentService")
            .field("merchant_no", &self.config.merchant_no)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_validate_order_id_valid() {
        assert!(validate_order_id("ORDER-123").is_ok());
        assert!(validate_order_id("order_456").is_ok());
        assert!(validate_order_id("MOCK_TEST_1700000000000").is_ok());
    }

    #[test]
    fn test_validate_order_id_empty() {
        assert!(validate_order_id("").is_err());
    }

    #[test]
    fn test_validate_order_id_too_long() {
        let long_id = "a".repeat(65);
        assert!(validate_order_id(&long_id).is_err());
    }

    #[test]
    fn test_validate_order_id_max_length() {
        let max_id = "a".repeat(64);
        assert!(validate_order_id(&max_id).is_ok());
    }

    #[test]
    fn test_validate_order_id_invalid_characters() {
        assert!(validate_order_id("order 123").is_err());
        assert!(validate_order_id("order#123").is_err());
        assert!(validate_order_id("订单123").is_err());
    }

    #[test]
    fn test_create_params_conversion() {
        let params = CreatePaymentParams {
            order_id: "O1".to_owned(),
            amount: 0.01,
            goods_name: "Widget".to_owned(),
            user_ip: Some("203.0.113.7".to_owned()),
        };

        let request = params.into_request().unwrap();
        assert_eq!(request.order_id, "O1");
        assert_eq!(request.amount, dec!(0.01));
        assert_eq!(request.goods_name, "Widget");
        assert_eq!(request.user_ip.as_deref(), Some("203.0.113.7"));
        assert!(request.pay_way.is_none());
        assert!(request.user_id.is_none());
    }

    #[test]
    fn test_create_params_rejects_zero_amount() {
        let params = CreatePaymentParams {
            order_id: "O1".to_owned(),
            amount: 0.0,
            goods_name: "Widget".to_owned(),
            user_ip: None,
        };

        let err = params.into_request().unwrap_err();
        assert!(matches!(err, YeepayError::Validation(_)));
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn test_create_params_rejects_negative_amount() {
        let params = CreatePaymentParams {
            order_id: "O1".to_owned(),
            amount: -1.0,
            goods_name: "Widget".to_owned(),
            user_ip: None,
        };

        assert!(params.into_request().is_err());
    }

    #[test]
    fn test_create_params_rejects_non_finite_amount() {
        let params = CreatePaymentParams {
            order_id: "O1".to_owned(),
            amount: f64::NAN,
            goods_name: "Widget".to_owned(),
            user_ip: None,
        };

        assert!(params.into_request().is_err());
    }

    #[test]
    fn test_create_params_rejects_empty_goods_name() {
        let params = CreatePaymentParams {
            order_id: "O1".to_owned(),
            amount: 0.01,
            goods_name: String::new(),
            user_ip: None,
        };

        let err = params.into_request().unwrap_err();
        assert!(err.to_string().contains("goodsName"));
    }

    #[test]
    fn test_create_params_deserializes_camel_case() {
        let params: CreatePaymentParams = serde_json::from_str(
            r#"{"orderId":"O1","amount":0.01,"goodsName":"Widget","userIp":"203.0.113.7"}"#,
        )
        .unwrap();

        assert_eq!(params.order_id, "O1");
        assert_eq!(params.goods_name, "Widget");
        assert_eq!(params.user_ip.as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn test_create_params_user_ip_optional() {
        let params: CreatePaymentParams =
            serde_json::from_str(r#"{"orderId":"O1","amount":0.01,"goodsName":"Widget"}"#).unwrap();
        assert!(params.user_ip.is_none());
    }

    #[test]
    fn test_query_params_conversion() {
        let params = QueryPaymentParams { order_id: "O1".to_owned() };
        let request = params.into_request().unwrap();
        assert_eq!(request.order_id, "O1");
    }

    #[test]
    fn test_query_params_rejects_empty_order_id() {
        let params = QueryPaymentParams { order_id: String::new() };
        assert!(params.into_request().is_err());
    }

    #[test]
    fn test_tool_error_preserves_operation_message() {
        let err = tool_error(YeepayError::Business {
            code: "99999".to_owned(),
            message: "order already exists".to_owned(),
        });
        assert!(err.message.contains("99999"));
        assert!(err.message.contains("order already exists"));
    }
}
