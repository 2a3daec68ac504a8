//! Merchant configuration loaded from the process environment.
//!
//! Configuration is resolved once at startup and shared by reference for
//! the lifetime of the process. Validation is all-or-nothing: if any
//! required variable is missing, the error names every missing variable and
//! no partially valid configuration is ever exposed.

use url::Url;

use crate::error::{Result, YeepayError};

/// Default gateway base URL (production YOP endpoint).
pub const DEFAULT_API_BASE_URL: &str = "https://openapi.yeepay.com";

/// Default payment method when the caller does not select one.
pub const DEFAULT_PAY_WAY: &str = "USER_SCAN";

/// Default payment channel when the caller does not select one.
pub const DEFAULT_CHANNEL: &str = "WECHAT";

const REQUIRED_VARS: &[&str] = &[
    "YOP_PARENT_MERCHANT_NO",
    "YOP_MERCHANT_NO",
    "YOP_APP_KEY",
    "YOP_APP_PRIVATE_KEY",
    "YOP_NOTIFY_URL",
];

/// Immutable merchant configuration for the Yeepay gateway.
///
/// Constructed once via [`YeepayConfig::from_env`] and passed by reference
/// into every payment operation; the operation layer performs no ambient
/// environment lookups of its own.
#[derive(Clone)]
pub struct YeepayConfig {
    /// Parent merchant number (`YOP_PARENT_MERCHANT_NO`).
    pub parent_merchant_no: String,
    /// Merchant number (`YOP_MERCHANT_NO`).
    pub merchant_no: String,
    /// Application key identifying the merchant app (`YOP_APP_KEY`).
    pub app_key: String,
    /// Merchant private credential used by the signing layer
    /// (`YOP_APP_PRIVATE_KEY`).
    pub app_private_key: String,
    /// Asynchronous notification callback URL (`YOP_NOTIFY_URL`). Always
    /// taken from configuration, never from caller input.
    pub notify_url: String,
    /// Gateway public key for response verification (`YOP_PUBLIC_KEY`,
    /// optional; required only by some deployment variants).
    pub yop_public_key: Option<String>,
    /// Gateway base URL (`YOP_API_BASE_URL`, defaults to the production
    /// endpoint).
    pub api_base_url: String,
    /// Default `payWay` merged into create requests
    /// (`YOP_DEFAULT_PAY_WAY`).
    pub pay_way: String,
    /// Default `channel` merged into create requests
    /// (`YOP_DEFAULT_CHANNEL`).
    pub channel: String,
}

impl YeepayConfig {
    /// Loads and validates configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`YeepayError::Configuration`] naming every required
    /// variable that is missing or empty, or whose base URL fails to parse.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an injectable lookup.
    ///
    /// Empty values are treated as missing.
    ///
    /// # Errors
    ///
    /// Same conditions as [`YeepayConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let missing: Vec<&str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|&key| get(key).is_none())
            .collect();

        if !missing.is_empty() {
            return Err(YeepayError::Configuration(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        let api_base_url =
            get("YOP_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
        Url::parse(&api_base_url).map_err(|e| {
            YeepayError::Configuration(format!("invalid YOP_API_BASE_URL '{api_base_url}': {e}"))
        })?;

        // REQUIRED_VARS membership was checked above, so these cannot be None.
        let required = |key: &str| {
            get(key).ok_or_else(|| {
                YeepayError::Configuration(format!("missing required environment variables: {key}"))
            })
        };

        Ok(Self {
            parent_merchant_no: required("YOP_PARENT_MERCHANT_NO")?,
            merchant_no: required("YOP_MERCHANT_NO")?,
            app_key: required("YOP_APP_KEY")?,
            app_private_key: required("YOP_APP_PRIVATE_KEY")?,
            notify_url: required("YOP_NOTIFY_URL")?,
            yop_public_key: get("YOP_PUBLIC_KEY"),
            api_base_url,
            pay_way: get("YOP_DEFAULT_PAY_WAY").unwrap_or_else(|| DEFAULT_PAY_WAY.to_owned()),
            channel: get("YOP_DEFAULT_CHANNEL").unwrap_or_else(|| DEFAULT_CHANNEL.to_owned()),
        })
    }
}

// Credentials must never reach logs.
impl std::fmt::Debug for YeepayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YeepayConfig")
            .field("parent_merchant_no", &self.parent_merchant_no)
            .field("merchant_no", &self.merchant_no)
            .field("notify_url", &self.notify_url)
            .field("api_base_url", &self.api_base_url)
            .field("pay_way", &self.pay_way)
            .field("channel", &self.channel)
            .finish_non_exhaustive()
    }
}
