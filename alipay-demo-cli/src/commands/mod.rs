//! CLI command implementations

pub mod sign;
pub mod trade;
pub mod verify;

use anyhow::{Context, Result};
use alipay_lib::{AlipayClient, HttpTransport, MerchantConfig};

/// Parse a `key=value` argument. The value may itself contain `=`.
pub fn parse_pair(arg: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {:?}", arg))?;
    if key.is_empty() {
        return Err(format!("empty key in {:?}", arg));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Read a whole file, naming it in the error.
pub fn read_body(path: &std::path::Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Build a gateway client from `ALIPAY_*` environment variables.
pub fn client_from_env() -> Result<AlipayClient<HttpTransport>> {
    let config = MerchantConfig::from_env().context(
        "ALIPAY_APP_ID, ALIPAY_PRIVATE_KEY_PATH and ALIPAY_PUBLIC_KEY_PATH must be set",
    )?;
    tracing::debug!(app_id = %config.app_id, env = config.env.as_str(), "loaded merchant config");

    AlipayClient::from_config(&config).context("failed to build gateway client")
}
