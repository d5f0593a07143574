//! Verify commands - notifications and raw responses

use std::path::Path;

use alipay_lib::{crypto, notify, response, SignType, TradeNotification};
use anyhow::{Context, Result};

use crate::ui;

pub fn notification(public_key: &Path, sign_type: SignType, body: &Path) -> Result<()> {
    let key = crypto::load_public_key(public_key)
        .with_context(|| format!("failed to load {}", public_key.display()))?;
    let raw = super::read_body(body)?;

    let fields = notify::parse_notification(&key, sign_type, &raw)
        .context("notification rejected; do not act on it")?;

    ui::success("Notification signature valid");
    ui::header("Fields");
    for (k, v) in fields.iter() {
        ui::key_value(k, v);
    }

    let notification = TradeNotification::from_params(fields);
    if !notification.is_trade_success() {
        ui::warning(&format!("trade status is {}", notification.trade_status()));
    }
    ui::info(&format!("reply to the gateway with {:?}", notify::SUCCESS_REPLY));

    Ok(())
}

pub fn response(
    public_key: &Path,
    sign_type: SignType,
    response_key: &str,
    body: &Path,
) -> Result<()> {
    let key = crypto::load_public_key(public_key)
        .with_context(|| format!("failed to load {}", public_key.display()))?;
    let raw = super::read_body(body)?;

    let (content, sign) = response::decode_response::<serde_json::Value>(&raw, response_key)?;
    response::verify_response(&key, sign_type, &raw, &sign, response_key)
        .context("response rejected; do not act on it")?;

    ui::success("Response signature valid");
    ui::json(&content);

    Ok(())
}
