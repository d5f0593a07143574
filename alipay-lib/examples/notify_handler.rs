//! Notification Handler Example
//!
//! Verifies an asynchronous trade notification the way a merchant webhook
//! would, then prints the acknowledgement to send back.
//!
//! # Usage
//!
//! ```bash
//! export ALIPAY_APP_ID=2015081700218350
//! export ALIPAY_PRIVATE_KEY_PATH=keys/app_private_key.pem
//! export ALIPAY_PUBLIC_KEY_PATH=keys/alipay_public_key.pem
//! cargo run --example notify_handler -- notify_body.txt
//! ```

use alipay_lib::{AlipayClient, MerchantConfig, TradeStatus, SUCCESS_REPLY};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("usage: notify_handler <body-file>")?;
    let config = MerchantConfig::from_env().ok_or("ALIPAY_* environment variables not set")?;
    let client = AlipayClient::from_config(&config)?;

    let body = std::fs::read(&path)?;
    let notification = match client.notify(&body) {
        Ok(n) => n,
        Err(e) => {
            // Never act on an unverified notification.
            eprintln!("rejected: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "order {} is {}",
        notification.out_trade_no().unwrap_or("<unknown>"),
        notification.trade_status()
    );
    match notification.trade_status() {
        TradeStatus::TradeSuccess | TradeStatus::TradeFinished => {
            println!("mark paid: {} cents", notification.total_fee());
        }
        TradeStatus::TradeClosed => println!("mark closed"),
        _ => {}
    }

    println!("reply: {}", SUCCESS_REPLY);
    Ok(())
}
