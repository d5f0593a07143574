//! Sign command - canonical encoding plus signature

use std::path::Path;

use alipay_lib::crypto;
use alipay_lib::{Params, SignType};
use anyhow::{Context, Result};

use crate::ui;

pub fn run(private_key: &Path, sign_type: SignType, pairs: Vec<(String, String)>) -> Result<()> {
    let key = crypto::load_private_key(private_key)
        .with_context(|| format!("failed to load {}", private_key.display()))?;

    let params: Params = pairs.into_iter().collect();
    let (_, unsigned) = params.split_signature();
    let canonical = unsigned.encode(false);
    let signature = crypto::sign(&key, sign_type, canonical.as_bytes())?;

    ui::header("Signed Parameters");
    ui::key_value("Canonical", &canonical);
    ui::key_value("Sign Type", sign_type.as_str());
    ui::key_value("Signature", &signature);
    ui::separator();
    println!("{}", unsigned.with("sign", signature).encode(true));

    Ok(())
}
