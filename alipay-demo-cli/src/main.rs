//! Alipay Demo CLI
//!
//! Command-line interface for signing, verifying and calling the gateway.

use std::path::PathBuf;

use alipay_lib::SignType;
use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod ui;

#[derive(Parser)]
#[command(name = "alipay-demo")]
#[command(about = "Alipay Demo CLI - sign, verify and call the open platform gateway", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Canonically encode key=value pairs and sign them
    Sign {
        /// Merchant private key (PEM or bare base64 DER)
        #[arg(long, env = "ALIPAY_PRIVATE_KEY_PATH")]
        private_key: PathBuf,

        /// Signature algorithm (RSA or RSA2)
        #[arg(long, default_value = "RSA")]
        sign_type: SignType,

        /// Parameters as key=value
        #[arg(value_parser = commands::parse_pair)]
        pairs: Vec<(String, String)>,
    },

    /// Verify a form-encoded notification body
    VerifyNotify {
        /// Gateway public key (PEM or bare base64 DER)
        #[arg(long, env = "ALIPAY_PUBLIC_KEY_PATH")]
        public_key: PathBuf,

        /// Signature algorithm (RSA or RSA2)
        #[arg(long, default_value = "RSA")]
        sign_type: SignType,

        /// File holding the raw notification body
        body: PathBuf,
    },

    /// Verify a raw gateway response body
    VerifyResponse {
        /// Gateway public key (PEM or bare base64 DER)
        #[arg(long, env = "ALIPAY_PUBLIC_KEY_PATH")]
        public_key: PathBuf,

        /// Signature algorithm (RSA or RSA2)
        #[arg(long, default_value = "RSA")]
        sign_type: SignType,

        /// Top-level response key (e.g. alipay_trade_query_response)
        #[arg(short = 'k', long)]
        response_key: String,

        /// File holding the raw response body
        body: PathBuf,
    },

    /// Query an order
    Query {
        /// Merchant order number
        out_trade_no: String,
    },

    /// Cancel an order
    Cancel {
        /// Merchant order number
        out_trade_no: String,
    },

    /// Close an unpaid order
    Close {
        /// Merchant order number
        out_trade_no: String,
    },

    /// Refund a paid order
    Refund {
        /// Merchant order number
        out_trade_no: String,

        /// Amount to refund, in cents
        #[arg(short, long)]
        amount: i64,

        /// Refund reason
        #[arg(short, long)]
        reason: Option<String>,

        /// Request number distinguishing partial refunds
        #[arg(long)]
        request_no: Option<String>,
    },

    /// Look up a refund
    RefundQuery {
        /// Merchant order number
        out_trade_no: String,

        /// Request number of the refund
        #[arg(long)]
        request_no: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("alipay_demo_cli=debug,alipay_lib=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("alipay_demo_cli=info,alipay_lib=warn")
            .init();
    }

    if let Err(e) = run(cli.command).await {
        ui::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Sign {
            private_key,
            sign_type,
            pairs,
        } => commands::sign::run(&private_key, sign_type, pairs),
        Commands::VerifyNotify {
            public_key,
            sign_type,
            body,
        } => commands::verify::notification(&public_key, sign_type, &body),
        Commands::VerifyResponse {
            public_key,
            sign_type,
            response_key,
            body,
        } => commands::verify::response(&public_key, sign_type, &response_key, &body),
        Commands::Query { out_trade_no } => commands::trade::query(&out_trade_no).await,
        Commands::Cancel { out_trade_no } => commands::trade::cancel(&out_trade_no).await,
        Commands::Close { out_trade_no } => commands::trade::close(&out_trade_no).await,
        Commands::Refund {
            out_trade_no,
            amount,
            reason,
            request_no,
        } => commands::trade::refund(&out_trade_no, amount, reason, request_no).await,
        Commands::RefundQuery {
            out_trade_no,
            request_no,
        } => commands::trade::refund_query(&out_trade_no, &request_no).await,
    }
}
