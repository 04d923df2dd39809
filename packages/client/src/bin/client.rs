//! Interactive Maru chat client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin maru-client -- --backend-url http://localhost:8080
//! ```

use clap::Parser;
use maru_client::config::ClientConfig;
use maru_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = ClientConfig::parse();

    if let Err(e) = maru_client::run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
