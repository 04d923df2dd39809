//! Maru Socket.IO server.
//!
//! Serves the `/room` and `/chat` namespaces on `/socket.io`.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin maru-server -- --port 8080
//! ```

use clap::Parser;
use maru_server::ServerConfig;
use maru_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let config = ServerConfig::parse();

    // Run the server
    if let Err(e) = maru_server::run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
