//! Chat Server - Binary Entry Point
//!
//! This is the main entry point for the chat-server binary.

use std::sync::Arc;

use clap::Parser;

use chat_server::config::load_dotenv;
use chat_server::{AppState, ChatServer, Config, ServerResult};

#[tokio::main]
async fn main() -> ServerResult<()> {
    let dotenv_error = load_dotenv();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Some(e) = dotenv_error {
        log::warn!("Ignoring unreadable .env file: {}", e);
    }

    let config = Config::parse();

    let backend = config.backend();
    let state = Arc::new(AppState::new(backend));

    let server = ChatServer::bind(config.socket_addr(), state).await?;
    log::info!(
        "{} v{} running on port {}",
        chat_server::NAME,
        chat_server::VERSION,
        server.local_addr()?.port()
    );

    server.run().await
}
