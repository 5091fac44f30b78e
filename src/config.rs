//! Runtime configuration
//!
//! Every option can be given as a flag or an environment variable. A `.env`
//! file in the working directory is loaded first.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;

use clap::Parser;

use crate::storage::Backend;

/// Port used when neither `--port` nor `PORT` is set
pub const DEFAULT_PORT: u16 = 9000;

#[derive(Debug, Clone, Parser)]
#[command(name = "chat-server", version, about = "Real-time chat backend")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "CHAT_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Message store: `memory://`, `file://<dir>` or a directory path.
    /// Persistence is disabled when unset.
    #[arg(long, env = "CHAT_STORE_URL")]
    pub store_url: Option<String>,

    /// Skip fsync after each appended message
    #[arg(long, env = "CHAT_STORE_NO_SYNC")]
    pub no_sync_writes: bool,
}

/// Load `.env` from the working directory or its parents.
///
/// Runs before logging is set up so `RUST_LOG` can come from the file; the
/// caller reports the returned error once the logger exists. A missing file
/// is not an error.
pub fn load_dotenv() -> Option<dotenvy::Error> {
    dotenvy::dotenv().err().filter(|e| !e.not_found())
}

/// Load a specific env file, see [`load_dotenv`]
pub fn load_dotenv_from<P: AsRef<Path>>(path: P) -> Option<dotenvy::Error> {
    dotenvy::from_path(path).err().filter(|e| !e.not_found())
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Connect to the configured message store, once
    pub fn backend(&self) -> Backend {
        Backend::try_connect(self.store_url.as_deref(), !self.no_sync_writes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_flags() {
        let config = Config::try_parse_from([
            "chat-server",
            "--host",
            "127.0.0.1",
            "--port",
            "3000",
            "--store-url",
            "memory://",
            "--no-sync-writes",
        ])
        .unwrap();

        assert_eq!(config.socket_addr(), "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.store_url.as_deref(), Some("memory://"));
        assert!(config.no_sync_writes);
        assert!(config.backend().is_available());
    }

    #[test]
    fn test_missing_env_file_is_not_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(load_dotenv_from(dir.path().join(".env")).is_none());
    }

    #[test]
    fn test_malformed_env_file_is_reported() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "this line has no equals sign\n").unwrap();

        assert!(load_dotenv_from(&path).is_some());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(Config::try_parse_from(["chat-server", "--port", "99999"]).is_err());
    }
}
