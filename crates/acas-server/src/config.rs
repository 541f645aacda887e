use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use acas_ledger::SyncMode;
use acas_protocol::{FRAME_HEADER_SIZE, MAX_MESSAGE_SIZE};
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Server configuration. Every field has a default, so a TOML file only
/// needs the keys it changes.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Root for blob collections and the ledger log.
    pub data_dir: PathBuf,
    /// Blob collection directory name under `data_dir`.
    pub collection: String,
    /// Ledger log file name under `data_dir`.
    pub ledger_file: String,
    pub ledger_sync: SyncMode,
    /// Largest accepted request body, in bytes. The default admits one
    /// maximum-size frame including its header.
    pub max_request_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 7050)),
            data_dir: PathBuf::from("./acas-data"),
            collection: "dcas".into(),
            ledger_file: "ledger.wal".into(),
            ledger_sync: SyncMode::default(),
            max_request_size: MAX_MESSAGE_SIZE + FRAME_HEADER_SIZE,
        }
    }
}

impl ServerConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> ServerResult<Self> {
        toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir.join(&self.ledger_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:7050".parse::<SocketAddr>().unwrap());
        assert_eq!(c.collection, "dcas");
        assert_eq!(c.ledger_sync, SyncMode::OsDefault);
        assert_eq!(c.max_request_size, 64 * 1024 * 1024 + 5);
        assert_eq!(c.ledger_path(), PathBuf::from("./acas-data/ledger.wal"));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = ServerConfig::from_toml(
            r#"
            bind_addr = "0.0.0.0:8080"
            ledger_sync = "every_write"
            "#,
        )
        .unwrap();
        assert_eq!(c.bind_addr.port(), 8080);
        assert_eq!(c.ledger_sync, SyncMode::EveryWrite);
        assert_eq!(c.collection, "dcas");
    }

    #[test]
    fn bad_toml_is_config_error() {
        let err = ServerConfig::from_toml("bind_addr = 12").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acas.toml");
        std::fs::write(&path, "collection = \"blobs\"\n").unwrap();
        assert_eq!(ServerConfig::load(&path).unwrap().collection, "blobs");

        let missing = ServerConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(missing, ServerError::Config(_)));
    }
}
