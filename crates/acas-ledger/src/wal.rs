use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::memory::LedgerState;
use crate::traits::LedgerStore;

/// One applied put, as persisted in the log.
///
/// On-disk format:
/// ```text
/// [4 bytes: payload length (little-endian u32)]
/// [4 bytes: CRC32 of payload (little-endian u32)]
/// [N bytes: payload (bincode-serialized WalRecord)]
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct WalRecord {
    seq: u64,
    key: String,
    value: Vec<u8>,
}

/// Flush/sync strategy for the log.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// `fsync` after every put (safest, highest latency).
    EveryWrite,
    /// Rely on OS page-cache buffering (fastest, least durable).
    #[default]
    OsDefault,
}

/// Configuration for [`WalLedger`].
#[derive(Clone, Debug, Default)]
pub struct WalConfig {
    pub sync_mode: SyncMode,
}

/// Header size: 4 bytes length + 4 bytes CRC.
const HEADER_SIZE: usize = 8;

struct WalInner {
    file: File,
    /// Current end of the log.
    offset: u64,
    state: LedgerState,
}

/// Single-node ledger persisted to an append-only write-ahead log.
///
/// Every put is framed, checksummed, and appended before it becomes
/// visible. On open the log is replayed front-to-back to rebuild the key
/// space. A torn final entry (crash mid-append) is truncated away; damage
/// anywhere before the tail is reported as [`LedgerError::Corrupt`], since
/// silently dropping an interior entry would rewrite history.
pub struct WalLedger {
    path: PathBuf,
    config: WalConfig,
    inner: RwLock<WalInner>,
}

impl WalLedger {
    /// Open (or create) the log at `path` and replay it.
    pub fn open(path: &Path, config: WalConfig) -> LedgerResult<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)?;

        let (state, valid_len) = replay(&mut file)?;
        let file_len = file.metadata()?.len();
        if valid_len < file_len {
            warn!(
                path = %path.display(),
                valid_len,
                file_len,
                "truncating torn tail of ledger log"
            );
            file.set_len(valid_len)?;
        }

        debug!(path = %path.display(), height = state.height(), "ledger log replayed");
        Ok(Self {
            path: path.to_path_buf(),
            config,
            inner: RwLock::new(WalInner {
                file,
                offset: valid_len,
                state,
            }),
        })
    }

    /// Path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current size of the log in bytes.
    pub fn offset(&self) -> u64 {
        self.inner.read().map(|inner| inner.offset).unwrap_or_default()
    }
}

impl LedgerStore for WalLedger {
    fn put(&self, key: &str, value: &[u8]) -> LedgerResult<()> {
        if key.is_empty() {
            return Err(LedgerError::EmptyKey);
        }
        let mut inner = self
            .inner
            .write()
            .map_err(|e| LedgerError::LockPoisoned(e.to_string()))?;

        let record = WalRecord {
            seq: inner.state.height() + 1,
            key: key.to_string(),
            value: value.to_vec(),
        };
        let frame = encode_frame(&record)?;

        if let Err(e) = append_frame(&mut inner.file, &frame, self.config.sync_mode) {
            // Drop whatever part of the frame reached the file so the next
            // append starts on a clean boundary.
            let offset = inner.offset;
            if let Err(trunc) = inner.file.set_len(offset) {
                warn!(offset, error = %trunc, "failed to roll back partial ledger append");
            }
            return Err(e.into());
        }

        inner.offset += frame.len() as u64;
        inner.state.apply(key, value);
        debug!(seq = record.seq, len = frame.len(), "ledger put appended");
        Ok(())
    }

    fn get(&self, key: &str) -> LedgerResult<Option<Vec<u8>>> {
        let inner = self
            .inner
            .read()
            .map_err(|e| LedgerError::LockPoisoned(e.to_string()))?;
        Ok(inner.state.get(key))
    }

    fn scan(&self, prefix: &str) -> LedgerResult<Vec<(String, Vec<u8>)>> {
        let inner = self
            .inner
            .read()
            .map_err(|e| LedgerError::LockPoisoned(e.to_string()))?;
        Ok(inner.state.scan(prefix))
    }

    fn height(&self) -> LedgerResult<u64> {
        let inner = self
            .inner
            .read()
            .map_err(|e| LedgerError::LockPoisoned(e.to_string()))?;
        Ok(inner.state.height())
    }
}

impl std::fmt::Debug for WalLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalLedger")
            .field("path", &self.path)
            .field("sync_mode", &self.config.sync_mode)
            .finish()
    }
}

fn encode_frame(record: &WalRecord) -> LedgerResult<Vec<u8>> {
    let payload =
        bincode::serialize(record).map_err(|e| LedgerError::Serialization(e.to_string()))?;
    let length = u32::try_from(payload.len()).map_err(|_| {
        LedgerError::Serialization(format!("ledger entry too large: {} bytes", payload.len()))
    })?;
    let crc = crc32fast::hash(&payload);

    let mut frame = Vec::with_capacity(HEADER_SIZE + payload.len());
    frame.extend_from_slice(&length.to_le_bytes());
    frame.extend_from_slice(&crc.to_le_bytes());
    frame.extend_from_slice(&payload);
    Ok(frame)
}

fn append_frame(file: &mut File, frame: &[u8], sync_mode: SyncMode) -> io::Result<()> {
    file.write_all(frame)?;
    if sync_mode == SyncMode::EveryWrite {
        file.sync_data()?;
    }
    Ok(())
}

/// Replay the whole log into a fresh state.
///
/// Returns the state and the length of the valid prefix of the file.
fn replay(file: &mut File) -> LedgerResult<(LedgerState, u64)> {
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;

    let mut state = LedgerState::default();
    let mut offset = 0usize;

    while offset < buf.len() {
        let remaining = buf.len() - offset;
        if remaining < HEADER_SIZE {
            break;
        }
        let header = &buf[offset..offset + HEADER_SIZE];
        let length = u32::from_le_bytes([header[0], header[1], header[2], header[3]]) as usize;
        let expected_crc = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);

        if length == 0 {
            return Err(LedgerError::Corrupt {
                offset: offset as u64,
                reason: "zero-length entry".into(),
            });
        }
        let end = offset + HEADER_SIZE + length;
        if end > buf.len() {
            // A torn append leaves nothing complete behind it. Any intact
            // entry further on means this length field is damaged.
            if intact_frame_after(&buf, offset + HEADER_SIZE) {
                return Err(LedgerError::Corrupt {
                    offset: offset as u64,
                    reason: format!("entry length {length} overruns end of log"),
                });
            }
            break;
        }
        let is_last = end == buf.len();
        let payload = &buf[offset + HEADER_SIZE..end];

        let actual_crc = crc32fast::hash(payload);
        if actual_crc != expected_crc {
            if is_last {
                break;
            }
            return Err(LedgerError::Corrupt {
                offset: offset as u64,
                reason: format!("CRC mismatch: expected {expected_crc:#010x}, got {actual_crc:#010x}"),
            });
        }

        let record: WalRecord = bincode::deserialize(payload).map_err(|e| LedgerError::Corrupt {
            offset: offset as u64,
            reason: format!("undecodable entry: {e}"),
        })?;

        let expected_seq = state.height() + 1;
        if record.seq != expected_seq {
            return Err(LedgerError::Corrupt {
                offset: offset as u64,
                reason: format!("expected seq {expected_seq}, found {}", record.seq),
            });
        }

        state.apply(&record.key, &record.value);
        offset = end;
    }

    Ok((state, offset as u64))
}

/// Whether a complete entry with a matching CRC starts anywhere at or
/// after `from`.
fn intact_frame_after(buf: &[u8], from: usize) -> bool {
    (from..buf.len().saturating_sub(HEADER_SIZE)).any(|start| {
        let header = &buf[start..start + HEADER_SIZE];
        let length = u32::from_le_bytes([header[0], header[1], header[2], header[3]]) as usize;
        let crc = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
        let end = start + HEADER_SIZE + length;
        length > 0 && end <= buf.len() && crc32fast::hash(&buf[start + HEADER_SIZE..end]) == crc
    })
}
