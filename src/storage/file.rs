//! File-backed storage.
//!
//! One snapshot per file, written as pretty JSON or bincode. Saves go to a
//! sibling `.tmp` file which is synced and then renamed over the target, so
//! a reader only ever sees a complete snapshot.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::adapter::StorageAdapter;
use super::error::{Result, StorageError};
use crate::snapshot::{Snapshot, SNAPSHOT_VERSION};

/// On-disk encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Codec {
    /// Human-readable, diff-friendly.
    #[default]
    Json,
    /// Compact binary.
    Bincode,
}

impl Codec {
    /// Pick a codec from a file extension: `.bin`/`.bincode` are bincode,
    /// anything else is JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("bin") | Some("bincode") => Codec::Bincode,
            _ => Codec::Json,
        }
    }

    fn encode(self, snapshot: &Snapshot) -> Result<Vec<u8>> {
        match self {
            Codec::Json => serde_json::to_vec_pretty(snapshot)
                .map_err(|e| StorageError::Serialization(e.to_string())),
            Codec::Bincode => {
                bincode::serialize(snapshot).map_err(|e| StorageError::Serialization(e.to_string()))
            }
        }
    }

    fn decode(self, bytes: &[u8]) -> Result<Snapshot> {
        match self {
            Codec::Json => {
                serde_json::from_slice(bytes).map_err(|e| StorageError::Serialization(e.to_string()))
            }
            Codec::Bincode => bincode::deserialize(bytes)
                .map_err(|e| StorageError::Serialization(e.to_string())),
        }
    }
}

/// Stores the snapshot in a single file.
#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
    codec: Codec,
}

impl FileStorage {
    /// Store at `path`, choosing the codec from its extension.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let codec = Codec::from_path(&path);
        Self { path, codec }
    }

    /// Override the codec.
    #[must_use]
    pub fn with_codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn codec(&self) -> Codec {
        self.codec
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn unavailable(&self, source: io::Error) -> StorageError {
        StorageError::Unavailable {
            path: self.path.clone(),
            source,
        }
    }
}

impl StorageAdapter for FileStorage {
    fn load(&self) -> Result<Snapshot> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no snapshot, starting empty");
                return Ok(Snapshot::default());
            }
            Err(e) => return Err(self.unavailable(e)),
        };

        let snapshot = self.codec.decode(&bytes)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(StorageError::UnsupportedVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }

        debug!(path = %self.path.display(), "loaded snapshot");
        Ok(snapshot)
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.unavailable(e))?;
        }

        let bytes = self.codec.encode(snapshot)?;
        let temp_path = self.temp_path();

        let mut file = File::create(&temp_path).map_err(|e| self.unavailable(e))?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        drop(file);

        // Atomic rename
        fs::rename(&temp_path, &self.path)?;

        debug!(path = %self.path.display(), "saved snapshot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_from_path() {
        assert_eq!(Codec::from_path(Path::new("state.json")), Codec::Json);
        assert_eq!(Codec::from_path(Path::new("state.bin")), Codec::Bincode);
        assert_eq!(Codec::from_path(Path::new("state.bincode")), Codec::Bincode);
        assert_eq!(Codec::from_path(Path::new("state")), Codec::Json);
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let storage = FileStorage::new("/data/rotation.json");
        assert_eq!(storage.temp_path(), PathBuf::from("/data/rotation.json.tmp"));
    }

    #[test]
    fn test_with_codec() {
        let storage = FileStorage::new("state.json").with_codec(Codec::Bincode);
        assert_eq!(storage.codec(), Codec::Bincode);
        assert_eq!(storage.path(), Path::new("state.json"));
    }
}
