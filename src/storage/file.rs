//! FilePreferences: flat JSON map on disk (native hosts, CLI, tests)

use super::PreferenceStore;
use crate::core::error::{KitError, KitResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;

const FILE_NAME: &str = "preferences.json";
const APP_DIR: &str = "stellar-wallets-kit";

#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$WALLETKIT_HOME/preferences.json`, else the platform data dir
    pub fn open_default() -> KitResult<Self> {
        let dir = match std::env::var_os("WALLETKIT_HOME") {
            Some(home) => PathBuf::from(home),
            None => dirs::data_dir()
                .ok_or_else(|| KitError::Storage("no data directory on this platform".into()))?
                .join(APP_DIR),
        };
        Ok(Self::new(dir.join(FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> KitResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(None),
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(KitError::Storage(format!("read {}: {}", self.path.display(), e))),
        }
    }

    fn load(&self) -> KitResult<BTreeMap<String, String>> {
        match self.read()? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(BTreeMap::new()),
        }
    }

    /// Like `load`, but an unparsable file counts as empty so the next write
    /// replaces it. The flag is set when that happened.
    fn load_for_write(&self) -> KitResult<(BTreeMap<String, String>, bool)> {
        let Some(raw) = self.read()? else { return Ok((BTreeMap::new(), false)) };
        match serde_json::from_str(&raw) {
            Ok(entries) => Ok((entries, false)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "discarding corrupt preferences file");
                Ok((BTreeMap::new(), true))
            }
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> KitResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| KitError::Storage(format!("create {}: {}", parent.display(), e)))?;
        }
        let raw = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, raw)
            .map_err(|e| KitError::Storage(format!("write {}: {}", self.path.display(), e)))
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> KitResult<Option<String>> {
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> KitResult<()> {
        let (mut entries, _) = self.load_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> KitResult<()> {
        let (mut entries, corrupt) = self.load_for_write()?;
        if entries.remove(key).is_some() || corrupt {
            self.save(&entries)?;
        }
        Ok(())
    }
}
