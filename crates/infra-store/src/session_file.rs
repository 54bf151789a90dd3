// Session File - persists the signed-in user and token as JSON

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use paijob_core::port::{CredentialStore, StoreError};
use paijob_core::Credentials;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, Serialize, Deserialize)]
struct SessionRecord {
    user: String,
    token: String,
    saved_at: DateTime<Utc>,
}

/// `~/.config/paijob/session.json` (platform equivalent), if a home directory exists
pub fn default_session_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "paijob").map(|dirs| dirs.config_dir().join(SESSION_FILE_NAME))
}

/// CredentialStore backed by a JSON file
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Credentials>, StoreError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No stored session");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let record: SessionRecord =
            serde_json::from_str(&data).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        debug!(user = %record.user, saved_at = %record.saved_at, "Loaded stored session");

        Ok(Some(Credentials::new(record.user, record.token)))
    }

    fn save(&self, credentials: &Credentials) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let record = SessionRecord {
            user: credentials.user.clone(),
            token: credentials.token.clone(),
            saved_at: Utc::now(),
        };
        let data =
            serde_json::to_vec_pretty(&record).map_err(|e| StoreError::Corrupt(e.to_string()))?;

        // Write-then-rename so readers never see a partial file
        let tmp = self.temp_path();
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), user = %credentials.user, "Saved session");
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Cleared session");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
