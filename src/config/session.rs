use crate::domain::model::{Role, Session};
use crate::domain::ports::SessionStore;
use crate::utils::error::{ClientError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Session flag persisted as a small JSON file, the terminal analog of the
/// browser's local storage entry. Nothing in it is verified by anyone.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let session =
                    serde_json::from_str(&raw).map_err(|e| ClientError::Session {
                        message: format!("corrupt session file {}: {}", self.path.display(), e),
                    })?;
                Ok(Some(session))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Route guard: the stored session must exist and carry the given role.
pub fn require_role(store: &impl SessionStore, required: Role) -> Result<Session> {
    match store.load()? {
        Some(session) if session.role == required => Ok(session),
        Some(session) => Err(ClientError::RoleRequired {
            required,
            actual: Some(session.role),
        }),
        None => Err(ClientError::RoleRequired {
            required,
            actual: None,
        }),
    }
}
