//! FILENAME: core/grid-persistence/src/session.rs
//! PURPOSE: Backend user session stored as a JSON document on disk.
//! CONTEXT: Holds the user's UC (free-form user configuration), admin flag
//! and table permissions. `write_uc` replaces the UC and rewrites the file.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PersistenceError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserSessionData {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub admin: bool,

    /// Action name -> tables the action is granted on.
    #[serde(default)]
    pub permissions: BTreeMap<String, Vec<String>>,

    #[serde(default = "empty_object")]
    pub uc: Value,
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

impl UserSessionData {
    /// Admins pass every check.
    pub fn has_permission(&self, action: &str, table: &str) -> bool {
        self.admin
            || self
                .permissions
                .get(action)
                .map(|tables| tables.iter().any(|t| t == table))
                .unwrap_or(false)
    }
}

/// A user session persisted at `path`.
///
/// Interior mutability lets the UC be rewritten through a shared handle;
/// a session is only ever driven by one request at a time.
#[derive(Debug)]
pub struct FileUserSession {
    path: PathBuf,
    data: RefCell<UserSessionData>,
}

impl FileUserSession {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let path = path.into();
        let text = fs::read_to_string(&path)?;
        let data: UserSessionData = serde_json::from_str(&text)?;
        Ok(FileUserSession {
            path,
            data: RefCell::new(data),
        })
    }

    /// Creates the session file with `data`.
    pub fn create(
        path: impl Into<PathBuf>,
        data: UserSessionData,
    ) -> Result<Self, PersistenceError> {
        let session = FileUserSession {
            path: path.into(),
            data: RefCell::new(data),
        };
        session.save()?;
        Ok(session)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn username(&self) -> String {
        self.data.borrow().username.clone()
    }

    /// Snapshot of the current UC.
    pub fn uc(&self) -> Value {
        self.data.borrow().uc.clone()
    }

    pub fn write_uc(&self, uc: Value) -> Result<(), PersistenceError> {
        self.data.borrow_mut().uc = uc;
        self.save()
    }

    pub fn has_permission(&self, action: &str, table: &str) -> bool {
        self.data.borrow().has_permission(action, table)
    }

    fn save(&self) -> Result<(), PersistenceError> {
        let text = serde_json::to_string_pretty(&*self.data.borrow())?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_uc_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.json");
        let session = FileUserSession::create(&path, UserSessionData::default()).unwrap();

        session.write_uc(json!({"lang": "de"})).unwrap();

        let reopened = FileUserSession::open(&path).unwrap();
        assert_eq!(reopened.uc(), json!({"lang": "de"}));
    }

    #[test]
    fn test_missing_uc_defaults_to_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.json");
        fs::write(&path, r#"{"username": "editor"}"#).unwrap();

        let session = FileUserSession::open(&path).unwrap();
        assert_eq!(session.username(), "editor");
        assert_eq!(session.uc(), json!({}));
    }

    #[test]
    fn test_permissions() {
        let mut data = UserSessionData::default();
        data.permissions
            .insert("tables_modify".to_string(), vec!["tt_content".to_string()]);

        assert!(data.has_permission("tables_modify", "tt_content"));
        assert!(!data.has_permission("tables_modify", "pages"));
        assert!(!data.has_permission("tables_select", "tt_content"));

        data.admin = true;
        assert!(data.has_permission("tables_select", "pages"));
    }

    #[test]
    fn test_open_missing_file_fails() {
        assert!(matches!(
            FileUserSession::open("/no/such/session.json"),
            Err(PersistenceError::Io(_))
        ));
    }
}
