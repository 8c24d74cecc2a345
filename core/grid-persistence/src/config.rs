//! FILENAME: core/grid-persistence/src/config.rs
//! PURPOSE: Extension and page configuration files.
//! CONTEXT: The extension configuration is read once when the preview
//! renderer is built and is fatal when unreadable. Page configuration is a
//! per-page lookup with a site-wide default.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use grid_engine::RecordId;
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;

/// Extension used for view files.
pub const TEMPLATE_EXTENSION: &str = "html";

// ============================================================================
// EXTENSION CONFIGURATION
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionConfiguration {
    #[serde(default)]
    pub backend_container: BackendContainerConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendContainerConfig {
    #[serde(default)]
    pub view: ViewConfiguration,
}

/// Where the container view lives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewConfiguration {
    #[serde(default)]
    pub default_template: String,
    #[serde(default)]
    pub template_root_paths: Vec<String>,
    #[serde(default)]
    pub partial_root_paths: Vec<String>,
    #[serde(default)]
    pub layout_root_paths: Vec<String>,
}

impl ViewConfiguration {
    /// Finds the default template file.
    ///
    /// Root paths are searched last-to-first so that later entries override
    /// earlier ones.
    pub fn resolve_template(&self) -> Option<PathBuf> {
        if self.default_template.is_empty() {
            return None;
        }
        resolve_in(&self.template_root_paths, &self.default_template)
    }

    pub fn resolve_partial(&self, name: &str) -> Option<PathBuf> {
        resolve_in(&self.partial_root_paths, name)
    }

    pub fn resolve_layout(&self, name: &str) -> Option<PathBuf> {
        resolve_in(&self.layout_root_paths, name)
    }
}

fn resolve_in(roots: &[String], name: &str) -> Option<PathBuf> {
    let file_name = if Path::new(name).extension().is_some() {
        name.to_string()
    } else {
        format!("{}.{}", name, TEMPLATE_EXTENSION)
    };
    roots
        .iter()
        .rev()
        .map(|root| Path::new(root).join(&file_name))
        .find(|candidate| candidate.is_file())
}

impl ExtensionConfiguration {
    pub fn open(path: &Path) -> Result<Self, PersistenceError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn view(&self) -> &ViewConfiguration {
        &self.backend_container.view
    }
}

// ============================================================================
// PAGE CONFIGURATION
// ============================================================================

/// Page-module settings relevant to the grid view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayoutConfig {
    #[serde(default)]
    pub hide_restricted_columns: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageConfigFile {
    #[serde(default)]
    pub default: PageLayoutConfig,
    #[serde(default)]
    pub pages: BTreeMap<RecordId, PageLayoutConfig>,
}

impl PageConfigFile {
    pub fn open(path: &Path) -> Result<Self, PersistenceError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn for_page(&self, page_id: RecordId) -> PageLayoutConfig {
        self.pages.get(&page_id).copied().unwrap_or(self.default)
    }
}
