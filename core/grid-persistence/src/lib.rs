//! FILENAME: core/grid-persistence/src/lib.rs
//! Grid Persistence Module
//!
//! JSON file-backed stores the preview renderer reads from: content
//! records, layout configuration, backend user sessions and the extension
//! and page configuration.

mod config;
mod error;
mod layouts;
mod records;
mod session;

pub use config::{
    BackendContainerConfig, ExtensionConfiguration, PageConfigFile, PageLayoutConfig,
    ViewConfiguration, TEMPLATE_EXTENSION,
};
pub use error::PersistenceError;
pub use layouts::{JsonLayoutStore, PageLayouts};
pub use records::{JsonRecordStore, ALL_FIELDS};
pub use session::{FileUserSession, UserSessionData};
