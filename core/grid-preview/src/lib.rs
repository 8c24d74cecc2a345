//! FILENAME: core/grid-preview/src/lib.rs
//! Grid container preview for the page module.
//!
//! Resolves a container's layout, places its children in the layout's
//! columns, and renders the result through a template engine. Extensions
//! can replace the preview through the preview event.
//!
//! Layers:
//! - `services`: Interfaces of the host collaborators
//! - `adapters`: Collaborators backed by `grid-persistence` files
//! - `event` / `strategy`: The override chain tried before the grid
//! - `template`: Hand-off to the template engine
//! - `renderer`: The preview renderer itself

pub mod logging;

pub mod adapters;
pub mod context;
pub mod error;
pub mod event;
pub mod renderer;
pub mod services;
pub mod strategy;
pub mod template;

pub use adapters::{ExtensionConfigFile, JsonLayoutConfig, StaticLanguageService};
pub use context::RequestContext;
pub use error::PreviewError;
pub use event::{EventDispatcher, PagePreviewRenderingEvent, PreviewEventListener};
pub use renderer::{cleanup_collapsed_states, ContainerGrid, GridPreviewRenderer, PreviewServices};
pub use services::{
    BackendUser, ConfigurationSource, LanguageService, LayoutConfigStore, LayoutSetup,
    PageConfigStore, RecordStore, SimpleTemplateFallback,
};
pub use strategy::PreviewStrategy;
pub use template::{ContainerView, JsonViewRenderer, TemplateRenderer};
