//! FILENAME: core/grid-preview/src/template.rs
//! PURPOSE: The hand-off from assembled grid to a template engine.
//! CONTEXT: The renderer assigns a fixed set of variables and lets the
//! configured engine produce markup. `JsonViewRenderer` is the built-in
//! engine: it emits the variables as JSON for a frontend that draws the
//! grid itself.

use grid_engine::{Grid, LayoutDefinition};
use grid_persistence::ViewConfiguration;
use serde::Serialize;

use crate::error::PreviewError;

/// Variables assigned to the container template.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerView<'a> {
    pub hide_restricted_columns: bool,
    pub new_content_title: String,
    pub new_content_title_short: String,
    pub allow_edit_content: bool,
    pub grid_elements_backend_layout: &'a LayoutDefinition,
    pub grid_elements_container: &'a Grid,
}

pub trait TemplateRenderer {
    fn render(
        &self,
        view: &ViewConfiguration,
        variables: &ContainerView<'_>,
    ) -> Result<String, PreviewError>;
}

// ============================================================================
// JSON VIEW RENDERER
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonView<'a> {
    template: &'a str,
    template_path: Option<String>,
    partial_root_paths: &'a [String],
    layout_root_paths: &'a [String],
    variables: &'a ContainerView<'a>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonViewRenderer {
    pub pretty: bool,
}

impl JsonViewRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        JsonViewRenderer { pretty: true }
    }
}

impl TemplateRenderer for JsonViewRenderer {
    fn render(
        &self,
        view: &ViewConfiguration,
        variables: &ContainerView<'_>,
    ) -> Result<String, PreviewError> {
        let payload = JsonView {
            template: &view.default_template,
            template_path: view.resolve_template().map(|p| p.display().to_string()),
            partial_root_paths: &view.partial_root_paths,
            layout_root_paths: &view.layout_root_paths,
            variables,
        };
        let result = if self.pretty {
            serde_json::to_string_pretty(&payload)
        } else {
            serde_json::to_string(&payload)
        };
        result.map_err(|e| PreviewError::Render(e.to_string()))
    }
}
