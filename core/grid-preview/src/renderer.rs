//! FILENAME: core/grid-preview/src/renderer.rs
//! PURPOSE: Page-module preview of grid containers.
//! CONTEXT: Tries the preview strategies in priority order: an event
//! listener may replace the preview, then a per-record template, and only
//! then is the container grid assembled and handed to the template engine.
//!
//! Building the renderer prunes stale entries from the user's collapsed
//! column state and writes the pruned state back. The renderer is therefore
//! built per backend user, and renders read the pruned state it captured.

use std::rc::Rc;

use grid_engine::{
    assemble, group_by_column, CollapsedStateMap, ContentRecord, Grid, LayoutDefinition,
    CONTENT_TABLE, LAYOUT_FIELD,
};
use grid_persistence::{ExtensionConfiguration, ALL_FIELDS};

use crate::context::RequestContext;
use crate::error::PreviewError;
use crate::event::{EventDispatcher, PagePreviewRenderingEvent};
use crate::logging::{log_debug, log_enter, log_exit, log_info, log_warn};
use crate::services::{
    BackendUser, ConfigurationSource, LayoutConfigStore, PageConfigStore, RecordStore,
    SimpleTemplateFallback,
};
use crate::strategy::PreviewStrategy;
use crate::template::{ContainerView, TemplateRenderer};

/// Field children are ordered by.
pub const SORTING_FIELD: &str = "sorting";

/// Permission action and table gating the "new content" controls.
pub const EDIT_PERMISSION: (&str, &str) = ("tables_modify", CONTENT_TABLE);

/// Label keys assigned to the template.
pub const LABEL_NEW_CONTENT: &str = "newContentElement";
pub const LABEL_NEW_CONTENT_SHORT: &str = "content";

/// Host services the renderer is built with.
pub struct PreviewServices {
    pub records: Rc<dyn RecordStore>,
    pub layouts: Rc<dyn LayoutConfigStore>,
    pub page_config: Rc<dyn PageConfigStore>,
    pub templates: Box<dyn TemplateRenderer>,
    pub fallback: Option<Box<dyn SimpleTemplateFallback>>,
    pub events: EventDispatcher,
}

/// Layout and grid built for one container.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerGrid {
    pub layout: LayoutDefinition,
    pub grid: Grid,
}

impl ContainerGrid {
    fn empty(record: &ContentRecord) -> Self {
        ContainerGrid {
            layout: LayoutDefinition::default(),
            grid: Grid::new(record.uid, record.pid),
        }
    }
}

/// Preview renderer for one backend user.
///
/// Collapsed column state is read from the user passed to [`Self::new`];
/// the user in a render's [`RequestContext`] only drives permissions and
/// labels. Build one renderer per user.
pub struct GridPreviewRenderer {
    configuration: ExtensionConfiguration,
    collapsed: CollapsedStateMap,
    services: PreviewServices,
}

impl GridPreviewRenderer {
    /// Loads the extension configuration and cleans up the user's
    /// collapsed column state.
    ///
    /// Fails only when the configuration cannot be loaded.
    pub fn new(
        config_source: &dyn ConfigurationSource,
        services: PreviewServices,
        user: &dyn BackendUser,
    ) -> Result<Self, PreviewError> {
        let configuration = config_source.extension_configuration()?;
        let collapsed = cleanup_collapsed_states(user);
        Ok(GridPreviewRenderer {
            configuration,
            collapsed,
            services,
        })
    }

    pub fn configuration(&self) -> &ExtensionConfiguration {
        &self.configuration
    }

    /// Collapsed state captured when the renderer was built.
    pub fn collapsed_state(&self) -> &CollapsedStateMap {
        &self.collapsed
    }

    /// Renders the page-module preview for a container record.
    pub fn render_preview(
        &self,
        record: &ContentRecord,
        context: &RequestContext<'_>,
    ) -> Result<String, PreviewError> {
        log_enter!("PREVIEW", "render_preview", "uid={} pid={}", record.uid, record.pid);

        for strategy in PreviewStrategy::OVERRIDES {
            if let Some(content) = self.try_override(strategy, record, context) {
                log_exit!(
                    "PREVIEW",
                    "render_preview",
                    "uid={} strategy={} bytes={}",
                    record.uid,
                    strategy.as_str(),
                    content.len()
                );
                return Ok(content);
            }
        }

        let content = self.render_grid_container(record, context)?;
        log_exit!(
            "PREVIEW",
            "render_preview",
            "uid={} strategy={} bytes={}",
            record.uid,
            PreviewStrategy::FINAL.as_str(),
            content.len()
        );
        Ok(content)
    }

    /// Runs a strategy that may decline to produce content.
    fn try_override(
        &self,
        strategy: PreviewStrategy,
        record: &ContentRecord,
        context: &RequestContext<'_>,
    ) -> Option<String> {
        match strategy {
            PreviewStrategy::EventOverride => {
                let mut event = PagePreviewRenderingEvent::new(context, record);
                self.services.events.dispatch(&mut event);
                if event.is_propagation_stopped() {
                    log_debug!("PREVIEW", "uid={} overridden by event listener", record.uid);
                    return Some(event.preview_content().to_string());
                }
                None
            }
            PreviewStrategy::TemplateFallback => self
                .services
                .fallback
                .as_ref()
                .and_then(|fallback| fallback.render_from_template(record, context)),
            PreviewStrategy::GridAssembly => None,
        }
    }

    /// Assembles the container grid and renders it through the template engine.
    pub fn render_grid_container(
        &self,
        record: &ContentRecord,
        context: &RequestContext<'_>,
    ) -> Result<String, PreviewError> {
        let ContainerGrid { layout, grid } = self.build_container_grid(record);

        let page_config = self.services.page_config.page_config(context.page_id);
        let (action, table) = EDIT_PERMISSION;
        let variables = ContainerView {
            hide_restricted_columns: page_config.hide_restricted_columns,
            new_content_title: context.language.translate(LABEL_NEW_CONTENT),
            new_content_title_short: context.language.translate(LABEL_NEW_CONTENT_SHORT),
            allow_edit_content: context.user.has_permission(action, table),
            grid_elements_backend_layout: &layout,
            grid_elements_container: &grid,
        };

        self.services
            .templates
            .render(self.configuration.view(), &variables)
    }

    /// Resolves the container's layout and builds its grid.
    ///
    /// Every lookup failure degrades to an empty grid.
    pub fn build_container_grid(&self, record: &ContentRecord) -> ContainerGrid {
        let container_id = record.uid;
        let page_id = record.pid;

        // Workspace versions take their layout from the live record's page
        let live = if record.is_workspace_version() {
            match record
                .version_origin()
                .and_then(|oid| self.services.records.fetch_record(CONTENT_TABLE, oid))
            {
                Some(live) => live,
                None => {
                    log_warn!(
                        "GRID",
                        "uid={} live record of workspace version not found",
                        container_id
                    );
                    return ContainerGrid::empty(record);
                }
            }
        } else {
            record.clone()
        };

        let setup = match self.services.layouts.init(live.pid) {
            Ok(setup) => setup,
            Err(e) => {
                log_warn!("GRID", "layout setup for pid={} unavailable: {}", live.pid, e);
                return ContainerGrid::empty(record);
            }
        };

        let layout_id = setup
            .current_parent(container_id)
            .and_then(|parent| parent.get_string(LAYOUT_FIELD))
            .unwrap_or_default();
        let layout = setup.layout_setup(&layout_id);
        let active_positions = setup.layout_columns(&layout_id).active_positions();

        if layout.is_empty() {
            log_info!("GRID", "uid={} layout '{}' has no rows", container_id, layout_id);
            return ContainerGrid {
                layout,
                grid: Grid::new(container_id, page_id),
            };
        }

        let children = self.services.records.fetch_children(
            CONTENT_TABLE,
            container_id,
            page_id,
            SORTING_FIELD,
            0,
            ALL_FIELDS,
        );
        let grouped = group_by_column(&children);
        let grid = assemble(
            container_id,
            page_id,
            &layout,
            &active_positions,
            &grouped,
            &self.collapsed,
        );
        log_debug!(
            "GRID",
            "uid={} layout='{}' rows={} children={} placed={}",
            container_id,
            layout_id,
            grid.rows.len(),
            children.len(),
            grid.item_count()
        );

        ContainerGrid { layout, grid }
    }
}

/// Drops non-collapsed entries from the user's stored collapsed state and
/// writes the pruned state back. Returns the pruned state.
///
/// Users without stored state are left untouched. A failed write is logged;
/// the pruned state is still used for rendering.
pub fn cleanup_collapsed_states(user: &dyn BackendUser) -> CollapsedStateMap {
    let mut uc = user.uc();
    let Some(stored) = CollapsedStateMap::stored_in(&uc) else {
        return CollapsedStateMap::new();
    };

    let pruned = stored.prune();
    pruned.write_into(&mut uc);
    match user.write_uc(uc) {
        Ok(()) => log_debug!("UC", "collapsed columns pruned, {} kept", pruned.len()),
        Err(e) => log_warn!("UC", "writing pruned collapsed columns failed: {}", e),
    }
    pruned
}
