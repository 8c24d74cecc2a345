//! FILENAME: core/grid-preview/src/event.rs
//! PURPOSE: Synchronous preview event dispatch.
//! CONTEXT: Extensions subscribe to the preview event and may replace the
//! whole preview. Listeners run in registration order; once one stops
//! propagation, later listeners are skipped.

use grid_engine::ContentRecord;

use crate::context::RequestContext;

// ============================================================================
// EVENT
// ============================================================================

/// Fired before any preview rendering happens.
#[derive(Debug)]
pub struct PagePreviewRenderingEvent<'a> {
    context: &'a RequestContext<'a>,
    record: &'a ContentRecord,
    preview_content: Option<String>,
    propagation_stopped: bool,
}

impl<'a> PagePreviewRenderingEvent<'a> {
    pub fn new(context: &'a RequestContext<'a>, record: &'a ContentRecord) -> Self {
        PagePreviewRenderingEvent {
            context,
            record,
            preview_content: None,
            propagation_stopped: false,
        }
    }

    pub fn context(&self) -> &RequestContext<'a> {
        self.context
    }

    pub fn record(&self) -> &ContentRecord {
        self.record
    }

    pub fn set_preview_content(&mut self, content: impl Into<String>) {
        self.preview_content = Some(content.into());
    }

    /// Attached content; empty when none was set.
    pub fn preview_content(&self) -> &str {
        self.preview_content.as_deref().unwrap_or("")
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

// ============================================================================
// DISPATCHER
// ============================================================================

pub trait PreviewEventListener {
    fn handle(&self, event: &mut PagePreviewRenderingEvent<'_>);
}

impl<F> PreviewEventListener for F
where
    F: Fn(&mut PagePreviewRenderingEvent<'_>),
{
    fn handle(&self, event: &mut PagePreviewRenderingEvent<'_>) {
        self(event)
    }
}

#[derive(Default)]
pub struct EventDispatcher {
    listeners: Vec<Box<dyn PreviewEventListener>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl PreviewEventListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Subscribes a closure.
    pub fn listen<F>(&mut self, listener: F)
    where
        F: Fn(&mut PagePreviewRenderingEvent<'_>) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn dispatch(&self, event: &mut PagePreviewRenderingEvent<'_>) {
        for listener in &self.listeners {
            if event.is_propagation_stopped() {
                break;
            }
            listener.handle(event);
        }
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
