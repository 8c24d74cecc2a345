//! FILENAME: core/grid-preview/src/strategy.rs
//! PURPOSE: The ways a preview can be produced, in the order they are tried.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreviewStrategy {
    /// A listener stopped the preview event and supplied the content.
    EventOverride,
    /// A per-record preview template produced content.
    TemplateFallback,
    /// The container grid was assembled and rendered.
    GridAssembly,
}

impl PreviewStrategy {
    /// Fixed priority order; the first strategy producing content wins.
    pub const ORDER: [PreviewStrategy; 3] = [
        PreviewStrategy::EventOverride,
        PreviewStrategy::TemplateFallback,
        PreviewStrategy::GridAssembly,
    ];

    /// Strategies that may decline, tried before the grid is assembled.
    pub const OVERRIDES: [PreviewStrategy; 2] = [
        PreviewStrategy::EventOverride,
        PreviewStrategy::TemplateFallback,
    ];

    /// Always produces content; ends the chain.
    pub const FINAL: PreviewStrategy = PreviewStrategy::GridAssembly;

    pub fn as_str(&self) -> &'static str {
        match self {
            PreviewStrategy::EventOverride => "event_override",
            PreviewStrategy::TemplateFallback => "template_fallback",
            PreviewStrategy::GridAssembly => "grid_assembly",
        }
    }
}
