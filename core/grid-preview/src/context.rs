//! FILENAME: core/grid-preview/src/context.rs
//! PURPOSE: Per-request state threaded through every preview call.

use grid_engine::RecordId;

use crate::services::{BackendUser, LanguageService};

/// Who is looking at which page, in which language.
#[derive(Clone, Copy)]
pub struct RequestContext<'a> {
    pub user: &'a dyn BackendUser,
    pub language: &'a dyn LanguageService,
    /// Page shown in the page module.
    pub page_id: RecordId,
}

impl<'a> RequestContext<'a> {
    pub fn new(
        user: &'a dyn BackendUser,
        language: &'a dyn LanguageService,
        page_id: RecordId,
    ) -> Self {
        RequestContext {
            user,
            language,
            page_id,
        }
    }
}

impl std::fmt::Debug for RequestContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("page_id", &self.page_id)
            .finish_non_exhaustive()
    }
}
