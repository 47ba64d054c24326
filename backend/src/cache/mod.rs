//! View Cache - Views computed once when the engine starts
//!
//! The cache is filled before the server accepts requests and never changes
//! afterwards, so readers need no locking. A failed computation is cached as
//! the error it produced and reported on every request.

use indexmap::IndexMap;
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::error::EngineResult;
use crate::views::{compute, View, ViewOutput};

/// Outcomes of the precomputed views, keyed by view
#[derive(Debug, Clone, Default)]
pub struct ViewCache {
    entries: IndexMap<View, EngineResult<ViewOutput>>,
}

impl ViewCache {
    /// Compute every precomputed view against `catalog`
    pub fn warm(catalog: &Catalog) -> Self {
        let entries: IndexMap<_, _> = View::ALL
            .into_iter()
            .filter(View::is_precomputed)
            .map(|view| {
                let outcome = compute(catalog, view);
                match &outcome {
                    Ok(_) => info!(view = view.name(), "precomputed view"),
                    Err(e) => warn!(view = view.name(), error = %e, "precomputing view failed"),
                }
                (view, outcome)
            })
            .collect();
        Self { entries }
    }

    /// Cached outcome, `None` when the view is computed per request
    pub fn get(&self, view: View) -> Option<&EngineResult<ViewOutput>> {
        self.entries.get(&view)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
