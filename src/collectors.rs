//! Per-call accumulators for the errors found during one traversal.

use crate::context::Context;
use crate::errors::ValidationError;
use crate::presenters::Presenter;
use std::collections::BTreeMap;
use std::sync::Arc;

pub trait ErrorCollector {
    fn collect(&mut self, ctx: &Context, path: &[String], error: ValidationError);

    fn has_errors(&self) -> bool;
}

/// Rendered messages grouped by rendered path. Paths without errors never
/// appear.
pub struct MapErrorCollector {
    errors: BTreeMap<String, Vec<String>>,
    path_presenter: Arc<dyn Presenter>,
    error_presenter: Arc<dyn Presenter>,
}

impl MapErrorCollector {
    pub fn new(path_presenter: Arc<dyn Presenter>, error_presenter: Arc<dyn Presenter>) -> Self {
        Self {
            errors: BTreeMap::new(),
            path_presenter,
            error_presenter,
        }
    }

    pub fn errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }

    pub fn into_errors(self) -> BTreeMap<String, Vec<String>> {
        self.errors
    }
}

impl ErrorCollector for MapErrorCollector {
    fn collect(&mut self, ctx: &Context, path: &[String], error: ValidationError) {
        let key = self.path_presenter.present(ctx, path, &error);
        let message = self.error_presenter.present(ctx, path, &error);
        self.errors.entry(key).or_default().push(message);
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Every error rendered through one combining presenter, in visiting
/// order.
pub struct FlatErrorCollector {
    errors: Vec<String>,
    combiner: Arc<dyn Presenter>,
}

impl FlatErrorCollector {
    pub fn new(combiner: Arc<dyn Presenter>) -> Self {
        Self {
            errors: Vec::new(),
            combiner,
        }
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

impl ErrorCollector for FlatErrorCollector {
    fn collect(&mut self, ctx: &Context, path: &[String], error: ValidationError) {
        self.errors.push(self.combiner.present(ctx, path, &error));
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Keeps the `(path, error)` pairs untouched so they can be rendered later,
/// any number of times, with any presenter.
#[derive(Debug, Clone, Default)]
pub struct RawErrorCollector {
    errors: Vec<(Vec<String>, ValidationError)>,
}

impl RawErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> &[(Vec<String>, ValidationError)] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<(Vec<String>, ValidationError)> {
        self.errors
    }

    pub fn render(&self, ctx: &Context, presenter: &dyn Presenter) -> Vec<String> {
        self.errors
            .iter()
            .map(|(path, error)| presenter.present(ctx, path, error))
            .collect()
    }
}

impl ErrorCollector for RawErrorCollector {
    fn collect(&mut self, _ctx: &Context, path: &[String], error: ValidationError) {
        self.errors.push((path.to_vec(), error));
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
