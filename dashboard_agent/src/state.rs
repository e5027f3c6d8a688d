//! Shared agent state handed to every request handler.

use crate::collector::Collector;
use crate::ports::{FileSystem, ProcessRunner, RealFs, TokioRunner};
use std::sync::Arc;

pub struct AppState<F: FileSystem = RealFs, R: ProcessRunner = TokioRunner> {
    // Immutable; each request samples on its own, so no lock is needed.
    pub collector: Arc<Collector<F, R>>,
}

impl<F: FileSystem, R: ProcessRunner> AppState<F, R> {
    pub fn new(collector: Collector<F, R>) -> Self {
        Self {
            collector: Arc::new(collector),
        }
    }
}

impl<F: FileSystem, R: ProcessRunner> Clone for AppState<F, R> {
    fn clone(&self) -> Self {
        Self {
            collector: Arc::clone(&self.collector),
        }
    }
}
