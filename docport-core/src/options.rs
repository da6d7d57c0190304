//! Traversal tuning shared by the exporter and the importer.

/// Options controlling how a store tree is walked.
///
/// # Example
///
/// ```ignore
/// use docport::options::TraversalOptions;
///
/// let options = TraversalOptions::default().with_concurrency(8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalOptions {
    concurrency: usize,
}

impl TraversalOptions {
    /// Sets how many sibling documents of one collection may be processed at once.
    ///
    /// `1` walks the tree strictly sequentially and depth-first. Values below `1` are
    /// treated as `1`. The limit applies per collection, so nested collections being
    /// processed at the same time each get their own budget.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }
}

impl Default for TraversalOptions {
    fn default() -> Self {
        Self { concurrency: 1 }
    }
}
