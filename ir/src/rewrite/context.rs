use std::collections::BTreeMap;

/// Per-node rewrite limit used by [`RewriteContext::default`].
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Mutation context threaded through every rule invocation.
#[derive(Debug, Clone)]
pub struct RewriteContext {
    max_iterations: usize,
    pub stats: RewriteStats,
}

impl Default for RewriteContext {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITERATIONS)
    }
}

impl RewriteContext {
    pub fn new(max_iterations: usize) -> Self {
        Self { max_iterations, stats: RewriteStats::default() }
    }

    /// Maximum number of replacements applied to one node. A rule that still
    /// applies after that many is reported as non-convergence.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }
}

/// Per-rule outcome counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteStats {
    applied: BTreeMap<&'static str, usize>,
    declined: BTreeMap<&'static str, usize>,
    failed: BTreeMap<&'static str, usize>,
}

impl RewriteStats {
    pub fn record_applied(&mut self, rule: &'static str) {
        *self.applied.entry(rule).or_default() += 1;
    }

    pub fn record_declined(&mut self, rule: &'static str) {
        *self.declined.entry(rule).or_default() += 1;
    }

    pub fn record_failed(&mut self, rule: &'static str) {
        *self.failed.entry(rule).or_default() += 1;
    }

    /// Replacements produced by `rule`.
    pub fn applied(&self, rule: &str) -> usize {
        self.applied.get(rule).copied().unwrap_or(0)
    }

    /// Times `rule` matched but returned no replacement.
    pub fn declined(&self, rule: &str) -> usize {
        self.declined.get(rule).copied().unwrap_or(0)
    }

    /// Times `rule` returned an error.
    pub fn failed(&self, rule: &str) -> usize {
        self.failed.get(rule).copied().unwrap_or(0)
    }

    pub fn total_applied(&self) -> usize {
        self.applied.values().sum()
    }
}
