//! Per-call evaluation context: cancellation and data-source injection.
//!
//! Sibling scapes (time-series, trading) read tabular inputs from a
//! process-wide default [`DataSource`] guarded by a read-write lock.
//! Rather than mutating that global per call, an [`EvalContext`] can
//! carry an explicit override; the accessor falls back to the global
//! default, which itself falls back to a default-constructed table.

use indexmap::IndexMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, RwLock};

// ── DataSource ─────────────────────────────────────────────────────

/// A named-column table of f32 rows.
///
/// The Flatland core itself never reads one; it is threaded through the
/// context so drivers hosting several scapes can parameterize a call
/// without global side effects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataSource {
    columns: IndexMap<String, Vec<f32>>,
}

impl DataSource {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a column.
    pub fn insert_column(&mut self, name: impl Into<String>, values: Vec<f32>) {
        self.columns.insert(name.into(), values);
    }

    /// A column's values, if present.
    pub fn column(&self, name: &str) -> Option<&[f32]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the table has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Process-wide default data source.
static DEFAULT_SOURCE: OnceLock<RwLock<Arc<DataSource>>> = OnceLock::new();

fn default_cell() -> &'static RwLock<Arc<DataSource>> {
    DEFAULT_SOURCE.get_or_init(|| RwLock::new(Arc::new(DataSource::default())))
}

/// The process-wide default data source.
///
/// Default-constructed (empty) until [`set_default_data_source`] is
/// called.
pub fn default_data_source() -> Arc<DataSource> {
    default_cell()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

/// Replace the process-wide default data source.
pub fn set_default_data_source(source: DataSource) {
    let mut guard = default_cell()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = Arc::new(source);
}

// ── CancelToken ────────────────────────────────────────────────────

/// Cooperative cancellation handle.
///
/// Cloned freely; any clone can cancel. The driver checks the token
/// before every tick and aborts with `EvalError::Cancelled` without
/// partially applying a tick.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// A fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

// ── EvalContext ────────────────────────────────────────────────────

/// Everything one evaluation call carries besides the policy itself.
#[derive(Clone, Debug, Default)]
pub struct EvalContext {
    /// Stable agent identifier; keys the benchmark layout derivation.
    pub agent_id: String,
    /// Cancellation handle checked before every tick.
    pub cancel: CancelToken,
    data_source: Option<Arc<DataSource>>,
}

impl EvalContext {
    /// Context for the given agent with no override and a fresh token.
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            cancel: CancelToken::new(),
            data_source: None,
        }
    }

    /// Use an explicit cancellation token.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Carry a per-call data-source override.
    pub fn with_data_source(mut self, source: Arc<DataSource>) -> Self {
        self.data_source = Some(source);
        self
    }

    /// The effective data source: the per-call override if present,
    /// otherwise the process-wide default.
    pub fn data_source(&self) -> Arc<DataSource> {
        match &self.data_source {
            Some(source) => Arc::clone(source),
            None => default_data_source(),
        }
    }
}
