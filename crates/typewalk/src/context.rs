//! Limits and switches for one evaluation session

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Default cap on the byte length of a string built by `+`, `*` or `.`
pub const DEFAULT_MAX_STRING_LEN: usize = 16 * 1024 * 1024;

/// Session settings handed to an [`Interpreter`](crate::Interpreter).
///
/// Exceeding `max_depth` aborts the run; an oversized string is only a
/// diagnostic. Clones share the interrupt flag, so a clone held by another
/// thread can stop a `while` whose condition never turns false.
#[derive(Debug, Clone)]
pub struct EvalContext {
    /// Nesting bound for statements and expressions together
    pub max_depth: usize,

    /// Largest string, in bytes, a string operator may produce
    pub max_string_len: usize,

    /// Checked before every statement and loop iteration
    pub interrupt: Arc<AtomicBool>,

    /// Emit a TRACE event for every executed statement
    pub trace: bool,
}

impl Default for EvalContext {
    fn default() -> Self {
        Self {
            max_depth: 1000,
            max_string_len: DEFAULT_MAX_STRING_LEN,
            interrupt: Arc::new(AtomicBool::new(false)),
            trace: false,
        }
    }
}

impl EvalContext {
    /// Context with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Context allowing at most `max_depth` nested nodes.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Default::default()
        }
    }

    /// Cap the length of strings built by string operators.
    pub fn with_max_string_len(mut self, max_string_len: usize) -> Self {
        self.max_string_len = max_string_len;
        self
    }

    /// Turn per-statement tracing on or off.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Whether a stop was requested.
    pub fn is_interrupted(&self) -> bool {
        self.interrupt.load(Ordering::Relaxed)
    }

    /// Ask the running program to stop at its next statement or loop test.
    pub fn interrupt(&self) {
        self.interrupt.store(true, Ordering::Relaxed);
    }

    /// Clear a stop request so the session can run again.
    pub fn reset_interrupt(&self) {
        self.interrupt.store(false, Ordering::Relaxed);
    }
}
