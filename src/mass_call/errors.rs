//! Errors surfaced by the mass-call engine.
//!
//! Failed requests are never errors of the engine: they land in the failed
//! queue. Only hook failures abort an `execute`/`retry` call.

use thiserror::Error;

use crate::mass_call::{BatchWindow, HookError, ResultMap};

/// Error returned by [`MassCallClient::execute`](crate::MassCallClient::execute)
/// and [`MassCallClient::retry`](crate::MassCallClient::retry).
#[derive(Debug, Error)]
pub enum MassCallError {
    /// A hook failed; the call stopped after the window settled.
    #[error("Hook failed in window {window}: {source}")]
    Hook {
        /// The window in which the hook failed.
        window: BatchWindow,
        /// The first hook error of the window.
        #[source]
        source: HookError,
        /// Results collected by this call before it stopped.
        partial: ResultMap,
    },
}

impl MassCallError {
    /// Returns the results gathered before the call stopped.
    #[must_use]
    pub const fn partial_results(&self) -> &ResultMap {
        match self {
            Self::Hook { partial, .. } => partial,
        }
    }

    /// Consumes the error, returning the results gathered before the call stopped.
    #[must_use]
    pub fn into_partial_results(self) -> ResultMap {
        match self {
            Self::Hook { partial, .. } => partial,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_error_display_names_window() {
        let error = MassCallError::Hook {
            window: BatchWindow::new(3, 6),
            source: HookError::new("boom"),
            partial: ResultMap::new(),
        };

        let message = error.to_string();
        assert!(message.contains("[3, 6)"));
        assert!(message.contains("boom"));
    }

    #[test]
    fn test_partial_results_are_kept() {
        let mut partial = ResultMap::new();
        partial.insert("catalogue-1".to_string(), serde_json::json!({"ok": true}));

        let error = MassCallError::Hook {
            window: BatchWindow::new(0, 1),
            source: HookError::new("boom"),
            partial,
        };

        assert_eq!(error.partial_results().len(), 1);
        assert!(error.into_partial_results().contains_key("catalogue-1"));
    }
}
