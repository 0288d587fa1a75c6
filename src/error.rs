//! This module defines the single error type for the `myproject` shim.
//!
//! Every variant except `Io` is a load-time failure: the package is
//! unusable when one of them is returned. Errors raised while the native
//! function runs are not represented here because the shim never sees them.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShimError {
    // =========================================================================
    // === Load-Time Failures
    // =========================================================================
    /// No candidate location held a loadable copy of the native module.
    #[error("native module '{name}' not found (tried: {})", display_paths(.tried))]
    ModuleNotFound { name: String, tried: Vec<PathBuf> },

    /// The native module exists but the dynamic loader refused it
    /// (ABI mismatch, missing transitive dependency, not a library, ...).
    #[error("failed to load native module from '{}': {source}", .path.display())]
    LoadFailure {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    /// The module loaded, but the expected entry point is absent.
    #[error("native module '{module}' does not export '{symbol}': {reason}")]
    SymbolResolution {
        module: String,
        symbol: String,
        reason: String,
    },

    /// A name in the export list has no value behind it.
    #[error("exported name '{0}' does not resolve")]
    ExportUnresolved(String),

    // =========================================================================
    // === Ambient Failures
    // =========================================================================
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShimError {
    /// True for the errors that abort package initialization.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            ShimError::ModuleNotFound { .. }
                | ShimError::LoadFailure { .. }
                | ShimError::SymbolResolution { .. }
                | ShimError::ExportUnresolved(_)
        )
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// === Python Conversions ===
// =============================================================================

#[cfg(feature = "python")]
impl From<ShimError> for pyo3::PyErr {
    fn from(err: ShimError) -> pyo3::PyErr {
        if err.is_load_failure() {
            pyo3::exceptions::PyImportError::new_err(err.to_string())
        } else {
            pyo3::exceptions::PyRuntimeError::new_err(err.to_string())
        }
    }
}
