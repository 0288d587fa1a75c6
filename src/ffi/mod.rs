//! This module holds the language bindings of the shim.
//!
//! Currently it only contains the Python bridge, compiled with the `python`
//! feature.

/// Interfacing with CPython through `pyo3`.
#[cfg(feature = "python")]
pub mod python;
