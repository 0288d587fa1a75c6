//! This file is the root of the `myproject` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring the crate's modules and the names that form its public surface.
//! 2.  Defining the `#[pymodule]` which acts as the entry point when the compiled
//!     library is imported into Python (feature `python`).
//!
//! The arithmetic behind `add_one` lives in the native `myproject_cpp` backend.
//! This crate only loads that backend, binds its entry point once, and forwards
//! calls to it untouched.

//==================================================================================
// 0. Constants
//==================================================================================
/// The package version, set from Cargo.toml at compile time.
///
/// This is the version of this package, not of the native backend it loads.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Stem of the native backend library (`libmyproject_cpp.so` on Linux).
pub const NATIVE_MODULE_NAME: &str = "myproject_cpp";

/// Doc string the native backend registers for itself.
pub const NATIVE_MODULE_DOC: &str = "myproject C++ bindings";

/// Doc string of the package.
pub const PACKAGE_DOC: &str = "Python bindings for the myproject C++ library.";

/// The Python module's `__doc__`: the package summary, then the backend's own
/// description.
pub fn module_doc() -> String {
    format!("{PACKAGE_DOC}\n\nBackend: {NATIVE_MODULE_NAME} ({NATIVE_MODULE_DOC}).")
}

//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod config;
pub mod error;
pub mod exports;
pub mod native;
pub mod observability;
pub mod shim;

mod ffi;


//==================================================================================
// 2. Public API Re-exports
//==================================================================================
pub use config::ShimConfig;
pub use error::ShimError;
pub use exports::EXPORTS;
pub use native::{DynamicModule, NativeAddOne, NativeModule, StaticModule};
pub use observability::init_logging;
pub use shim::{add_one, Shim};

//==================================================================================
// 3. Python Module Definition
//==================================================================================
#[cfg(feature = "python")]
use pyo3::prelude::*;

/// The `myproject` Python module.
///
/// Loading the native backend happens here, before any name is registered, so a
/// missing library or symbol surfaces as an `ImportError` and leaves nothing
/// half-initialized behind.
#[cfg(feature = "python")]
#[pymodule]
fn myproject(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let shim = ffi::python::load_shim(m.py())?;

    m.add("__doc__", module_doc())?;

    // --- The contractual surface ---
    m.add_function(wrap_pyfunction!(ffi::python::add_one_py, m)?)?;
    m.add("__version__", VERSION)?;
    m.add("__all__", EXPORTS.to_vec())?;

    // --- Reachable, but not part of `__all__` ---
    m.add("_native", shim.native_origin())?;
    m.add_function(wrap_pyfunction!(ffi::python::enable_verbose_logging_py, m)?)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_doc_names_package_and_backend() {
        let doc = module_doc();
        assert!(doc.starts_with("Python bindings for the myproject C++ library."));
        assert!(doc.ends_with("Backend: myproject_cpp (myproject C++ bindings)."));
    }
}
