// In: src/ffi/python.rs

use std::os::raw::c_int;
use std::path::PathBuf;

use log::debug;
use pyo3::prelude::*;

use crate::config::ShimConfig;
use crate::shim::{self, Shim};

//==================================================================================
// I. Native Backend Resolution
//==================================================================================

/// Directory of the installed `myproject` extension, if Python can tell us.
///
/// While the extension initializes it is not yet in `sys.modules`, so
/// `find_spec` goes through the regular finders and reports the file being
/// imported.
fn package_dir(py: Python<'_>) -> Option<PathBuf> {
    let spec = py
        .import_bound("importlib.util")
        .and_then(|util| util.call_method1("find_spec", ("myproject",)))
        .ok()?;
    if spec.is_none() {
        return None;
    }
    let origin: String = spec.getattr("origin").ok()?.extract().ok()?;
    PathBuf::from(origin).parent().map(PathBuf::from)
}

/// Loads the process-wide shim, searching next to the extension first.
pub fn load_shim(py: Python<'_>) -> PyResult<&'static Shim> {
    // Resolved before taking the init lock: no Python code runs under it.
    let dir = package_dir(py);
    if let Some(dir) = &dir {
        debug!("searching for native module in {}", dir.display());
    }
    let config = ShimConfig::default().with_package_dir(dir);
    let shim = shim::global_or_load(|| shim::load_with(&config))?;
    Ok(shim)
}

//==================================================================================
// II. Public Python Functions
//==================================================================================

/// Add one to integer
#[pyfunction]
#[pyo3(name = "add_one", signature = (value))]
pub fn add_one_py(value: c_int) -> PyResult<c_int> {
    Ok(shim::global()?.add_one(value))
}

/// Routes the crate's log output to stderr, or to `log_file` in append mode.
#[pyfunction]
#[pyo3(name = "enable_verbose_logging", signature = (log_file = None))]
pub fn enable_verbose_logging_py(log_file: Option<PathBuf>) -> PyResult<()> {
    crate::observability::init_logging(log_file.as_deref())?;
    Ok(())
}
