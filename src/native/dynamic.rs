//! Run-time loading of the compiled backend through `libloading`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};
use log::{debug, info};

use super::{NativeAddOne, NativeModule, ADD_ONE_SYMBOL};
use crate::config::ShimConfig;
use crate::error::ShimError;

/// A native module backed by a shared library opened with the platform loader.
///
/// The `Library` is never closed explicitly; it is released only when the
/// module is dropped, which for the process-wide shim means process teardown.
#[derive(Debug)]
pub struct DynamicModule {
    name: String,
    path: PathBuf,
    library: Library,
}

impl DynamicModule {
    /// Locates and opens the backend according to `config`.
    ///
    /// Candidates are tried in order: each configured directory, then (if
    /// enabled) the bare file name through the platform search path. A file that
    /// exists but fails to load stops the search with `LoadFailure`; running out
    /// of candidates yields `ModuleNotFound`.
    pub fn open(config: &ShimConfig) -> Result<Self, ShimError> {
        let file_name: OsString = libloading::library_filename(&config.library_name);
        let mut tried = Vec::new();

        for dir in config.candidate_dirs() {
            let candidate = dir.join(&file_name);
            if !candidate.is_file() {
                debug!("native module not at {}", candidate.display());
                tried.push(candidate);
                continue;
            }
            return Self::open_path(&config.library_name, candidate);
        }

        if config.use_system_search {
            let bare = PathBuf::from(&file_name);
            // SAFETY: the backend's initializers are trusted as part of the
            // package; no Rust invariants depend on them.
            match unsafe { Library::new(&file_name) } {
                Ok(library) => {
                    info!(
                        "loaded native module '{}' via system search",
                        config.library_name
                    );
                    return Ok(Self {
                        name: config.library_name.clone(),
                        path: bare,
                        library,
                    });
                }
                Err(err) => {
                    debug!("system search for {:?} failed: {}", file_name, err);
                    tried.push(bare);
                }
            }
        }

        Err(ShimError::ModuleNotFound {
            name: config.library_name.clone(),
            tried,
        })
    }

    /// Opens the library at exactly `path`.
    pub fn open_path(name: &str, path: impl AsRef<Path>) -> Result<Self, ShimError> {
        let path = path.as_ref().to_path_buf();
        // SAFETY: see `open`.
        let library = unsafe { Library::new(&path) }.map_err(|source| ShimError::LoadFailure {
            path: path.clone(),
            source,
        })?;
        info!("loaded native module '{}' from {}", name, path.display());
        Ok(Self {
            name: name.to_string(),
            path,
            library,
        })
    }
}

impl NativeModule for DynamicModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn origin(&self) -> String {
        self.path.display().to_string()
    }

    fn resolve_add_one(&self) -> Result<NativeAddOne, ShimError> {
        // SAFETY: the symbol is declared by the backend contract as
        // `int add_one(int)` with C linkage, which is exactly `NativeAddOne`.
        let symbol: Symbol<NativeAddOne> = unsafe {
            self.library.get(ADD_ONE_SYMBOL.as_bytes())
        }
        .map_err(|err| ShimError::SymbolResolution {
            module: self.name.clone(),
            symbol: ADD_ONE_SYMBOL.to_string(),
            reason: err.to_string(),
        })?;
        debug!("resolved '{}' in {}", ADD_ONE_SYMBOL, self.path.display());
        Ok(*symbol)
    }
}
