//! The re-export shim: binds the native entry point once and forwards to it.
//!
//! A `Shim` only exists in the *Loaded* state. Construction resolves every
//! entry point and validates the export list up front, so there is no
//! partially-initialized value a caller could observe.

use std::fmt;
use std::os::raw::c_int;
use std::sync::{Mutex, OnceLock, PoisonError};

use log::{debug, info};

use crate::config::ShimConfig;
use crate::error::ShimError;
use crate::exports;
use crate::native::{DynamicModule, NativeAddOne, NativeModule};
use crate::VERSION;

//==================================================================================
// 1. The Loaded Shim
//==================================================================================

pub struct Shim {
    // Owns the handle that keeps `add_one` callable.
    module: Box<dyn NativeModule>,
    add_one: NativeAddOne,
}

impl Shim {
    /// Binds the public surface to `module`.
    pub fn load(module: impl NativeModule + 'static) -> Result<Self, ShimError> {
        let module: Box<dyn NativeModule> = Box::new(module);
        let add_one = module.resolve_add_one()?;
        let shim = Self { module, add_one };
        exports::validate(&shim)?;
        info!(
            "myproject {} bound to native module '{}' ({})",
            VERSION,
            shim.module.name(),
            shim.module.origin()
        );
        Ok(shim)
    }

    /// Calls the native `add_one` with `value` and returns its result as is.
    #[inline]
    pub fn add_one(&self, value: c_int) -> c_int {
        // SAFETY: `add_one` was resolved from `self.module`, which is alive for
        // as long as `self`, and has the C signature declared by the backend.
        unsafe { (self.add_one)(value) }
    }

    /// The package version. Independent of the native module's version.
    pub fn version(&self) -> &'static str {
        VERSION
    }

    /// The bound native entry point, for identity checks.
    pub fn entry_point(&self) -> NativeAddOne {
        self.add_one
    }

    pub fn native_name(&self) -> &str {
        self.module.name()
    }

    pub fn native_origin(&self) -> String {
        self.module.origin()
    }
}

impl fmt::Debug for Shim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shim")
            .field("version", &VERSION)
            .field("native", &self.module.name())
            .field("origin", &self.module.origin())
            .finish()
    }
}

/// Opens the dynamic backend described by `config` and binds a shim to it.
pub fn load_with(config: &ShimConfig) -> Result<Shim, ShimError> {
    Shim::load(DynamicModule::open(config)?)
}

//==================================================================================
// 2. One-Shot Initialization
//==================================================================================

/// A slot that is loaded at most once and then handed out by reference.
///
/// Concurrent first accesses are serialized so only one loader runs. A failed
/// load leaves the slot empty; the error goes to the caller that triggered it
/// and the next access tries again.
pub struct ShimCell {
    slot: OnceLock<Shim>,
    init: Mutex<()>,
}

impl ShimCell {
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// The loaded shim, if initialization already happened.
    pub fn get(&self) -> Option<&Shim> {
        self.slot.get()
    }

    pub fn get_or_load<F>(&self, loader: F) -> Result<&Shim, ShimError>
    where
        F: FnOnce() -> Result<Shim, ShimError>,
    {
        if let Some(shim) = self.slot.get() {
            return Ok(shim);
        }

        let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(shim) = self.slot.get() {
            return Ok(shim);
        }

        debug!("initializing myproject shim");
        let shim = loader()?;
        Ok(self.slot.get_or_init(|| shim))
    }
}

static GLOBAL: ShimCell = ShimCell::new();

/// The process-wide shim, loaded from the default location on first use.
pub fn global() -> Result<&'static Shim, ShimError> {
    GLOBAL.get_or_load(|| load_with(&ShimConfig::default()))
}

/// The process-wide shim, loaded with `loader` if nothing is loaded yet.
///
/// Once the global shim exists, `loader` is ignored.
pub fn global_or_load<F>(loader: F) -> Result<&'static Shim, ShimError>
where
    F: FnOnce() -> Result<Shim, ShimError>,
{
    GLOBAL.get_or_load(loader)
}

//==================================================================================
// 3. Public Forwarding Function
//==================================================================================

/// Adds one to `value` using the native backend.
///
/// Fails only if the backend cannot be loaded. The result is the native
/// function's return value, unmodified.
pub fn add_one(value: c_int) -> Result<c_int, ShimError> {
    Ok(global()?.add_one(value))
}
