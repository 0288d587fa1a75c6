//! The boundary to the opaque native backend.
//!
//! The backend is an external collaborator. All this crate knows about it is the
//! narrow contract below: a module that can hand out one C-ABI entry point,
//! `add_one`, with the signature of `int myproject::add_one(int)`.
//!
//! Two implementations exist:
//! - `DynamicModule`: the compiled `myproject_cpp` library opened at run time.
//! - `StaticModule`: entry points linked into the current process and registered
//!   by hand (embedding, tests, benchmarks).

use std::os::raw::c_int;

use crate::error::ShimError;

mod dynamic;
mod static_module;

pub use dynamic::DynamicModule;
pub use static_module::StaticModule;

/// Name of the native entry point re-exported as `add_one`.
pub const ADD_ONE_SYMBOL: &str = "add_one";

/// C-ABI signature of the native `add_one`.
pub type NativeAddOne = unsafe extern "C" fn(c_int) -> c_int;

/// A loaded native module.
///
/// Implementations own whatever keeps the entry points valid (for a shared
/// library, the library handle itself), so a resolved pointer stays callable for
/// as long as the module is alive.
pub trait NativeModule: Send + Sync {
    /// The module's name, for diagnostics.
    fn name(&self) -> &str;

    /// Where the module came from: a file path, or `<static>`.
    fn origin(&self) -> String;

    /// Looks up the `add_one` entry point.
    fn resolve_add_one(&self) -> Result<NativeAddOne, ShimError>;
}
