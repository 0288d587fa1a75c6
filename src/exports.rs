//! The package's contractual public surface.
//!
//! `EXPORTS` plays the role of `__all__`: the names a wildcard import sees and
//! the only names covered by compatibility guarantees. Anything else reachable
//! from the package (the native handle, logging helpers) is implementation
//! detail.

use crate::error::ShimError;
use crate::native::NativeAddOne;
use crate::shim::Shim;

/// The explicit export list, in declaration order.
pub const EXPORTS: &[&str] = &["add_one", "__version__"];

/// The value bound to an exported name.
#[derive(Debug, Clone, Copy)]
pub enum PublicSymbol {
    /// A callable forwarding to the native backend.
    Function(NativeAddOne),
    /// A string constant.
    Str(&'static str),
}

/// The value a shim binds to `name`, whether or not `name` is exported.
fn resolve(shim: &Shim, name: &str) -> Option<PublicSymbol> {
    match name {
        "add_one" => Some(PublicSymbol::Function(shim.entry_point())),
        "__version__" => Some(PublicSymbol::Str(shim.version())),
        _ => None,
    }
}

/// Resolves one name against a loaded shim.
///
/// Returns `None` for names outside `EXPORTS`, even if the shim could answer
/// them.
pub fn lookup(shim: &Shim, name: &str) -> Option<PublicSymbol> {
    if !EXPORTS.contains(&name) {
        return None;
    }
    resolve(shim, name)
}

/// Checks that every name in `names` resolves to a concrete value.
///
/// An empty string constant counts as unresolved.
pub fn validate_names(shim: &Shim, names: &[&str]) -> Result<(), ShimError> {
    for name in names {
        match resolve(shim, name) {
            Some(PublicSymbol::Str(value)) if value.is_empty() => {
                return Err(ShimError::ExportUnresolved(name.to_string()))
            }
            Some(_) => {}
            None => return Err(ShimError::ExportUnresolved(name.to_string())),
        }
    }
    Ok(())
}

/// Checks that every exported name resolves to a concrete value.
pub fn validate(shim: &Shim) -> Result<(), ShimError> {
    validate_names(shim, EXPORTS)
}

/// What `from myproject import *` binds: exactly the export list, in order.
pub fn wildcard(shim: &Shim) -> Vec<(&'static str, PublicSymbol)> {
    EXPORTS
        .iter()
        .filter_map(|name| lookup(shim, name).map(|symbol| (*name, symbol)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::StaticModule;
    use std::os::raw::c_int;

    extern "C" fn plus_one(value: c_int) -> c_int {
        value + 1
    }

    fn shim() -> Shim {
        Shim::load(StaticModule::new("myproject_cpp").with_add_one(plus_one)).unwrap()
    }

    #[test]
    fn export_list_is_exactly_the_public_names() {
        assert_eq!(EXPORTS, &["add_one", "__version__"]);
    }

    #[test]
    fn wildcard_binds_only_exported_names() {
        let shim = shim();
        let bound = wildcard(&shim);
        let names: Vec<&str> = bound.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, EXPORTS);
        assert!(matches!(bound[1].1, PublicSymbol::Str(v) if v == crate::VERSION));
    }

    #[test]
    fn names_outside_the_list_are_not_resolved() {
        let shim = shim();
        assert!(lookup(&shim, "_native").is_none());
        assert!(lookup(&shim, "enable_verbose_logging").is_none());
        assert!(lookup(&shim, "myproject_cpp").is_none());
    }

    #[test]
    fn exported_function_is_the_native_entry_point() {
        let shim = shim();
        match lookup(&shim, "add_one") {
            Some(PublicSymbol::Function(f)) => {
                assert!(std::ptr::fn_addr_eq(f, plus_one as NativeAddOne));
                assert_eq!(unsafe { f(5) }, 6);
            }
            other => panic!("unexpected binding {other:?}"),
        }
    }

    #[test]
    fn loaded_shim_validates() {
        assert!(validate(&shim()).is_ok());
    }

    #[test]
    fn unbound_name_fails_validation() {
        let err = validate_names(&shim(), &["add_one", "multiply"]).unwrap_err();
        match err {
            ShimError::ExportUnresolved(name) => assert_eq!(name, "multiply"),
            other => panic!("expected ExportUnresolved, got {other:?}"),
        }
    }
}
