//! Native entry points that are already linked into the process.

use super::{NativeAddOne, NativeModule, ADD_ONE_SYMBOL};
use crate::error::ShimError;

/// A native module whose entry points were registered explicitly.
///
/// Use this when the backend is linked statically, or to stand in for the
/// backend in tests.
#[derive(Debug, Clone, Copy)]
pub struct StaticModule {
    name: &'static str,
    add_one: Option<NativeAddOne>,
}

impl StaticModule {
    /// A module with no entry points registered.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            add_one: None,
        }
    }

    pub fn with_add_one(mut self, entry: NativeAddOne) -> Self {
        self.add_one = Some(entry);
        self
    }
}

impl NativeModule for StaticModule {
    fn name(&self) -> &str {
        self.name
    }

    fn origin(&self) -> String {
        "<static>".to_string()
    }

    fn resolve_add_one(&self) -> Result<NativeAddOne, ShimError> {
        self.add_one.ok_or_else(|| ShimError::SymbolResolution {
            module: self.name.to_string(),
            symbol: ADD_ONE_SYMBOL.to_string(),
            reason: "entry point not registered".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::raw::c_int;

    extern "C" fn plus_one(value: c_int) -> c_int {
        value + 1
    }

    #[test]
    fn registered_entry_point_resolves() {
        let module = StaticModule::new("myproject_cpp").with_add_one(plus_one);
        let entry = module.resolve_add_one().unwrap();
        assert_eq!(unsafe { entry(41) }, 42);
        assert_eq!(module.origin(), "<static>");
    }

    #[test]
    fn missing_entry_point_is_symbol_resolution_failure() {
        let err = StaticModule::new("myproject_cpp")
            .resolve_add_one()
            .unwrap_err();
        assert!(matches!(
            err,
            ShimError::SymbolResolution { ref symbol, .. } if symbol == "add_one"
        ));
    }
}
