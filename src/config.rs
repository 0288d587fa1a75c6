//! Where and how the native backend is located.
//!
//! `ShimConfig` is created once at the package boundary and handed to the loader
//! by reference. The default value encodes the packaging convention: the backend
//! sits next to the binary that loads it, falling back to the platform loader's
//! own search path.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::NATIVE_MODULE_NAME;

/// Resolution settings for the native backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct ShimConfig {
    /// Library stem; the platform prefix and suffix are added by the loader.
    #[serde(default = "default_library_name")]
    pub library_name: String,

    /// Directories searched, in order, before anything else.
    #[serde(default)]
    pub search_dirs: Vec<PathBuf>,

    /// If true, the directory of the current executable is searched after
    /// `search_dirs`.
    #[serde(default = "default_true")]
    pub include_exe_dir: bool,

    /// If true, the bare file name is finally handed to the platform dynamic
    /// loader (`LD_LIBRARY_PATH`, `PATH`, rpath, ...).
    #[serde(default = "default_true")]
    pub use_system_search: bool,
}

impl Default for ShimConfig {
    fn default() -> Self {
        Self {
            library_name: default_library_name(),
            search_dirs: Vec::new(),
            include_exe_dir: true,
            use_system_search: true,
        }
    }
}

impl ShimConfig {
    /// A config that only looks inside `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            search_dirs: vec![dir.into()],
            include_exe_dir: false,
            use_system_search: false,
            ..Default::default()
        }
    }

    /// Puts the installed package's own directory ahead of every other
    /// search location.
    pub fn with_package_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.search_dirs.retain(|d| d != &dir);
            self.search_dirs.insert(0, dir);
        }
        self
    }

    /// The directories to probe, in order.
    pub fn candidate_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = self.search_dirs.clone();
        if self.include_exe_dir {
            if let Some(dir) = std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(PathBuf::from))
            {
                if !dirs.contains(&dir) {
                    dirs.push(dir);
                }
            }
        }
        dirs
    }
}

fn default_library_name() -> String {
    NATIVE_MODULE_NAME.to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_packaging_defaults() {
        let config: ShimConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ShimConfig::default());
        assert_eq!(config.library_name, "myproject_cpp");
        assert!(config.include_exe_dir);
        assert!(config.use_system_search);
    }

    #[test]
    fn partial_document_keeps_remaining_defaults() {
        let config: ShimConfig =
            serde_json::from_str(r#"{"search_dirs": ["/opt/myproject/lib"], "use_system_search": false}"#)
                .unwrap();
        assert_eq!(config.search_dirs, vec![PathBuf::from("/opt/myproject/lib")]);
        assert!(!config.use_system_search);
        assert_eq!(config.library_name, "myproject_cpp");
    }

    #[test]
    fn in_dir_searches_only_that_dir() {
        let config = ShimConfig::in_dir("/tmp/backend");
        assert_eq!(config.candidate_dirs(), vec![PathBuf::from("/tmp/backend")]);
        assert!(!config.use_system_search);
    }

    #[test]
    fn package_dir_is_searched_first() {
        let config = ShimConfig {
            search_dirs: vec![PathBuf::from("/opt/lib"), PathBuf::from("/site/myproject")],
            ..Default::default()
        }
        .with_package_dir(Some(PathBuf::from("/site/myproject")));
        assert_eq!(
            config.search_dirs,
            vec![PathBuf::from("/site/myproject"), PathBuf::from("/opt/lib")]
        );

        let unchanged = ShimConfig::default().with_package_dir(None);
        assert_eq!(unchanged, ShimConfig::default());
    }

    #[test]
    fn explicit_dirs_come_before_exe_dir() {
        let config = ShimConfig {
            search_dirs: vec![PathBuf::from("/first")],
            ..Default::default()
        };
        let dirs = config.candidate_dirs();
        assert_eq!(dirs[0], PathBuf::from("/first"));
    }
}
