//! Logging setup for the shim.
//!
//! The crate logs through the `log` facade; nothing is printed until a logger is
//! installed. `init_logging` installs `env_logger` once per process with a
//! compact `[LEVEL] message` format, optionally appending to a file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Once;

use log::LevelFilter;

use crate::error::ShimError;

static INIT_LOGGER: Once = Once::new();

/// Installs the process-wide logger at `Info` level.
///
/// `RUST_LOG` still overrides the level. Only the first successful call has an
/// effect; later calls return `Ok(())` without touching the logger.
pub fn init_logging(log_file: Option<&Path>) -> Result<(), ShimError> {
    // Opened up front so a bad path is reported instead of swallowed.
    let file = match log_file {
        Some(path) => Some(OpenOptions::new().append(true).create(true).open(path)?),
        None => None,
    };

    INIT_LOGGER.call_once(move || {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(LevelFilter::Info);
        builder.parse_env(env_logger::Env::default());

        builder.format(|buf, record| {
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        if let Some(file) = file {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        let _ = builder.try_init();
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwritable_log_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-dir").join("shim.log");
        let err = init_logging(Some(&missing)).unwrap_err();
        assert!(matches!(err, ShimError::Io(_)));
    }

    #[test]
    fn repeated_initialization_is_harmless() {
        assert!(init_logging(None).is_ok());
        assert!(init_logging(None).is_ok());
    }
}
