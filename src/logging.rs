use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::filter::EnvFilter;

use crate::error::Result;

const DEFAULT_DIRECTIVES: &str = "ascii_pacman=info";

/// Where log lines go. The interactive game owns the terminal, so it never logs to stderr.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    Off,
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Installs the global subscriber. A second call keeps the first subscriber.
pub fn init(target: LogTarget) -> Result<()> {
    match target {
        LogTarget::Off => {}
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_target_creates_the_log_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("pacman.log");
        init(LogTarget::File(path.clone())).expect("logging init");
        assert!(path.exists());
    }

    #[test]
    fn unwritable_log_path_is_an_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing").join("pacman.log");
        assert!(init(LogTarget::File(path)).is_err());
    }
}
