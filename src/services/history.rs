//! Session history persistence

use std::{fs, io, path::Path};

use tracing::info;

/// Durable storage for the session history log.
///
/// The timer core hands the sink a fully rendered text blob; how and where
/// it lands is the sink's concern. Write failures surface as plain I/O
/// errors for the caller to handle.
pub trait HistorySink: Send + Sync {
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// History sink backed by the local filesystem
#[derive(Debug, Default)]
pub struct FileHistorySink;

impl HistorySink for FileHistorySink {
    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)?;
        info!("Session history written to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sink_writes_contents_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.txt");

        FileHistorySink
            .write(&path, "Work session completed\n")
            .unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Work session completed\n"
        );
    }

    #[test]
    fn file_sink_surfaces_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        // Writing to a path whose parent does not exist fails.
        let path = dir.path().join("missing").join("history.txt");

        assert!(FileHistorySink.write(&path, "entry\n").is_err());
    }
}
