use std::path::PathBuf;

/// Failures at the scanner I/O boundary.
///
/// These never escape [`crate::scan::Scanner::scan`], which logs them and
/// returns an empty result instead; `try_scan` exposes them for callers and
/// tests that need to tell "nothing there" from "nothing found".
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("scan root does not exist: {}", .0.display())]
    RootMissing(PathBuf),

    #[error("failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type ScanResult<T> = std::result::Result<T, ScanError>;
