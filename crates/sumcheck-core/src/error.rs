use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a check before a verdict is reached.
///
/// A digest mismatch is not listed here: it is a normal outcome carried by
/// [`crate::Verification::matched`].
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("bad number of args: {0} (expected <filepath> <expected-hex-digest>)")]
    ArgumentCount(usize),

    #[error("invalid hash type: {0} (supported: sha224, sha256, sha384, sha512)")]
    UnsupportedAlgorithm(String),

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CheckError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
