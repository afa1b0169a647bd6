use std::path::PathBuf;

use tracing::{info, warn};

use crate::algorithm::Algorithm;
use crate::error::CheckError;

/// Everything one check needs, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    pub algorithm: Algorithm,
    pub path: PathBuf,
    pub expected: String,
}

impl CheckConfig {
    /// Builds a config from the raw `-type` value and the positional arguments.
    ///
    /// The positional count is checked before the algorithm name is looked at,
    /// and both are checked before anything touches the filesystem.
    pub fn from_args<S: AsRef<str>>(type_name: &str, positionals: &[S]) -> Result<Self, CheckError> {
        let [path, expected] = positionals else {
            return Err(CheckError::ArgumentCount(positionals.len()));
        };

        let algorithm: Algorithm = type_name.parse()?;
        info!(algorithm = %algorithm, "using hash type");

        let want_len = algorithm.output_len() * 2;
        if expected.as_ref().len() != want_len {
            warn!(
                expected_len = expected.as_ref().len(),
                "{algorithm} digests are {want_len} hex digits long; this check cannot match"
            );
        }

        Ok(Self {
            algorithm,
            path: PathBuf::from(path.as_ref()),
            expected: expected.as_ref().to_string(),
        })
    }
}
