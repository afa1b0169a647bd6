use tracing::info;

use crate::config::CheckConfig;
use crate::error::CheckError;
use crate::hashing::digest_file;
use crate::report::{now_utc, Verification};

/// Hashes the configured file and compares it with the expected digest.
///
/// The comparison is exact: case-sensitive and byte-for-byte.
pub fn verify(config: &CheckConfig) -> Result<Verification, CheckError> {
    let digest = digest_file(config.algorithm, &config.path)?;
    let matched = digest.hex == config.expected;

    info!(
        path = %config.path.display(),
        bytes = digest.bytes_read,
        matched,
        "check finished"
    );

    Ok(Verification {
        algorithm: config.algorithm,
        path: config.path.clone(),
        expected: config.expected.clone(),
        actual: digest.hex,
        bytes_read: digest.bytes_read,
        matched,
        checked_utc: now_utc(),
    })
}
