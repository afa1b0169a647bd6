use serde::Serialize;
use std::path::PathBuf;

use crate::algorithm::Algorithm;

/// Outcome of one check. `matched == false` is a verdict, not a failure.
#[derive(Debug, Clone, Serialize)]
pub struct Verification {
    pub algorithm: Algorithm,
    pub path: PathBuf,
    pub expected: String,
    pub actual: String,
    pub bytes_read: u64,
    pub matched: bool,
    pub checked_utc: String,
}

impl Verification {
    pub fn verdict(&self) -> &'static str {
        if self.matched {
            "SAME"
        } else {
            "DIFFERENT"
        }
    }
}

pub(crate) fn now_utc() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string())
}
