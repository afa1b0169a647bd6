pub mod algorithm;
pub mod config;
pub mod error;
pub mod hashing;
pub mod report;
pub mod verify;

pub use algorithm::Algorithm;
pub use config::CheckConfig;
pub use error::CheckError;
pub use report::Verification;
pub use verify::verify;
