//! Error types for hapticctl

use hapticore_errors::{ErrorCategory, HapticsError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Haptics(#[from] HapticsError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::InvalidArgument(_) | CliError::JsonError(_) => 4,
            CliError::IoError(_) => 3,
            CliError::Haptics(error) => match error.category() {
                ErrorCategory::Waveform | ErrorCategory::Catalog | ErrorCategory::Feedback => 4,
                ErrorCategory::Config | ErrorCategory::IO => 3,
                ErrorCategory::Device => 5,
                _ => 1,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hapticore_errors::{CatalogError, DeviceError};

    #[test]
    fn exit_codes_by_category() {
        let unknown: CliError = HapticsError::from(CatalogError::unknown_name("x")).into();
        assert_eq!(unknown.exit_code(), 4);

        let device: CliError = HapticsError::from(DeviceError::UnsupportedDevice).into();
        assert_eq!(device.exit_code(), 5);

        let config: CliError = HapticsError::config("bad").into();
        assert_eq!(config.exit_code(), 3);

        assert_eq!(CliError::InvalidArgument("x".into()).exit_code(), 4);
    }
}
