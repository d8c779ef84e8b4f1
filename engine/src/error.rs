//! Registry construction errors.

use datareg_hostapi::ConfigError;
use datareg_primitives::CallError;

/// Error returned by `Registry` constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The store configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The initializing call reverted.
    #[error("initialization reverted: {0}")]
    Call(#[from] CallError),
}
